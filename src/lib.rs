//! A self-balancing ordered binary search tree (an AVL tree) with
//! parent-linked nodes.
//!
//! ## AVL trees
//!
//! A Binary Search Tree stores ordered items in `Node`s where every `Node`
//! in a node's left subtree holds an item less than its own and every `Node`
//! in its right subtree holds an item greater than its own. That alone makes
//! lookup `O(height)` but says nothing about what the height _is_ - insert
//! an ascending run of items into a naive BST and it degenerates into a
//! linked list.
//!
//! An AVL tree additionally maintains, for every node, that the heights of
//! its two subtrees differ by at most one. After each insertion the tree
//! walks back toward the root recomputing cached heights and, where that
//! balance invariant breaks, restores it with one of four local rotations.
//! The result is a guaranteed `O(lg N)` height, so lookup, insertion, and
//! minimum/maximum/predecessor/successor navigation are all logarithmic.
//!
//! The [`shared`] module holds the implementation: a shared-ownership tree
//! whose nodes keep a non-owning back-reference to their parent. Parent
//! links let predecessor/successor navigation start from any node handle
//! without searching from the root.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod shared;

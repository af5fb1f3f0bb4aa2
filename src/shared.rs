//! A shared-ownership AVL tree. Children own their subtrees through
//! reference-counted links while every node keeps a [`Weak`] back-reference
//! to its parent, mirroring the classic `shared_ptr`/`weak_ptr` node layout.
//! The parent links never participate in ownership, so dropping the root
//! releases the whole structure without reference cycles, and they let
//! predecessor/successor navigation start from any node handle instead of
//! re-descending from the root.
//!
//! # Examples
//!
//! ```
//! use avl::shared::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&2).is_none());
//!
//! for item in [2, 1, 3] {
//!     tree.insert(item);
//! }
//! assert_eq!(tree.inorder(), vec![1, 2, 3]);
//!
//! // Inserting an item that is already present is a no-op.
//! assert!(!tree.insert(2));
//! assert_eq!(tree.count(), 3);
//!
//! // Handles walk the tree in sorted order via parent links.
//! let two = tree.find(&2).unwrap();
//! let three = tree.next_largest_node(Some(&two)).unwrap();
//! assert_eq!(*three.item(), 3);
//! ```

use std::cell::{Ref, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

type NodeRef<T> = Rc<RefCell<Node<T>>>;
type Link<T> = Option<NodeRef<T>>;

/// A self-balancing Binary Search Tree (specifically, an AVL tree). This can
/// be used for inserting and finding items, iterating over them in sorted
/// order, and navigating between neighboring items via [`NodeHandle`]s.
///
/// Items are unique per the tree's ordering: inserting an item equal to one
/// already stored leaves the tree untouched. There is no single-item
/// deletion; [`clear`][Tree::clear] drops the whole structure at once.
pub struct Tree<T> {
    root: Link<T>,
    count: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    /// Deep copy: the new tree allocates fresh nodes with equal items and
    /// heights and rebuilds the parent back-references, so mutating either
    /// tree afterwards cannot affect the other.
    fn clone(&self) -> Self {
        Self {
            root: Self::clone_nodes(&self.root),
            count: self.count,
        }
    }

    /// Replaces `self`'s contents wholesale with a deep copy of `source`.
    fn clone_from(&mut self, source: &Self) {
        self.root = Self::clone_nodes(&source.root);
        self.count = source.count;
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("count", &self.count)
            .field("root", &self.root.as_ref().map(|root| root.borrow()))
            .finish()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            count: 0,
        }
    }

    /// The number of items stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.count(), 0);
    ///
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.count(), 2);
    /// ```
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The height of the tree: `-1` when empty, `0` for a single node, and
    /// `1 + max(height(left), height(right))` in general. Bounded by
    /// `O(lg N)` thanks to the balance invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.insert(1);
    /// assert_eq!(tree.height(), 0);
    /// ```
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Removes every item from the tree. Safe to call on an empty tree.
    ///
    /// Dropping the root link releases the entire node graph - parent
    /// references are `Weak` and hold nothing alive.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.clear();
    ///
    /// assert_eq!(tree.count(), 0);
    /// assert!(tree.find(&1).is_none());
    /// ```
    pub fn clear(&mut self) {
        self.root = None;
        self.count = 0;
    }

    /// Inserts the given item into the tree, rebalancing as needed, and
    /// returns whether the tree changed. Inserting an item equal to one
    /// already stored is a silent no-op returning `false`: the structure and
    /// [`count`][Tree::count] are unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.count(), 1);
    /// ```
    pub fn insert(&mut self, item: T) -> bool
    where
        T: Ord,
    {
        let inserted = Self::insert_at(&mut self.root, item);
        if inserted {
            self.count += 1;
        }
        inserted
    }

    /// Potentially finds the node holding the given item. If no node holds
    /// an equal item, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(*tree.find(&1).unwrap().item(), 1);
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, item: &T) -> Option<NodeHandle<T>>
    where
        T: Ord,
    {
        Self::find_at(&self.root, item).map(NodeHandle)
    }

    /// The node holding the minimum item, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(tree.minimum_node().is_none());
    ///
    /// for item in [2, 1, 3] {
    ///     tree.insert(item);
    /// }
    /// assert_eq!(*tree.minimum_node().unwrap().item(), 1);
    /// ```
    pub fn minimum_node(&self) -> Option<NodeHandle<T>> {
        Self::minimum_at(&self.root).map(NodeHandle)
    }

    /// The node holding the maximum item, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for item in [2, 1, 3] {
    ///     tree.insert(item);
    /// }
    /// assert_eq!(*tree.maximum_node().unwrap().item(), 3);
    /// ```
    pub fn maximum_node(&self) -> Option<NodeHandle<T>> {
        Self::maximum_at(&self.root).map(NodeHandle)
    }

    /// The node holding the next smallest item relative to the given node
    /// (its in-order predecessor). Returns `None` when given `None` or when
    /// the node holds the minimum item of its tree.
    ///
    /// If the node has a left subtree the predecessor is that subtree's
    /// maximum. Otherwise it is the first ancestor reached from the right,
    /// found by climbing parent links while the current node is a left
    /// child.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for item in [2, 1, 3] {
    ///     tree.insert(item);
    /// }
    ///
    /// let two = tree.find(&2).unwrap();
    /// let one = tree.next_smallest_node(Some(&two)).unwrap();
    /// assert_eq!(*one.item(), 1);
    ///
    /// assert!(tree.next_smallest_node(Some(&one)).is_none());
    /// assert!(tree.next_smallest_node(None).is_none());
    /// ```
    pub fn next_smallest_node(&self, node: Option<&NodeHandle<T>>) -> Option<NodeHandle<T>> {
        let start = &node?.0;

        let left = start.borrow().left.clone();
        if left.is_some() {
            return Self::maximum_at(&left).map(NodeHandle);
        }

        let mut current = Rc::clone(start);
        loop {
            let parent = current.borrow().parent.upgrade()?;
            let is_left_child = {
                let p = parent.borrow();
                p.left
                    .as_ref()
                    .map_or(false, |left| Rc::ptr_eq(left, &current))
            };
            if is_left_child {
                current = parent;
            } else {
                return Some(NodeHandle(parent));
            }
        }
    }

    /// The node holding the next largest item relative to the given node
    /// (its in-order successor). Returns `None` when given `None` or when
    /// the node holds the maximum item of its tree.
    ///
    /// The mirror image of [`next_smallest_node`][Tree::next_smallest_node]:
    /// the minimum of the right subtree if there is one, else the first
    /// ancestor reached from the left.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for item in [2, 1, 3] {
    ///     tree.insert(item);
    /// }
    ///
    /// let two = tree.find(&2).unwrap();
    /// let three = tree.next_largest_node(Some(&two)).unwrap();
    /// assert_eq!(*three.item(), 3);
    ///
    /// assert!(tree.next_largest_node(Some(&three)).is_none());
    /// assert!(tree.next_largest_node(None).is_none());
    /// ```
    pub fn next_largest_node(&self, node: Option<&NodeHandle<T>>) -> Option<NodeHandle<T>> {
        let start = &node?.0;

        let right = start.borrow().right.clone();
        if right.is_some() {
            return Self::minimum_at(&right).map(NodeHandle);
        }

        let mut current = Rc::clone(start);
        loop {
            let parent = current.borrow().parent.upgrade()?;
            let is_right_child = {
                let p = parent.borrow();
                p.right
                    .as_ref()
                    .map_or(false, |right| Rc::ptr_eq(right, &current))
            };
            if is_right_child {
                current = parent;
            } else {
                return Some(NodeHandle(parent));
            }
        }
    }

    /// The items of the tree in in-order (left, root, right), which for a
    /// BST is ascending sorted order. An empty tree yields an empty vec.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for item in [2, 3, 1] {
    ///     tree.insert(item);
    /// }
    /// assert_eq!(tree.inorder(), vec![1, 2, 3]);
    /// ```
    pub fn inorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut items = Vec::with_capacity(self.count);
        Self::inorder_at(&self.root, &mut items);
        items
    }

    /// The items of the tree in pre-order (root, left, right).
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for item in [2, 3, 1] {
    ///     tree.insert(item);
    /// }
    /// assert_eq!(tree.preorder(), vec![2, 1, 3]);
    /// ```
    pub fn preorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut items = Vec::with_capacity(self.count);
        Self::preorder_at(&self.root, &mut items);
        items
    }

    /// The items of the tree in post-order (left, right, root).
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for item in [2, 3, 1] {
    ///     tree.insert(item);
    /// }
    /// assert_eq!(tree.postorder(), vec![1, 3, 2]);
    /// ```
    pub fn postorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut items = Vec::with_capacity(self.count);
        Self::postorder_at(&self.root, &mut items);
        items
    }

    /// A lazy in-order iterator over the tree's nodes. Unlike
    /// [`inorder`][Tree::inorder] this yields [`NodeHandle`]s and does not
    /// materialize the whole sequence up front.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::shared::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for item in [2, 3, 1] {
    ///     tree.insert(item);
    /// }
    ///
    /// let items: Vec<i32> = tree.iter().map(|node| *node.item()).collect();
    /// assert_eq!(items, vec![1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let mut stack = Vec::new();
        push_left_spine(self.root.clone(), &mut stack);
        Iter {
            stack,
            tree: PhantomData,
        }
    }

    /// Inserts `item` into the subtree hanging off `link`, then restores the
    /// AVL invariant on the way back out. Rotations may replace the subtree
    /// root, which is why this takes the owning link rather than a node.
    fn insert_at(link: &mut Link<T>, item: T) -> bool
    where
        T: Ord,
    {
        let node = match link {
            Some(node) => Rc::clone(node),
            None => {
                *link = Some(Node::new(item));
                return true;
            }
        };

        let branch = item.cmp(&node.borrow().item);
        let inserted = match branch {
            Ordering::Less => {
                let mut n = node.borrow_mut();
                let inserted = Self::insert_at(&mut n.left, item);
                // The recursion may have created a leaf or rotated a new
                // root into place; either way the child's back-reference
                // must point here.
                if let Some(left) = &n.left {
                    left.borrow_mut().parent = Rc::downgrade(&node);
                }
                inserted
            }
            Ordering::Equal => false,
            Ordering::Greater => {
                let mut n = node.borrow_mut();
                let inserted = Self::insert_at(&mut n.right, item);
                if let Some(right) = &n.right {
                    right.borrow_mut().parent = Rc::downgrade(&node);
                }
                inserted
            }
        };

        if !inserted {
            return false;
        }

        update_height(&node);

        // See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for
        // terminology. The child's balance-factor sign picks between the
        // single- and double-rotation cases.
        let factor = balance_factor(&node);
        if factor > 1 {
            let left = {
                let n = node.borrow();
                Rc::clone(n.left.as_ref().expect("left-heavy node has a left child"))
            };
            if balance_factor(&left) >= 0 {
                Self::rotate_right(link);
            } else {
                Self::rotate_left_right(link);
            }
        } else if factor < -1 {
            let right = {
                let n = node.borrow();
                Rc::clone(n.right.as_ref().expect("right-heavy node has a right child"))
            };
            if balance_factor(&right) <= 0 {
                Self::rotate_left(link);
            } else {
                Self::rotate_right_left(link);
            }
        }

        if cfg!(debug_assertions) {
            let root = link.as_ref().expect("insertion leaves a subtree root");
            let (left_height, right_height) = {
                let n = root.borrow();
                (height(&n.left), height(&n.right))
            };
            assert_eq!(root.borrow().height, left_height.max(right_height) + 1);
            assert!((left_height - right_height).abs() <= 1);
        }

        true
    }

    fn find_at(link: &Link<T>, item: &T) -> Link<T>
    where
        T: Ord,
    {
        let node = link.as_ref()?;
        let branch = item.cmp(&node.borrow().item);
        match branch {
            Ordering::Less => Self::find_at(&node.borrow().left, item),
            Ordering::Equal => Some(Rc::clone(node)),
            Ordering::Greater => Self::find_at(&node.borrow().right, item),
        }
    }

    /// Follow left children until none remain.
    fn minimum_at(link: &Link<T>) -> Link<T> {
        let mut current = Rc::clone(link.as_ref()?);
        loop {
            let left = current.borrow().left.clone();
            match left {
                Some(left) => current = left,
                None => return Some(current),
            }
        }
    }

    /// Follow right children until none remain.
    fn maximum_at(link: &Link<T>) -> Link<T> {
        let mut current = Rc::clone(link.as_ref()?);
        loop {
            let right = current.borrow().right.clone();
            match right {
                Some(right) => current = right,
                None => return Some(current),
            }
        }
    }

    fn inorder_at(link: &Link<T>, items: &mut Vec<T>)
    where
        T: Clone,
    {
        if let Some(node) = link {
            let node = node.borrow();
            Self::inorder_at(&node.left, items);
            items.push(node.item.clone());
            Self::inorder_at(&node.right, items);
        }
    }

    fn preorder_at(link: &Link<T>, items: &mut Vec<T>)
    where
        T: Clone,
    {
        if let Some(node) = link {
            let node = node.borrow();
            items.push(node.item.clone());
            Self::preorder_at(&node.left, items);
            Self::preorder_at(&node.right, items);
        }
    }

    fn postorder_at(link: &Link<T>, items: &mut Vec<T>)
    where
        T: Clone,
    {
        if let Some(node) = link {
            let node = node.borrow();
            Self::postorder_at(&node.left, items);
            Self::postorder_at(&node.right, items);
            items.push(node.item.clone());
        }
    }

    /// Recursively deep-copies the subtree at `link`, rebuilding parent
    /// back-references and carrying the cached heights over.
    fn clone_nodes(link: &Link<T>) -> Link<T>
    where
        T: Clone,
    {
        let node = link.as_ref()?;
        let node = node.borrow();

        let new_node = Node::new(node.item.clone());
        {
            let mut n = new_node.borrow_mut();
            n.left = Self::clone_nodes(&node.left);
            if let Some(left) = &n.left {
                left.borrow_mut().parent = Rc::downgrade(&new_node);
            }
            n.right = Self::clone_nodes(&node.right);
            if let Some(right) = &n.right {
                right.borrow_mut().parent = Rc::downgrade(&new_node);
            }
            n.height = node.height;
        }
        Some(new_node)
    }

    /// Rotate the subtree at `link` to the left. This moves the right child
    /// up vertically and the old root down vertically. Used to rebalance
    /// when the right subtree is too tall; a no-op if there is no right
    /// child to lift.
    ///
    /// # Diagram
    ///
    /// Roughly speaking, we want to perform this transformation:
    ///
    /// ```text
    ///   old_root                 new_root
    ///    /     \                  /     \
    ///   x     new_root  ->    old_root   z
    ///          /  \            /  \
    ///         y    z          x    y
    /// ```
    fn rotate_left(link: &mut Link<T>) {
        let node = match link {
            Some(node) => Rc::clone(node),
            None => return,
        };
        let right = {
            let n = node.borrow();
            match &n.right {
                Some(right) => Rc::clone(right),
                None => return,
            }
        };

        // The new root's left subtree moves over to become the old root's
        // right subtree.
        let moved = right.borrow_mut().left.take();
        if let Some(moved) = &moved {
            moved.borrow_mut().parent = Rc::downgrade(&node);
        }
        node.borrow_mut().right = moved;

        // The new root takes the old root's place in the parent chain.
        let old_parent = {
            let n = node.borrow();
            Weak::clone(&n.parent)
        };
        right.borrow_mut().parent = old_parent;
        node.borrow_mut().parent = Rc::downgrade(&right);

        // Recompute heights child-before-parent.
        update_height(&node);
        right.borrow_mut().left = Some(node);
        update_height(&right);
        *link = Some(right);
    }

    /// Rotate the subtree at `link` to the right: the mirror image of
    /// [`rotate_left`][Tree::rotate_left], lifting the left child when the
    /// left subtree is too tall. A no-op if there is no left child.
    fn rotate_right(link: &mut Link<T>) {
        let node = match link {
            Some(node) => Rc::clone(node),
            None => return,
        };
        let left = {
            let n = node.borrow();
            match &n.left {
                Some(left) => Rc::clone(left),
                None => return,
            }
        };

        let moved = left.borrow_mut().right.take();
        if let Some(moved) = &moved {
            moved.borrow_mut().parent = Rc::downgrade(&node);
        }
        node.borrow_mut().left = moved;

        let old_parent = {
            let n = node.borrow();
            Weak::clone(&n.parent)
        };
        left.borrow_mut().parent = old_parent;
        node.borrow_mut().parent = Rc::downgrade(&left);

        update_height(&node);
        left.borrow_mut().right = Some(node);
        update_height(&left);
        *link = Some(left);
    }

    /// The Right-Left double rotation: rotate the right child right, then
    /// the subtree root left.
    fn rotate_right_left(link: &mut Link<T>) {
        let node = match link {
            Some(node) => Rc::clone(node),
            None => return,
        };
        if node.borrow().right.is_none() {
            return;
        }
        Self::rotate_right(&mut node.borrow_mut().right);
        Self::rotate_left(link);
    }

    /// The Left-Right double rotation: rotate the left child left, then the
    /// subtree root right.
    fn rotate_left_right(link: &mut Link<T>) {
        let node = match link {
            Some(node) => Rc::clone(node),
            None => return,
        };
        if node.borrow().left.is_none() {
            return;
        }
        Self::rotate_left(&mut node.borrow_mut().left);
        Self::rotate_right(link);
    }
}

/// A handle to a node stored in a [`Tree`]. Handles are cheap to clone and
/// compare by *identity*: two handles are equal iff they refer to the same
/// node, not merely to equal items.
///
/// # Examples
///
/// ```
/// use avl::shared::Tree;
///
/// let mut tree = Tree::new();
/// tree.insert(1);
///
/// let a = tree.find(&1).unwrap();
/// let b = tree.minimum_node().unwrap();
/// assert_eq!(a, b);
///
/// let other = {
///     let mut tree = Tree::new();
///     tree.insert(1);
///     tree.find(&1).unwrap()
/// };
/// // Equal items, different nodes.
/// assert_ne!(a, other);
/// ```
pub struct NodeHandle<T>(NodeRef<T>);

impl<T> Clone for NodeHandle<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for NodeHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for NodeHandle<T> {}

impl<T> fmt::Debug for NodeHandle<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("NodeHandle")
            .field("item", &node.item)
            .field("height", &node.height)
            .finish()
    }
}

impl<T> NodeHandle<T> {
    /// Borrows the item stored at this node. The guard must be released
    /// before the tree is mutated again.
    pub fn item(&self) -> Ref<'_, T> {
        Ref::map(self.0.borrow(), |node| &node.item)
    }

    /// The cached height of the subtree rooted at this node. A leaf has
    /// height `0`.
    pub fn height(&self) -> i32 {
        self.0.borrow().height
    }
}

/// A lazy in-order iterator over a [`Tree`]'s nodes, created by
/// [`Tree::iter`]. Holds the explicit stack of a suspended in-order
/// traversal: the left spine of every subtree not yet visited.
pub struct Iter<'a, T> {
    stack: Vec<NodeRef<T>>,
    // Borrow the tree so it cannot be mutated mid-traversal.
    tree: PhantomData<&'a Tree<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = NodeHandle<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let right = node.borrow().right.clone();
        push_left_spine(right, &mut self.stack);
        Some(NodeHandle(node))
    }
}

fn push_left_spine<T>(mut link: Link<T>, stack: &mut Vec<NodeRef<T>>) {
    while let Some(node) = link {
        link = node.borrow().left.clone();
        stack.push(node);
    }
}

struct Node<T> {
    item: T,
    left: Link<T>,
    right: Link<T>,
    /// Non-owning back-reference; empty at a (sub)tree root.
    parent: Weak<RefCell<Node<T>>>,
    height: i32,
}

impl<T> Node<T> {
    fn new(item: T) -> NodeRef<T> {
        Rc::new(RefCell::new(Node {
            item,
            left: None,
            right: None,
            parent: Weak::new(),
            height: 0,
        }))
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("item", &self.item)
            .field("height", &self.height)
            .field("left", &self.left.as_ref().map(|node| node.borrow()))
            .field("right", &self.right.as_ref().map(|node| node.borrow()))
            .finish()
    }
}

/// Height of a possibly-empty subtree. An empty subtree has height `-1` so
/// that a leaf works out to `0`.
fn height<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(-1, |node| node.borrow().height)
}

/// Adjusts the cached height of `node` to be the max of its children's
/// heights + 1.
fn update_height<T>(node: &NodeRef<T>) {
    let new_height = {
        let n = node.borrow();
        1 + height(&n.left).max(height(&n.right))
    };
    node.borrow_mut().height = new_height;
}

/// The difference in height between the left and right subtrees. Outside
/// `[-1, 1]` the AVL invariant is broken and a rotation is due.
fn balance_factor<T>(node: &NodeRef<T>) -> i32 {
    let n = node.borrow();
    height(&n.left) - height(&n.right)
}

/// Walks the whole structure asserting every invariant: BST order, AVL
/// balance, height-cache correctness, parent-link consistency, and the
/// stored count.
#[cfg(test)]
fn check_invariants<T: Ord>(tree: &Tree<T>) {
    fn walk<T: Ord>(link: &Link<T>, expected_parent: Option<&NodeRef<T>>, count: &mut usize) -> i32 {
        let node = match link {
            Some(node) => node,
            None => return -1,
        };
        *count += 1;

        let n = node.borrow();
        match (n.parent.upgrade(), expected_parent) {
            (Some(actual), Some(expected)) => {
                assert!(
                    Rc::ptr_eq(&actual, expected),
                    "parent link points at the wrong node"
                );
            }
            (None, None) => {}
            (actual, expected) => panic!(
                "parent link mismatch: node has parent: {}, expected parent: {}",
                actual.is_some(),
                expected.is_some()
            ),
        }

        if let Some(left) = &n.left {
            assert!(left.borrow().item < n.item, "left child out of order");
        }
        if let Some(right) = &n.right {
            assert!(right.borrow().item > n.item, "right child out of order");
        }

        let left_height = walk(&n.left, Some(node), count);
        let right_height = walk(&n.right, Some(node), count);
        assert_eq!(n.height, 1 + left_height.max(right_height), "stale height cache");
        assert!(
            (left_height - right_height).abs() <= 1,
            "balance factor out of range"
        );
        n.height
    }

    let mut count = 0;
    walk(&tree.root, None, &mut count);
    assert_eq!(tree.count, count, "count does not match live nodes");
}

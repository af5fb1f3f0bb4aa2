//! End-to-end scenarios driven purely through the public API.

use avl::shared::Tree;

fn tree_of(items: &[i32]) -> Tree<i32> {
    let mut tree = Tree::new();
    for item in items {
        tree.insert(*item);
    }
    tree
}

fn sorted(items: &[i32]) -> Vec<i32> {
    let mut items = items.to_vec();
    items.sort_unstable();
    items
}

#[test]
fn empty_tree_basics_and_absent_handles() {
    let tree = Tree::<i32>::new();

    assert_eq!(tree.count(), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
    assert!(tree.inorder().is_empty());
    assert!(tree.preorder().is_empty());
    assert!(tree.postorder().is_empty());
    assert!(tree.minimum_node().is_none());
    assert!(tree.maximum_node().is_none());
    assert!(tree.find(&0).is_none());

    // Navigation must safely accept "no node" and return "no node".
    assert!(tree.next_smallest_node(None).is_none());
    assert!(tree.next_largest_node(None).is_none());
}

#[test]
fn singleton_boundaries() {
    let tree = tree_of(&[42]);

    assert_eq!(tree.count(), 1);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.inorder(), vec![42]);
    assert_eq!(tree.preorder(), vec![42]);
    assert_eq!(tree.postorder(), vec![42]);

    let node = tree.find(&42).unwrap();
    assert_eq!(*node.item(), 42);
    assert_eq!(node.height(), 0);

    // The sole node is both the minimum and the maximum - the same node,
    // not merely an equal item.
    assert_eq!(Some(node.clone()), tree.minimum_node());
    assert_eq!(Some(node.clone()), tree.maximum_node());

    assert!(tree.next_smallest_node(Some(&node)).is_none());
    assert!(tree.next_largest_node(Some(&node)).is_none());

    // "No node" stays tolerated in a non-empty tree.
    assert!(tree.next_smallest_node(None).is_none());
    assert!(tree.next_largest_node(None).is_none());
}

#[test]
fn insert_and_traversals_basic() {
    let data = [10, 20, 5, 4, 8, 15, 30, 25, 40, 7, 9, 6];
    let tree = tree_of(&data);

    assert_eq!(tree.count(), data.len());
    assert_eq!(tree.inorder(), sorted(&data));

    // Pre- and post-order visit the same multiset of items.
    let mut pre = tree.preorder();
    let mut post = tree.postorder();
    pre.sort_unstable();
    post.sort_unstable();
    assert_eq!(pre, sorted(&data));
    assert_eq!(post, sorted(&data));
}

#[test]
fn min_max_and_find_identity() {
    let data = [50, 40, 30, 20, 10];
    let tree = tree_of(&data);

    assert_eq!(tree.minimum_node(), tree.find(&10));
    assert_eq!(tree.maximum_node(), tree.find(&50));

    assert!(tree.find(&30).is_some());
    assert!(tree.find(&999_999).is_none());
}

#[test]
fn next_smallest_largest_boundaries() {
    let tree = tree_of(&[10, 20, 30, 40, 50, 60]);

    let min = tree.find(&10).unwrap();
    assert!(tree.next_smallest_node(Some(&min)).is_none());

    let max = tree.find(&60).unwrap();
    assert!(tree.next_largest_node(Some(&max)).is_none());

    let mid = tree.find(&30).unwrap();
    assert_eq!(tree.next_smallest_node(Some(&mid)), tree.find(&20));
    assert_eq!(tree.next_largest_node(Some(&mid)), tree.find(&40));
}

#[test]
fn predecessor_successor_structural() {
    //            20
    //          /    \
    //        10      30
    //       / \     /  \
    //      5  15   25  40
    //           \        \
    //            17       45
    let tree = tree_of(&[20, 10, 30, 5, 15, 25, 40, 17, 45]);

    // 15 has a right child: successor via the right subtree's minimum.
    let n15 = tree.find(&15).unwrap();
    assert_eq!(tree.next_largest_node(Some(&n15)), tree.find(&17));

    // 17 has no right child: successor via the ancestor climb.
    let n17 = tree.find(&17).unwrap();
    assert_eq!(tree.next_largest_node(Some(&n17)), tree.find(&20));

    // 30 has a left child: predecessor via the left subtree's maximum.
    let n30 = tree.find(&30).unwrap();
    assert_eq!(tree.next_smallest_node(Some(&n30)), tree.find(&25));

    // 25 has no left child: predecessor via the ancestor climb.
    let n25 = tree.find(&25).unwrap();
    assert_eq!(tree.next_smallest_node(Some(&n25)), tree.find(&20));
}

#[test]
fn rotation_patterns() {
    // Ascending run: repeated Right-Right single rotations.
    let tree = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(tree.inorder(), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(tree.count(), 7);
    // Seven nodes pack into a perfect tree of height 2.
    assert_eq!(tree.height(), 2);

    // Descending run: repeated Left-Left single rotations.
    let tree = tree_of(&[7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(tree.inorder(), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(tree.count(), 7);
    assert_eq!(tree.height(), 2);

    // Left-Right double rotation hoists the middle item to the root.
    let tree = tree_of(&[30, 10, 20]);
    assert_eq!(tree.inorder(), vec![10, 20, 30]);
    assert_eq!(tree.preorder()[0], 20);

    // Right-Left double rotation, mirrored.
    let tree = tree_of(&[10, 30, 20]);
    assert_eq!(tree.inorder(), vec![10, 20, 30]);
    assert_eq!(tree.preorder()[0], 20);
}

#[test]
fn long_monotone_sequences() {
    const N: i32 = 200;

    let ascending: Vec<i32> = (1..=N).collect();
    let mut tree = Tree::new();
    for item in &ascending {
        tree.insert(*item);
    }
    assert_eq!(tree.inorder(), ascending);
    assert_eq!(tree.count(), N as usize);
    // The sparsest AVL tree of height 10 already needs 232 nodes, so 200
    // nodes can never stack higher than 9.
    assert!(tree.height() <= 9);

    let mut tree = Tree::new();
    for item in ascending.iter().rev() {
        tree.insert(*item);
    }
    assert_eq!(tree.inorder(), ascending);
    assert_eq!(tree.count(), N as usize);
    assert!(tree.height() <= 9);
}

#[test]
fn copy_and_assignment_independence() {
    let data = [10, 5, 15, 2, 7, 12, 18];
    let mut original = tree_of(&data);

    let copy = original.clone();
    assert_eq!(copy.count(), original.count());
    assert_eq!(copy.inorder(), original.inorder());

    // Mutating the source must not reach into the copy.
    original.clear();
    assert_eq!(original.count(), 0);
    assert_eq!(copy.count(), data.len());
    assert_eq!(copy.inorder(), sorted(&data));

    // Assignment replaces contents wholesale.
    let mut assigned = tree_of(&[99]);
    assigned.clone_from(&copy);
    assert_eq!(assigned.inorder(), copy.inorder());
    assert_eq!(assigned.count(), copy.count());

    // Re-assigning a tree its own current contents leaves it unchanged.
    let snapshot = assigned.clone();
    assigned.clone_from(&snapshot);
    assert_eq!(assigned.inorder(), copy.inorder());
    assert_eq!(assigned.count(), copy.count());
}

#[test]
fn empty_copy_and_assign() {
    let empty = Tree::<i32>::new();

    let copy = empty.clone();
    assert_eq!(copy.count(), 0);
    assert!(copy.inorder().is_empty());

    let mut tree = tree_of(&[1]);
    tree.clone_from(&empty);
    assert_eq!(tree.count(), 0);
    assert!(tree.inorder().is_empty());
}

#[test]
fn clear_resets_everything_and_reuse() {
    let mut tree = tree_of(&(0..50).collect::<Vec<_>>());
    assert_eq!(tree.count(), 50);

    tree.clear();
    assert_eq!(tree.count(), 0);
    assert!(tree.inorder().is_empty());
    assert!(tree.preorder().is_empty());
    assert!(tree.postorder().is_empty());
    assert!(tree.minimum_node().is_none());
    assert!(tree.maximum_node().is_none());

    // Clearing an already-empty tree is safe.
    tree.clear();
    assert_eq!(tree.count(), 0);

    // The tree is fully usable after a clear.
    for item in [3, 1, 4, 2] {
        tree.insert(item);
    }
    assert_eq!(tree.inorder(), vec![1, 2, 3, 4]);
    assert_eq!(tree.count(), 4);
}

#[test]
fn extreme_values() {
    let data = [0, 1, -1, i32::MAX, i32::MIN];
    let tree = tree_of(&data);

    assert_eq!(tree.inorder(), sorted(&data));
    assert_eq!(tree.minimum_node(), tree.find(&i32::MIN));
    assert_eq!(tree.maximum_node(), tree.find(&i32::MAX));
}

#[test]
fn duplicate_policy_is_ignore() {
    let mut tree = tree_of(&[10, 20, 30]);

    let before = tree.count();
    assert!(!tree.insert(20));
    assert_eq!(tree.count(), before);
    assert_eq!(tree.inorder(), vec![10, 20, 30]);
}

#[test]
fn works_with_non_copy_items() {
    let mut tree = Tree::new();
    for word in ["pear", "apple", "quince", "fig"] {
        tree.insert(word.to_string());
    }

    assert_eq!(
        tree.inorder(),
        vec!["apple".to_string(), "fig".into(), "pear".into(), "quince".into()]
    );

    let fig = tree.find(&"fig".to_string()).unwrap();
    let next = tree.next_largest_node(Some(&fig)).unwrap();
    assert_eq!(*next.item(), "pear");
}

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use avl::shared::Tree;

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs tests for
/// various tree sizes before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let largest_element_in_tree = 2usize.pow(num_levels as u32) - 2;

        let tree = {
            let mut tree = Tree::new();
            for x in 0..num_nodes {
                tree.insert(x as i32);
            }

            tree
        };

        let id = BenchmarkId::from_parameter(largest_element_in_tree);
        group.bench_function(id, |b| {
            b.iter_custom(|iters| {
                let mut time = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let mut tree = black_box(tree.clone());
                    let instant = std::time::Instant::now();
                    f(&mut tree, black_box(largest_element_in_tree as i32));
                    let elapsed = instant.elapsed();
                    time += elapsed;
                }
                time
            })
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _node = black_box(tree.find(&i));
    });
    bench_helper(c, "find-miss", |tree, i| {
        let _node = black_box(tree.find(&(i + 1)));
    });

    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });
    bench_helper(c, "insert-duplicate", |tree, i| {
        tree.insert(i);
    });

    bench_helper(c, "inorder", |tree, _i| {
        let _items = black_box(tree.inorder());
    });
    bench_helper(c, "successor-walk", |tree, _i| {
        let mut cursor = tree.minimum_node();
        while let Some(node) = cursor {
            cursor = tree.next_largest_node(Some(&node));
        }
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

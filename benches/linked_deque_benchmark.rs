use criterion::{black_box, criterion_group, criterion_main, Criterion};
use linked_deque::LinkedDeque;
use std::collections::{LinkedList, VecDeque};

fn bench_linked_deque_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("linked_deque_iter");

    group.bench_function("std_linked_list_iter", |b| {
        let list: LinkedList<i32> = (0..1000).collect();
        b.iter(|| {
            let mut sum = 0;
            for x in &list {
                sum += *x;
            }
            black_box(sum);
        });
    });

    group.bench_function("std_vec_deque_iter", |b| {
        let deque: VecDeque<i32> = (0..1000).collect();
        b.iter(|| {
            let mut sum = 0;
            for x in &deque {
                sum += *x;
            }
            black_box(sum);
        });
    });

    group.bench_function("linked_deque_iter", |b| {
        let deque: LinkedDeque<i32> = (0..1000).collect();
        b.iter(|| {
            let mut sum = 0;
            for x in &deque {
                sum += *x;
            }
            black_box(sum);
        });
    });

    group.bench_function("linked_deque_node_walk", |b| {
        let deque: LinkedDeque<i32> = (0..1000).collect();
        b.iter(|| {
            let mut sum = 0;
            let mut node = deque.first();
            while let Some(n) = node {
                sum += *n.data();
                node = n.next();
            }
            black_box(sum);
        });
    });

    group.finish();
}

fn bench_linked_deque_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("linked_deque_push_pop");

    group.bench_function("std_linked_list_push_pop", |b| {
        b.iter(|| {
            let mut list = LinkedList::new();
            for i in 0..1000 {
                list.push_back(i);
            }
            while let Some(_) = list.pop_front() {}
        });
    });

    group.bench_function("std_vec_deque_push_pop", |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for i in 0..1000 {
                deque.push_back(i);
            }
            while let Some(_) = deque.pop_front() {}
        });
    });

    group.bench_function("linked_deque_append_pop", |b| {
        b.iter(|| {
            let mut deque = LinkedDeque::new();
            for i in 0..1000 {
                deque.append(i).unwrap();
            }
            while let Some(_) = deque.pop() {}
        });
    });

    group.bench_function("linked_deque_push_pop", |b| {
        b.iter(|| {
            let mut deque = LinkedDeque::new();
            for i in 0..1000 {
                deque.push(i).unwrap();
            }
            while let Some(_) = deque.pop() {}
        });
    });

    group.finish();
}

fn bench_linked_deque_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("linked_deque_release");

    group.bench_function("free_all_1000", |b| {
        b.iter(|| {
            let mut deque: LinkedDeque<u64> = (0..1000).collect();
            deque.free_all();
            black_box(deque.len());
        });
    });

    group.bench_function("clear_detach_1000", |b| {
        b.iter(|| {
            let mut deque: LinkedDeque<u64> = (0..1000).collect();
            let chain = deque.clear();
            black_box(chain.len());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_linked_deque_iter,
    bench_linked_deque_push_pop,
    bench_linked_deque_release
);
criterion_main!(benches);

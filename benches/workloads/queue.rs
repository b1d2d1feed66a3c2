use criterion::{black_box, Criterion, Throughput};
use linked_deque::LinkedDeque;

const OPS: usize = 10_000;
const STEADY_LEN: usize = 1000;

pub fn run(c: &mut Criterion) {
    bench_fifo(c);
    bench_lifo(c);
    bench_node_recycle(c);
}

fn bench_fifo(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_fifo");
    group.throughput(Throughput::Elements(OPS as u64));

    group.bench_function("append_pop_steady", |b| {
        let mut deque = LinkedDeque::new();
        for i in 0..STEADY_LEN {
            deque.append(i).unwrap();
        }
        b.iter(|| {
            for i in 0..OPS {
                deque.append(black_box(i)).unwrap();
                black_box(deque.pop());
            }
        });
    });

    group.finish();
}

fn bench_lifo(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_lifo");
    group.throughput(Throughput::Elements(OPS as u64));

    group.bench_function("push_then_pop", |b| {
        b.iter(|| {
            let mut deque = LinkedDeque::new();
            for i in 0..OPS {
                deque.push(black_box(i)).unwrap();
            }
            while let Some(v) = deque.pop() {
                black_box(v);
            }
        });
    });

    group.bench_function("push_then_free_all", |b| {
        b.iter(|| {
            let mut deque = LinkedDeque::new();
            for i in 0..OPS {
                deque.push(black_box(i)).unwrap();
            }
            deque.free_all();
            black_box(deque.len());
        });
    });

    group.finish();
}

fn bench_node_recycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_recycle");
    group.throughput(Throughput::Elements(OPS as u64));

    // Rotates nodes from front to back: no allocator traffic at all.
    group.bench_function("pop_node_append_node", |b| {
        let mut deque: LinkedDeque<usize> = (0..STEADY_LEN).collect();
        b.iter(|| {
            for _ in 0..OPS {
                let mut node = deque.pop_node().unwrap();
                *node += 1;
                deque.append_node(node);
            }
            black_box(deque.head());
        });
    });

    group.finish();
}

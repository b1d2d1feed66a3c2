use super::XorShift64;
use criterion::{black_box, Criterion, Throughput};
use linked_deque::LinkedDeque;
use std::thread;

const OPS_PER_THREAD: usize = 50_000;
const MAX_LEN: usize = 4096;

/// Each thread drives its own deque through a random mix of push, append
/// and pop, so node allocations and frees interleave across threads.
pub fn run(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");

    let threads = [1, 2, 4, 8];

    for &t in &threads {
        group.throughput(Throughput::Elements((OPS_PER_THREAD * t) as u64));
        group.bench_function(format!("churn_{}_threads", t), |b| {
            b.iter(|| {
                let mut handles = Vec::with_capacity(t);
                for i in 0..t {
                    handles.push(thread::spawn(move || {
                        let mut rng = XorShift64::new((i as u64 + 1) * 0xdead_beef);
                        let mut deque = LinkedDeque::new();
                        for _ in 0..OPS_PER_THREAD {
                            let r = rng.next();
                            match r % 3 {
                                _ if deque.len() >= MAX_LEN => {
                                    black_box(deque.pop());
                                }
                                0 => deque.push([r; 4]).unwrap(),
                                1 => deque.append([r; 4]).unwrap(),
                                _ => {
                                    black_box(deque.pop());
                                }
                            }
                        }
                        deque.len()
                    }));
                }
                for h in handles {
                    black_box(h.join().unwrap());
                }
            });
        });
    }

    group.finish();
}

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tonequeue_rs::{DequeueOutcome, QueueConfig, Slope, Tone, ToneQueue};

const TONES: u64 = 100_000;

fn bench_enqueue_dequeue_single_threaded(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_threaded");
    group.throughput(Throughput::Elements(TONES));

    group.bench_function("enqueue_then_dequeue", |b| {
        b.iter(|| {
            let queue = ToneQueue::new(QueueConfig::new(256, 224).unwrap());
            for i in 0..TONES {
                let _ = queue.enqueue(Tone::new(10, (i % 4000) as i32, Slope::Rectangular));
                if let DequeueOutcome::Dequeued(tone) = queue.dequeue() {
                    black_box(tone);
                }
            }
        });
    });

    group.finish();
}

fn bench_producer_consumer_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("producer_consumer");
    group.throughput(Throughput::Elements(TONES));

    for capacity in [16usize, 256] {
        group.bench_with_input(
            BenchmarkId::new("capacity", capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let queue = ToneQueue::new(QueueConfig::new(capacity, capacity).unwrap());
                    let consumer_queue = queue.clone();

                    let consumer = std::thread::spawn(move || {
                        let _guard = consumer_queue.consumer_guard();
                        let mut consumed = 0u64;
                        while consumed < TONES {
                            match consumer_queue.dequeue() {
                                DequeueOutcome::Dequeued(tone) => {
                                    black_box(tone);
                                    consumed += 1;
                                }
                                DequeueOutcome::Emptied | DequeueOutcome::Idle => {
                                    std::hint::spin_loop();
                                }
                            }
                        }
                    });

                    let mut sent = 0u64;
                    while sent < TONES {
                        if queue
                            .enqueue(Tone::new(10, (sent % 4000) as i32, Slope::Rectangular))
                            .is_ok()
                        {
                            sent += 1;
                        } else {
                            std::hint::spin_loop();
                        }
                    }

                    consumer.join().unwrap();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_enqueue_dequeue_single_threaded,
    bench_producer_consumer_threads
);
criterion_main!(benches);

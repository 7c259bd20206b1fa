//! Minimal producer/consumer demo: one thread enqueues a short CW message's
//! worth of tones, another drains them, honoring the low-water refill hook.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use tonequeue_rs::{DequeueOutcome, QueueConfig, Slope, Tone, ToneQueue};

fn main() {
    tracing_subscriber::fmt::init();

    let queue = ToneQueue::new(QueueConfig::new(16, 12).unwrap());
    let refills = Arc::new(AtomicUsize::new(0));

    {
        let refills = Arc::clone(&refills);
        queue
            .register_low_water_callback(
                4,
                Some(move || {
                    refills.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();
    }

    let consumer_queue = queue.clone();
    let consumer = thread::spawn(move || {
        let _guard = consumer_queue.consumer_guard();
        let mut rendered = 0usize;
        loop {
            match consumer_queue.dequeue() {
                DequeueOutcome::Dequeued(tone) => {
                    rendered += 1;
                    println!(
                        "rendering {}us @ {}Hz (forever={})",
                        tone.duration_us, tone.frequency_hz, tone.is_forever
                    );
                }
                DequeueOutcome::Emptied => {
                    println!("tail rendered, {rendered} tones total");
                    break;
                }
                DequeueOutcome::Idle => {
                    consumer_queue.wait_for_tone().ok();
                }
            }
        }
    });

    // "PARIS" worth of dits and dahs, at 20 WPM timing, as an illustrative
    // stream of tones rather than a literal encoding.
    let dit_us = 60_000;
    for i in 0..20u32 {
        let mark = i % 2 == 0;
        let freq = if mark { 600 } else { 0 };
        queue
            .enqueue(Tone::new(i64::from(dit_us), freq, Slope::RaisedCosine))
            .unwrap();
    }

    consumer.join().unwrap();
    println!("low-water callback fired {} times", refills.load(Ordering::SeqCst));
}

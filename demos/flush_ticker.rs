//! Periodic flush demo
//!
//! Several producer threads push readings into one buffered pipeline while
//! the main thread flushes it on a timer.
//!
//! Run with: cargo run --example flush_ticker [config.json]

use contraflow::{BufferConfig, Identity, Receiver, Stage, Trigger};
use crossbeam_channel::{select, tick, unbounded};
use std::thread;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const PRODUCERS: u32 = 3;
const READINGS_PER_PRODUCER: u32 = 20;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,contraflow=trace")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => BufferConfig::load(path)?,
        None => BufferConfig::default().with_high_water_mark(16),
    };
    tracing::info!("Starting flush ticker with {:?}", config);

    let mut batches = 0usize;
    let mut readings = 0usize;
    let (push, mut flush) = Identity::<(u32, u32)>::new()
        .map(|(producer, raw)| (producer, raw as f64 * 0.1))
        .buffer_for_signal_with(config)
        .flat_map(|(producer, celsius)| {
            // Drop implausible readings.
            (celsius < 100.0).then_some((producer, celsius))
        })
        .sink(|(producer, celsius)| {
            readings += 1;
            tracing::debug!(producer, celsius, "Reading delivered");
        });

    let (done_tx, done_rx) = unbounded::<u32>();
    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let mut push = push.clone();
            let done = done_tx.clone();
            thread::spawn(move || {
                for i in 0..READINGS_PER_PRODUCER {
                    push.push((producer, 200 + producer * 50 + i * 40));
                    thread::sleep(Duration::from_millis(5));
                }
                let _ = done.send(producer);
            })
        })
        .collect();
    drop(done_tx);

    let ticker = tick(Duration::from_millis(25));
    let mut finished = 0;
    while finished < PRODUCERS {
        select! {
            recv(ticker) -> _ => {
                flush.signal();
                batches += 1;
            }
            recv(done_rx) -> msg => match msg {
                Ok(producer) => {
                    tracing::info!("Producer {} finished", producer);
                    finished += 1;
                }
                Err(_) => break,
            },
        }
    }

    for handle in handles {
        if handle.join().is_err() {
            anyhow::bail!("producer thread panicked");
        }
    }
    flush.signal();
    batches += 1;
    drop(flush);

    tracing::info!("Delivered {} readings in {} flushes", readings, batches);
    Ok(())
}

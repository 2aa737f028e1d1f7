//! A timer thread feeding a signal from another thread.
//!
//! The ticker stops on its own once nobody holds the signal any more.

use signalwire::{Producer, Signal};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn spawn_ticker(producer: Producer<u64>, period: Duration) -> thread::JoinHandle<u64> {
    thread::spawn(move || {
        let mut tick = 0;
        while producer.send(Ok(tick)) {
            tick += 1;
            thread::sleep(period);
        }
        tracing::info!(ticks = tick, "ticker stopped, signal dropped");
        tick
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Ticker Example ===\n");

    let (producer, ticks) = Signal::pipe_labeled("ticker");
    let handle = spawn_ticker(producer, Duration::from_millis(20));

    let seconds = ticks.map(|tick| *tick as f64 * 0.02);
    let subscription = seconds.subscribe_values(|elapsed| {
        println!("   elapsed: {elapsed:.2}s");
    });

    thread::sleep(Duration::from_millis(110));

    println!("\nDropping the subscription and signals");
    drop(subscription);
    drop(seconds);
    drop(ticks);

    match handle.join() {
        Ok(count) => println!("   ticker sent {count} values"),
        Err(_) => println!("   ticker thread panicked"),
    }

    println!("\n✓ Example complete!");
}

//! Basic pipe/subscribe/dispose walk-through

use signalwire::{pipe, Error};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Basic Signal Example ===\n");

    println!("1. Creating a producer/signal pair");
    let (producer, signal) = pipe::<i32>();

    println!("2. Subscribing");
    let mut subscription = signal.subscribe(|value| match value {
        Ok(n) => println!("   -> received {n}"),
        Err(error) => println!("   -> received error: {error}"),
    });

    println!("\n3. Sending values (subscriber will trigger)");
    producer.send(Ok(5));
    producer.send(Err(Error::Absent));

    println!("\n4. Deriving a signal with map");
    let doubled = signal.map(|n| n * 2);
    let _doubled_subscription = doubled.subscribe_values(|n| {
        println!("   -> doubled: {n}");
    });
    producer.send(Ok(21));

    println!("\n5. Disposing the first subscription");
    subscription.dispose();
    producer.send(Ok(6));
    println!("   subscribers left: {}", signal.subscriber_count());

    println!("\n6. Dropping every owner of the signal");
    drop(_doubled_subscription);
    drop(doubled);
    drop(signal);
    println!("   delivered after drop? {}", producer.send(Ok(7)));

    println!("\n✓ Example complete!");
}

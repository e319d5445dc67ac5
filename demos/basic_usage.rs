//! Basic usage of radix-rs: routing table style lookups.
//!
//! Run with `RUST_LOG=radix_rs=trace` to see node splits as they happen.

use std::io;

use radix_rs::{PrintOptions, RadixTree, SharedRadixTree};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    example_tree()?;
    example_shared();
    Ok(())
}

fn example_tree() -> io::Result<()> {
    println!("=== RadixTree ===\n");

    let mut routes: RadixTree<&str> = RadixTree::new();
    routes.insert("/", "index");
    routes.insert("/api/v1/users", "users");
    routes.insert("/api/v1/orders", "orders");
    routes.insert("/static", "assets");
    // Create the "/api/v1/" boundary without giving it a handler.
    routes.insert("/api/v1/", None);

    // Exact lookups
    println!("/api/v1/users  = {:?}", routes.match_value("/api/v1/users"));
    println!("/api/v1/user   = {:?}", routes.match_value("/api/v1/user"));

    // Longest-prefix lookups
    println!("/static/app.js -> {:?}", routes.prefix_match_value("/static/app.js"));
    println!("/api/v1/users/7 -> {:?}", routes.prefix_match_value("/api/v1/users/7"));
    println!("/api/v1/other -> {:?}", routes.prefix_match_value("/api/v1/other"));
    println!("/missing -> {:?}\n", routes.prefix_match_value("/missing"));

    println!("Entries ({}):", routes.len());
    let options = PrintOptions {
        with_root_label: true,
        separator: " | ".to_string(),
    };
    routes.print(io::stdout().lock(), &options, |handler| handler.to_string())?;

    println!("\nStructure:");
    routes.dump(io::stdout().lock())?;
    println!("{:?}\n", routes.stats());
    Ok(())
}

fn example_shared() {
    println!("=== SharedRadixTree ===\n");

    let shared: SharedRadixTree<u64> = SharedRadixTree::new();
    std::thread::scope(|s| {
        for worker in 0..4u64 {
            let shared = &shared;
            s.spawn(move || {
                for i in 0..100u64 {
                    let key = format!("tenant{}/object{:03}", worker, i);
                    shared.insert(key, worker * 100 + i);
                }
            });
        }
    });

    println!("Count: {}", shared.len());
    println!("tenant2/object042 = {:?}", shared.match_value("tenant2/object042"));
    println!(
        "tenant3/object099/meta -> {:?}",
        shared.prefix_match_value("tenant3/object099/meta")
    );
}

use std::path::PathBuf;
use std::process;

use chrono::Local;
use keysweep::{Result, SearchConfig, StopSignal, default_worker_count, load_ranges, run_search};

const TARGET_ADDRESS: &str = "13zb1hQbWVsc2S7ZTZnP2G4undNNpdh5so";
const RANGES_FILE: &str = "search_ranges.json";
const KEYS_FILE: &str = "keys.txt";
const MAX_KEYS_PER_RANGE: u64 = 100_000;

fn main() {
    if let Err(e) = run() {
        eprintln!("keysweep: {e}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || {
        println!("\nStopping after the keys in flight...");
        handler_stop.raise();
    })
    .expect("Error setting Ctrl+C handler");

    let ranges = load_ranges(RANGES_FILE)?;
    let config = SearchConfig {
        target_address: TARGET_ADDRESS.to_string(),
        workers: default_worker_count(),
        max_keys_per_range: MAX_KEYS_PER_RANGE,
        keylog_path: PathBuf::from(KEYS_FILE),
    };

    println!(
        "Search started at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("Target address: {TARGET_ADDRESS}");
    println!(
        "{} ranges, up to {} keys each, {} workers",
        ranges.len(),
        MAX_KEYS_PER_RANGE,
        config.workers
    );

    match run_search(ranges, &config, stop)? {
        Some(found) => {
            println!(
                "Match after {} keys in {:.2}s",
                found.trials,
                found.elapsed.as_secs_f64()
            );
            println!("Private key: {}", found.private_key);
            println!("Address: {}", found.address);
            println!("Saved to {KEYS_FILE}");
        }
        None => println!("No match in any range"),
    }
    println!("Finished at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}

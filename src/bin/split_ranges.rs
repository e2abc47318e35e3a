use std::process;

use keysweep::{KeyRange, RangeSpec, Result, write_ranges};

// The master interval of the search campaign, split once up front so the
// searcher can pick ranges off a flat list.
const MASTER_MIN: &str = "0x21000000000000000";
const MASTER_MAX: &str = "0x2ffffffffffffffff";
const PIECES: u64 = 90_000;
const RANGES_FILE: &str = "search_ranges.json";

fn main() {
    if let Err(e) = run() {
        eprintln!("split_ranges: {e}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let master = KeyRange::from_spec(&RangeSpec {
        min: MASTER_MIN.to_string(),
        max: MASTER_MAX.to_string(),
    })?;
    let pieces = master.partition(PIECES)?;
    write_ranges(RANGES_FILE, &pieces)?;
    println!("Wrote {} ranges to {}", pieces.len(), RANGES_FILE);
    Ok(())
}

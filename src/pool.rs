use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use bitcoin::secp256k1::Secp256k1;
use crossbeam_channel::bounded;

use crate::error::Result;
use crate::ranges::KeyRange;
use crate::signal::StopSignal;
use crate::worker::{FoundKey, SearchContext, search_range};

/// Run tunables the binary fills in from its constants.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub target_address: String,
    pub workers: usize,
    pub max_keys_per_range: u64,
    pub keylog_path: PathBuf,
}

/// 85% of the available cores, never less than one. Leaves the machine
/// usable while a long run is going.
pub fn default_worker_count() -> usize {
    ((num_cpus::get() as f64 * 0.85) as usize).max(1)
}

/// Drives the whole search: a feeder pushes every range through a bounded
/// queue to a fixed pool of workers, then everything is joined.
///
/// Terminal outcomes: `Ok(Some(_))` when one worker won the raise gate and
/// reported, `Ok(None)` when every range was exhausted or the stop signal
/// cut the run short, `Err` carrying the first worker's error otherwise.
pub fn run_search(
    ranges: Vec<KeyRange>,
    config: &SearchConfig,
    stop: StopSignal,
) -> Result<Option<FoundKey>> {
    let (work_tx, work_rx) = bounded::<KeyRange>(ranges.len().max(1));
    let (result_tx, result_rx) = bounded::<FoundKey>(1);

    let ctx = Arc::new(SearchContext {
        secp: Secp256k1::new(),
        target_address: config.target_address.clone(),
        max_keys_per_range: config.max_keys_per_range,
        keylog_path: config.keylog_path.clone(),
        stop: stop.clone(),
    });

    // The queue holds every range, so feeding never blocks; dropping the
    // sender is what tells drained workers the run is over.
    let feeder = thread::spawn(move || {
        for range in ranges {
            if stop.is_raised() {
                break;
            }
            if work_tx.send(range).is_err() {
                break;
            }
        }
    });

    let mut workers = Vec::with_capacity(config.workers);
    for _ in 0..config.workers {
        let work_rx = work_rx.clone();
        let result_tx = result_tx.clone();
        let ctx = Arc::clone(&ctx);
        workers.push(thread::spawn(move || -> Result<()> {
            while let Ok(range) = work_rx.recv() {
                match search_range(&range, &ctx, &result_tx) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => {
                        // Unwind the rest of the pool before surfacing.
                        ctx.stop.raise();
                        return Err(e);
                    }
                }
            }
            Ok(())
        }));
    }
    drop(work_rx);
    drop(result_tx);

    feeder.join().expect("feeder thread panicked");
    let mut first_error = None;
    for handle in workers {
        if let Err(e) = handle.join().expect("worker thread panicked") {
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(result_rx.try_recv().ok()),
    }
}

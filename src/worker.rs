use std::path::PathBuf;
use std::time::{Duration, Instant};

use bitcoin::secp256k1::{All, Secp256k1};
use crossbeam_channel::Sender;

use crate::address::derive_address;
use crate::error::Result;
use crate::keylog;
use crate::ranges::KeyRange;
use crate::sampler::sample_key;
use crate::signal::StopSignal;

/// Read-only state shared by every worker for every trial.
pub struct SearchContext {
    pub secp: Secp256k1<All>,
    pub target_address: String,
    pub max_keys_per_range: u64,
    pub keylog_path: PathBuf,
    pub stop: StopSignal,
}

/// The single result a run can produce.
#[derive(Debug, Clone)]
pub struct FoundKey {
    pub private_key: String,
    pub address: String,
    pub trials: u64,
    pub elapsed: Duration,
}

/// Samples keys from `range` until the target matches, the stop signal is
/// observed, or the per-range cap runs out. Returns true only when this
/// call found the match and reported it.
///
/// The win path sits behind the stop signal's raise gate: whichever caller
/// flips the flag first appends the key to the log file and sends the one
/// `FoundKey` down `results`; every other caller backs off empty-handed.
/// The append happens before the send, so the disk never lags the
/// announcement.
pub fn search_range(
    range: &KeyRange,
    ctx: &SearchContext,
    results: &Sender<FoundKey>,
) -> Result<bool> {
    let started = Instant::now();
    let mut trials = 0u64;
    while trials < ctx.max_keys_per_range {
        if ctx.stop.is_raised() {
            return Ok(false);
        }
        let private_key = sample_key(range)?;
        let address = derive_address(&ctx.secp, &private_key)?;
        trials += 1;
        if address == ctx.target_address {
            if !ctx.stop.raise() {
                return Ok(false);
            }
            keylog::append_found_key(&ctx.keylog_path, &private_key, &address)?;
            let _ = results.send(FoundKey {
                private_key,
                address,
                trials,
                elapsed: started.elapsed(),
            });
            return Ok(true);
        }
    }
    println!(
        "No match in [{:#x}, {:#x}) after {} keys",
        range.min, range.max, ctx.max_keys_per_range
    );
    Ok(false)
}

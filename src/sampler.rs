use num_bigint::BigUint;
use rand::RngCore;

use crate::error::{Result, SweepError};
use crate::ranges::KeyRange;

/// Canonical key width: 256 bits as lowercase hex digits.
const KEY_HEX_WIDTH: usize = 64;

/// Draws one candidate private key uniformly at random inside `[min, max)`.
///
/// The candidate is returned as 64 hex digits, zero-padded on the left to
/// the canonical keyspace width however small the sampled value is.
/// Sampling is with replacement: nothing stops the same value from being
/// drawn twice, within or across calls. The modulo reduction carries a
/// slight bias on spans that do not divide 2^256; no correction is applied.
pub fn sample_key(range: &KeyRange) -> Result<String> {
    // Guarded here as well as at load time: a hand-built inverted range
    // must surface as an error, not as a BigUint underflow panic.
    if range.max <= range.min {
        return Err(SweepError::InvalidRange(format!(
            "empty span: 0x{:x} does not reach 0x{:x}",
            range.min, range.max
        )));
    }
    let span = &range.max - &range.min;

    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let candidate = BigUint::from_bytes_be(&bytes) % &span + &range.min;

    Ok(format!("{candidate:0width$x}", width = KEY_HEX_WIDTH))
}

use std::fs;
use std::path::Path;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};

/// Widest endpoint the canonical 256-bit keyspace admits.
const MAX_ENDPOINT_BITS: u64 = 256;

/// One record of the ranges file: both endpoints as "0x"-prefixed hex text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeSpec {
    pub min: String,
    pub max: String,
}

/// A validated half-open interval `[min, max)` of the private-key space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub min: BigUint,
    pub max: BigUint,
}

impl KeyRange {
    /// Parses and validates the textual endpoints of one record.
    ///
    /// Rejected here, before any worker runs: a missing `0x` prefix,
    /// non-hex digits, endpoints wider than 256 bits, and `min >= max`.
    pub fn from_spec(spec: &RangeSpec) -> Result<Self> {
        let min = parse_endpoint(&spec.min)?;
        let max = parse_endpoint(&spec.max)?;
        if min >= max {
            return Err(SweepError::InvalidRange(format!(
                "min {} is not below max {}",
                spec.min, spec.max
            )));
        }
        Ok(Self { min, max })
    }

    fn to_spec(&self) -> RangeSpec {
        RangeSpec {
            min: format!("0x{:x}", self.min),
            max: format!("0x{:x}", self.max),
        }
    }

    /// Splits the interval into `pieces` contiguous non-empty sub-ranges
    /// that exactly tile it. The first `span % pieces` sub-ranges are one
    /// key wider than the rest, so no key is dropped off the top.
    pub fn partition(&self, pieces: u64) -> Result<Vec<KeyRange>> {
        let span = &self.max - &self.min;
        if pieces == 0 || span < BigUint::from(pieces) {
            return Err(SweepError::InvalidRange(format!(
                "cannot split a span of {span} keys into {pieces} pieces"
            )));
        }

        let step = &span / pieces;
        let wide = (&span % pieces)
            .try_into()
            .unwrap_or(u64::MAX); // remainder < pieces, so this always fits

        let mut ranges = Vec::with_capacity(pieces as usize);
        let mut cursor = self.min.clone();
        for i in 0..pieces {
            let width = if i < wide { &step + 1u32 } else { step.clone() };
            let next = &cursor + &width;
            ranges.push(KeyRange {
                min: cursor,
                max: next.clone(),
            });
            cursor = next;
        }
        Ok(ranges)
    }
}

/// Parses one "0x"-prefixed hexadecimal endpoint. The prefix is required
/// and checked, never blindly sliced off.
fn parse_endpoint(text: &str) -> Result<BigUint> {
    let digits = text.strip_prefix("0x").ok_or_else(|| {
        SweepError::InvalidRange(format!("endpoint {text:?} is missing the 0x prefix"))
    })?;
    let value = BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| {
        SweepError::InvalidRange(format!("endpoint {text:?} is not valid hex"))
    })?;
    if value.bits() > MAX_ENDPOINT_BITS {
        return Err(SweepError::InvalidRange(format!(
            "endpoint {text:?} is wider than {MAX_ENDPOINT_BITS} bits"
        )));
    }
    Ok(value)
}

/// Loads and validates the whole ranges file. Any unreadable file,
/// malformed JSON or bad record aborts the load.
pub fn load_ranges<P: AsRef<Path>>(path: P) -> Result<Vec<KeyRange>> {
    let contents = fs::read_to_string(path)?;
    let specs: Vec<RangeSpec> = serde_json::from_str(&contents)?;
    specs.iter().map(KeyRange::from_spec).collect()
}

/// Writes ranges back out in the file format `load_ranges` consumes.
pub fn write_ranges<P: AsRef<Path>>(path: P, ranges: &[KeyRange]) -> Result<()> {
    let specs: Vec<RangeSpec> = ranges.iter().map(KeyRange::to_spec).collect();
    let contents = serde_json::to_string_pretty(&specs)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn spec(min: &str, max: &str) -> RangeSpec {
        RangeSpec {
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("keysweep-ranges-{name}-{}", std::process::id()))
    }

    #[test]
    fn parses_a_well_formed_record() {
        let range = KeyRange::from_spec(&spec("0x20000000000000000", "0x3ffffffffffffffff"))
            .expect("record should parse");
        assert_eq!(range.min, BigUint::parse_bytes(b"20000000000000000", 16).unwrap());
        assert_eq!(range.max, BigUint::parse_bytes(b"3ffffffffffffffff", 16).unwrap());
    }

    #[test]
    fn accepts_uppercase_hex_digits() {
        assert!(KeyRange::from_spec(&spec("0xAB", "0xFF")).is_ok());
    }

    #[test]
    fn rejects_missing_prefix() {
        let err = KeyRange::from_spec(&spec("20000000000000000", "0x3ffffffffffffffff"))
            .unwrap_err();
        assert!(matches!(err, SweepError::InvalidRange(_)), "got {err}");
    }

    #[test]
    fn rejects_non_hex_digits() {
        let err = KeyRange::from_spec(&spec("0xzz", "0xff")).unwrap_err();
        assert!(matches!(err, SweepError::InvalidRange(_)), "got {err}");
    }

    #[test]
    fn rejects_empty_digits() {
        let err = KeyRange::from_spec(&spec("0x", "0xff")).unwrap_err();
        assert!(matches!(err, SweepError::InvalidRange(_)), "got {err}");
    }

    #[test]
    fn rejects_min_not_below_max() {
        let err = KeyRange::from_spec(&spec("0xff", "0xff")).unwrap_err();
        assert!(matches!(err, SweepError::InvalidRange(_)), "got {err}");
        let err = KeyRange::from_spec(&spec("0x100", "0xff")).unwrap_err();
        assert!(matches!(err, SweepError::InvalidRange(_)), "got {err}");
    }

    #[test]
    fn rejects_endpoints_wider_than_the_keyspace() {
        let too_wide = format!("0x1{}", "0".repeat(64));
        let err = KeyRange::from_spec(&spec("0x1", &too_wide)).unwrap_err();
        assert!(matches!(err, SweepError::InvalidRange(_)), "got {err}");
    }

    #[test]
    fn loads_a_file_in_order() {
        let path = temp_path("load");
        std::fs::write(
            &path,
            r#"[
                {"min": "0x1", "max": "0x2"},
                {"min": "0x10", "max": "0x20"}
            ]"#,
        )
        .unwrap();

        let ranges = load_ranges(&path).expect("file should load");
        std::fs::remove_file(&path).ok();

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].min, BigUint::from(1u32));
        assert_eq!(ranges[1].max, BigUint::from(0x20u32));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let path = temp_path("badjson");
        std::fs::write(&path, "[{\"min\": ").unwrap();
        let err = load_ranges(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, SweepError::Json(_)), "got {err}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_ranges(temp_path("missing-nonexistent")).unwrap_err();
        assert!(matches!(err, SweepError::Io(_)), "got {err}");
    }

    #[test]
    fn write_then_load_round_trips() {
        let path = temp_path("roundtrip");
        let ranges = vec![
            KeyRange {
                min: BigUint::from(0x21u32),
                max: BigUint::from(0x40u32),
            },
            KeyRange {
                min: BigUint::from(0x40u32),
                max: BigUint::from(0x5fu32),
            },
        ];

        write_ranges(&path, &ranges).expect("write should succeed");
        let loaded = load_ranges(&path).expect("written file should load");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, ranges);
    }

    #[test]
    fn partition_tiles_the_interval_exactly() {
        let master = KeyRange {
            min: BigUint::from(100u32),
            max: BigUint::from(203u32), // span 103 into 10 pieces: 3 wide, 7 narrow
        };
        let pieces = master.partition(10).expect("partition should succeed");

        assert_eq!(pieces.len(), 10);
        assert_eq!(pieces.first().unwrap().min, master.min);
        assert_eq!(pieces.last().unwrap().max, master.max);
        for pair in pieces.windows(2) {
            assert_eq!(pair[0].max, pair[1].min, "pieces must be contiguous");
        }
        for piece in &pieces {
            assert!(piece.min < piece.max, "pieces must be non-empty");
        }

        let widths: Vec<BigUint> = pieces.iter().map(|p| &p.max - &p.min).collect();
        assert_eq!(widths.iter().filter(|w| **w == BigUint::from(11u32)).count(), 3);
        assert_eq!(widths.iter().filter(|w| **w == BigUint::from(10u32)).count(), 7);
    }

    #[test]
    fn partition_rejects_more_pieces_than_keys() {
        let master = KeyRange {
            min: BigUint::from(0u32),
            max: BigUint::from(5u32),
        };
        assert!(master.partition(6).is_err());
        assert!(master.partition(0).is_err());
        assert!(master.partition(5).is_ok());
    }
}

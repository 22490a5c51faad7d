//! Size cell normalization.

use thiserror::Error;
use tracing::warn;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Size cell whose numeric value or shape does not parse.
#[derive(Debug, Error)]
#[error("Unparseable size cell: {0:?}")]
pub struct SizeParseError(pub String);

/// Convert a `(value, unit)` pair to an exact byte count.
///
/// The unit vocabulary is fixed by the site template; anything else
/// signals a template change upstream and maps to zero bytes with a
/// logged diagnostic.
pub fn size_to_bytes(value: f64, unit: &str) -> u64 {
    let multiplier = match unit {
        "GiB" => GIB,
        "MiB" => MIB,
        "KiB" => KIB,
        other => {
            warn!(unit = other, "unrecognized size unit, recording zero bytes");
            return 0;
        }
    };
    (value * multiplier as f64) as u64
}

/// Parse a `"<number> <unit>"` size cell.
pub fn parse_size_cell(raw: &str) -> Result<u64, SizeParseError> {
    let mut parts = raw.split_whitespace();
    let (Some(value), Some(unit)) = (parts.next(), parts.next()) else {
        return Err(SizeParseError(raw.to_string()));
    };
    let value: f64 = value
        .parse()
        .map_err(|_| SizeParseError(raw.to_string()))?;
    Ok(size_to_bytes(value, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gib_is_exact() {
        assert_eq!(size_to_bytes(1.5, "GiB"), 1_610_612_736);
        assert_eq!(size_to_bytes(1.0, "GiB"), 1_073_741_824);
    }

    #[test]
    fn test_mib_and_kib_multipliers() {
        assert_eq!(size_to_bytes(500.0, "MiB"), 524_288_000);
        assert_eq!(size_to_bytes(2.0, "KiB"), 2048);
    }

    #[test]
    fn test_unrecognized_unit_records_zero() {
        assert_eq!(size_to_bytes(1.5, "TiB"), 0);
        assert_eq!(size_to_bytes(7.0, "GB"), 0);
    }

    #[test]
    fn test_parse_size_cell() {
        assert_eq!(parse_size_cell("1.5 GiB").unwrap(), 1_610_612_736);
        assert_eq!(parse_size_cell("  603.3 MiB ").unwrap(), 632_559_436);
    }

    #[test]
    fn test_parse_size_cell_missing_unit() {
        assert!(parse_size_cell("603.3").is_err());
        assert!(parse_size_cell("").is_err());
    }

    #[test]
    fn test_parse_size_cell_bad_value() {
        assert!(parse_size_cell("N/A MiB").is_err());
    }
}

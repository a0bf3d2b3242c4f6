//! Human size strings: `100`, `100k`, `1.5k`, `1m`, `1mm`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid size format: {input:?}")]
pub struct SizeParseError {
    pub input: String,
}

/// Parse a size string into a raw count.
///
/// Suffixes are case-insensitive: any run of trailing `m` multiplies by one
/// million, a trailing `k` by one thousand. The numeric part may be
/// fractional; the product is truncated toward zero.
pub fn parse_size(raw: &str) -> Result<u64, SizeParseError> {
    let invalid = || SizeParseError {
        input: raw.to_string(),
    };

    let lowered = raw.trim().to_ascii_lowercase();
    let (number, multiplier) = if lowered.ends_with('m') {
        (lowered.trim_end_matches('m'), 1_000_000.0)
    } else if let Some(stripped) = lowered.strip_suffix('k') {
        (stripped, 1_000.0)
    } else {
        (lowered.as_str(), 1.0)
    };

    if number.is_empty() || !number.bytes().any(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let value: f64 = number.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    let scaled = (value * multiplier).trunc();
    if scaled > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(scaled as u64)
}

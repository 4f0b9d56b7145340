//! Parsers for single-value lines: frame counter, timestamps and
//! calibrated counts.

use crate::core::ParseError;

use super::tokenizer::{parse_f64, parse_i32, parse_u32, token};

/// Parse an `fr` line into the frame counter.
pub fn parse_frame_counter(line: &str) -> Result<u32, ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    parse_u32(token(&tokens, 1, line)?, line)
}

/// Parse a `ts` line into the timestamp in seconds.
pub fn parse_timestamp(line: &str) -> Result<f64, ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    parse_f64(token(&tokens, 1, line)?, line)
}

/// High-resolution timestamp from a `ts2` line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HiresTimestamp {
    /// Timestamp in seconds, same meaning as the `ts` line.
    pub seconds: f64,
    /// Integer second part.
    pub sec: u32,
    /// Microsecond part.
    pub usec: u32,
    /// Measurement latency in microseconds.
    pub latency_usec: u32,
}

/// Parse a `ts2` line.
pub fn parse_timestamp_hires(line: &str) -> Result<HiresTimestamp, ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    Ok(HiresTimestamp {
        seconds: parse_f64(token(&tokens, 1, line)?, line)?,
        sec: parse_u32(token(&tokens, 2, line)?, line)?,
        usec: parse_u32(token(&tokens, 3, line)?, line)?,
        latency_usec: parse_u32(token(&tokens, 4, line)?, line)?,
    })
}

/// Parse a `6dcal` or `glcal` line into the calibrated count.
pub fn parse_calibrated_count(line: &str) -> Result<i32, ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    parse_i32(token(&tokens, 1, line)?, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_counter() {
        assert_eq!(parse_frame_counter("fr 123456").unwrap(), 123456);
    }

    #[test]
    fn timestamp_seconds() {
        let ts = parse_timestamp("ts 47103.639").unwrap();
        assert!((ts - 47103.639).abs() < 1e-9);
    }

    #[test]
    fn hires_timestamp_fields() {
        let ts = parse_timestamp_hires("ts2 47103.639 47103 639000 1450").unwrap();
        assert_eq!(ts.sec, 47103);
        assert_eq!(ts.usec, 639000);
        assert_eq!(ts.latency_usec, 1450);
        assert!((ts.seconds - 47103.639).abs() < 1e-9);
    }

    #[test]
    fn calibrated_counts() {
        assert_eq!(parse_calibrated_count("6dcal 3").unwrap(), 3);
        assert_eq!(parse_calibrated_count("glcal 2").unwrap(), 2);
    }

    #[test]
    fn garbage_counter_fails() {
        assert!(parse_frame_counter("fr x9").is_err());
        assert!(parse_frame_counter("fr").is_err());
    }
}

use std::time::{SystemTime, UNIX_EPOCH};

use crate::*;

// Seconds between 1904-01-01 and 1970-01-01.
const QT_EPOCH_OFFSET: u64 = 2_082_844_800;

/// The current time in seconds since the QuickTime epoch (1904-01-01).
pub fn qt_time_now() -> u64 {
    let unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    unix + QT_EPOCH_OFFSET
}

/// Pick a media timescale for the given frame rate.
///
/// Variable frame rates (a numerator of 0) get 10000.
pub fn framerate_to_timescale(n: u32, d: u32) -> u32 {
    if n == 0 || d == 0 {
        return 10000;
    }

    if d == 1001 {
        return n;
    }

    (n as u64 * 100 / d as u64) as u32
}

/// Pack an ISO-639-2/T language code into 15 bits.
pub fn language_code(lang: &str) -> Result<u16> {
    let bytes = lang.as_bytes();
    if bytes.len() != 3 || !bytes.iter().all(|b| b.is_ascii_lowercase()) {
        return Err(Error::InvalidLanguage(lang.to_string()));
    }

    Ok(bytes
        .iter()
        .fold(0u16, |code, b| code << 5 | (*b - 0x60) as u16))
}

// Scale a value by num/denom, rounding to the nearest integer.
pub(crate) fn scale_round(value: u64, num: u64, denom: u64) -> u64 {
    let scaled = (value as u128 * num as u128 + denom as u128 / 2) / denom as u128;
    scaled.min(u64::MAX as u128) as u64
}

/// Like [scale_round] but truncating.
pub(crate) fn scale_floor(value: u64, num: u64, denom: u64) -> u64 {
    let scaled = value as u128 * num as u128 / denom as u128;
    scaled.min(u64::MAX as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code() {
        assert_eq!(language_code("und").unwrap(), 0x55c4);
        assert_eq!(language_code("eng").unwrap(), 0x15c7);
        assert!(language_code("EN").is_err());
    }

    #[test]
    fn test_framerate_to_timescale() {
        assert_eq!(framerate_to_timescale(0, 1), 10000);
        assert_eq!(framerate_to_timescale(30000, 1001), 30000);
        assert_eq!(framerate_to_timescale(25, 1), 2500);
    }

    #[test]
    fn test_scale_round() {
        assert_eq!(scale_round(1000, 1000, 48000), 21);
        assert_eq!(scale_round(3, 1, 2), 2);
    }

    #[test]
    fn test_qt_time() {
        assert!(qt_time_now() > QT_EPOCH_OFFSET);
    }
}

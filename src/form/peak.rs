//! Peak-Time Classification
//!
//! Advisory coloring of an arrival hour. Cosmetic only: it never gates
//! submission and is not sent to the backend.

/// Three-tier advisory for an hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakTier {
    Red,
    Orange,
    Green,
}

impl PeakTier {
    /// Message displayed under the arrival-hour field
    pub fn label(&self) -> &'static str {
        match self {
            PeakTier::Red => "🔴 Peak hours – expect higher wait times",
            PeakTier::Orange => "🟡 Moderate hours",
            PeakTier::Green => "🟢 Off-peak hours – faster service likely",
        }
    }
}

/// Classify a raw hour value.
///
/// The value is read as a leading integer: junk after the digits is ignored
/// (`"9.5"` is 9), a `0x` prefix reads the digits as hexadecimal (`"0x11"`
/// is 17), and anything without a leading integer falls through to green
/// along with negative and out-of-range hours.
pub fn classify_hour(hour: &str) -> PeakTier {
    match parse_leading_int(hour) {
        Some(h) => classify(h),
        None => PeakTier::Green,
    }
}

fn classify(h: i64) -> PeakTier {
    if (10..=13).contains(&h) || (17..=19).contains(&h) {
        PeakTier::Red
    } else if (8..10).contains(&h) || (h > 13 && h < 17) {
        PeakTier::Orange
    } else {
        PeakTier::Green
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    // Overlong digit runs are far outside 0-23 either way
    let value = i64::from_str_radix(&rest[..digits_end], radix).unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

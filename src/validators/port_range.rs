//! Port range parsing/formatting shared by the security-group rule validator
//! and the security-group reconciler's wire mapping.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RANGE_RE: Regex = Regex::new(r"^([0-9]+)-([0-9]+)$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    pub min: u16,
    pub max: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortRangeError {
    #[error("invalid format: expected \"all\", a port number, or \"start-end\"")]
    InvalidFormat,
    #[error("port out of range: must be between 1 and 65535")]
    OutOfRange,
    #[error("invalid range: start must not exceed end")]
    StartAfterEnd,
}

/// Parses `"all"` (case-insensitive), a single decimal port `"N"`, or a
/// range `"A-B"`. Negative numbers and multi-hyphen/space shapes are
/// rejected.
pub fn parse_port_range(s: &str) -> Result<PortRange, PortRangeError> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(PortRange { min: 1, max: 65535 });
    }

    if let Some(caps) = RANGE_RE.captures(s) {
        let start: u32 = caps[1].parse().map_err(|_| PortRangeError::InvalidFormat)?;
        let end: u32 = caps[2].parse().map_err(|_| PortRangeError::InvalidFormat)?;
        return build_range(start, end);
    }

    if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() {
        let n: u32 = s.parse().map_err(|_| PortRangeError::InvalidFormat)?;
        return build_range(n, n);
    }

    Err(PortRangeError::InvalidFormat)
}

fn build_range(start: u32, end: u32) -> Result<PortRange, PortRangeError> {
    if start < 1 || start > 65535 || end < 1 || end > 65535 {
        return Err(PortRangeError::OutOfRange);
    }
    if start > end {
        return Err(PortRangeError::StartAfterEnd);
    }
    Ok(PortRange {
        min: start as u16,
        max: end as u16,
    })
}

/// Inverse of [`parse_port_range`]: `(1, 65535)` or `(0, 0)` canonicalize to
/// `"all"`; `(N, N)` formats as `"N"`; otherwise `"A-B"`.
///
/// On the write path this crate always emits `(1, 65535)` for `"all"` -- the
/// on-the-wire encoding of `"all"` is otherwise ambiguous between remotes, so
/// this picks one canonical encoding (documented in DESIGN.md).
pub fn format_port_range(min: u16, max: u16) -> String {
    if (min == 0 && max == 0) || (min == 1 && max == 65535) {
        "all".to_string()
    } else if min == max {
        min.to_string()
    } else {
        format!("{}-{}", min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_valid_forms() {
        for s in ["1", "65535", "1-65535"] {
            let parsed = parse_port_range(s).unwrap();
            assert_eq!(format_port_range(parsed.min, parsed.max), "all");
        }
        let parsed = parse_port_range("22").unwrap();
        assert_eq!(format_port_range(parsed.min, parsed.max), "22");
        let parsed = parse_port_range("1000-2000").unwrap();
        assert_eq!(format_port_range(parsed.min, parsed.max), "1000-2000");
    }

    #[test]
    fn accepts_all_case_insensitively() {
        assert_eq!(parse_port_range("All").unwrap(), PortRange { min: 1, max: 65535 });
        assert_eq!(parse_port_range("ALL").unwrap(), PortRange { min: 1, max: 65535 });
    }

    #[test]
    fn rejects_boundary_violations() {
        assert_eq!(parse_port_range("0"), Err(PortRangeError::OutOfRange));
        assert_eq!(parse_port_range("65536"), Err(PortRangeError::OutOfRange));
        assert_eq!(parse_port_range("100-50"), Err(PortRangeError::StartAfterEnd));
        assert_eq!(parse_port_range("-5"), Err(PortRangeError::InvalidFormat));
        assert_eq!(parse_port_range(""), Err(PortRangeError::InvalidFormat));
    }

    #[test]
    fn rejects_multi_hyphen_and_spaces() {
        assert_eq!(parse_port_range("1-2-3"), Err(PortRangeError::InvalidFormat));
        assert_eq!(parse_port_range("1 - 2"), Err(PortRangeError::InvalidFormat));
    }

    #[test]
    fn format_treats_zero_zero_as_all() {
        assert_eq!(format_port_range(0, 0), "all");
    }
}

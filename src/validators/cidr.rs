use ipnetwork::IpNetwork;
use std::str::FromStr;

/// Accepts any syntactically valid IPv4 or IPv6 CIDR, including ones with
/// host bits set (`192.168.1.5/24`) -- `ipnetwork` is permissive about this
/// by default, matching the permissive semantics of standard CIDR parsers.
/// An out-of-range prefix (negative, >32 for v4, >128 for v6) is rejected by
/// `IpNetwork::from_str` itself.
pub fn is_valid_cidr(s: &str) -> bool {
    IpNetwork::from_str(s).is_ok()
}

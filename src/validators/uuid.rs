use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Lowercase only -- uppercase is a rejection, not a case-insensitive
    // accept.
    static ref UUID_RE: Regex = Regex::new(
        r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$"
    ).unwrap();
}

pub fn is_valid_uuid(s: &str) -> bool {
    UUID_RE.is_match(s)
}

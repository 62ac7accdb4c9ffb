/// JWT shape check only -- three non-empty, dot-separated segments. No
/// cryptographic verification.
pub fn is_valid_jwt_shape(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 3 && parts.iter().all(|p| !p.is_empty())
}

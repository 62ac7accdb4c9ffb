//! Cross-element validators over a server's `network_attachment` list
//!. Kept generic over the caller's element
//! type so the server model doesn't need to depend back on `validators`.

/// "At most one `primary=true`" (invariant I2). Returns the count of
/// elements with `primary=true`; the caller rejects when it exceeds 1,
/// citing the count in the diagnostic.
pub fn count_primary<'a, I>(primary_flags: I) -> usize
where
    I: IntoIterator<Item = &'a bool>,
{
    primary_flags.into_iter().filter(|p| **p).count()
}

/// "At least one element", used for `network_attachment` and
/// `security_group_ids`.
pub fn is_non_empty<T>(list: &[T]) -> bool {
    !list.is_empty()
}

/// `floating_ip_id` uniqueness within one server's attachment list
/// (invariant I1).
pub fn has_duplicate_floating_ips<'a, I>(floating_ip_ids: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    for id in floating_ip_ids {
        if !seen.insert(id) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_or_one_primary() {
        assert_eq!(count_primary(&[false, false]), 0);
        assert_eq!(count_primary(&[true, false, false]), 1);
    }

    #[test]
    fn rejects_two_or_more_primary() {
        assert_eq!(count_primary(&[true, true, false]), 2);
    }

    #[test]
    fn detects_duplicate_floating_ips() {
        assert!(has_duplicate_floating_ips(vec!["a", "b", "a"]));
        assert!(!has_duplicate_floating_ips(vec!["a", "b", "c"]));
    }
}

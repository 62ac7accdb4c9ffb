pub mod cidr;
pub mod jwt;
pub mod port_range;
pub mod primary;
pub mod uuid;

use crate::error::Diagnostic;
use crate::value::Value;

/// Validates a known string attribute with `check`, short-circuiting on
/// null/unknown.
pub fn validate_known<F>(
    value: &Value<String>,
    attribute_path: &str,
    summary: &str,
    check: F,
) -> Option<Diagnostic>
where
    F: Fn(&str) -> bool,
{
    match value {
        Value::Known(s) if !check(s) => Some(Diagnostic::error_on(
            attribute_path,
            summary,
            format!("value {:?} is invalid", s),
        )),
        _ => None,
    }
}

pub fn validate_uuid(value: &Value<String>, attribute_path: &str) -> Option<Diagnostic> {
    validate_known(value, attribute_path, "invalid UUID", |s| uuid::is_valid_uuid(s))
}

pub fn validate_cidr(value: &Value<String>, attribute_path: &str) -> Option<Diagnostic> {
    validate_known(value, attribute_path, "invalid CIDR", |s| cidr::is_valid_cidr(s))
}

pub fn validate_jwt_shape(value: &Value<String>, attribute_path: &str) -> Option<Diagnostic> {
    validate_known(value, attribute_path, "invalid JWT shape", |s| {
        jwt::is_valid_jwt_shape(s)
    })
}

pub fn validate_port_range(value: &Value<String>, attribute_path: &str) -> Option<Diagnostic> {
    match value {
        Value::Known(s) => match port_range::parse_port_range(s) {
            Ok(_) => None,
            Err(e) => Some(Diagnostic::error_on(attribute_path, "invalid port range", e.to_string())),
        },
        _ => None,
    }
}

pub fn validate_at_most_one_primary(primary_flags: &[bool], attribute_path: &str) -> Option<Diagnostic> {
    let count = primary::count_primary(primary_flags);
    if count > 1 {
        Some(Diagnostic::error_on(
            attribute_path,
            "at most one network_attachment may set primary=true",
            format!("{} elements have primary=true", count),
        ))
    } else {
        None
    }
}

pub fn validate_non_empty<T>(list: &[T], attribute_path: &str, what: &str) -> Option<Diagnostic> {
    if primary::is_non_empty(list) {
        None
    } else {
        Some(Diagnostic::error_on(
            attribute_path,
            format!("{} must have at least one element", what),
            "list is empty".to_string(),
        ))
    }
}

pub fn validate_unique_floating_ips(ids: &[String], attribute_path: &str) -> Option<Diagnostic> {
    if primary::has_duplicate_floating_ips(ids.iter().map(|s| s.as_str())) {
        Some(Diagnostic::error_on(
            attribute_path,
            "floating_ip_id must be unique within network_attachment",
            "duplicate floating_ip_id across attachments",
        ))
    } else {
        None
    }
}

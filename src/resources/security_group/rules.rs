//! Rule wire mapping for the security-group reconciler.
//!
//! Direction (`ingress`/`egress`) is implicit from which list a rule lives
//! in; we thread it through explicitly here since the remote payload itself
//! carries one CIDR slot per direction (`source_cidr` for ingress,
//! `destination_cidr` for egress).

use crate::error::Diagnostic;
use crate::sdk::models::SecurityGroupRuleResource;
use crate::validators::port_range::{format_port_range, parse_port_range};
use crate::value::Value;

use super::model::{Direction, Rule};

/// Write path: `tcp|udp` carry a parsed `(min, max)`; `icmp|any` omit port
/// fields entirely.
pub fn build_rule_resource(rule: &Rule, direction: Direction, index: usize) -> Result<SecurityGroupRuleResource, Diagnostic> {
    let protocol = rule.protocol.known().cloned().unwrap_or_default();
    let cidr = rule.cidr.known().cloned();

    let (port_min, port_max) = match protocol.as_str() {
        "tcp" | "udp" => {
            let raw = rule.port_range.known().map(|s| s.as_str()).unwrap_or("all");
            let parsed = parse_port_range(raw).map_err(|e| {
                Diagnostic::error_on(
                    format!("rules[{}].port_range", index),
                    "invalid port range",
                    e.to_string(),
                )
            })?;
            (Some(parsed.min), Some(parsed.max))
        }
        _ => (None, None),
    };

    Ok(match direction {
        Direction::Ingress => SecurityGroupRuleResource {
            protocol,
            port_min,
            port_max,
            source_cidr: cidr,
            destination_cidr: None,
        },
        Direction::Egress => SecurityGroupRuleResource {
            protocol,
            port_min,
            port_max,
            source_cidr: None,
            destination_cidr: cidr,
        },
    })
}

/// Read path: formats `port_range` by the inverse of [`build_rule_resource`].
pub fn resource_to_rule(resource: &SecurityGroupRuleResource, direction: Direction) -> Rule {
    let port_range = match (resource.port_min, resource.port_max) {
        (Some(min), Some(max)) => Value::Known(format_port_range(min, max)),
        _ => Value::Known("all".to_string()),
    };
    let cidr = match direction {
        Direction::Ingress => resource.source_cidr.clone(),
        Direction::Egress => resource.destination_cidr.clone(),
    };

    Rule {
        protocol: Value::Known(resource.protocol.clone()),
        port_range,
        cidr: cidr.into(),
    }
}

fn sort_key(rule: &Rule) -> (String, String, String) {
    (
        rule.protocol.known().cloned().unwrap_or_default(),
        rule.port_range.known().cloned().unwrap_or_default(),
        rule.cidr.known().cloned().unwrap_or_default(),
    )
}

/// Default deterministic order for a fresh Read: `(port_min, port_max,
/// protocol, cidr)` -- approximated here via the parsed range plus the
/// string fields, since `Rule` only stores the formatted string.
pub fn sort_rules_deterministic(rules: &mut [Rule]) {
    rules.sort_by_key(|r| {
        let range = r
            .port_range
            .known()
            .and_then(|s| parse_port_range(s).ok())
            .map(|p| (p.min, p.max))
            .unwrap_or((0, 0));
        (range, r.protocol.known().cloned().unwrap_or_default(), r.cidr.known().cloned().unwrap_or_default())
    });
}

/// Order-independent equality: sorts both sides by the same deterministic
/// key before comparing, so a plan that merely lists the same rules in a
/// different order is not reported as a change.
pub fn rule_sets_equal(a: &[Rule], b: &[Rule]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    sort_rules_deterministic(&mut a);
    sort_rules_deterministic(&mut b);
    a == b
}

/// Plan-preservation: when the Read result has the same length
/// as the plan's direction list, reorder the Read result to match the
/// plan's order by composite key `(protocol, port_range, cidr)`, so an
/// unordered remote rule reshuffle doesn't produce a phantom diff.
pub fn reorder_to_match_plan(read: Vec<Rule>, plan_order: &[Rule]) -> Vec<Rule> {
    if read.len() != plan_order.len() {
        return read;
    }

    let mut pool = read;
    let mut result = Vec::with_capacity(pool.len());
    for wanted in plan_order {
        let wanted_key = sort_key(wanted);
        if let Some(pos) = pool.iter().position(|r| sort_key(r) == wanted_key) {
            result.push(pool.remove(pos));
        }
    }
    result.extend(pool);
    result
}

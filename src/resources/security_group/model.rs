use serde::{Deserialize, Serialize};

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ingress,
    Egress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub protocol: Value<String>,
    /// `"all"`, a single port, or `"A-B"`.
    pub port_range: Value<String>,
    pub cidr: Value<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub ingress_rules: Value<Vec<Rule>>,
    pub egress_rules: Value<Vec<Rule>>,
}

impl SecurityGroup {
    pub fn ingress(&self) -> &[Rule] {
        match &self.ingress_rules {
            Value::Known(rules) => rules.as_slice(),
            _ => &[],
        }
    }

    pub fn egress(&self) -> &[Rule] {
        match &self.egress_rules {
            Value::Known(rules) => rules.as_slice(),
            _ => &[],
        }
    }
}

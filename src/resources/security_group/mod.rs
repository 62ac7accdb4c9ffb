//! Security-group resource reconciler.

pub mod model;
pub mod rules;

use crate::error::{Diagnostic, Diagnostics};
use crate::sdk::models::{SecurityGroupCreateRequest, SecurityGroupUpdateRequest};
use crate::sdk::{ProjectClient, VpsClient};
use crate::value::Value;

use model::{Direction, Rule, SecurityGroup};

pub struct SecurityGroupReconciler<'a> {
    client: &'a dyn ProjectClient,
}

impl<'a> SecurityGroupReconciler<'a> {
    pub fn new(client: &'a dyn ProjectClient) -> Self {
        Self { client }
    }

    fn vps(&self) -> &dyn VpsClient {
        self.client.vps()
    }

    fn build_rules(rules: &[Rule], direction: Direction) -> Result<Vec<crate::sdk::models::SecurityGroupRuleResource>, Diagnostics> {
        let mut out = Vec::with_capacity(rules.len());
        let mut diags = Diagnostics::new();
        for (i, rule) in rules.iter().enumerate() {
            match rules::build_rule_resource(rule, direction, i) {
                Ok(resource) => out.push(resource),
                Err(d) => diags.push(d),
            }
        }
        if diags.has_errors() {
            Err(diags)
        } else {
            Ok(out)
        }
    }

    pub async fn create(&self, plan: &SecurityGroup) -> (Option<SecurityGroup>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let ingress = match Self::build_rules(plan.ingress(), Direction::Ingress) {
            Ok(r) => r,
            Err(d) => return (None, d),
        };
        let egress = match Self::build_rules(plan.egress(), Direction::Egress) {
            Ok(r) => r,
            Err(d) => return (None, d),
        };

        let req = SecurityGroupCreateRequest {
            name: plan.name.known().cloned().unwrap_or_default(),
            description: plan.description.known().cloned(),
            ingress_rules: ingress,
            egress_rules: egress,
        };

        let created = match self.vps().create_security_group(req).await {
            Ok(sg) => sg,
            Err(e) => return (None, Diagnostics::from_sdk_error(&e)),
        };

        let state = Self::map_to_state(&created, Some(plan));
        diags.extend(Diagnostics::new());
        (Some(state), diags)
    }

    pub async fn read(&self, id: &str) -> (Option<SecurityGroup>, Diagnostics) {
        self.read_with_plan(id, None).await
    }

    async fn read_with_plan(&self, id: &str, plan: Option<&SecurityGroup>) -> (Option<SecurityGroup>, Diagnostics) {
        match self.vps().get_security_group(id).await {
            Ok(sg) => (Some(Self::map_to_state(&sg, plan)), Diagnostics::new()),
            Err(e) => (None, Diagnostics::from_sdk_error(&e)),
        }
    }

    fn map_to_state(sg: &crate::sdk::models::SecurityGroupResource, plan: Option<&SecurityGroup>) -> SecurityGroup {
        let mut ingress: Vec<Rule> = sg
            .ingress_rules
            .iter()
            .map(|r| rules::resource_to_rule(r, Direction::Ingress))
            .collect();
        let mut egress: Vec<Rule> = sg
            .egress_rules
            .iter()
            .map(|r| rules::resource_to_rule(r, Direction::Egress))
            .collect();

        rules::sort_rules_deterministic(&mut ingress);
        rules::sort_rules_deterministic(&mut egress);

        if let Some(plan) = plan {
            ingress = rules::reorder_to_match_plan(ingress, plan.ingress());
            egress = rules::reorder_to_match_plan(egress, plan.egress());
        }

        SecurityGroup {
            id: Value::Known(sg.id.clone()),
            name: Value::Known(sg.name.clone()),
            description: sg.description.clone().into(),
            ingress_rules: Value::Known(ingress),
            egress_rules: Value::Known(egress),
        }
    }

    /// `name`/`description` are patched in place; rule-set changes are
    /// patched in place too, sent as a full replacement of whichever
    /// direction (ingress/egress) differs from prior state. Order alone
    /// is never treated as a change -- `rules::rule_sets_equal` compares
    /// both sides under the same deterministic ordering the Read path
    /// uses.
    pub async fn update(&self, prior: &SecurityGroup, desired: &SecurityGroup) -> (Option<SecurityGroup>, Diagnostics) {
        let id = match prior.id.known() {
            Some(id) => id.clone(),
            None => {
                let mut diags = Diagnostics::new();
                diags.push(Diagnostic::error("missing id", "prior state has no security group id"));
                return (None, diags);
            }
        };

        let name = match (&prior.name, &desired.name) {
            (Value::Known(p), Value::Known(d)) if p != d => Some(d.clone()),
            _ => None,
        };
        let description = match (&prior.description, &desired.description) {
            (Value::Known(p), Value::Known(d)) if p != d => Some(Some(d.clone())),
            _ => None,
        };

        let ingress = if rules::rule_sets_equal(prior.ingress(), desired.ingress()) {
            None
        } else {
            match Self::build_rules(desired.ingress(), Direction::Ingress) {
                Ok(r) => Some(r),
                Err(d) => return (None, d),
            }
        };
        let egress = if rules::rule_sets_equal(prior.egress(), desired.egress()) {
            None
        } else {
            match Self::build_rules(desired.egress(), Direction::Egress) {
                Ok(r) => Some(r),
                Err(d) => return (None, d),
            }
        };

        if name.is_none() && description.is_none() && ingress.is_none() && egress.is_none() {
            return self.read_with_plan(&id, Some(desired)).await;
        }

        let patch = SecurityGroupUpdateRequest {
            name,
            description: description.flatten(),
            ingress_rules: ingress,
            egress_rules: egress,
        };

        match self.vps().update_security_group(&id, patch).await {
            Ok(sg) => (Some(Self::map_to_state(&sg, Some(desired))), Diagnostics::new()),
            Err(e) => (None, Diagnostics::from_sdk_error(&e)),
        }
    }

    pub async fn delete(&self, prior: &SecurityGroup) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let id = match prior.id.known() {
            Some(id) => id.clone(),
            None => {
                diags.push(Diagnostic::error("missing id", "prior state has no security group id"));
                return diags;
            }
        };
        if let Err(e) = self.vps().delete_security_group(&id).await {
            diags.extend(Diagnostics::from_sdk_error(&e));
        }
        diags
    }

    pub async fn import(&self, id: &str) -> (Option<SecurityGroup>, Diagnostics) {
        self.read(id).await
    }
}

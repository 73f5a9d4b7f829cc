//! Configuration validation.
//!
//! Walks a raw [`Document`] and enforces the structural and referential
//! invariants of a routing configuration. Validation is fail-fast: the first
//! violation is reported and the check order is fixed, so the same malformed
//! input always yields the same message.

use std::collections::HashSet;

use serde_yaml::Value;

use crate::config::schema::{RoutingConfig, Service};
use crate::document::{display_value, is_truthy, Document};
use crate::error::{Error, Result};

const SERVICE_FIELDS: [&str; 6] = [
    "name",
    "uri",
    "default_upstream",
    "matches",
    "rules",
    "upstreams",
];
const MATCH_FIELDS: [&str; 4] = ["id", "header_name", "operator", "value"];
const RULE_FIELDS: [&str; 3] = ["id", "matches", "upstream_id"];
const UPSTREAM_FIELDS: [&str; 3] = ["id", "target", "port"];
const GROUP_FIELDS: [&str; 3] = ["id", "upstream_id", "weight"];

/// Exact sum required of rollout group weights.
pub const TOTAL_WEIGHT: u64 = 100;

/// A document that passed validation, together with its typed view.
///
/// The only way to obtain one is [`ConfigValidator::validate`], so holding a
/// `ValidatedConfig` means the invariants hold.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    document: Document,
    config: RoutingConfig,
}

impl ValidatedConfig {
    /// The unmodified source document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// The typed configuration.
    #[must_use]
    pub const fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Services in document order.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.config.services
    }

    /// Look up a service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.config.services.iter().find(|s| s.name == name)
    }

    /// Give up the typed view, keeping the document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Validates routing configuration documents.
///
/// # Examples
///
/// ```
/// use rollcfg::{ConfigValidator, Document};
///
/// let doc = Document::parse("inline", "services: []\n").unwrap();
/// let validated = ConfigValidator::validate(&doc).unwrap();
/// assert!(validated.services().is_empty());
///
/// let bad = Document::parse("inline", "routes: []\n").unwrap();
/// let err = ConfigValidator::validate(&bad).unwrap_err();
/// assert!(err.to_string().contains("Missing 'services' section"));
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] describing the first violation found.
    pub fn validate(document: &Document) -> Result<ValidatedConfig> {
        let services = document
            .root()
            .get("services")
            .ok_or_else(|| Error::validation("Missing 'services' section in configuration"))?;
        let services = services.as_sequence().ok_or_else(|| {
            Error::validation("The 'services' section in configuration must be a sequence")
        })?;

        for service in services {
            Self::validate_service(service)?;
        }

        let config = Self::materialize(services)?;
        log::debug!("validated {} service(s)", config.services.len());

        Ok(ValidatedConfig {
            document: document.clone(),
            config,
        })
    }

    /// Validate a single service record.
    fn validate_service(service: &Value) -> Result<()> {
        for field in SERVICE_FIELDS {
            if service.get(field).is_none() {
                let name = service
                    .get("name")
                    .map_or_else(|| "unknown".to_string(), display_value);
                return Err(Error::validation(format!(
                    "Missing required field '{field}' in service {name}"
                )));
            }
        }
        let name = display_value(&service["name"]);

        let match_ids = Self::validate_matches(&name, Self::sequence(service, "matches", &name)?)?;

        let rules = Self::sequence(service, "rules", &name)?;
        Self::validate_rules(&name, rules, &match_ids)?;

        let upstream_ids =
            Self::validate_upstreams(&name, Self::sequence(service, "upstreams", &name)?)?;

        let default_upstream = &service["default_upstream"];
        if !upstream_ids.contains(&display_value(default_upstream)) {
            return Err(Error::validation(format!(
                "Default upstream '{}' in service {name} does not exist in upstreams",
                display_value(default_upstream)
            )));
        }

        Self::validate_rule_targets(&name, rules, &upstream_ids)?;

        if let Some(rollstrategy) = service.get("rollstrategy").filter(|v| is_truthy(v)) {
            Self::validate_rollstrategy(&name, rollstrategy, default_upstream, &upstream_ids)?;
        }

        Ok(())
    }

    /// Fetch a field that must hold a sequence.
    fn sequence<'a>(service: &'a Value, field: &str, name: &str) -> Result<&'a [Value]> {
        service[field]
            .as_sequence()
            .map(Vec::as_slice)
            .ok_or_else(|| {
                Error::validation(format!(
                    "Field '{field}' in service {name} must be a sequence"
                ))
            })
    }

    fn has_fields(record: &Value, fields: &[&str]) -> bool {
        fields.iter().all(|field| record.get(*field).is_some())
    }

    /// Validate matches, returning the set of declared match ids.
    ///
    /// Ids are compared in their text form, the same form the typed model
    /// reads them as, so `1` and `"1"` collide.
    fn validate_matches(name: &str, matches: &[Value]) -> Result<HashSet<String>> {
        let mut match_ids = HashSet::new();
        for record in matches {
            if !Self::has_fields(record, &MATCH_FIELDS) {
                return Err(Error::validation(format!(
                    "Invalid match definition in service {name}: {}",
                    display_value(record)
                )));
            }
            let id = &record["id"];
            if !match_ids.insert(display_value(id)) {
                return Err(Error::validation(format!(
                    "Duplicate match ID '{}' in service {name}",
                    display_value(id)
                )));
            }

            // Routing engines only understand == and ~=; anything else is
            // carried through but worth flagging.
            let operator = display_value(&record["operator"]);
            if operator != "==" && operator != "~=" {
                log::warn!(
                    "match '{}' in service {name} uses unrecognized operator '{operator}'",
                    display_value(id)
                );
            }
        }
        Ok(match_ids)
    }

    /// Validate rules and their match references.
    fn validate_rules(name: &str, rules: &[Value], match_ids: &HashSet<String>) -> Result<()> {
        let mut rule_ids = HashSet::new();
        for rule in rules {
            if !Self::has_fields(rule, &RULE_FIELDS) {
                return Err(Error::validation(format!(
                    "Invalid rule definition in service {name}: {}",
                    display_value(rule)
                )));
            }
            let id = &rule["id"];
            if !rule_ids.insert(display_value(id)) {
                return Err(Error::validation(format!(
                    "Duplicate rule ID '{}' in service {name}",
                    display_value(id)
                )));
            }

            let referenced = rule["matches"].as_sequence().ok_or_else(|| {
                Error::validation(format!(
                    "Rule '{}' in service {name} must list its matches as a sequence",
                    display_value(id)
                ))
            })?;
            for match_id in referenced {
                if !match_ids.contains(&display_value(match_id)) {
                    return Err(Error::validation(format!(
                        "Rule '{}' in service {name} references undefined match ID '{}'",
                        display_value(id),
                        display_value(match_id)
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validate upstreams, returning the set of declared upstream ids.
    fn validate_upstreams(name: &str, upstreams: &[Value]) -> Result<HashSet<String>> {
        let mut upstream_ids = HashSet::new();
        for upstream in upstreams {
            if !Self::has_fields(upstream, &UPSTREAM_FIELDS) {
                return Err(Error::validation(format!(
                    "Invalid upstream definition in service {name}: {}",
                    display_value(upstream)
                )));
            }
            let id = &upstream["id"];
            if !upstream_ids.insert(display_value(id)) {
                return Err(Error::validation(format!(
                    "Duplicate upstream ID '{}' in service {name}",
                    display_value(id)
                )));
            }
        }
        Ok(upstream_ids)
    }

    /// Every rule must route to a declared upstream.
    fn validate_rule_targets(
        name: &str,
        rules: &[Value],
        upstream_ids: &HashSet<String>,
    ) -> Result<()> {
        for rule in rules {
            let upstream_id = &rule["upstream_id"];
            if !upstream_ids.contains(&display_value(upstream_id)) {
                return Err(Error::validation(format!(
                    "Rule '{}' in service {name} references undefined upstream ID '{}'",
                    display_value(&rule["id"]),
                    display_value(upstream_id)
                )));
            }
        }
        Ok(())
    }

    /// Validate a present, truthy rollout strategy.
    fn validate_rollstrategy(
        name: &str,
        rollstrategy: &Value,
        default_upstream: &Value,
        upstream_ids: &HashSet<String>,
    ) -> Result<()> {
        let Some(groups) = rollstrategy.get("groups") else {
            if rollstrategy.get("weighted_upstreams").is_some() {
                return Err(Error::validation(format!(
                    "Rollstrategy in service {name} uses 'weighted_upstreams'; declare rollout targets as lettered 'groups' instead"
                )));
            }
            if !upstream_ids.contains(&display_value(default_upstream)) {
                return Err(Error::validation(format!(
                    "Rollstrategy in service {name} does not define groups, and default_upstream '{}' is invalid",
                    display_value(default_upstream)
                )));
            }
            return Ok(());
        };

        let groups = groups.as_sequence().ok_or_else(|| {
            Error::validation(format!(
                "Rollstrategy groups in service {name} must be a sequence"
            ))
        })?;

        Self::validate_group_order(name, groups)?;

        let mut total_weight: u64 = 0;
        for group in groups {
            if !Self::has_fields(group, &GROUP_FIELDS) {
                return Err(Error::validation(format!(
                    "Invalid group in rollstrategy for service {name}: {}",
                    display_value(group)
                )));
            }
            let upstream_id = &group["upstream_id"];
            if !upstream_ids.contains(&display_value(upstream_id)) {
                return Err(Error::validation(format!(
                    "Group upstream_id '{}' in rollstrategy for service {name} does not exist in upstreams",
                    display_value(upstream_id)
                )));
            }
            let weight = group["weight"].as_u64().ok_or_else(|| {
                Error::validation(format!(
                    "Weight of group '{}' in rollstrategy for service {name} must be a non-negative integer, but got {}",
                    display_value(&group["id"]),
                    display_value(&group["weight"])
                ))
            })?;
            total_weight = total_weight.saturating_add(weight);
        }

        if total_weight != TOTAL_WEIGHT {
            return Err(Error::validation(format!(
                "Total weight of rollstrategy in service {name} must equal {TOTAL_WEIGHT}, but got {total_weight}"
            )));
        }
        Ok(())
    }

    /// Group ids must read "A", "B", "C", ... in positional order.
    fn validate_group_order(name: &str, groups: &[Value]) -> Result<()> {
        let expected: Vec<String> = (0..groups.len()).map(group_letter).collect();
        let actual: Vec<Option<&Value>> = groups.iter().map(|g| g.get("id")).collect();

        let in_order = expected
            .iter()
            .zip(&actual)
            .all(|(want, got)| got.and_then(Value::as_str) == Some(want.as_str()));
        if in_order {
            return Ok(());
        }

        let expected_list = expected
            .iter()
            .map(|id| format!("'{id}'"))
            .collect::<Vec<_>>()
            .join(", ");
        let actual_list = actual
            .iter()
            .map(|id| match id {
                Some(Value::String(s)) => format!("'{s}'"),
                Some(other) => display_value(other),
                None => "None".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::validation(format!(
            "Rollstrategy group IDs in service {name} are not in order. Expected: [{expected_list}], Found: [{actual_list}]"
        )))
    }

    /// Build the typed view of already-checked services.
    fn materialize(services: &[Value]) -> Result<RoutingConfig> {
        let services = services
            .iter()
            .map(|raw| {
                serde_yaml::from_value::<Service>(raw.clone()).map_err(|e| {
                    Error::validation(format!(
                        "Malformed service {}: {e}",
                        display_value(&raw["name"])
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RoutingConfig { services })
    }
}

/// The expected id of the rollout group at `index`: "A", "B", ...
#[must_use]
pub fn group_letter(index: usize) -> String {
    u32::try_from(index)
        .ok()
        .and_then(|i| char::from_u32(u32::from(b'A') + i))
        .map_or_else(|| format!("#{index}"), String::from)
}


// Property-based tests for configuration validation
#[cfg(all(test, feature = "property-tests"))]
#[allow(unused_doc_comments)] // proptest! macro doesn't support doc comments
mod property_tests {
    use super::*;
    use crate::test_util::{service_mut, valid_document};
    use proptest::prelude::*;

    fn with_weights(weights: &[u64]) -> Document {
        let mut doc = valid_document();
        let groups: Vec<Value> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| {
                serde_yaml::from_str(&format!(
                    "{{id: {}, upstream_id: u{}, weight: {w}}}",
                    group_letter(i),
                    i % 2 + 1
                ))
                .unwrap()
            })
            .collect();
        let rs = service_mut(&mut doc, 0).get_mut("rollstrategy").unwrap();
        rs["groups"] = Value::Sequence(groups);
        doc
    }

    /// Property: lettered groups are accepted exactly when weights sum to 100.
    proptest! {
        #[test]
        fn prop_weight_sum_decides_validity(weights in prop::collection::vec(0u64..=100, 1..6)) {
            let doc = with_weights(&weights);
            let sum: u64 = weights.iter().sum();
            prop_assert_eq!(ConfigValidator::validate(&doc).is_ok(), sum == 100);
        }
    }

    /// Property: any split of 100 across lettered groups validates.
    proptest! {
        #[test]
        fn prop_exact_splits_accepted(first in 0u64..=100) {
            let doc = with_weights(&[first, 100 - first]);
            prop_assert!(ConfigValidator::validate(&doc).is_ok());
        }
    }

    /// Property: duplicating any upstream id within a service is rejected.
    proptest! {
        #[test]
        fn prop_duplicate_upstream_rejected(extra_port in 1u16..) {
            let mut doc = valid_document();
            let dup: Value = serde_yaml::from_str(
                &format!("{{id: u2, target: 10.9.9.9, port: {extra_port}}}")
            ).unwrap();
            service_mut(&mut doc, 0)
                .get_mut("upstreams")
                .and_then(Value::as_sequence_mut)
                .unwrap()
                .push(dup);
            let err = ConfigValidator::validate(&doc).unwrap_err();
            prop_assert!(err.to_string().contains("Duplicate upstream ID 'u2'"));
        }
    }

    /// Property: adding fields the schema does not know leaves validation
    /// unaffected and the document unchanged.
    proptest! {
        #[test]
        fn prop_extra_fields_tolerated(key in "x_[a-z]{1,8}", value in "[a-z0-9]{0,12}") {
            let mut doc = valid_document();
            service_mut(&mut doc, 1).insert(Value::String(key), Value::String(value));
            let validated = ConfigValidator::validate(&doc).unwrap();
            prop_assert_eq!(validated.document(), &doc);
        }
    }
}

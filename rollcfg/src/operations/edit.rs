//! Editing header matches.
//!
//! Edits never touch the input configuration. They produce an edited copy of
//! the document, which must pass validation again before it is returned and
//! can be persisted with [`ConfigLoader::persist`](crate::config::ConfigLoader::persist).

use serde_yaml::Value;

use crate::config::{ConfigValidator, Operator, ValidatedConfig};
use crate::document::{display_value, Document};
use crate::error::{Error, Result};

/// Field changes to apply to one match. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchEdit {
    /// New header name.
    pub header_name: Option<String>,
    /// New operator; only `==` and `~=` are accepted.
    pub operator: Option<Operator>,
    /// New comparison value.
    pub value: Option<String>,
}

impl MatchEdit {
    /// An edit that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header name.
    #[must_use]
    pub fn with_header_name(mut self, header_name: impl Into<String>) -> Self {
        self.header_name = Some(header_name.into());
        self
    }

    /// Sets the operator.
    #[must_use]
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Sets the value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Whether the edit changes no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.header_name.is_none() && self.operator.is_none() && self.value.is_none()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(header_name) = &self.header_name {
            fields.push(("header_name", header_name.clone()));
        }
        if let Some(operator) = &self.operator {
            fields.push(("operator", operator.to_string()));
        }
        if let Some(value) = &self.value {
            fields.push(("value", value.clone()));
        }
        fields
    }
}

/// Apply `edit` to match `match_id` of `service`, returning the re-validated
/// copy.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the service or match does not exist, the
/// operator is not `==` or `~=`, or the edited document fails validation.
///
/// # Examples
///
/// ```
/// use rollcfg::config::Operator;
/// use rollcfg::operations::{edit_match, MatchEdit};
/// use rollcfg::{ConfigValidator, Document};
///
/// let yaml = r#"
/// services:
///   - name: svc1
///     uri: /
///     default_upstream: u1
///     matches:
///       - { id: m1, header_name: x-canary, operator: "==", value: "true" }
///     rules: []
///     upstreams:
///       - { id: u1, target: 10.0.0.1, port: 80 }
/// "#;
/// let config = ConfigValidator::validate(&Document::parse("inline", yaml).unwrap()).unwrap();
/// let edit = MatchEdit::new().with_operator(Operator::Regex).with_value("^t");
/// let edited = edit_match(&config, "svc1", "m1", &edit).unwrap();
///
/// assert_eq!(edited.services()[0].matches[0].operator, Operator::Regex);
/// assert_eq!(config.services()[0].matches[0].operator, Operator::Equal);
/// ```
pub fn edit_match(
    config: &ValidatedConfig,
    service: &str,
    match_id: &str,
    edit: &MatchEdit,
) -> Result<ValidatedConfig> {
    if let Some(operator) = edit.operator.as_ref().filter(|op| !op.is_known()) {
        return Err(Error::validation(format!(
            "Operator '{operator}' is not supported; expected '==' or '~='"
        )));
    }

    let mut document: Document = config.document().clone();
    let record = find_match_mut(&mut document, service, match_id)?;
    for (field, value) in edit.fields() {
        record.insert(Value::from(field), Value::from(value));
    }

    let edited = ConfigValidator::validate(&document)?;
    log::info!("edited match '{match_id}' in service {service}");
    Ok(edited)
}

fn find_match_mut<'a>(
    document: &'a mut Document,
    service: &str,
    match_id: &str,
) -> Result<&'a mut serde_yaml::Mapping> {
    let service_record = document
        .root_mut()
        .get_mut("services")
        .and_then(Value::as_sequence_mut)
        .and_then(|services| {
            services
                .iter_mut()
                .find(|s| s.get("name").is_some_and(|n| display_value(n) == service))
        })
        .ok_or_else(|| Error::validation(format!("Service '{service}' not found in configuration")))?;

    service_record
        .get_mut("matches")
        .and_then(Value::as_sequence_mut)
        .and_then(|matches| {
            matches
                .iter_mut()
                .find(|m| m.get("id").is_some_and(|id| display_value(id) == match_id))
        })
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| {
            Error::validation(format!("Match '{match_id}' not found in service {service}"))
        })
}

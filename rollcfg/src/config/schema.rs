//! Configuration schema definitions.
//!
//! Typed view of a routing configuration document. Instances are only
//! materialized from documents that already passed
//! [`ConfigValidator`](crate::config::ConfigValidator), so the types carry
//! the validated shape rather than re-checking it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::document::{display_value, is_truthy};

/// A complete routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RoutingConfig {
    /// Services in document order.
    pub services: Vec<Service>,
}

/// A named service mapping one URI to its upstreams.
///
/// # Examples
///
/// ```
/// use rollcfg::config::Service;
///
/// let yaml = r#"
/// name: svc1
/// uri: /api
/// default_upstream: u1
/// matches: []
/// rules: []
/// upstreams:
///   - { id: u1, target: 10.0.0.1, port: 80 }
/// "#;
/// let service: Service = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(service.upstream("u1").unwrap().address(), "10.0.0.1:80");
/// assert!(service.rollstrategy.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Service {
    /// Unique service name.
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,

    /// Route match path.
    #[serde(deserialize_with = "scalar_string")]
    pub uri: String,

    /// Upstream used when no rollout strategy applies.
    #[serde(deserialize_with = "scalar_string")]
    pub default_upstream: String,

    /// Header conditions, referenced by rules.
    pub matches: Vec<Match>,

    /// Header-based routing rules.
    pub rules: Vec<Rule>,

    /// Backend targets.
    pub upstreams: Vec<Upstream>,

    /// Optional staged-rollout policy.
    #[serde(
        default,
        deserialize_with = "optional_rollstrategy",
        skip_serializing_if = "Option::is_none"
    )]
    pub rollstrategy: Option<RollStrategy>,
}

impl Service {
    /// Look up an upstream by id.
    #[must_use]
    pub fn upstream(&self, id: &str) -> Option<&Upstream> {
        self.upstreams.iter().find(|u| u.id == id)
    }

    /// Look up a match by id.
    #[must_use]
    pub fn find_match(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Rollout groups, if the service declares any.
    #[must_use]
    pub fn rollout_groups(&self) -> Option<&[RollGroup]> {
        self.rollstrategy
            .as_ref()
            .and_then(|rs| rs.groups.as_deref())
    }
}

/// A single header condition.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Match {
    /// Id, unique within the owning service.
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,

    /// Request header to inspect.
    #[serde(deserialize_with = "scalar_string")]
    pub header_name: String,

    /// Comparison operator.
    pub operator: Operator,

    /// Value compared against the header.
    #[serde(deserialize_with = "scalar_string")]
    pub value: String,
}

/// Header comparison operator.
///
/// Documents may carry operators outside the known set; those are kept as
/// [`Operator::Other`] so a round trip does not lose them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// `==`
    Equal,
    /// `~=`
    Regex,
    /// Anything else found in a document.
    Other(String),
}

impl Operator {
    /// The operator as written in documents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equal => "==",
            Self::Regex => "~=",
            Self::Other(s) => s,
        }
    }

    /// Whether this is one of the operators routing engines understand.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        match s.as_str() {
            "==" => Self::Equal,
            "~=" => Self::Regex,
            _ => Self::Other(s),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl FromStr for Operator {
    type Err = String;

    /// Strict parse: only the known operators are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from(s.to_string()) {
            Self::Other(other) => Err(format!(
                "unsupported operator '{other}' (expected '==' or '~=')"
            )),
            known => Ok(known),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binding from a set of matches to an upstream.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Rule {
    /// Id, unique within the owning service.
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,

    /// Ids of the matches that must all hold.
    #[serde(deserialize_with = "scalar_strings")]
    pub matches: Vec<String>,

    /// Destination upstream id.
    #[serde(deserialize_with = "scalar_string")]
    pub upstream_id: String,
}

/// A backend target.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Upstream {
    /// Id, unique within the owning service.
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,

    /// Host name or address.
    #[serde(deserialize_with = "scalar_string")]
    pub target: String,

    /// TCP port.
    pub port: u16,
}

impl Upstream {
    /// The `host:port` node address.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.target, self.port)
    }
}

/// Weighted traffic-split policy for a staged rollout.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RollStrategy {
    /// Display name; documents usually omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Lettered groups. Absent means "all traffic to the default upstream".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<RollGroup>>,
}

impl RollStrategy {
    /// Name to show when none is configured.
    pub const DEFAULT_NAME: &'static str = "default";

    /// The configured name, or [`Self::DEFAULT_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(Self::DEFAULT_NAME)
    }
}

/// One rollout group: a share of traffic sent to an upstream.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RollGroup {
    /// Positional letter id ("A", "B", ...).
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,

    /// Target upstream id.
    #[serde(deserialize_with = "scalar_string")]
    pub upstream_id: String,

    /// Percentage of traffic.
    pub weight: u32,
}

/// Accept any scalar where a string is expected (`id: 1` reads as `"1"`).
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(_) | Value::Bool(_) => Ok(display_value(&value)),
        other => Err(D::Error::custom(format!(
            "expected a scalar, found {}",
            display_value(&other)
        ))),
    }
}

fn scalar_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let values = Vec::<Value>::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Ok(s),
            Value::Number(_) | Value::Bool(_) => Ok(display_value(&v)),
            other => Err(D::Error::custom(format!(
                "expected a scalar, found {}",
                display_value(&other)
            ))),
        })
        .collect()
}

/// A falsy `rollstrategy` (null, `{}`, `false`) means no strategy at all.
fn optional_rollstrategy<'de, D>(deserializer: D) -> Result<Option<RollStrategy>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;
    if !is_truthy(&value) {
        return Ok(None);
    }
    serde_yaml::from_value(value)
        .map(Some)
        .map_err(D::Error::custom)
}

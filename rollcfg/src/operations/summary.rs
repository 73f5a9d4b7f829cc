//! Per-service overviews.

use serde::Serialize;

use crate::config::{RollGroup, Service, ValidatedConfig};

/// Overview of one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    /// Service name.
    pub name: String,
    /// Route match path.
    pub uri: String,
    /// Fallback upstream.
    pub default_upstream: String,
    /// Rollout state.
    pub rollout: RolloutStatus,
    /// Number of declared matches.
    pub match_count: usize,
    /// Number of declared rules.
    pub rule_count: usize,
    /// Number of declared upstreams.
    pub upstream_count: usize,
    /// Rule table in declaration order.
    pub rules: Vec<RuleRow>,
}

/// Whether a service rolls out traffic across groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolloutStatus {
    /// A truthy rollstrategy is present.
    pub enabled: bool,
    /// Strategy name when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    /// Rollout groups; empty when traffic goes to the default upstream.
    pub groups: Vec<RollGroup>,
}

/// One row of a service's rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleRow {
    /// Rule id.
    pub id: String,
    /// Referenced match ids.
    pub matches: Vec<String>,
    /// Destination upstream.
    pub upstream_id: String,
}

impl From<&Service> for ServiceSummary {
    fn from(service: &Service) -> Self {
        let rollout = match &service.rollstrategy {
            Some(strategy) => RolloutStatus {
                enabled: true,
                strategy: Some(strategy.display_name().to_string()),
                groups: strategy.groups.clone().unwrap_or_default(),
            },
            None => RolloutStatus {
                enabled: false,
                strategy: None,
                groups: Vec::new(),
            },
        };

        Self {
            name: service.name.clone(),
            uri: service.uri.clone(),
            default_upstream: service.default_upstream.clone(),
            rollout,
            match_count: service.matches.len(),
            rule_count: service.rules.len(),
            upstream_count: service.upstreams.len(),
            rules: service
                .rules
                .iter()
                .map(|rule| RuleRow {
                    id: rule.id.clone(),
                    matches: rule.matches.clone(),
                    upstream_id: rule.upstream_id.clone(),
                })
                .collect(),
        }
    }
}

impl ServiceSummary {
    /// Multi-line text overview.
    #[must_use]
    pub fn render_human(&self) -> String {
        let mut lines = vec![
            format!("Service: {}", self.name),
            format!("  URI: {}", self.uri),
            format!("  Default upstream: {}", self.default_upstream),
        ];

        match &self.rollout.strategy {
            Some(strategy) if self.rollout.enabled => {
                lines.push(format!("  Rollout: enabled ({strategy})"));
                if self.rollout.groups.is_empty() {
                    lines.push(format!("    all traffic -> {}", self.default_upstream));
                }
                for group in &self.rollout.groups {
                    lines.push(format!(
                        "    {} -> {} ({}%)",
                        group.id, group.upstream_id, group.weight
                    ));
                }
            }
            _ => lines.push("  Rollout: disabled".to_string()),
        }

        lines.push(format!(
            "  Matches: {}  Rules: {}  Upstreams: {}",
            self.match_count, self.rule_count, self.upstream_count
        ));

        if self.rules.is_empty() {
            lines.push("  No rules defined.".to_string());
        } else {
            lines.push("  Rules:".to_string());
            for rule in &self.rules {
                lines.push(format!(
                    "    {}: [{}] -> {}",
                    rule.id,
                    rule.matches.join(", "),
                    rule.upstream_id
                ));
            }
        }

        lines.join("\n")
    }
}

/// Summarize every service in document order.
#[must_use]
pub fn summarize(config: &ValidatedConfig) -> Vec<ServiceSummary> {
    config.services().iter().map(ServiceSummary::from).collect()
}

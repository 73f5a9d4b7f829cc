//! Compilation of validated configuration into routing-engine form.
//!
//! The target is an APISIX-style document: one route per service carrying a
//! `traffic-split` plugin, plus one round-robin upstream per declared
//! upstream.
//!
//! ```yaml
//! routes:
//!   - uri: /checkout/*
//!     plugins:
//!       traffic-split:
//!         rules:
//!           - match: {}
//!             weighted_upstreams:
//!               - { upstream_id: u1, weight: 90 }
//!               - { upstream_id: u2, weight: 10 }
//! upstreams:
//!   - id: u1
//!     nodes: { "10.0.0.1:80": 1 }
//!     type: roundrobin
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{Service, Upstream, ValidatedConfig};

/// Load-balancing type of every compiled upstream.
pub const ROUND_ROBIN: &str = "roundrobin";

/// Weight of the single node in a compiled upstream.
pub const NODE_WEIGHT: u32 = 1;

/// Weight given to the default upstream when no rollout applies.
pub const FULL_WEIGHT: u32 = 100;

/// A compiled routing-engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// One route per service, in service order.
    pub routes: Vec<TargetRoute>,
    /// All upstreams of all services, in declaration order.
    pub upstreams: Vec<TargetUpstream>,
}

/// A route bound to a traffic split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRoute {
    /// Request path the route matches.
    pub uri: String,
    /// Plugin configuration.
    pub plugins: RoutePlugins,
}

/// Plugins attached to a compiled route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlugins {
    /// The traffic-split plugin.
    #[serde(rename = "traffic-split")]
    pub traffic_split: TrafficSplit,
}

/// `traffic-split` plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSplit {
    /// Split rules; compiled routes always carry exactly one.
    pub rules: Vec<TrafficRule>,
}

/// A traffic-split rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficRule {
    /// Request conditions. Empty matches all traffic.
    #[serde(rename = "match")]
    pub conditions: BTreeMap<String, String>,
    /// Upstreams and their share of matched traffic.
    pub weighted_upstreams: Vec<WeightedUpstream>,
}

/// A share of traffic sent to one upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedUpstream {
    /// Target upstream id.
    pub upstream_id: String,
    /// Share of traffic.
    pub weight: u32,
}

/// A compiled upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetUpstream {
    /// Upstream id.
    pub id: String,
    /// Node address to weight.
    pub nodes: BTreeMap<String, u32>,
    /// Load-balancing type.
    #[serde(rename = "type")]
    pub lb_type: String,
}

impl From<&Upstream> for TargetUpstream {
    fn from(upstream: &Upstream) -> Self {
        Self {
            id: upstream.id.clone(),
            nodes: BTreeMap::from([(upstream.address(), NODE_WEIGHT)]),
            lb_type: ROUND_ROBIN.to_string(),
        }
    }
}

/// Compiles validated configuration.
///
/// # Examples
///
/// ```
/// use rollcfg::{Compiler, ConfigValidator, Document};
///
/// let yaml = r#"
/// services:
///   - name: svc1
///     uri: /api
///     default_upstream: u1
///     matches: []
///     rules: []
///     upstreams:
///       - { id: u1, target: 10.0.0.1, port: 80 }
/// "#;
/// let config = ConfigValidator::validate(&Document::parse("inline", yaml).unwrap()).unwrap();
/// let target = Compiler::compile(&config);
///
/// let split = &target.routes[0].plugins.traffic_split.rules[0];
/// assert_eq!(split.weighted_upstreams[0].upstream_id, "u1");
/// assert_eq!(split.weighted_upstreams[0].weight, 100);
/// assert_eq!(target.upstreams[0].nodes["10.0.0.1:80"], 1);
/// ```
pub struct Compiler;

impl Compiler {
    /// Compile every service of a validated configuration.
    #[must_use]
    pub fn compile(config: &ValidatedConfig) -> TargetConfig {
        let mut target = TargetConfig::default();

        for service in config.services() {
            target
                .upstreams
                .extend(service.upstreams.iter().map(TargetUpstream::from));
            target.routes.push(Self::compile_route(service));
        }

        log::debug!(
            "compiled {} route(s) and {} upstream(s)",
            target.routes.len(),
            target.upstreams.len()
        );
        target
    }

    fn compile_route(service: &Service) -> TargetRoute {
        TargetRoute {
            uri: service.uri.clone(),
            plugins: RoutePlugins {
                traffic_split: TrafficSplit {
                    rules: vec![TrafficRule {
                        conditions: BTreeMap::new(),
                        weighted_upstreams: Self::weighted_upstreams(service),
                    }],
                },
            },
        }
    }

    /// Rollout groups in order, or the default upstream at full weight.
    fn weighted_upstreams(service: &Service) -> Vec<WeightedUpstream> {
        match service.rollout_groups() {
            Some(groups) => groups
                .iter()
                .map(|group| WeightedUpstream {
                    upstream_id: group.upstream_id.clone(),
                    weight: group.weight,
                })
                .collect(),
            None => vec![WeightedUpstream {
                upstream_id: service.default_upstream.clone(),
                weight: FULL_WEIGHT,
            }],
        }
    }
}

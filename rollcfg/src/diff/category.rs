//! Classification of changed paths by configuration object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The configuration object a change belongs to.
///
/// Variant order is the classification precedence and also the order
/// categories appear in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Service records.
    Services,
    /// Header matches.
    Matches,
    /// Rollout strategies.
    Rollstrategy,
    /// Routing rules.
    Rules,
    /// Upstreams.
    Upstreams,
    /// Anything outside the known objects.
    Unknown,
}

impl Category {
    /// Categories that can be recognized in a path, in precedence order.
    pub const LABELED: [Self; 5] = [
        Self::Services,
        Self::Matches,
        Self::Rollstrategy,
        Self::Rules,
        Self::Upstreams,
    ];

    /// The label searched for in paths.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Matches => "matches",
            Self::Rollstrategy => "rollstrategy",
            Self::Rules => "rules",
            Self::Upstreams => "upstreams",
            Self::Unknown => "unknown",
        }
    }

    /// Capitalized label for human output.
    #[must_use]
    pub fn title(self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How a path is assigned to a [`Category`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryStrategy {
    /// The first label, in [`Category::LABELED`] order, contained anywhere
    /// in the path. Every path below `services` is therefore a service
    /// change.
    #[default]
    Precedence,
    /// The label occurring last in the path, naming the most specific
    /// object that changed.
    Innermost,
}

impl CategoryStrategy {
    /// Assign a rendered path to a category.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcfg::diff::{Category, CategoryStrategy};
    ///
    /// let path = "root['services'][0]['upstreams'][0]['port']";
    /// assert_eq!(CategoryStrategy::Precedence.categorize(path), Category::Services);
    /// assert_eq!(CategoryStrategy::Innermost.categorize(path), Category::Upstreams);
    /// assert_eq!(CategoryStrategy::Precedence.categorize("root['version']"), Category::Unknown);
    /// ```
    #[must_use]
    pub fn categorize(self, path: &str) -> Category {
        let found = match self {
            Self::Precedence => Category::LABELED
                .into_iter()
                .find(|category| path.contains(category.label())),
            Self::Innermost => Category::LABELED
                .into_iter()
                .filter_map(|category| path.rfind(category.label()).map(|at| (at, category)))
                .max_by_key(|(at, _)| *at)
                .map(|(_, category)| category),
        };
        found.unwrap_or(Category::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_is_first_match() {
        let s = CategoryStrategy::Precedence;
        assert_eq!(s.categorize("root['services'][0]['matches'][1]"), Category::Services);
        assert_eq!(s.categorize("root['matches'][0]['rules']"), Category::Matches);
        assert_eq!(s.categorize("root['rollstrategy']['groups'][0]"), Category::Rollstrategy);
        assert_eq!(s.categorize("root['rules'][0]['upstream_id']"), Category::Rules);
        assert_eq!(s.categorize("root['upstreams'][0]"), Category::Upstreams);
        assert_eq!(s.categorize("root['other']"), Category::Unknown);
    }

    #[test]
    fn test_precedence_is_substring_containment() {
        assert_eq!(
            CategoryStrategy::Precedence.categorize("root['my_upstreams_v2']"),
            Category::Upstreams
        );
    }

    #[test]
    fn test_innermost_picks_last_label() {
        let s = CategoryStrategy::Innermost;
        assert_eq!(
            s.categorize("root['services'][0]['rollstrategy']['groups'][1]['weight']"),
            Category::Rollstrategy
        );
        assert_eq!(s.categorize("root['services'][0]['name']"), Category::Services);
        assert_eq!(s.categorize("root"), Category::Unknown);
    }

    #[test]
    fn test_title_and_serialization() {
        assert_eq!(Category::Upstreams.title(), "Upstreams");
        assert_eq!(Category::Rollstrategy.title(), "Rollstrategy");
        assert_eq!(serde_json::to_string(&Category::Unknown).unwrap(), "\"unknown\"");
    }

    #[test]
    fn test_category_order_follows_labels() {
        let mut sorted = vec![Category::Unknown, Category::Rules, Category::Services];
        sorted.sort();
        assert_eq!(sorted, vec![Category::Services, Category::Rules, Category::Unknown]);
    }
}

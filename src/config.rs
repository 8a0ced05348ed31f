use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::assign::selector::MAX_SELECTION;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{field} is {requested} but at most {max} users can be selected from one list")]
    DesiredCountTooLarge {
        field: &'static str,
        requested: usize,
        max: usize,
    },
}

/// Assignment configuration, parsed from the YAML document stored in the
/// target repository (conventionally `.github/auto_assign.yml`).
///
/// Every field is optional; missing fields mean disabled groups, empty
/// candidate lists, and zero counts (zero count = select everyone).
/// Group mappings keep their YAML order, which drives the order of the
/// combined selection result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Whether to request reviewers at all
    pub add_reviewers: bool,
    /// Whether/how to set assignees: a boolean, or the string "reviewers"
    /// to reuse the chosen reviewer list
    pub add_assignees: AddAssignees,
    /// Flat reviewer candidate list
    pub reviewers: Vec<String>,
    /// Flat assignee candidate list; falls back to `reviewers` when empty
    pub assignees: Vec<String>,
    /// How many reviewers to pick (0 = everyone)
    pub number_of_reviewers: usize,
    /// How many assignees to pick; falls back to `number_of_reviewers`
    /// when absent
    pub number_of_assignees: Option<usize>,
    /// Select reviewers per group instead of from the flat list
    pub use_review_groups: bool,
    /// Select assignees per group instead of from the flat list
    pub use_assignee_groups: bool,
    /// Named reviewer groups, order-significant
    pub review_groups: IndexMap<String, Vec<String>>,
    /// Named assignee groups, order-significant
    pub assignee_groups: IndexMap<String, Vec<String>>,
    /// Skip assignment entirely when the PR title contains one of these
    pub skip_keywords: Vec<String>,
    /// Run on draft pull requests too
    pub run_on_draft: bool,
}

/// The `addAssignees` field accepts a boolean or a string. `"reviewers"`
/// means "reuse the reviewer list"; any other truthy value means "assign
/// the PR back to its author".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AddAssignees {
    Flag(bool),
    Mode(String),
}

impl Default for AddAssignees {
    fn default() -> Self {
        AddAssignees::Flag(false)
    }
}

impl AddAssignees {
    pub fn is_reviewers(&self) -> bool {
        matches!(self, AddAssignees::Mode(mode) if mode == "reviewers")
    }
}

impl Config {
    /// Parse the raw YAML text returned by the configuration source.
    pub fn from_yaml(text: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_yaml::from_str(text)?;
        Ok(config)
    }

    /// Check that the configured counts stay within the number of users the
    /// selector can draw from a single list. The selector itself does not
    /// guard this bound, so it must hold before planning starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_reviewers > MAX_SELECTION {
            return Err(ConfigError::DesiredCountTooLarge {
                field: "numberOfReviewers",
                requested: self.number_of_reviewers,
                max: MAX_SELECTION,
            });
        }
        if let Some(count) = self.number_of_assignees {
            if count > MAX_SELECTION {
                return Err(ConfigError::DesiredCountTooLarge {
                    field: "numberOfAssignees",
                    requested: count,
                    max: MAX_SELECTION,
                });
            }
        }
        Ok(())
    }

    /// Assignee count with the documented fallback to the reviewer count.
    pub fn assignee_count(&self) -> usize {
        self.number_of_assignees.unwrap_or(self.number_of_reviewers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.add_reviewers);
        assert_eq!(config.add_assignees, AddAssignees::Flag(false));
        assert!(config.reviewers.is_empty());
        assert_eq!(config.number_of_reviewers, 0);
        assert!(config.number_of_assignees.is_none());
        assert!(config.review_groups.is_empty());
        assert!(!config.run_on_draft);
    }

    #[test]
    fn test_parse_flat_config() {
        let yaml = r#"
addReviewers: true
addAssignees: false
reviewers:
  - alice
  - bob
  - carol
numberOfReviewers: 2
skipKeywords:
  - wip
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert!(config.add_reviewers);
        assert_eq!(config.add_assignees, AddAssignees::Flag(false));
        assert_eq!(config.reviewers, vec!["alice", "bob", "carol"]);
        assert_eq!(config.number_of_reviewers, 2);
        assert!(config.number_of_assignees.is_none());
        assert_eq!(config.skip_keywords, vec!["wip"]);
    }

    #[test]
    fn test_parse_add_assignees_string() {
        let config = Config::from_yaml("addAssignees: reviewers").unwrap();
        assert!(config.add_assignees.is_reviewers());

        let config = Config::from_yaml("addAssignees: author").unwrap();
        assert_eq!(
            config.add_assignees,
            AddAssignees::Mode("author".to_string())
        );
        assert!(!config.add_assignees.is_reviewers());
    }

    #[test]
    fn test_group_order_preserved() {
        let yaml = r#"
useReviewGroups: true
reviewGroups:
  zeta: [a, b]
  alpha: [c]
  mid: [d, e]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let names: Vec<&String> = config.review_groups.keys().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_validate_rejects_oversized_counts() {
        let mut config = Config {
            number_of_reviewers: MAX_SELECTION + 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        config.number_of_reviewers = MAX_SELECTION;
        assert!(config.validate().is_ok());

        config.number_of_assignees = Some(MAX_SELECTION + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_assignee_count_fallback() {
        let config = Config {
            number_of_reviewers: 3,
            ..Config::default()
        };
        assert_eq!(config.assignee_count(), 3);

        let config = Config {
            number_of_reviewers: 3,
            number_of_assignees: Some(0),
            ..Config::default()
        };
        // explicit 0 means select-all, not "fall back"
        assert_eq!(config.assignee_count(), 0);
    }
}

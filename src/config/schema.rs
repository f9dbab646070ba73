use serde::{Deserialize, Serialize};

use crate::ruleset::{common_templates, Ruleset};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Ruleset used when a command is not given `--ruleset`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ruleset: Option<String>,

    #[serde(default)]
    pub rulesets: Vec<Ruleset>,
}

impl Config {
    /// Config holding the built-in templates, M-League first.
    pub fn from_templates() -> Self {
        let rulesets = common_templates();
        Self {
            default_ruleset: rulesets.first().map(|r| r.ruleset_id.clone()),
            rulesets,
        }
    }

    pub fn find_ruleset(&self, id: &str) -> Option<&Ruleset> {
        self.rulesets.iter().find(|r| r.ruleset_id == id)
    }

    /// Resolve the ruleset a command runs against.
    ///
    /// An explicit id wins, then `default_ruleset`, then the first configured ruleset.
    pub fn select_ruleset(&self, id: Option<&str>) -> anyhow::Result<&Ruleset> {
        if let Some(id) = id.or(self.default_ruleset.as_deref()) {
            return self.find_ruleset(id).ok_or_else(|| {
                let available: Vec<&str> =
                    self.rulesets.iter().map(|r| r.ruleset_id.as_str()).collect();
                anyhow::anyhow!(
                    "Unknown ruleset '{}'. Available: {}",
                    id,
                    available.join(", ")
                )
            });
        }
        self.rulesets
            .first()
            .ok_or_else(|| anyhow::anyhow!("No rulesets configured. Run `janlog init` to create some"))
    }
}

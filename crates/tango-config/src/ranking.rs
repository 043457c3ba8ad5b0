use serde::{Deserialize, Serialize};

use crate::{env_flag, env_or};

/// Example sentences longer than this (whitespace excluded) lose to the
/// longest sentence at or under it, when one exists.
pub const READABILITY_CEILING: usize = 20;

fn default_readability_ceiling() -> usize {
    READABILITY_CEILING
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RankingConfig {
    #[serde(default = "default_readability_ceiling")]
    pub readability_ceiling: usize,
    /// Keep only sentences whose tokens contain the query term
    #[serde(default)]
    pub token_filter: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            readability_ceiling: default_readability_ceiling(),
            token_filter: false,
        }
    }
}

impl RankingConfig {
    pub fn new() -> Self {
        Self {
            readability_ceiling: env_or("TANGO_READABILITY_CEILING", default_readability_ceiling()),
            token_filter: env_flag("TANGO_TOKEN_FILTER"),
        }
    }
}

//! Split descriptors sent to the provider's create-data-source call.
//!
//! Field names and nesting follow the provider's `DataRearrangement`
//! document exactly:
//!
//! ```json
//! {"splitting":{"percentBegin":0,"percentEnd":25,"complement":true,
//!   "strategy":"random","strategyParams":{"randomSeed":7}}}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::partition::PercentRange;

/// How rows are assigned to the percentage range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Rows are taken in file order.
    Sequential,
    /// Rows are shuffled with a seed before splitting.
    Random,
}

impl SplitStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Random => "random",
        }
    }
}

impl Default for SplitStrategy {
    fn default() -> Self {
        Self::Random
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown split strategy: {}", other)),
        }
    }
}

/// Parameters for the random strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyParams {
    pub random_seed: u64,
}

/// Body of the `splitting` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Splitting {
    pub percent_begin: u32,
    pub percent_end: u32,
    pub complement: bool,
    pub strategy: SplitStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_params: Option<StrategyParams>,
}

/// Wire descriptor for one split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDescriptor {
    pub splitting: Splitting,
}

impl SplitDescriptor {
    /// Percentage range carried by the descriptor.
    pub fn range(&self) -> PercentRange {
        PercentRange {
            begin: self.splitting.percent_begin,
            end: self.splitting.percent_end,
        }
    }

    /// Compact JSON text for the provider's `DataRearrangement` field.
    pub fn to_rearrangement(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a `DataRearrangement` document.
    pub fn from_rearrangement(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Build the descriptor for one side of a fold.
///
/// `random_seed` is only carried when `strategy` is random.
pub fn build_split_descriptor(
    range: PercentRange,
    is_complement: bool,
    strategy: SplitStrategy,
    random_seed: u64,
) -> SplitDescriptor {
    let strategy_params = match strategy {
        SplitStrategy::Random => Some(StrategyParams { random_seed }),
        SplitStrategy::Sequential => None,
    };

    SplitDescriptor {
        splitting: Splitting {
            percent_begin: range.begin,
            percent_end: range.end,
            complement: is_complement,
            strategy,
            strategy_params,
        },
    }
}

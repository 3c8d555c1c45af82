//! Maximum flow and minimum cut algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod dinic;
pub mod max_flow;
pub mod min_cut;

pub use self::dinic::{dinic, layered_bottleneck};
pub use self::max_flow::{
    augment_path, bottleneck, edmonds_karp, ford_fulkerson, FlowOutcome, MaxFlowAlgorithm,
    MaxFlowSolver,
};
pub use self::min_cut::{karger_contract, Contraction, KargerMinCut, MinCutOutcome};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Algorithm, AlgorithmError};
use crate::config::SolverConfig;

/// Every algorithm a caller can select by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    FordFulkerson,
    EdmondsKarp,
    Dinic,
    Karger,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::FordFulkerson,
        AlgorithmKind::EdmondsKarp,
        AlgorithmKind::Dinic,
        AlgorithmKind::Karger,
    ];

    /// Build a ready-to-run algorithm configured from `config`
    pub fn instantiate(self, config: &SolverConfig) -> Box<dyn Algorithm> {
        match self {
            AlgorithmKind::FordFulkerson => {
                Box::new(MaxFlowSolver::new(MaxFlowAlgorithm::FordFulkerson))
            }
            AlgorithmKind::EdmondsKarp => Box::new(MaxFlowSolver::new(MaxFlowAlgorithm::EdmondsKarp)),
            AlgorithmKind::Dinic => Box::new(MaxFlowSolver::new(MaxFlowAlgorithm::Dinic)),
            AlgorithmKind::Karger => {
                Box::new(KargerMinCut::with_trials(config.karger_trials, config.seed))
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmKind::FordFulkerson => "ford-fulkerson",
            AlgorithmKind::EdmondsKarp => "edmonds-karp",
            AlgorithmKind::Dinic => "dinic",
            AlgorithmKind::Karger => "karger",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "ford-fulkerson" | "ff" => Ok(AlgorithmKind::FordFulkerson),
            "edmonds-karp" | "ek" => Ok(AlgorithmKind::EdmondsKarp),
            "dinic" | "dinics" => Ok(AlgorithmKind::Dinic),
            "karger" | "karger-min-cut" => Ok(AlgorithmKind::Karger),
            _ => Err(AlgorithmError::InvalidParameter {
                name: "algorithm".to_string(),
                reason: format!("unknown algorithm '{}'", s),
            }),
        }
    }
}

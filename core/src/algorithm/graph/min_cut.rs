//! Karger's randomized minimum cut
//!
//! Contraction runs on the adjacency view of the network. Every live
//! adjacency entry is an equally likely pick, so parallel and reverse
//! entries weight an edge by its multiplicity. A pick is one index draw over
//! the running prefix sum of per-vertex adjacency sizes.
//!
//! # Monte-Carlo Guarantee
//!
//! One contraction sequence finds a specific minimum cut with probability at
//! least `2 / (n (n - 1))`. The reported value is always an upper bound on
//! the true minimum cut; independent trials (the `trials` parameter) raise
//! the probability of hitting it.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmId, AlgorithmParameter,
    AlgorithmProfiler, CutPartition, ExecutionResult, ParameterConstraints, ParameterType,
};
use crate::data_structures::network::{Capacity, Directedness, FlowNetwork, NetworkError, VertexId};
use crate::execution::tracer::{ExecutionTracer, ReportMode, TraceEvent};

/// One merge of `absorbed`'s group into `kept`'s group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contraction {
    pub kept: VertexId,
    pub absorbed: VertexId,
}

/// Result of a single contraction sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCutOutcome {
    /// Sum of original capacities crossing the partition
    pub cut_value: Capacity,
    pub partition: CutPartition,
    /// Contractions in the order they were applied
    pub contractions: Vec<Contraction>,
}

/// Run one contraction sequence over a working copy of the adjacency lists
///
/// The network itself is left untouched so its residual/adjacency mirror
/// survives the run.
pub fn karger_contract<R>(network: &FlowNetwork, rng: &mut R) -> Result<MinCutOutcome, AlgorithmError>
where
    R: Rng + ?Sized,
{
    let order = network.order();
    if order < 2 {
        return Err(AlgorithmError::InvalidGraph(format!(
            "cannot cut a network of order {}",
            order
        )));
    }

    let mut adjacency: Vec<Vec<VertexId>> = network.neighbors().to_vec();
    let mut groups: Vec<VertexId> = (0..order).collect();
    let mut remaining = order;
    let mut live: usize = adjacency.iter().map(Vec::len).sum();
    live -= drop_internal_entries(&mut adjacency, &groups);

    let mut contractions = Vec::with_capacity(order - 2);
    while remaining > 2 && live > 0 {
        let pick = rng.gen_range(0..live);
        let (a, b) = select_entry(&adjacency, pick).ok_or_else(|| {
            AlgorithmError::InvalidGraph(format!(
                "edge pick {} outside {} live adjacency entries",
                pick, live
            ))
        })?;

        let (kept, absorbed) = (groups[a], groups[b]);
        for label in groups.iter_mut() {
            if *label == absorbed {
                *label = kept;
            }
        }
        remaining -= 1;
        live -= drop_internal_entries(&mut adjacency, &groups);

        debug!("Combined vertices {} and {} ({} live entries left)", a, b, live);
        contractions.push(Contraction { kept: a, absorbed: b });
    }

    let partition = partition_by_group(&groups);
    let cut_value = crossing_capacity(network, &groups)?;
    Ok(MinCutOutcome {
        cut_value,
        partition,
        contractions,
    })
}

/// Locate the `pick`-th adjacency entry by a running count over row sizes
fn select_entry(adjacency: &[Vec<VertexId>], pick: usize) -> Option<(VertexId, VertexId)> {
    let mut counter = 0;
    for (vertex, row) in adjacency.iter().enumerate() {
        if pick < counter + row.len() {
            return Some((vertex, row[pick - counter]));
        }
        counter += row.len();
    }
    None
}

/// Remove entries whose endpoints share a group; returns how many were removed
fn drop_internal_entries(adjacency: &mut [Vec<VertexId>], groups: &[VertexId]) -> usize {
    let mut removed = 0;
    for (vertex, row) in adjacency.iter_mut().enumerate() {
        let before = row.len();
        row.retain(|&other| groups[other] != groups[vertex]);
        removed += before - row.len();
    }
    removed
}

fn partition_by_group(groups: &[VertexId]) -> CutPartition {
    let (group_a, group_b): (Vec<VertexId>, Vec<VertexId>) =
        (0..groups.len()).partition(|&v| groups[v] == groups[0]);
    CutPartition { group_a, group_b }
}

/// Original capacity on edges joining the source's group to the rest
///
/// Undirected networks store every edge in both directions, so only the
/// upper triangle is summed.
fn crossing_capacity(network: &FlowNetwork, groups: &[VertexId]) -> Result<Capacity, NetworkError> {
    let original = network.original();
    let undirected = network.directedness() == Directedness::Undirected;
    let in_a = |v: VertexId| groups[v] == groups[0];
    let mut total: Capacity = 0;
    for (i, row) in original.iter().enumerate() {
        for (j, &capacity) in row.iter().enumerate() {
            if (undirected && j < i) || in_a(i) == in_a(j) {
                continue;
            }
            total = total
                .checked_add(capacity)
                .ok_or(NetworkError::TotalOverflow { quantity: "cut value" })?;
        }
    }
    Ok(total)
}

/// Karger's min-cut as an [`Algorithm`]
///
/// `trials = 1` performs exactly one contraction sequence. Larger values run
/// independent sequences in parallel and keep the smallest cut.
#[derive(Debug, Clone)]
pub struct KargerMinCut {
    trials: usize,
    seed: Option<u64>,
}

impl KargerMinCut {
    pub fn new() -> Self {
        Self::with_trials(1, None)
    }

    pub fn with_trials(trials: usize, seed: Option<u64>) -> Self {
        Self {
            trials: trials.max(1),
            seed,
        }
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn seed_label(&self) -> String {
        self.seed
            .map_or_else(|| "entropy".to_string(), |seed| seed.to_string())
    }

    fn trial_rng(&self, trial: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(trial as u64)),
            None => StdRng::from_entropy(),
        }
    }

    fn run_trial(&self, network: &FlowNetwork, trial: usize) -> Result<MinCutOutcome, AlgorithmError> {
        let mut rng = self.trial_rng(trial);
        karger_contract(network, &mut rng)
    }

    /// Run all trials and keep the smallest cut (earliest trial on ties)
    pub fn solve(&self, network: &FlowNetwork) -> Result<MinCutOutcome, AlgorithmError> {
        let outcomes: Vec<MinCutOutcome> = if self.trials == 1 {
            vec![self.run_trial(network, 0)?]
        } else {
            (0..self.trials)
                .into_par_iter()
                .map(|trial| self.run_trial(network, trial))
                .collect::<Result<Vec<_>, _>>()?
        };

        outcomes
            .into_iter()
            .min_by_key(|outcome| outcome.cut_value)
            .ok_or_else(|| AlgorithmError::InvalidGraph("no contraction trial ran".to_string()))
    }
}

impl Default for KargerMinCut {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for KargerMinCut {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("karger")
    }

    fn name(&self) -> &'static str {
        "Karger's Min Cut"
    }

    fn category(&self) -> &'static str {
        "min_cut"
    }

    fn description(&self) -> String {
        format!(
            "Karger's randomized contraction: merges endpoints of uniformly chosen adjacency \
             entries until two groups remain; {} independent trial(s), minimum kept.",
            self.trials
        )
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V·(V + E)) per trial".to_string(),
            space_complexity: "O(V + E)".to_string(),
            best_case: "O(V + E)".to_string(),
            average_case: "O(V·(V + E))".to_string(),
            worst_case: "O(V·(V + E))".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![
            AlgorithmParameter {
                name: "trials".to_string(),
                value: self.trials.to_string(),
                value_type: ParameterType::Integer,
                constraints: Some(ParameterConstraints {
                    min: Some(1.0),
                    max: None,
                }),
            },
            AlgorithmParameter {
                name: "seed".to_string(),
                value: self.seed_label(),
                value_type: ParameterType::Integer,
                constraints: None,
            },
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "trials" => {
                let trials = value
                    .parse::<usize>()
                    .ok()
                    .filter(|&t| t >= 1)
                    .ok_or_else(|| AlgorithmError::InvalidParameter {
                        name: name.to_string(),
                        reason: "trials must be a positive integer".to_string(),
                    })?;
                self.trials = trials;
            }
            "seed" => {
                self.seed = match value {
                    "entropy" | "none" => None,
                    _ => Some(value.parse::<u64>().map_err(|_| {
                        AlgorithmError::InvalidParameter {
                            name: name.to_string(),
                            reason: "seed must be an unsigned integer or 'entropy'".to_string(),
                        }
                    })?),
                };
            }
            _ => {
                return Err(AlgorithmError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("Unknown parameter: {}", name),
                })
            }
        }
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "trials" => Some(self.trials.to_string()),
            "seed" => Some(self.seed_label()),
            _ => None,
        }
    }

    fn execute_with_tracing(
        &mut self,
        network: &mut FlowNetwork,
        tracer: Option<&mut ExecutionTracer>,
    ) -> Result<ExecutionResult, AlgorithmError> {
        self.is_compatible_with(network)?;

        let mut silent;
        let tracer = match tracer {
            Some(tracer) => tracer,
            None => {
                silent = ExecutionTracer::new(ReportMode::Timing);
                &mut silent
            }
        };

        let mut profiler = AlgorithmProfiler::new();
        profiler.start();
        tracer.begin();

        let best = self.solve(network)?;

        for contraction in &best.contractions {
            tracer.record(TraceEvent::Contraction {
                kept: contraction.kept,
                absorbed: contraction.absorbed,
            });
            profiler.record_step();
        }
        tracer.record_with(|| TraceEvent::Partition {
            group_a: best.partition.group_a.clone(),
            group_b: best.partition.group_b.clone(),
        });
        for _ in 0..self.trials {
            profiler.record_phase();
        }
        profiler.stop();
        tracer.complete(self.name(), best.cut_value);

        info!(
            "{} finished: cut {} between {:?} and {:?} (best of {} trial(s))",
            self.name(),
            best.cut_value,
            best.partition.group_a,
            best.partition.group_b,
            self.trials
        );

        Ok(ExecutionResult {
            optimum: best.cut_value,
            partition: Some(best.partition),
            metrics: profiler.get_metrics(),
        })
    }
}

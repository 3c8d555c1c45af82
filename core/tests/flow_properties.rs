//! Property tests across the flow and cut algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use flowlab_core::algorithm::graph::{dinic, edmonds_karp, ford_fulkerson, karger_contract};
use flowlab_core::{Capacity, Directedness, ExecutionTracer, FlowNetwork, ReportMode};

fn build(order: usize, directedness: Directedness, edges: &[(usize, usize, Capacity)]) -> FlowNetwork {
    let mut network = FlowNetwork::new(directedness, order);
    for &(start, end, capacity) in edges {
        network.add_edge(start % order, end % order, capacity).unwrap();
    }
    network
}

fn network_strategy() -> impl Strategy<Value = FlowNetwork> {
    (2usize..=7, any::<bool>()).prop_flat_map(|(order, directed)| {
        let directedness = if directed {
            Directedness::Directed
        } else {
            Directedness::Undirected
        };
        prop::collection::vec((0..order, 0..order, 0i64..10), 0..20)
            .prop_map(move |edges| build(order, directedness, &edges))
    })
}

fn silent() -> ExecutionTracer {
    ExecutionTracer::new(ReportMode::Timing)
}

fn in_mask(mask: u32, v: usize) -> bool {
    mask & (1 << v) != 0
}

/// Smallest capacity leaving a vertex set that holds the source but not the sink
fn brute_force_st_cut(network: &FlowNetwork) -> Capacity {
    let order = network.order();
    let sink = order - 1;
    let original = network.original();
    (0u32..(1 << order))
        .filter(|&mask| in_mask(mask, 0) && !in_mask(mask, sink))
        .map(|mask| {
            let mut total = 0;
            for i in (0..order).filter(|&i| in_mask(mask, i)) {
                for j in (0..order).filter(|&j| !in_mask(mask, j)) {
                    total += original[i][j];
                }
            }
            total
        })
        .min()
        .unwrap_or(0)
}

/// Smallest capacity between the two sides of any nontrivial bipartition
fn brute_force_global_cut(network: &FlowNetwork) -> Capacity {
    let order = network.order();
    let original = network.original();
    let full = (1u32 << order) - 1;
    (0u32..full)
        .filter(|&mask| in_mask(mask, 0))
        .map(|mask| {
            let mut total = 0;
            for i in 0..order {
                for j in 0..order {
                    if in_mask(mask, i) != in_mask(mask, j) {
                        total += original[i][j];
                    }
                }
            }
            match network.directedness() {
                Directedness::Directed => total,
                Directedness::Undirected => total / 2,
            }
        })
        .min()
        .unwrap_or(0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn all_max_flow_algorithms_agree_with_min_cut(network in network_strategy()) {
        let expected = brute_force_st_cut(&network);

        let mut ff = network.clone();
        let mut ek = network.clone();
        let mut layered = network.clone();
        let ff_outcome = ford_fulkerson(&mut ff, &mut silent()).unwrap();
        let ek_outcome = edmonds_karp(&mut ek, &mut silent()).unwrap();
        let dinic_outcome = dinic(&mut layered, &mut silent()).unwrap();

        prop_assert_eq!(ff_outcome.max_flow, expected);
        prop_assert_eq!(ek_outcome.max_flow, expected);
        prop_assert_eq!(dinic_outcome.max_flow, expected);
    }

    #[test]
    fn flow_is_conserved_and_accounted(network in network_strategy()) {
        let mut solved = network.clone();
        let outcome = edmonds_karp(&mut solved, &mut silent()).unwrap();
        let sink = solved.order() - 1;

        prop_assert!(solved.verify_invariants().is_ok());
        prop_assert_eq!(solved.net_outflow(0), Ok(outcome.max_flow));
        prop_assert_eq!(solved.net_outflow(sink), Ok(-outcome.max_flow));
        for v in 1..sink {
            prop_assert_eq!(solved.net_outflow(v), Ok(0));
        }
        prop_assert_eq!(solved.original(), network.original());
    }

    #[test]
    fn iteration_counts_stay_bounded(network in network_strategy()) {
        let order = network.order();
        let edges = network.edge_count().max(1);

        let mut ek = network.clone();
        let ek_outcome = edmonds_karp(&mut ek, &mut silent()).unwrap();
        prop_assert!(ek_outcome.augmentations <= order * edges);

        let mut layered = network.clone();
        let dinic_outcome = dinic(&mut layered, &mut silent()).unwrap();
        prop_assert!(dinic_outcome.phases < order);
        prop_assert!(layered.verify_invariants().is_ok());
    }

    #[test]
    fn karger_reports_a_real_cut(network in network_strategy(), seed in any::<u64>()) {
        let before = network.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = karger_contract(&network, &mut rng).unwrap();

        prop_assert!(outcome.cut_value >= brute_force_global_cut(&network));
        prop_assert!(!outcome.partition.group_a.is_empty());
        prop_assert!(!outcome.partition.group_b.is_empty());
        prop_assert_eq!(
            outcome.partition.group_a.len() + outcome.partition.group_b.len(),
            network.order()
        );
        prop_assert!(outcome.contractions.len() <= network.order() - 2);
        prop_assert_eq!(network, before);
    }
}

#[test]
fn large_capacities_need_few_shortest_augmentations() {
    const C: Capacity = 1_000_000;
    let edges = [(0, 1, C), (0, 2, C), (1, 2, 1), (1, 3, C), (2, 3, C)];

    let mut ff = build(4, Directedness::Directed, &edges);
    let mut ek = ff.clone();
    let mut layered = ff.clone();

    assert_eq!(ford_fulkerson(&mut ff, &mut silent()).unwrap().max_flow, 2 * C);

    let ek_outcome = edmonds_karp(&mut ek, &mut silent()).unwrap();
    assert_eq!(ek_outcome.max_flow, 2 * C);
    assert_eq!(ek_outcome.augmentations, 2);

    let dinic_outcome = dinic(&mut layered, &mut silent()).unwrap();
    assert_eq!(dinic_outcome.max_flow, 2 * C);
    assert_eq!(dinic_outcome.phases, 1);
}

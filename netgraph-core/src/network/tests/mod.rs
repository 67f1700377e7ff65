//! Behavioural tests for [`Network`].


use rstest::rstest;

use crate::{
    Network, NetworkError, NetworkParams,
    test_utils::{RecordingLayer, seeded_network},
};

#[rstest]
#[case(0)]
#[case(1)]
#[case(17)]
fn resize_sets_size_and_draws_finite_values(#[case] n: usize) {
    let mut network = Network::new();
    network.resize(n);
    assert_eq!(network.size(), n);
    assert!(network.values().iter().all(|value| value.is_finite()));
    assert_eq!(network.link_count(), 0);
}

#[test]
fn resize_to_current_size_still_redraws_values() {
    let mut network = seeded_network(3, &[0.0; 8]);
    network.resize(8);
    assert_eq!(network.size(), 8);
    assert!(network.values().iter().any(|&value| value != 0.0));

    let before = network.values().to_vec();
    network.resize(8);
    assert_ne!(network.values(), before.as_slice());
}

#[test]
fn resize_keeps_links_between_surviving_nodes() {
    let mut network = seeded_network(5, &[0.0; 4]);
    assert!(network.add_link(0, 1));
    network.resize(6);
    assert!(network.has_link(0, 1));
    assert_eq!(network.degree(5), Ok(0));
}

#[test]
fn shrinking_removes_links_touching_dropped_nodes() {
    let mut network = seeded_network(7, &[0.0; 6]);
    for (a, b) in [(0, 1), (0, 5), (1, 4), (2, 3), (4, 5), (3, 5)] {
        assert!(network.add_link(a, b));
    }
    network.resize(4);

    assert_eq!(network.size(), 4);
    assert_eq!(network.links().collect::<Vec<_>>(), vec![(0, 1), (2, 3)]);
    assert_eq!(network.neighbours(0), Ok(&[1][..]));
    assert_eq!(network.neighbours(1), Ok(&[0][..]));
    assert_eq!(network.check_invariants(), Ok(()));
    assert!(network.links().all(|(a, b)| a < 4 && b < 4));
}

#[test]
fn add_link_succeeds_once_per_pair() {
    let mut network = seeded_network(1, &[0.0; 3]);
    assert!(network.add_link(0, 2));
    assert_eq!(network.link_count(), 1);
    assert!(!network.add_link(0, 2));
    assert!(!network.add_link(2, 0));
    assert_eq!(network.link_count(), 1);
    assert_eq!(network.degree(0), Ok(1));
    assert_eq!(network.degree(2), Ok(1));
}

#[rstest]
#[case::self_link(1, 1)]
#[case::first_out_of_range(3, 0)]
#[case::second_out_of_range(0, 3)]
#[case::far_out_of_range(0, usize::MAX)]
fn add_link_rejects_invalid_pairs(#[case] a: usize, #[case] b: usize) {
    let mut network = seeded_network(1, &[0.0; 3]);
    assert!(!network.add_link(a, b));
    assert_eq!(network.link_count(), 0);
    assert!((0..3).all(|node| network.degree(node) == Ok(0)));
}

#[test]
fn set_values_replaces_nodes_and_clears_links() {
    let mut network = seeded_network(2, &[0.0; 5]);
    assert!(network.add_link(0, 4));
    assert!(network.add_link(1, 2));

    assert_eq!(network.set_values(&[1.0, 2.0, 3.0]), 3);
    assert_eq!(network.size(), 3);
    assert_eq!(network.value(0), Ok(1.0));
    assert_eq!(network.value(1), Ok(2.0));
    assert_eq!(network.value(2), Ok(3.0));
    assert!((0..3).all(|node| network.degree(node) == Ok(0)));
    assert_eq!(network.link_count(), 0);
}

#[test]
fn set_values_with_empty_slice_empties_network() {
    let mut network = seeded_network(2, &[4.0, 5.0]);
    assert_eq!(network.set_values(&[]), 0);
    assert_eq!(network.size(), 0);
    assert!(network.sorted_values().is_empty());
}

#[test]
fn sorted_values_is_descending_and_non_mutating() {
    let network = seeded_network(0, &[3.0, 1.0, 2.0]);
    assert_eq!(network.sorted_values(), vec![3.0, 2.0, 1.0]);
    assert_eq!(network.values(), &[3.0, 1.0, 2.0]);
}

#[test]
fn sorted_values_keeps_duplicates() {
    let network = seeded_network(0, &[-1.0, 2.5, -1.0, 0.0]);
    assert_eq!(network.sorted_values(), vec![2.5, 0.0, -1.0, -1.0]);
}

#[test]
fn neighbours_follow_link_order() {
    let mut network = seeded_network(0, &[0.0; 4]);
    assert!(network.add_link(0, 3));
    assert!(network.add_link(1, 0));
    assert!(network.add_link(0, 2));
    assert_eq!(network.neighbours(0), Ok(&[3, 1, 2][..]));
    assert_eq!(network.neighbours(2), Ok(&[0][..]));
}

#[test]
fn neighbours_of_isolated_node_is_empty() {
    let network = seeded_network(0, &[0.0; 2]);
    assert_eq!(network.neighbours(1), Ok(&[][..]));
}

#[rstest]
#[case::value(|network: &Network| network.value(3).map(|_| ()))]
#[case::degree(|network: &Network| network.degree(3).map(|_| ()))]
#[case::neighbours(|network: &Network| network.neighbours(3).map(|_| ()))]
fn indexed_queries_reject_out_of_range(#[case] query: fn(&Network) -> crate::Result<()>) {
    let network = seeded_network(0, &[0.0; 3]);
    assert_eq!(
        query(&network),
        Err(NetworkError::NodeOutOfBounds { index: 3, len: 3 })
    );
}

#[rstest]
#[case(-0.5)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn random_connect_rejects_invalid_mean(#[case] mean: f64) {
    let mut network = seeded_network(4, &[0.0; 3]);
    assert!(network.add_link(0, 1));
    let err = network
        .random_connect(mean)
        .expect_err("invalid mean must be rejected");
    assert!(matches!(err, NetworkError::InvalidMeanDegree { .. }));
    assert!(network.has_link(0, 1));
}

#[test]
fn random_connect_with_zero_mean_clears_links() {
    let mut network = seeded_network(4, &[0.0; 10]);
    assert!(network.add_link(0, 1));
    assert!(network.add_link(2, 9));
    let created = network.random_connect(0.0).expect("zero mean is valid");
    assert_eq!(created, 0);
    assert_eq!(network.link_count(), 0);
    assert!((0..10).all(|node| network.degree(node) == Ok(0)));
}

#[rstest]
#[case(0)]
#[case(1)]
fn random_connect_on_tiny_networks_makes_no_links(#[case] n: usize) {
    let mut network = Network::with_params(NetworkParams::new().with_rng_seed(8));
    network.resize(n);
    assert_eq!(network.random_connect(5.0), Ok(0));
}

#[test]
fn random_connect_count_matches_relation() {
    let mut network = Network::with_params(NetworkParams::new().with_rng_seed(21));
    network.resize(200);
    let created = network.random_connect(6.0).expect("mean is valid");

    assert_eq!(created, network.links().count());
    let degree_sum: usize = (0..200)
        .map(|node| network.degree(node).expect("node in range"))
        .sum();
    assert_eq!(degree_sum, 2 * created);
    assert_eq!(network.check_invariants(), Ok(()));
}

#[test]
#[expect(clippy::cast_precision_loss, reason = "node counts are small")]
#[expect(clippy::float_arithmetic, reason = "mean degree is a ratio")]
fn random_connect_approaches_target_mean_degree() {
    let nodes = 400;
    let mut network = Network::with_params(NetworkParams::new().with_rng_seed(13));
    network.resize(nodes);
    let created = network.random_connect(4.0).expect("mean is valid");
    let mean_degree = 2.0 * created as f64 / nodes as f64;
    // Each node only tops up to its own target, and earlier partners count
    // towards it, so the realised mean sits between the target and twice it.
    assert!(
        (3.0..=8.0).contains(&mean_degree),
        "mean degree {mean_degree} out of range"
    );
}

#[test]
fn random_connect_saturates_small_complete_graph() {
    let mut network = Network::with_params(NetworkParams::new().with_rng_seed(2));
    network.resize(5);
    let created = network.random_connect(1_000.0).expect("mean is valid");
    assert!(created <= 10);
    assert!((0..5).all(|node| network.degree(node).is_ok_and(|degree| degree <= 4)));
    assert_eq!(network.check_invariants(), Ok(()));
}

#[rstest]
#[case(1.0e12)]
#[case(f64::MAX)]
fn random_connect_with_huge_mean_degree_terminates(#[case] mean_degree: f64) {
    let mut network = Network::with_params(NetworkParams::new().with_rng_seed(8));
    network.resize(5);
    let created = network.random_connect(mean_degree).expect("mean is finite");
    // Every node targets four partners, so the graph ends complete or nearly so.
    assert!((6..=10).contains(&created), "created {created} links");
    assert_eq!(created, network.link_count());
    assert!((0..5).all(|node| network.degree(node).is_ok_and(|degree| degree <= 4)));
    assert_eq!(network.check_invariants(), Ok(()));
}

#[test]
fn seeded_networks_are_reproducible() {
    let build = || {
        let mut network = Network::with_params(NetworkParams::new().with_rng_seed(99));
        network.resize(64);
        let links = network.random_connect(3.0).expect("mean is valid");
        (network.values().to_vec(), links, network.links().collect::<Vec<_>>())
    };
    assert_eq!(build(), build());
}

#[test]
fn random_connect_emits_instrumentation() {
    let layer = RecordingLayer::default();
    let mut network = Network::with_params(NetworkParams::new().with_rng_seed(6));
    network.resize(12);
    let created = layer.capture(|| network.random_connect(2.0).expect("mean is valid"));

    let spans = layer.spans();
    let span = spans
        .iter()
        .find(|record| record.name == "random_connect")
        .expect("random_connect span must be recorded");
    assert_eq!(span.fields.get("nodes").map(String::as_str), Some("12"));
    assert_eq!(span.fields.get("mean_degree").map(String::as_str), Some("2"));

    let events = layer.events();
    let summary = events
        .iter()
        .find(|record| record.name == "random wiring complete")
        .expect("completion event must be recorded");
    assert_eq!(summary.fields.get("links"), Some(&created.to_string()));
}

#[test]
fn shrinking_logs_removed_link_count() {
    let layer = RecordingLayer::default();
    let mut network = seeded_network(6, &[0.0; 4]);
    assert!(network.add_link(0, 3));
    assert!(network.add_link(2, 3));
    layer.capture(|| network.resize(3));

    let events = layer.events();
    let removal = events
        .iter()
        .find(|record| record.name == "dropped links of removed nodes")
        .expect("removal event must be recorded");
    assert_eq!(removal.fields.get("removed").map(String::as_str), Some("2"));
}

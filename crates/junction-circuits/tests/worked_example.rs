//! The 20 junction box worked example, end to end.

use junction_circuits::{
    analyze, parse_points, AnalysisConfig, BudgetPolicy, DistanceTable, PairSource, PhaseStatus,
};

const WORKED_EXAMPLE: &str = "
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

fn example_config() -> AnalysisConfig {
    AnalysisConfig::default()
        .with_target_count(10)
        .with_hard_cap(1000)
        .with_largest(3)
}

#[test]
fn closest_pairs_come_first() {
    let points = parse_points(WORKED_EXAMPLE).unwrap();
    let table = DistanceTable::new(&points);
    assert_eq!(table.len(), 190);

    let first: Vec<(usize, usize)> = table.pairs()[..4].iter().map(|p| (p.i, p.j)).collect();
    assert_eq!(first, vec![(0, 19), (0, 7), (2, 13), (7, 19)]);
}

#[test]
fn ten_accepted_joins() {
    let points = parse_points(WORKED_EXAMPLE).unwrap();
    let report = analyze(&points, &example_config());

    assert_eq!(report.bounded.status, PhaseStatus::Completed);
    assert_eq!(report.bounded.accepted, 10);
    assert_eq!(report.bounded.skipped, 1);
    assert_eq!(report.bounded_sizes, vec![5, 5, 2, 2, 1, 1, 1, 1, 1, 1]);
    assert_eq!(report.largest_circuits_product(3), 50);
}

#[test]
fn pair_completing_the_circuit() {
    let points = parse_points(WORKED_EXAMPLE).unwrap();
    let report = analyze(&points, &example_config());

    assert_eq!(report.full.status, PhaseStatus::Completed);
    assert_eq!(report.final_sizes, vec![20]);

    let resolved = report.resolved.unwrap();
    assert_eq!(resolved.source, PairSource::FullConnectivity);
    assert_eq!((resolved.pair.i, resolved.pair.j), (10, 12));
    assert_eq!(report.connecting_pair_metric(), Some(216 * 117));
    assert_eq!(report.connecting_pair_metric(), Some(25272));

    let answers = report.answers();
    assert_eq!(answers.largest_product, 50);
    assert_eq!(answers.connecting_metric, Some(25272));
}

#[test]
fn counting_attempts_matches_first_ten_pairs() {
    let points = parse_points(WORKED_EXAMPLE).unwrap();
    let config = example_config().with_budget(BudgetPolicy::Attempted);
    let report = analyze(&points, &config);

    assert_eq!(report.bounded.consumed(), 10);
    assert_eq!(report.bounded_sizes[..3], [5, 4, 2]);
    assert_eq!(report.largest_circuits_product(3), 40);
    assert_eq!(report.connecting_pair_metric(), Some(25272));
}

#[test]
fn reversed_input_gives_same_answers() {
    let reversed: String = WORKED_EXAMPLE
        .lines()
        .rev()
        .map(|line| format!("{}\n", line))
        .collect();
    let forward = analyze(&parse_points(WORKED_EXAMPLE).unwrap(), &example_config());
    let backward = analyze(&parse_points(&reversed).unwrap(), &example_config());

    assert_eq!(forward.bounded_sizes, backward.bounded_sizes);
    assert_eq!(forward.answers(), backward.answers());
}

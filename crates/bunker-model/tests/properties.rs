//! 模型建構的性質測試

use bunker_core::{Bunker, Request};
use bunker_model::{build, Assignment, VarId};
use proptest::prelude::*;

/// 依開始時間排序的隨機請求
fn requests_strategy() -> impl Strategy<Value = Vec<Request>> {
    prop::collection::vec((0i64..60, 1i64..80), 1..8).prop_map(|steps| {
        let mut time = 0;
        steps
            .into_iter()
            .map(|(delta, volume)| {
                time += delta;
                Request::new(time, volume)
            })
            .collect()
    })
}

fn bunkers_strategy() -> impl Strategy<Value = Vec<Bunker>> {
    prop::collection::vec((20i64..150, 1i64..60), 1..4).prop_map(|specs| {
        specs
            .into_iter()
            .map(|(capacity, duration)| Bunker::new(capacity, duration))
            .collect()
    })
}

fn overlapping_pairs(requests: &[Request]) -> usize {
    requests
        .iter()
        .enumerate()
        .map(|(i, request)| {
            requests[i + 1..]
                .iter()
                .take_while(|later| request.overlaps(later))
                .count()
        })
        .sum()
}

/// 跳過 i−1 時需要額外窗口的 (k, i) 對數
fn skipped_windows(requests: &[Request]) -> usize {
    (1..requests.len())
        .map(|i| {
            let previous_end = requests[i - 1].end_time();
            requests[..i - 1]
                .iter()
                .filter(|earlier| earlier.end_time() > previous_end)
                .count()
        })
        .sum()
}

proptest! {
    #[test]
    fn build_is_deterministic(requests in requests_strategy(), bunkers in bunkers_strategy()) {
        let first = build(&requests, &bunkers).unwrap();
        let second = build(&requests, &bunkers).unwrap();
        prop_assert_eq!(first.program(), second.program());
    }

    #[test]
    fn constraint_count_matches_instance(requests in requests_strategy(), bunkers in bunkers_strategy()) {
        let model = build(&requests, &bunkers).unwrap();
        let n = requests.len();
        let m = bunkers.len();

        let per_bunker =
            3 * n + 2 * (n - 1) + overlapping_pairs(&requests) + skipped_windows(&requests) + 1;
        let fleet_rows = if m > 1 { n + 1 } else { 0 };

        prop_assert_eq!(model.program().variable_count(), 3 * n * m);
        prop_assert_eq!(model.program().constraint_count(), m * per_bunker + fleet_rows);
    }

    #[test]
    fn serving_nothing_is_always_feasible(requests in requests_strategy(), bunkers in bunkers_strategy()) {
        let model = build(&requests, &bunkers).unwrap();
        let idle: Assignment = (0..model.program().variable_count())
            .map(|index| (VarId(index), 0.0))
            .collect();
        prop_assert!(model.program().evaluate(&idle, 1e-9).is_empty());
    }

    #[test]
    fn single_request_within_capacity_is_feasible(volume in 1i64..100, capacity in 100i64..200) {
        let requests = vec![Request::new(0, volume)];
        let model = build(&requests, &[Bunker::new(capacity, 30)]).unwrap();
        let mut assignment: Assignment = (0..model.program().variable_count())
            .map(|index| (VarId(index), 0.0))
            .collect();
        assignment.insert(model.layout().serve(0, 0), 1.0);
        prop_assert!(model.program().evaluate(&assignment, 1e-9).is_empty());
    }
}

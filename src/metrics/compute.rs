//! Population/electoral join and the derived vote-weight columns.

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::{config::Variant, error::{Error, Result}};

use super::{ElectoralRecord, JoinReport, MetricTable, PopulationRecord, StateMetrics};

/// Rows logged after sorting.
const HEAD_ROWS: usize = 5;

/// Reject tables that name the same state twice.
fn ensure_unique<'a>(origin: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(Error::schema(origin, format!("state {name:?} appears more than once")));
        }
    }
    Ok(())
}

/// Inner-join the two tables on state name, in population-table order,
/// deriving `VOTE_WEIGHT` for each matched state.
pub fn join_tables(population: &[PopulationRecord], electoral: &[ElectoralRecord]) -> Result<(Vec<StateMetrics>, JoinReport)> {
    ensure_unique("population table", population.iter().map(|r| r.name.as_str()))?;
    ensure_unique("electoral table", electoral.iter().map(|r| r.name.as_str()))?;

    let votes = electoral.iter()
        .map(|record| (record.name.as_str(), record.num_votes))
        .collect::<HashMap<_, _>>();

    let mut rows = Vec::with_capacity(population.len().min(electoral.len()));
    let mut report = JoinReport::default();

    for record in population {
        let Some(&num_votes) = votes.get(record.name.as_str()) else {
            report.population_only.push(record.name.clone());
            continue;
        };
        if record.population == 0 {
            return Err(Error::ZeroPopulation { name: record.name.clone() });
        }
        rows.push(StateMetrics {
            name: record.name.clone(),
            population: record.population,
            num_votes,
            vote_weight: num_votes as f64 / record.population as f64,
            fair_num_votes: None,
            vote_delta: None,
        });
    }

    let matched = rows.iter().map(|row| row.name.as_str()).collect::<HashSet<_>>();
    report.electoral_only = electoral.iter()
        .filter(|record| !matched.contains(record.name.as_str()))
        .map(|record| record.name.clone())
        .collect();

    Ok((rows, report))
}

/// Fill `FAIR_NUM_VOTES` and `VOTE_DELTA` using the totals of `rows` only.
pub fn apply_fair_allocation(rows: &mut [StateMetrics]) {
    let total_pop: u64 = rows.iter().map(|row| row.population).sum();
    let total_votes: u64 = rows.iter().map(|row| row.num_votes).sum();
    if total_pop == 0 { return }

    let votes_per_person = total_votes as f64 / total_pop as f64;
    for row in rows.iter_mut() {
        let fair = votes_per_person * row.population as f64;
        row.fair_num_votes = Some(fair);
        row.vote_delta = Some(row.num_votes as f64 - fair);
    }
}

/// Sort by `VOTE_WEIGHT` descending; equal weights keep their current order.
pub fn sort_by_weight(rows: &mut [StateMetrics]) {
    // slice::sort_by is stable
    rows.sort_by(|a, b| b.vote_weight.total_cmp(&a.vote_weight));
}

/// Join, derive and sort in one step.
pub fn compute_metrics(population: &[PopulationRecord], electoral: &[ElectoralRecord], variant: Variant) -> Result<MetricTable> {
    let (mut rows, report) = join_tables(population, electoral)?;

    if !report.is_complete() {
        if !report.population_only.is_empty() {
            info!("[metrics] {} state(s) without electoral votes dropped: {}", report.population_only.len(), report.population_only.join(", "));
        }
        if !report.electoral_only.is_empty() {
            info!("[metrics] {} state(s) without population dropped: {}", report.electoral_only.len(), report.electoral_only.join(", "));
        }
    }

    if variant == Variant::Delta {
        apply_fair_allocation(&mut rows);
    }
    sort_by_weight(&mut rows);

    let table = MetricTable { variant, rows, report };
    info!("[metrics] {} matched states, POP={} NUM_VOTES={}", table.len(), table.total_population(), table.total_votes());
    for row in table.rows.iter().take(HEAD_ROWS) {
        debug!("[metrics] {:<24} POP={:>10} NUM_VOTES={:>3} VOTE_WEIGHT={:.3e}", row.name, row.population, row.num_votes, row.vote_weight);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pop(rows: &[(&str, u64)]) -> Vec<PopulationRecord> {
        rows.iter().map(|&(name, p)| PopulationRecord::new(name, p)).collect()
    }

    fn votes(rows: &[(&str, u64)]) -> Vec<ElectoralRecord> {
        rows.iter().map(|&(name, v)| ElectoralRecord::new(name, v)).collect()
    }

    fn names(table: &MetricTable) -> Vec<&str> {
        table.rows.iter().map(|row| row.name.as_str()).collect()
    }

    #[test]
    fn two_state_example() {
        let table = compute_metrics(&pop(&[("A", 100), ("B", 50)]), &votes(&[("A", 3), ("B", 3)]), Variant::Delta).unwrap();

        assert_eq!(names(&table), ["B", "A"]);
        let a = table.get("A").unwrap();
        let b = table.get("B").unwrap();
        assert!((a.vote_weight - 0.03).abs() < 1e-12);
        assert!((b.vote_weight - 0.06).abs() < 1e-12);
        assert!((a.fair_num_votes.unwrap() - 4.0).abs() < 1e-9);
        assert!((b.fair_num_votes.unwrap() - 2.0).abs() < 1e-9);
        assert!((a.vote_delta.unwrap() + 1.0).abs() < 1e-9);
        assert!((b.vote_delta.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn weight_variant_skips_fair_allocation() {
        let table = compute_metrics(&pop(&[("A", 100)]), &votes(&[("A", 3)]), Variant::Weight).unwrap();
        assert_eq!(table.rows[0].fair_num_votes, None);
        assert_eq!(table.rows[0].vote_delta, None);
    }

    #[test]
    fn disjoint_tables_join_to_nothing() {
        let table = compute_metrics(&pop(&[("A", 10), ("B", 20)]), &votes(&[("C", 3), ("D", 4)]), Variant::Delta).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.report.population_only, ["A", "B"]);
        assert_eq!(table.report.electoral_only, ["C", "D"]);
    }

    #[test]
    fn unmatched_population_row_is_dropped() {
        let table = compute_metrics(
            &pop(&[("Ohio", 11_799_448), ("Puerto Rico", 3_285_874)]),
            &votes(&[("Ohio", 17)]),
            Variant::Weight,
        ).unwrap();
        assert_eq!(names(&table), ["Ohio"]);
        assert_eq!(table.report.population_only, ["Puerto Rico"]);
        assert!(table.report.electoral_only.is_empty());
        assert!(!table.report.is_complete());
        assert_eq!(table.total_population(), 11_799_448);
    }

    #[test]
    fn zero_population_on_matched_state_is_an_error() {
        let err = compute_metrics(&pop(&[("A", 0)]), &votes(&[("A", 3)]), Variant::Weight).unwrap_err();
        assert!(matches!(err, Error::ZeroPopulation { ref name } if name == "A"));
    }

    #[test]
    fn zero_population_on_unmatched_state_is_ignored() {
        let table = compute_metrics(&pop(&[("A", 0), ("B", 10)]), &votes(&[("B", 3)]), Variant::Weight).unwrap();
        assert_eq!(names(&table), ["B"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = join_tables(&pop(&[("A", 1), ("A", 2)]), &votes(&[("A", 3)])).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));

        let err = join_tables(&pop(&[("A", 1)]), &votes(&[("A", 3), ("A", 4)])).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
    }

    #[test]
    fn fair_allocation_conserves_votes() {
        let population = pop(&[("A", 39_538_223), ("B", 576_851), ("C", 29_145_505), ("D", 733_391), ("E", 6_177_224)]);
        let electoral = votes(&[("A", 54), ("B", 3), ("C", 40), ("D", 3), ("E", 10)]);
        let table = compute_metrics(&population, &electoral, Variant::Delta).unwrap();

        let fair: f64 = table.rows.iter().map(|row| row.fair_num_votes.unwrap()).sum();
        let delta: f64 = table.rows.iter().map(|row| row.vote_delta.unwrap()).sum();
        assert!((fair - table.total_votes() as f64).abs() < 1e-9);
        assert!(delta.abs() < 1e-9);
    }

    #[test]
    fn fair_allocation_uses_matched_totals_only() {
        let table = compute_metrics(&pop(&[("A", 100), ("B", 50), ("X", 1_000_000)]), &votes(&[("A", 3), ("B", 3)]), Variant::Delta).unwrap();
        assert!((table.get("A").unwrap().fair_num_votes.unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn rows_sorted_by_weight_with_stable_ties() {
        let population = pop(&[("A", 100), ("B", 200), ("C", 100), ("D", 50), ("E", 200)]);
        let electoral = votes(&[("E", 2), ("D", 3), ("C", 1), ("B", 2), ("A", 1)]);
        let table = compute_metrics(&population, &electoral, Variant::Weight).unwrap();

        assert!(table.rows.windows(2).all(|w| w[0].vote_weight >= w[1].vote_weight));
        // A, B, C, E all weigh 0.01 and keep population-table order.
        assert_eq!(names(&table), ["D", "A", "B", "C", "E"]);
        assert!(table.rows.iter().all(|row| row.vote_weight > 0.0));
    }
}

use serde::Serialize;

use crate::config::Variant;

/// Total population of one state, as reported by the census.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopulationRecord {
    pub name: String,
    pub population: u64,
}

impl PopulationRecord {
    pub fn new(name: impl Into<String>, population: u64) -> Self {
        Self { name: name.into(), population }
    }
}

/// Number of electors allocated to one state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElectoralRecord {
    pub name: String,
    pub num_votes: u64,
}

impl ElectoralRecord {
    pub fn new(name: impl Into<String>, num_votes: u64) -> Self {
        Self { name: name.into(), num_votes }
    }
}

/// One row of the joined table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateMetrics {
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "POP")]
    pub population: u64,
    #[serde(rename = "NUM_VOTES")]
    pub num_votes: u64,
    /// Electors per person.
    #[serde(rename = "VOTE_WEIGHT")]
    pub vote_weight: f64,
    /// Electors under strict population-proportional allocation.
    #[serde(rename = "FAIR_NUM_VOTES", skip_serializing_if = "Option::is_none")]
    pub fair_num_votes: Option<f64>,
    /// Actual minus fair electors; positive means over-represented.
    #[serde(rename = "VOTE_DELTA", skip_serializing_if = "Option::is_none")]
    pub vote_delta: Option<f64>,
}

/// Names that appeared in only one side of the population/electoral join.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JoinReport {
    pub population_only: Vec<String>,
    pub electoral_only: Vec<String>,
}

impl JoinReport {
    pub fn is_complete(&self) -> bool {
        self.population_only.is_empty() && self.electoral_only.is_empty()
    }
}

/// Joined, derived and sorted metric rows.
#[derive(Clone, Debug)]
pub struct MetricTable {
    pub variant: Variant,
    pub rows: Vec<StateMetrics>,
    pub report: JoinReport,
}

impl MetricTable {
    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn total_population(&self) -> u64 {
        self.rows.iter().map(|row| row.population).sum()
    }

    pub fn total_votes(&self) -> u64 {
        self.rows.iter().map(|row| row.num_votes).sum()
    }

    /// Look up a row by exact state name.
    pub fn get(&self, name: &str) -> Option<&StateMetrics> {
        self.rows.iter().find(|row| row.name == name)
    }
}

use std::collections::HashMap;

use geo::MultiPolygon;
use log::{debug, info};

use crate::{io::StateBoundary, metrics::StateMetrics};

/// A state's metrics together with its boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct MappedState {
    pub metrics: StateMetrics,
    pub shape: MultiPolygon<f64>,
}

impl MappedState {
    pub fn name(&self) -> &str { &self.metrics.name }
}

/// Inner-join boundaries to metric rows by state name, in boundary order.
/// A state split over several boundary records yields one entry per record.
pub fn spatial_join(metrics: &[StateMetrics], boundaries: Vec<StateBoundary>) -> Vec<MappedState> {
    let by_name = metrics.iter()
        .map(|row| (row.name.as_str(), row))
        .collect::<HashMap<_, _>>();

    let total = boundaries.len();
    let mut unmatched = Vec::new();
    let states = boundaries.into_iter()
        .filter_map(|boundary| match by_name.get(boundary.name.as_str()) {
            Some(&row) => Some(MappedState { metrics: row.clone(), shape: boundary.shape }),
            None => {
                unmatched.push(boundary.name);
                None
            }
        })
        .collect::<Vec<_>>();

    if !unmatched.is_empty() {
        info!("[map] {} boundary record(s) without metrics dropped: {}", unmatched.len(), unmatched.join(", "));
    }
    debug!("[map] {} of {total} boundaries matched", states.len());
    states
}

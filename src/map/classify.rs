//! Choropleth classification schemes.
//!
//! Breaks are class upper bounds. A value belongs to the first class whose
//! upper bound is greater than or equal to it, so the largest value always
//! lands in the last class.

/// How a panel maps values to colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    /// `classes` bins of equal width between the minimum and maximum.
    EqualInterval { classes: usize },
    /// `classes` bins holding roughly equal numbers of values.
    Quantiles { classes: usize },
    /// Continuous ramp symmetric around zero.
    Diverging,
}

/// Class upper bounds computed from a set of values.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub min: f64,
    pub breaks: Vec<f64>,
}

/// Finite values sorted ascending.
fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.iter().copied().filter(|v| v.is_finite()).collect::<Vec<_>>();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Percentile of sorted data with linear interpolation between ranks.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

impl Classification {
    /// Equal-width classes. Returns `None` without finite values or classes.
    pub fn equal_interval(values: &[f64], classes: usize) -> Option<Self> {
        let sorted = sorted_finite(values);
        let (&min, &max) = (sorted.first()?, sorted.last()?);
        if classes == 0 { return None }
        if max == min { return Some(Self { min, breaks: vec![max] }) }

        let width = (max - min) / classes as f64;
        let mut breaks = (1..=classes).map(|i| min + width * i as f64).collect::<Vec<_>>();
        // Pin the top bound so rounding never leaves the maximum unclassified.
        if let Some(last) = breaks.last_mut() { *last = max }
        Some(Self { min, breaks })
    }

    /// Quantile classes; duplicate bounds are collapsed, so fewer than
    /// `classes` classes may result.
    pub fn quantiles(values: &[f64], classes: usize) -> Option<Self> {
        let sorted = sorted_finite(values);
        let min = *sorted.first()?;
        if classes == 0 { return None }

        let mut breaks = (1..=classes)
            .map(|i| percentile(&sorted, i as f64 / classes as f64))
            .collect::<Vec<_>>();
        breaks.dedup();
        Some(Self { min, breaks })
    }

    /// Classify with the given scheme; `Diverging` has no classes.
    pub fn for_scheme(scheme: Scheme, values: &[f64]) -> Option<Self> {
        match scheme {
            Scheme::EqualInterval { classes } => Self::equal_interval(values, classes),
            Scheme::Quantiles { classes } => Self::quantiles(values, classes),
            Scheme::Diverging => None,
        }
    }

    pub fn len(&self) -> usize { self.breaks.len() }

    pub fn is_empty(&self) -> bool { self.breaks.is_empty() }

    /// Index of the class holding `value`.
    pub fn class_of(&self, value: f64) -> usize {
        self.breaks.iter()
            .position(|&upper| value <= upper)
            .unwrap_or(self.breaks.len().saturating_sub(1))
    }

    /// Lower and upper bound of each class.
    pub fn ranges(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        std::iter::once(self.min)
            .chain(self.breaks.iter().copied())
            .zip(self.breaks.iter().copied())
    }
}

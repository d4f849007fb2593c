//! Pure numeric helpers shared by both engines
//!
//! Every statistic here distinguishes "no data" from zero: an empty mean and
//! an underdetermined correlation both come back as `None`, never as `0.0`,
//! `NaN` or an error.

use serde::Serialize;

/// Streaming arithmetic mean accumulator.
///
/// Engines fold record streams into maps of these, one per group; the merge
/// step is pure so grouped aggregations stay testable without a store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Mean {
    sum: f64,
    count: u64,
}

impl Mean {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn merge(self, other: Mean) -> Mean {
        Mean {
            sum: self.sum + other.sum,
            count: self.count + other.count,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// The mean, or `None` when nothing was accumulated.
    pub fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Pearson correlation coefficient over paired samples.
///
/// Returns `None` when fewer than two pairs are given, when the slices
/// disagree in length, or when either side has zero variance (the
/// coefficient is undefined there, and callers must be able to branch on
/// that rather than propagate a NaN).
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some(cov / denom)
}

/// Decade bucket for a year: floor(year / 10) * 10.
pub fn decade_of(year: i64) -> i64 {
    year.div_euclid(10) * 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_none() {
        let mean = Mean::default();
        assert_eq!(mean.value(), None);
    }

    #[test]
    fn test_mean_accumulates() {
        let mut mean = Mean::default();
        mean.push(10.0);
        mean.push(20.0);
        assert_eq!(mean.value(), Some(15.0));
        assert_eq!(mean.count(), 2);
    }

    #[test]
    fn test_mean_merge() {
        let mut a = Mean::default();
        a.push(1.0);
        let mut b = Mean::default();
        b.push(3.0);
        assert_eq!(a.merge(b).value(), Some(2.0));
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [2.0, 4.0, 6.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect_anticorrelation() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [6.0, 4.0, 2.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_underdetermined() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[], &[]), None);
        // Zero variance: undefined, not NaN.
        assert_eq!(pearson(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn test_decade_bucketing() {
        assert_eq!(decade_of(1995), 1990);
        assert_eq!(decade_of(2000), 2000);
        assert_eq!(decade_of(2009), 2000);
    }
}

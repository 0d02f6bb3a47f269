//! Summary statistics for chart annotations.
//!
//! TPS statistics run over the full aligned array: zero-filled windows are
//! real "no throughput" observations and count toward the average. Latency
//! statistics run over strictly-positive values only, since a zero there is
//! either fill or an excluded measurement and would understate real latency.

/// Throughput summary for one aligned value array
#[derive(Debug, Clone, PartialEq)]
pub struct TpsStats {
    pub avg: f64,
    pub max: f64,
}

impl TpsStats {
    /// One annotation line, e.g. `Submission:  Avg: 12.50 TPS  |  Max: 31.00 TPS`
    pub fn summary(&self, label: &str) -> String {
        format!("{}:  Avg: {:.2} TPS  |  Max: {:.2} TPS", label, self.avg, self.max)
    }
}

/// Latency summary for one aligned value array
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl LatencyStats {
    pub fn summary(&self, label: &str) -> String {
        format!(
            "{}:  Avg: {:.2} ms  |  Min: {:.2} ms  |  Max: {:.2} ms",
            label, self.avg, self.min, self.max
        )
    }
}

/// Compute throughput statistics over an aligned value array
///
/// **Public** - returns None for an empty array (no annotation rather than
/// a fabricated zero line)
pub fn tps_stats(values: &[f64]) -> Option<TpsStats> {
    if values.is_empty() {
        return None;
    }

    let avg = values.iter().sum::<f64>() / values.len() as f64;
    let max = values.iter().copied().fold(f64::MIN, f64::max);

    Some(TpsStats { avg, max })
}

/// Compute latency statistics over the strictly-positive values of an array
///
/// **Public** - returns None when no positive value exists
pub fn latency_stats(values: &[f64]) -> Option<LatencyStats> {
    let positive: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    if positive.is_empty() {
        return None;
    }

    let avg = positive.iter().sum::<f64>() / positive.len() as f64;
    let min = positive.iter().copied().fold(f64::MAX, f64::min);
    let max = positive.iter().copied().fold(f64::MIN, f64::max);

    Some(LatencyStats { avg, min, max })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tps_stats_counts_zero_windows() {
        let stats = tps_stats(&[4.0, 0.0, 2.0]).unwrap();
        assert_eq!(stats.avg, 2.0);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn test_tps_stats_empty() {
        assert!(tps_stats(&[]).is_none());
    }

    #[test]
    fn test_latency_stats_ignores_zero_fill() {
        let stats = latency_stats(&[0.0, 30.0, 0.0, 50.0]).unwrap();
        assert_eq!(stats.avg, 40.0);
        assert_eq!(stats.min, 30.0);
        assert_eq!(stats.max, 50.0);
    }

    #[test]
    fn test_latency_stats_all_zero() {
        assert!(latency_stats(&[0.0, 0.0]).is_none());
        assert!(latency_stats(&[]).is_none());
    }

    #[test]
    fn test_summary_formatting() {
        let tps = TpsStats { avg: 1.0, max: 2.0 };
        assert_eq!(tps.summary("Submission"), "Submission:  Avg: 1.00 TPS  |  Max: 2.00 TPS");

        let latency = LatencyStats { avg: 1.5, min: 1.0, max: 2.0 };
        assert_eq!(
            latency.summary("Confirmation"),
            "Confirmation:  Avg: 1.50 ms  |  Min: 1.00 ms  |  Max: 2.00 ms"
        );
    }
}

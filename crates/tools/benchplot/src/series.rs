//! Grouping of records into per-label series.

use std::collections::HashMap;

use crate::config::ScaleConfig;
use crate::error::Error;
use crate::record::BenchmarkRecord;

/// Ordered samples sharing one label, scaled to display units.
///
/// `sizes[i]`, `means[i]` and `errors[i]` come from the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Label shared by every sample.
    pub label: String,
    /// Input sizes in record order.
    pub sizes: Vec<u64>,
    /// Scaled mean timings.
    pub means: Vec<f64>,
    /// Scaled error bounds (half-length of each error bar).
    pub errors: Vec<f64>,
}

impl Series {
    /// Create an empty series.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sizes: Vec::new(),
            means: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Append a record, scaling its timings.
    pub fn push(&mut self, record: &BenchmarkRecord, scale: &ScaleConfig) -> Result<(), Error> {
        if record.label != self.label {
            return Err(Error::LabelMismatch {
                expected: self.label.clone(),
                found: record.label.clone(),
            });
        }
        self.sizes.push(record.size);
        self.means.push(record.mean_ns as f64 / scale.mean_divisor);
        self.errors.push(record.error_ns as f64 / scale.error_divisor());
        Ok(())
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns `true` if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Sizes that occur more than once, each reported once, ascending.
    ///
    /// Duplicates are kept as independent samples.
    pub fn duplicate_sizes(&self) -> Vec<u64> {
        let mut sorted = self.sizes.clone();
        sorted.sort_unstable();
        let mut dups: Vec<u64> = sorted
            .windows(2)
            .filter(|w| w[0] == w[1])
            .map(|w| w[0])
            .collect();
        dups.dedup();
        dups
    }

    /// `(size, mean)` pairs as plot coordinates.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.sizes
            .iter()
            .zip(&self.means)
            .map(|(&x, &y)| (x as f64, y))
    }
}

/// Partition records into one series per label.
///
/// Series are returned in order of each label's first appearance; samples
/// within a series keep their relative input order.
pub fn aggregate(records: &[BenchmarkRecord], scale: &ScaleConfig) -> Result<Vec<Series>, Error> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut series: Vec<Series> = Vec::new();

    for record in records {
        let slot = *index.entry(record.label.as_str()).or_insert_with(|| {
            series.push(Series::new(record.label.as_str()));
            series.len() - 1
        });
        series[slot].push(record, scale)?;
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(size: u64, label: &str, mean_ns: u64, error_ns: u64) -> BenchmarkRecord {
        BenchmarkRecord {
            size,
            label: label.into(),
            mean_ns,
            error_ns,
        }
    }

    #[test]
    fn groups_by_label_in_first_seen_order() {
        let records = vec![
            record(5, "acdat", 3_128_258, 275_459),
            record(5, "crate", 8_664_802, 758_563),
            record(6, "acdat", 3_686_061, 596_717),
            record(6, "crate", 10_223_664, 1_586_353),
        ];
        let series = aggregate(&records, &ScaleConfig::default()).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "acdat");
        assert_eq!(series[0].sizes, vec![5, 6]);
        assert_eq!(series[1].label, "crate");
        assert_eq!(series[1].sizes, vec![5, 6]);
    }

    #[test]
    fn scales_mean_and_error_separately() {
        let records = vec![record(5, "acdat", 3_128_258, 275_459)];
        let series = aggregate(&records, &ScaleConfig::default()).unwrap();

        assert!((series[0].means[0] - 312.825_8).abs() < 1e-9);
        assert!((series[0].errors[0] - 0.002_754_59).abs() < 1e-12);
    }

    #[test]
    fn keeps_every_record_once() {
        let records: Vec<_> = (0..9)
            .map(|i| record(i, ["a", "b", "c"][(i % 3) as usize], i * 10, i))
            .collect();
        let series = aggregate(&records, &ScaleConfig::default()).unwrap();

        let total: usize = series.iter().map(Series::len).sum();
        assert_eq!(total, records.len());
        for s in &series {
            assert_eq!(s.sizes.len(), s.means.len());
            assert_eq!(s.sizes.len(), s.errors.len());
        }
        assert_eq!(series[1].sizes, vec![1, 4, 7]);
    }

    #[test]
    fn empty_input_yields_no_series() {
        assert!(aggregate(&[], &ScaleConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn push_rejects_foreign_label() {
        let mut series = Series::new("acdat");
        let err = series
            .push(&record(5, "crate", 1, 1), &ScaleConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::LabelMismatch { .. }));
        assert!(series.is_empty());
    }

    #[test]
    fn reports_duplicate_sizes() {
        let records = vec![
            record(5, "a", 1, 0),
            record(6, "a", 1, 0),
            record(5, "a", 1, 0),
            record(5, "a", 1, 0),
        ];
        let series = aggregate(&records, &ScaleConfig::default()).unwrap();
        assert_eq!(series[0].duplicate_sizes(), vec![5]);
        assert_eq!(series[0].len(), 4);
    }
}

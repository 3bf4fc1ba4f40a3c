//! Record extraction from libtest `cargo bench` output.
//!
//! Recognizes lines such as
//!
//! ```text
//! test bench05_acdat ... bench:   3,128,258 ns/iter (+/- 275,459)
//! ```
//!
//! where `05` is the input size, `acdat` the series label, and the two
//! numbers the mean and the error bound. Anything else is skipped.

use regex::Regex;
use std::sync::LazyLock;

static RECORD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"bench([0-9]+)_([A-Za-z0-9_]+) .* ([0-9][0-9,]*) .*? ([0-9][0-9,]*)")
        .expect("record pattern is valid")
});

/// One parsed benchmark observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRecord {
    /// Input size, the x coordinate.
    pub size: u64,
    /// Series the record belongs to.
    pub label: String,
    /// Mean time per iteration in the raw unit.
    pub mean_ns: u64,
    /// Symmetric error bound in the raw unit.
    pub error_ns: u64,
}

/// Extract every record from `text`, in input order.
///
/// Never fails: lines that do not match, or whose numbers overflow, are
/// dropped. Callers must check for an empty result.
pub fn parse_records(text: &str) -> Vec<BenchmarkRecord> {
    text.lines().filter_map(parse_line).collect()
}

/// Parse a single line, if it is a record.
pub fn parse_line(line: &str) -> Option<BenchmarkRecord> {
    let caps = RECORD_LINE.captures(line)?;
    Some(BenchmarkRecord {
        size: caps[1].parse().ok()?,
        label: caps[2].to_string(),
        mean_ns: parse_grouped(&caps[3])?,
        error_ns: parse_grouped(&caps[4])?,
    })
}

/// Parse an integer that may contain `,` thousands separators.
fn parse_grouped(digits: &str) -> Option<u64> {
    let stripped: String = digits.chars().filter(|&c| c != ',').collect();
    stripped.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_libtest_line() {
        let record =
            parse_line("test bench05_acdat ... bench:   3,128,258 ns/iter (+/- 275,459)").unwrap();
        assert_eq!(
            record,
            BenchmarkRecord {
                size: 5,
                label: "acdat".into(),
                mean_ns: 3_128_258,
                error_ns: 275_459,
            }
        );
    }

    #[test]
    fn strips_separators_without_loss() {
        let record = parse_line("test bench7_fast ... bench: 12,345 ns/iter (+/- 6,789)").unwrap();
        assert_eq!(record.mean_ns, 12_345);
        assert_eq!(record.error_ns, 6_789);
    }

    #[test]
    fn throughput_suffix_does_not_replace_error_bound() {
        let record =
            parse_line("test bench05_x ... bench:       1,234 ns/iter (+/- 56) = 830 MB/s")
                .unwrap();
        assert_eq!(record.mean_ns, 1_234);
        assert_eq!(record.error_ns, 56);
    }

    #[test]
    fn label_set_is_not_fixed() {
        let record = parse_line("test bench18_naive ... bench: 1 ns/iter (+/- 0)").unwrap();
        assert_eq!(record.size, 18);
        assert_eq!(record.label, "naive");
        assert_eq!(record.mean_ns, 1);
        assert_eq!(record.error_ns, 0);
    }

    #[test]
    fn skips_unrelated_lines() {
        let text = "\
running 28 tests
test bench05_acdat ... bench:   3,128,258 ns/iter (+/- 275,459)
test result: ok. 0 passed; 0 failed; 0 ignored; 28 measured

test bench05_crate ... bench:   8,664,802 ns/iter (+/- 758,563)
test bench06_acdat ... FAILED
";
        let records = parse_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "acdat");
        assert_eq!(records[1].label, "crate");
    }

    #[test]
    fn overflowing_numbers_are_dropped() {
        assert!(
            parse_line("test bench1_x ... bench: 99,999,999,999,999,999,999 ns/iter (+/- 1)")
                .is_none()
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_records("").is_empty());
    }
}

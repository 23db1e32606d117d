//! Verifier report: identification, totals, distribution, and sample failures.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use journey::core::verify::{PathFailure, VerifySummary};

/// Full result of one verifier invocation.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    /// `bundled` or the dataset path.
    pub dataset: String,
    /// SHA-256 of the dataset bytes for reproducibility tracking.
    pub dataset_sha256: String,
    pub generated_at: String,
    pub choices: usize,
    pub summary: VerifySummary,
}

impl VerifyReport {
    pub fn new(
        dataset: String,
        raw: &[u8],
        choices: usize,
        summary: VerifySummary,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            dataset,
            dataset_sha256: sha256_hex(raw),
            generated_at: generated_at.to_rfc3339(),
            choices,
            summary,
        }
    }

    pub fn is_success(&self) -> bool {
        self.summary.is_success()
    }
}

pub fn sha256_hex(raw: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw);
    hex::encode(hasher.finalize())
}

/// Render the human-readable report printed to stdout.
pub fn render_text(report: &VerifyReport) -> String {
    let summary = &report.summary;
    let mut lines = vec![
        "== journey path verifier ==".to_string(),
        format!("dataset: {} (sha256 {})", report.dataset, report.dataset_sha256),
        format!(
            "segments: {}  choices: {}  expected paths: {}",
            summary.max_segment, report.choices, summary.expected_total
        ),
        String::new(),
        format!("total paths tested:  {}", summary.total),
        format!("passed:              {}", summary.passed),
        format!("failed:              {}", summary.failed),
        String::new(),
        "entry count distribution:".to_string(),
    ];
    lines.extend(
        summary
            .entry_counts
            .iter()
            .map(|(count, paths)| format!("  {count:>3} entries -> {paths} paths")),
    );

    if !summary.failures.is_empty() {
        lines.push(String::new());
        lines.push("first failures:".to_string());
        lines.extend(summary.failures.iter().map(render_failure));
    }

    lines.push(String::new());
    if report.is_success() {
        lines.push(format!("ALL {} PATHS VALID", summary.total));
    } else {
        lines.push(format!("{} OF {} PATHS FAILED", summary.failed, summary.total));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_failure(failure: &PathFailure) -> String {
    let missing: Vec<String> = failure
        .missing_segments
        .iter()
        .map(u32::to_string)
        .collect();
    let signature = if failure.signature.is_empty() {
        "(no choices)"
    } else {
        failure.signature.as_str()
    };
    format!(
        "  {signature} -> {} entries, missing segments: [{}]",
        failure.entry_count,
        missing.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey::core::verify::verify_all;
    use journey::test_support::scenario_dataset;

    fn report_for(summary: VerifySummary) -> VerifyReport {
        let generated_at = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        VerifyReport::new("bundled".to_string(), b"{}", 2, summary, generated_at)
    }

    #[test]
    fn sha256_is_hex_encoded() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn renders_passing_sweep() {
        let report = report_for(verify_all(&scenario_dataset(), 10).expect("sweep"));
        let text = render_text(&report);
        assert!(text.contains("segments: 4  choices: 2  expected paths: 9"));
        assert!(text.contains("total paths tested:  9"));
        assert!(text.contains("    4 entries -> 9 paths"));
        assert!(!text.contains("first failures"));
        assert!(text.ends_with("ALL 9 PATHS VALID\n"));
        assert_eq!(report.generated_at, "2026-01-02T03:04:05+00:00");
    }

    #[test]
    fn renders_failures_with_missing_segments() {
        let mut dataset = scenario_dataset();
        dataset.entries.retain(|entry| entry.branch != "z");
        let report = report_for(verify_all(&dataset, 2).expect("sweep"));
        let text = render_text(&report);
        assert!(text.contains("first failures:\n  a-z -> 3 entries, missing segments: [4]\n"));
        assert!(text.contains("  b-z -> 3 entries, missing segments: [4]\n"));
        assert!(!text.contains("c-z"));
        assert!(text.ends_with("3 OF 9 PATHS FAILED\n"));
    }

    #[test]
    fn json_report_carries_summary() {
        let report = report_for(verify_all(&scenario_dataset(), 10).expect("sweep"));
        let value = serde_json::to_value(&report).expect("json");
        assert_eq!(value["summary"]["passed"], 9);
        assert_eq!(value["summary"]["entry_counts"]["4"], 9);
        assert_eq!(value["dataset_sha256"].as_str().map(str::len), Some(64));
    }
}

//! Exhaustive verification of every fully-resolved journey.
//!
//! The sweep drives the same `build_path` the interactive session uses, so the
//! two can never diverge. Defects are reported as data; the sweep always
//! visits every assignment.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::combinations::Combinations;
use crate::core::journey_id::journey_signature;
use crate::core::path::build_path;
use crate::core::types::{PathFilter, PathItem, Selections};
use crate::dataset::Dataset;

/// Diagnostic record for an assignment whose path is not well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathFailure {
    /// Chosen option keys in choice order, joined by `-`.
    pub signature: String,
    pub entry_count: usize,
    /// Segments in `1..=max_segment` with no entry on the path, ascending.
    pub missing_segments: Vec<u32>,
}

/// Outcome of checking a single assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentCheck {
    Pass { entry_count: usize },
    Fail(PathFailure),
}

impl AssignmentCheck {
    pub fn entry_count(&self) -> usize {
        match self {
            AssignmentCheck::Pass { entry_count } => *entry_count,
            AssignmentCheck::Fail(failure) => failure.entry_count,
        }
    }
}

/// Aggregated result of a full sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifySummary {
    pub max_segment: u32,
    /// Product of option counts across all choice points.
    pub expected_total: u64,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    /// Entry count -> number of assignments producing it.
    pub entry_counts: BTreeMap<usize, u64>,
    /// First failures in enumeration order, bounded by the sample limit.
    pub failures: Vec<PathFailure>,
}

impl VerifySummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Check that `selections` yields a non-empty path touching every segment.
pub fn check_assignment(dataset: &Dataset, selections: &Selections) -> AssignmentCheck {
    let path = build_path(dataset, selections, PathFilter::All);
    let entries: Vec<_> = path.iter().filter_map(PathItem::entry).collect();
    let touched: BTreeSet<u32> = entries.iter().map(|entry| entry.segment).collect();
    let missing_segments: Vec<u32> = (1..=dataset.max_segment())
        .filter(|segment| !touched.contains(segment))
        .collect();

    let entry_count = entries.len();
    if entry_count > 0 && missing_segments.is_empty() {
        return AssignmentCheck::Pass { entry_count };
    }
    AssignmentCheck::Fail(PathFailure {
        signature: journey_signature(&dataset.choices, selections),
        entry_count,
        missing_segments,
    })
}

/// Sweep every assignment, keeping at most `sample_limit` failures.
///
/// Refuses to start when the journey count does not fit the enumerator.
#[instrument(skip_all, fields(choices = dataset.choices.len(), sample_limit = sample_limit))]
pub fn verify_all(dataset: &Dataset, sample_limit: usize) -> Result<VerifySummary, String> {
    let combinations = Combinations::new(&dataset.choices)?;
    let mut summary = VerifySummary {
        max_segment: dataset.max_segment(),
        expected_total: combinations.expected_count(),
        ..VerifySummary::default()
    };

    for assignment in combinations {
        let check = check_assignment(dataset, &assignment);
        summary.total += 1;
        *summary.entry_counts.entry(check.entry_count()).or_insert(0) += 1;
        match check {
            AssignmentCheck::Pass { .. } => summary.passed += 1,
            AssignmentCheck::Fail(failure) => {
                summary.failed += 1;
                if summary.failures.len() < sample_limit {
                    debug!(signature = %failure.signature, "assignment failed");
                    summary.failures.push(failure);
                }
            }
        }
    }

    debug!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        "sweep finished"
    );
    Ok(summary)
}

//! Semantic invariants not expressible via JSON Schema.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::core::combinations::expected_count;
use crate::dataset::{COMMON_BRANCH, ChoicePoint, Dataset};

static OPTION_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("option key pattern is valid")
});

/// Check structural invariants of a dataset:
/// - No duplicate entry ids or choice ids
/// - Segments are `>= 1`
/// - At most one choice point per segment
/// - Choice points have distinct slug option keys, none of them `"common"`
/// - Entries in gated segments use one of the choice point's option keys
/// - Entries in common segments use `"common"`
/// - The journey count fits in `u64`
///
/// Missing content is left to the verifier: an option with no entries or a
/// segment with no entries is not reported here.
pub fn validate_invariants(dataset: &Dataset) -> Vec<String> {
    let mut errors = Vec::new();

    let mut gates: HashMap<u32, &ChoicePoint> = HashMap::new();
    let mut choice_ids = HashSet::new();
    for choice in &dataset.choices {
        let path = format!("choices/{}", choice.id);
        if !choice_ids.insert(choice.id.as_str()) {
            errors.push(format!("duplicate choice id '{}'", choice.id));
        }
        if choice.segment == 0 {
            errors.push(format!("{path}: segment must be >= 1"));
        }
        match gates.entry(choice.segment) {
            Entry::Occupied(previous) => errors.push(format!(
                "{path}: segment {} already gated by '{}'",
                choice.segment,
                previous.get().id
            )),
            Entry::Vacant(slot) => {
                slot.insert(choice);
            }
        }
        if choice.options.is_empty() {
            errors.push(format!("{path}: options must be non-empty"));
        }

        let mut keys = HashSet::new();
        for option in &choice.options {
            if !keys.insert(option.branch.as_str()) {
                errors.push(format!("{path}: duplicate option '{}'", option.branch));
            }
            if option.branch == COMMON_BRANCH {
                errors.push(format!("{path}: option key must not be '{COMMON_BRANCH}'"));
            } else if !OPTION_KEY.is_match(&option.branch) {
                errors.push(format!(
                    "{path}: option key '{}' must be a lowercase slug",
                    option.branch
                ));
            }
        }
    }

    let mut entry_ids = HashSet::new();
    for entry in &dataset.entries {
        let path = format!("entries/{}", entry.id);
        if !entry_ids.insert(entry.id) {
            errors.push(format!("duplicate entry id {}", entry.id));
        }
        if entry.segment == 0 {
            errors.push(format!("{path}: segment must be >= 1"));
        }
        match gates.get(&entry.segment) {
            Some(choice) if entry.is_common() => errors.push(format!(
                "{path}: segment {} is gated by '{}', common entries are unreachable",
                entry.segment, choice.id
            )),
            Some(choice) if choice.option(&entry.branch).is_none() => errors.push(format!(
                "{path}: branch '{}' is not an option of '{}'",
                entry.branch, choice.id
            )),
            Some(_) => {}
            None if !entry.is_common() => errors.push(format!(
                "{path}: branch '{}' used in segment {} which has no choice point",
                entry.branch, entry.segment
            )),
            None => {}
        }
    }

    if expected_count(&dataset.choices).is_none() {
        errors.push(format!(
            "{} choice points overflow the journey count",
            dataset.choices.len()
        ));
    }

    errors
}

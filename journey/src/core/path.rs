//! Path construction over the day's segments.

use crate::core::types::{PathFilter, PathItem, Selections};
use crate::dataset::{COMMON_BRANCH, Dataset};

/// Build the ordered items for one traversal of the day.
///
/// Each segment in `1..=max_segment` is evaluated independently against the
/// global `selections`:
/// - gated and chosen: entries of the chosen branch, in stored order;
/// - gated and unchosen: a single pending choice item;
/// - common: entries of the `"common"` branch, in stored order.
///
/// Under `PathFilter::TimeBlock`, a choice point outside the active block is
/// skipped entirely and entries are kept only when their own block matches.
/// Segments with no matching entries contribute nothing; the builder never
/// fails.
pub fn build_path<'a>(
    dataset: &'a Dataset,
    selections: &Selections,
    filter: PathFilter,
) -> Vec<PathItem<'a>> {
    let mut path = Vec::new();

    for segment in 1..=dataset.max_segment() {
        let branch = match dataset.choice_for_segment(segment) {
            Some(choice) => {
                if !filter.admits(choice.time_block) {
                    continue;
                }
                match selections.get(&choice.id) {
                    Some(selected) => selected.as_str(),
                    None => {
                        path.push(PathItem::Choice { choice });
                        continue;
                    }
                }
            }
            None => COMMON_BRANCH,
        };

        path.extend(
            dataset
                .entries_in(segment, branch)
                .filter(|entry| filter.admits(entry.time_block))
                .map(|entry| PathItem::Entry { entry }),
        );
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TimeBlock;
    use crate::test_support::{
        choice, entry, entry_ids, entry_in_block, scenario_dataset, selections,
    };

    fn describe(path: &[PathItem<'_>]) -> Vec<String> {
        path.iter()
            .map(|item| match item {
                PathItem::Entry { entry } => format!("entry:{}", entry.id),
                PathItem::Choice { choice } => format!("choice:{}", choice.id),
            })
            .collect()
    }

    #[test]
    fn empty_selections_emit_prompts_and_keep_later_commons() {
        let dataset = scenario_dataset();
        let path = build_path(&dataset, &Selections::new(), PathFilter::All);
        assert_eq!(
            describe(&path),
            vec!["entry:1", "choice:first", "entry:5", "choice:second"]
        );
    }

    #[test]
    fn resolved_choices_expand_to_branch_entries() {
        let dataset = scenario_dataset();
        let chosen = selections(&[("first", "b"), ("second", "z")]);
        let path = build_path(&dataset, &chosen, PathFilter::All);
        assert_eq!(entry_ids(&path), vec![1, 3, 5, 8]);
        assert!(path.iter().all(|item| item.choice().is_none()));
    }

    #[test]
    fn choosing_replaces_only_that_prompt() {
        let dataset = scenario_dataset();
        let before = build_path(&dataset, &Selections::new(), PathFilter::All);
        let after = build_path(&dataset, &selections(&[("first", "c")]), PathFilter::All);

        assert_eq!(
            describe(&after),
            vec!["entry:1", "entry:4", "entry:5", "choice:second"]
        );
        let untouched = |path: &[PathItem<'_>]| -> Vec<String> {
            describe(
                &path
                    .iter()
                    .copied()
                    .filter(|item| item.segment() != 2)
                    .collect::<Vec<_>>(),
            )
        };
        assert_eq!(untouched(&before), untouched(&after));
    }

    #[test]
    fn branch_entries_keep_stored_order() {
        let dataset = Dataset {
            entries: vec![
                entry(10, 1, "late"),
                entry(4, 1, "early"),
                entry(2, 1, "late"),
            ],
            choices: vec![choice("wake", 1, &["early", "late"])],
        };
        let path = build_path(&dataset, &selections(&[("wake", "late")]), PathFilter::All);
        assert_eq!(entry_ids(&path), vec![10, 2]);
    }

    #[test]
    fn gated_segment_ignores_common_entries() {
        let dataset = Dataset {
            entries: vec![entry(1, 1, "common"), entry(2, 1, "a")],
            choices: vec![choice("c", 1, &["a"])],
        };
        let path = build_path(&dataset, &selections(&[("c", "a")]), PathFilter::All);
        assert_eq!(entry_ids(&path), vec![2]);
    }

    #[test]
    fn option_without_content_yields_shorter_path() {
        let dataset = Dataset {
            entries: vec![entry(1, 1, "common"), entry(2, 2, "a")],
            choices: vec![choice("c", 2, &["a", "b"])],
        };
        let path = build_path(&dataset, &selections(&[("c", "b")]), PathFilter::All);
        assert_eq!(entry_ids(&path), vec![1]);
    }

    #[test]
    fn unknown_selected_option_contributes_nothing() {
        let dataset = scenario_dataset();
        let path = build_path(
            &dataset,
            &selections(&[("first", "missing"), ("second", "x")]),
            PathFilter::All,
        );
        assert_eq!(entry_ids(&path), vec![1, 5, 6]);
    }

    #[test]
    fn time_block_filter_skips_choices_outside_the_block() {
        let dataset = scenario_dataset();
        let path = build_path(
            &dataset,
            &Selections::new(),
            PathFilter::TimeBlock(TimeBlock::Morning),
        );
        assert_eq!(describe(&path), vec!["entry:1", "choice:first"]);

        let path = build_path(
            &dataset,
            &Selections::new(),
            PathFilter::TimeBlock(TimeBlock::Commute),
        );
        assert_eq!(describe(&path), vec!["entry:5", "choice:second"]);
    }

    #[test]
    fn time_block_filter_applies_to_resolved_entries() {
        let dataset = Dataset {
            entries: vec![
                entry_in_block(1, 1, "a", TimeBlock::Lunch),
                entry_in_block(2, 1, "a", TimeBlock::Afternoon),
            ],
            choices: vec![crate::test_support::choice_in_block(
                "meal",
                1,
                &["a"],
                TimeBlock::Lunch,
            )],
        };
        let path = build_path(
            &dataset,
            &selections(&[("meal", "a")]),
            PathFilter::TimeBlock(TimeBlock::Lunch),
        );
        assert_eq!(entry_ids(&path), vec![1]);
    }

    #[test]
    fn build_is_deterministic() {
        let dataset = scenario_dataset();
        let chosen = selections(&[("first", "a"), ("second", "y")]);
        let first = build_path(&dataset, &chosen, PathFilter::All);
        let second = build_path(&dataset, &chosen, PathFilter::All);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_dataset_yields_empty_path() {
        let dataset = Dataset::default();
        let path = build_path(&dataset, &Selections::new(), PathFilter::All);
        assert!(path.is_empty());
    }
}

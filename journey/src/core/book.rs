//! Sentence book: every entry of the dataset grouped by time block.

use serde::Serialize;

use crate::dataset::{ContentEntry, Dataset, TimeBlock};

/// Entries of one time block, shared ones first, then per branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSection<'a> {
    pub time_block: TimeBlock,
    pub common: Vec<&'a ContentEntry>,
    pub branches: Vec<BookBranch<'a>>,
}

/// Entries of one branch within a section, in `(segment, id)` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookBranch<'a> {
    pub branch: &'a str,
    /// Option emoji and label, or the bare branch key when the option is
    /// unknown. `None` when no choice point gates the segment.
    pub label: Option<String>,
    pub entries: Vec<&'a ContentEntry>,
}

/// Build the book in day order, omitting time blocks without entries.
///
/// Branch groups appear in order of their first entry.
pub fn sentence_book(dataset: &Dataset) -> Vec<BookSection<'_>> {
    TimeBlock::ALL
        .into_iter()
        .filter_map(|time_block| section(dataset, time_block))
        .collect()
}

fn section(dataset: &Dataset, time_block: TimeBlock) -> Option<BookSection<'_>> {
    let mut entries: Vec<&ContentEntry> = dataset
        .entries
        .iter()
        .filter(|entry| entry.time_block == time_block)
        .collect();
    if entries.is_empty() {
        return None;
    }
    entries.sort_by_key(|entry| (entry.segment, entry.id));

    let mut common = Vec::new();
    let mut branches: Vec<BookBranch<'_>> = Vec::new();
    for entry in entries {
        if entry.is_common() {
            common.push(entry);
            continue;
        }
        match branches
            .iter_mut()
            .find(|group| group.branch == entry.branch)
        {
            Some(group) => group.entries.push(entry),
            None => branches.push(BookBranch {
                branch: &entry.branch,
                label: branch_label(dataset, entry),
                entries: vec![entry],
            }),
        }
    }

    Some(BookSection {
        time_block,
        common,
        branches,
    })
}

fn branch_label(dataset: &Dataset, entry: &ContentEntry) -> Option<String> {
    let choice = dataset.choice_for_segment(entry.segment)?;
    let label = match choice.option(&entry.branch) {
        Some(option) => format!("{} {}", option.emoji, option.label),
        None => entry.branch.clone(),
    };
    Some(label)
}

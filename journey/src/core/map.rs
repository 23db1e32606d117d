//! Day overview rows for the journey-complete screen.

use serde::Serialize;

use crate::core::types::Selections;
use crate::dataset::{COMMON_BRANCH, Dataset, TimeBlock};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapOption {
    pub branch: String,
    pub label: String,
    pub emoji: String,
    pub chosen: bool,
}

/// One segment of the day overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MapRow {
    Common {
        segment: u32,
        time_block: TimeBlock,
        time: String,
        emoji: String,
        /// Emojis of every entry in the segment, space separated.
        label: String,
    },
    Choice {
        segment: u32,
        choice_id: String,
        time_block: TimeBlock,
        time: String,
        chosen: Option<String>,
        options: Vec<MapOption>,
    },
}

impl MapRow {
    pub fn segment(&self) -> u32 {
        match self {
            MapRow::Common { segment, .. } | MapRow::Choice { segment, .. } => *segment,
        }
    }
}

/// Build one row per segment; common segments without entries are omitted.
pub fn journey_map(dataset: &Dataset, selections: &Selections) -> Vec<MapRow> {
    let mut rows = Vec::new();
    for segment in 1..=dataset.max_segment() {
        if let Some(choice) = dataset.choice_for_segment(segment) {
            let chosen = selections
                .get(&choice.id)
                .filter(|branch| choice.option(branch).is_some())
                .cloned();
            rows.push(MapRow::Choice {
                segment,
                choice_id: choice.id.clone(),
                time_block: choice.time_block,
                time: choice.time.clone(),
                options: choice
                    .options
                    .iter()
                    .map(|option| MapOption {
                        branch: option.branch.clone(),
                        label: option.label.clone(),
                        emoji: option.emoji.clone(),
                        chosen: chosen.as_deref() == Some(option.branch.as_str()),
                    })
                    .collect(),
                chosen,
            });
            continue;
        }

        let entries: Vec<_> = dataset.entries_in(segment, COMMON_BRANCH).collect();
        let Some(first) = entries.first() else {
            continue;
        };
        rows.push(MapRow::Common {
            segment,
            time_block: first.time_block,
            time: first.time.clone(),
            emoji: first.emoji.clone(),
            label: entries
                .iter()
                .map(|entry| entry.emoji.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        });
    }
    rows
}

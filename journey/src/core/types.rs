//! Shared deterministic types for journey core logic.
//!
//! These types define stable contracts between core components. They should not
//! depend on external state or I/O and must remain deterministic across runs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::{ChoicePoint, ContentEntry, TimeBlock};

/// Choice id -> chosen option key. Partial maps are valid.
pub type Selections = BTreeMap<String, String>;

/// One displayable step of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PathItem<'a> {
    /// Content entry from a common or resolved segment.
    Entry { entry: &'a ContentEntry },
    /// Unresolved choice point awaiting the user's answer.
    Choice { choice: &'a ChoicePoint },
}

impl<'a> PathItem<'a> {
    pub fn entry(&self) -> Option<&'a ContentEntry> {
        match *self {
            PathItem::Entry { entry } => Some(entry),
            PathItem::Choice { .. } => None,
        }
    }

    pub fn choice(&self) -> Option<&'a ChoicePoint> {
        match *self {
            PathItem::Entry { .. } => None,
            PathItem::Choice { choice } => Some(choice),
        }
    }

    pub fn segment(&self) -> u32 {
        match self {
            PathItem::Entry { entry } => entry.segment,
            PathItem::Choice { choice } => choice.segment,
        }
    }
}

/// Display restriction applied by the path builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathFilter {
    /// Every segment of the day.
    #[default]
    All,
    /// Only items belonging to one time block.
    TimeBlock(TimeBlock),
}

impl PathFilter {
    pub fn from_time_block(time_block: Option<TimeBlock>) -> Self {
        match time_block {
            Some(block) => PathFilter::TimeBlock(block),
            None => PathFilter::All,
        }
    }

    pub fn admits(self, time_block: TimeBlock) -> bool {
        match self {
            PathFilter::All => true,
            PathFilter::TimeBlock(active) => active == time_block,
        }
    }
}

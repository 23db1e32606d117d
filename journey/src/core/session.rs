//! Interactive journey state, owned by one learner session.
//!
//! The session holds selections and progress and derives the path on demand
//! by passing its state into `build_path`. Each logical action has a single
//! mutation entry point.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::path::build_path;
use crate::core::types::{PathFilter, PathItem, Selections};
use crate::dataset::{Dataset, TimeBlock};

/// Learning stage of a single entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Respond,
    ReadAloud,
    Sensory,
    Speak,
    Done,
}

impl Stage {
    pub fn next(self) -> Stage {
        match self {
            Stage::Respond => Stage::ReadAloud,
            Stage::ReadAloud => Stage::Sensory,
            Stage::Sensory => Stage::Speak,
            Stage::Speak | Stage::Done => Stage::Done,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JourneySession {
    pub selections: Selections,
    pub current_index: usize,
    pub active_time_block: Option<TimeBlock>,
    /// Entry id -> stage reached. Absent means `Respond`.
    pub stage_progress: BTreeMap<u32, Stage>,
    /// Entry ids that reached `Done`, in completion order.
    pub completed: Vec<u32>,
}

impl JourneySession {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter(&self) -> PathFilter {
        PathFilter::from_time_block(self.active_time_block)
    }

    /// Path under the session's selections and time-block filter.
    pub fn path<'a>(&self, dataset: &'a Dataset) -> Vec<PathItem<'a>> {
        build_path(dataset, &self.selections, self.filter())
    }

    pub fn current_item<'a>(&self, dataset: &'a Dataset) -> Option<PathItem<'a>> {
        self.path(dataset).get(self.current_index).copied()
    }

    /// Record an answer for `choice_id`.
    ///
    /// The index is left in place: the pending prompt at that position is
    /// replaced by the chosen branch's entries.
    pub fn choose(&mut self, dataset: &Dataset, choice_id: &str, branch: &str) -> Result<(), String> {
        let choice = dataset
            .choice(choice_id)
            .ok_or_else(|| format!("unknown choice '{choice_id}'"))?;
        if choice.option(branch).is_none() {
            return Err(format!("'{branch}' is not an option of '{choice_id}'"));
        }
        self.selections
            .insert(choice_id.to_string(), branch.to_string());
        Ok(())
    }

    pub fn set_index(&mut self, index: usize) {
        self.current_index = index;
    }

    /// Step forward, clamped to the last item of the current path.
    pub fn go_next(&mut self, dataset: &Dataset) {
        let last = self.path(dataset).len().saturating_sub(1);
        self.current_index = (self.current_index + 1).min(last);
    }

    pub fn go_prev(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// Change the time-block filter and restart at the first item.
    pub fn set_time_block(&mut self, time_block: Option<TimeBlock>) {
        self.active_time_block = time_block;
        self.current_index = 0;
    }

    pub fn stage(&self, entry_id: u32) -> Stage {
        self.stage_progress
            .get(&entry_id)
            .copied()
            .unwrap_or_default()
    }

    /// Move `entry_id` one stage forward and return the new stage.
    ///
    /// Reaching `Done` records the entry as completed once; advancing a
    /// finished entry is a no-op.
    pub fn advance_stage(&mut self, entry_id: u32) -> Stage {
        let current = self.stage(entry_id);
        if current == Stage::Done {
            return current;
        }
        let next = current.next();
        self.stage_progress.insert(entry_id, next);
        if next == Stage::Done && !self.completed.contains(&entry_id) {
            self.completed.push(entry_id);
        }
        next
    }

    pub fn reset_entry(&mut self, entry_id: u32) {
        self.stage_progress.remove(&entry_id);
        self.completed.retain(|id| *id != entry_id);
    }

    /// Start a new day: clears selections, progress, and position.
    ///
    /// The time-block filter is a display preference and is kept.
    pub fn reset_all(&mut self) {
        self.selections.clear();
        self.stage_progress.clear();
        self.completed.clear();
        self.current_index = 0;
    }

    /// Entries on the unfiltered path for the current selections.
    pub fn total_entries(&self, dataset: &Dataset) -> usize {
        build_path(dataset, &self.selections, PathFilter::All)
            .iter()
            .filter(|item| item.entry().is_some())
            .count()
    }

    /// Completed share of `total_entries`, rounded to a whole percent.
    pub fn progress_percent(&self, dataset: &Dataset) -> u32 {
        let total = self.total_entries(dataset);
        if total == 0 {
            return 0;
        }
        let percent = (self.completed.len() as f64 / total as f64 * 100.0).round();
        percent as u32
    }

    pub fn is_complete(&self, dataset: &Dataset) -> bool {
        self.total_entries(dataset) > 0 && self.progress_percent(dataset) == 100
    }

    /// Completion per time block over every entry of the dataset, in day order.
    pub fn block_progress(&self, dataset: &Dataset) -> Vec<BlockProgress> {
        TimeBlock::ALL
            .into_iter()
            .map(|time_block| {
                let mut progress = BlockProgress {
                    time_block,
                    done: 0,
                    total: 0,
                };
                for entry in dataset
                    .entries
                    .iter()
                    .filter(|entry| entry.time_block == time_block)
                {
                    progress.total += 1;
                    if self.completed.contains(&entry.id) {
                        progress.done += 1;
                    }
                }
                progress
            })
            .collect()
    }
}

/// Completed entries of one time block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockProgress {
    pub time_block: TimeBlock,
    pub done: usize,
    pub total: usize,
}

impl BlockProgress {
    /// Share of `total` completed; 0 for a block without entries.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.done as f64 / self.total as f64 * 100.0
    }

    pub fn is_done(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{entry_ids, scenario_dataset};
    use super::*;

    #[test]
    fn choose_replaces_prompt_without_moving_index() {
        let dataset = scenario_dataset();
        let mut session = JourneySession::new();
        session.go_next(&dataset);
        assert_eq!(session.current_index, 1);
        assert!(matches!(
            session.current_item(&dataset),
            Some(PathItem::Choice { .. })
        ));

        session.choose(&dataset, "first", "a").expect("choose");
        assert_eq!(session.current_index, 1);
        let item = session.current_item(&dataset).expect("item");
        assert_eq!(item.entry().map(|entry| entry.id), Some(2));
    }

    #[test]
    fn choose_rejects_unknown_choice_or_option() {
        let dataset = scenario_dataset();
        let mut session = JourneySession::new();
        let err = session.choose(&dataset, "nope", "a").expect_err("unknown");
        assert!(err.contains("unknown choice"));
        let err = session.choose(&dataset, "first", "x").expect_err("bad option");
        assert!(err.contains("not an option"));
        assert!(session.selections.is_empty());
    }

    #[test]
    fn navigation_is_clamped() {
        let dataset = scenario_dataset();
        let mut session = JourneySession::new();
        session.go_prev();
        assert_eq!(session.current_index, 0);
        for _ in 0..10 {
            session.go_next(&dataset);
        }
        assert_eq!(session.current_index, 3);
    }

    #[test]
    fn set_time_block_resets_index_and_filters() {
        let dataset = scenario_dataset();
        let mut session = JourneySession::new();
        session.set_index(3);
        session.set_time_block(Some(TimeBlock::Commute));
        assert_eq!(session.current_index, 0);
        assert_eq!(session.path(&dataset).len(), 2);
        assert_eq!(session.total_entries(&dataset), 2);
    }

    #[test]
    fn stages_advance_to_done_once() {
        let mut session = JourneySession::new();
        assert_eq!(session.stage(5), Stage::Respond);
        assert_eq!(session.advance_stage(5), Stage::ReadAloud);
        assert_eq!(session.advance_stage(5), Stage::Sensory);
        assert_eq!(session.advance_stage(5), Stage::Speak);
        assert_eq!(session.advance_stage(5), Stage::Done);
        assert_eq!(session.advance_stage(5), Stage::Done);
        assert_eq!(session.completed, vec![5]);

        session.reset_entry(5);
        assert_eq!(session.stage(5), Stage::Respond);
        assert!(session.completed.is_empty());
    }

    #[test]
    fn progress_counts_completed_against_reachable_entries() {
        let dataset = scenario_dataset();
        let mut session = JourneySession::new();
        assert_eq!(session.total_entries(&dataset), 2);
        assert_eq!(session.progress_percent(&dataset), 0);

        session.choose(&dataset, "first", "b").expect("choose");
        session.choose(&dataset, "second", "x").expect("choose");
        let ids = entry_ids(&session.path(&dataset));
        assert_eq!(ids, vec![1, 3, 5, 6]);
        for id in &ids[..3] {
            while session.advance_stage(*id) != Stage::Done {}
        }
        assert_eq!(session.progress_percent(&dataset), 75);
        assert!(!session.is_complete(&dataset));

        while session.advance_stage(6) != Stage::Done {}
        assert!(session.is_complete(&dataset));
    }

    #[test]
    fn reset_all_reproduces_initial_path_exactly() {
        let dataset = scenario_dataset();
        let mut session = JourneySession::new();
        let initial = serde_json::to_string(&session.path(&dataset)).expect("json");

        session.choose(&dataset, "first", "c").expect("choose");
        session.choose(&dataset, "second", "y").expect("choose");
        session.go_next(&dataset);
        session.advance_stage(1);
        assert_ne!(serde_json::to_string(&session.path(&dataset)).expect("json"), initial);

        session.reset_all();
        let reset = serde_json::to_string(&session.path(&dataset)).expect("json");
        assert_eq!(reset, initial);
        assert_eq!(session, JourneySession::new());
    }

    #[test]
    fn empty_dataset_never_completes() {
        let dataset = Dataset::default();
        let mut session = JourneySession::new();
        session.go_next(&dataset);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.progress_percent(&dataset), 0);
        assert!(!session.is_complete(&dataset));
    }

    #[test]
    fn block_progress_counts_every_entry_of_each_block() {
        let dataset = scenario_dataset();
        let mut session = JourneySession::new();
        for id in [1, 3] {
            while session.advance_stage(id) != Stage::Done {}
        }

        let progress = session.block_progress(&dataset);
        assert_eq!(progress.len(), TimeBlock::ALL.len());
        assert_eq!(
            progress[0],
            BlockProgress {
                time_block: TimeBlock::Morning,
                done: 2,
                total: 4,
            }
        );
        assert_eq!(progress[0].percent(), 50.0);
        assert_eq!(progress[1].time_block, TimeBlock::Commute);
        assert_eq!((progress[1].done, progress[1].total), (0, 4));
        assert!(!progress[1].is_done());
        assert_eq!(progress[2].total, 0);
        assert_eq!(progress[2].percent(), 0.0);
        assert!(!progress[2].is_done());

        for id in [2, 4] {
            while session.advance_stage(id) != Stage::Done {}
        }
        assert!(session.block_progress(&dataset)[0].is_done());
    }
}

//! Static content dataset for the daily journey.
//!
//! A dataset is supplied fully formed before any path computation and is never
//! mutated by the core. Stored order of `entries` is display order within a
//! branch; stored order of `choices` is enumeration order.

use serde::{Deserialize, Serialize};

use crate::core::combinations::expected_count;

/// Branch key shared by every entry of a segment without a choice point.
pub const COMMON_BRANCH: &str = "common";

/// Categorical slot of the day, in day order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeBlock {
    Morning,
    Commute,
    Daytime,
    Lunch,
    Afternoon,
    CommutePm,
    Evening,
    Night,
}

impl TimeBlock {
    pub const ALL: [TimeBlock; 8] = [
        TimeBlock::Morning,
        TimeBlock::Commute,
        TimeBlock::Daytime,
        TimeBlock::Lunch,
        TimeBlock::Afternoon,
        TimeBlock::CommutePm,
        TimeBlock::Evening,
        TimeBlock::Night,
    ];

    /// Wire name (`commute-pm`, `night`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            TimeBlock::Morning => "morning",
            TimeBlock::Commute => "commute",
            TimeBlock::Daytime => "daytime",
            TimeBlock::Lunch => "lunch",
            TimeBlock::Afternoon => "afternoon",
            TimeBlock::CommutePm => "commute-pm",
            TimeBlock::Evening => "evening",
            TimeBlock::Night => "night",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeBlock::Morning => "아침",
            TimeBlock::Commute => "이동",
            TimeBlock::Daytime => "오전",
            TimeBlock::Lunch => "점심",
            TimeBlock::Afternoon => "오후",
            TimeBlock::CommutePm => "퇴근",
            TimeBlock::Evening => "저녁",
            TimeBlock::Night => "취침",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            TimeBlock::Morning => "🌅",
            TimeBlock::Commute => "🚇",
            TimeBlock::Daytime => "💼",
            TimeBlock::Lunch => "🍜",
            TimeBlock::Afternoon => "📊",
            TimeBlock::CommutePm => "🏠",
            TimeBlock::Evening => "🍽️",
            TimeBlock::Night => "🌙",
        }
    }

    /// Clock range covered by the block.
    pub fn range(self) -> &'static str {
        match self {
            TimeBlock::Morning => "06:00-07:30",
            TimeBlock::Commute => "07:30-09:00",
            TimeBlock::Daytime => "09:00-12:00",
            TimeBlock::Lunch => "12:00-13:00",
            TimeBlock::Afternoon => "13:00-18:00",
            TimeBlock::CommutePm => "18:00-19:00",
            TimeBlock::Evening => "19:00-22:00",
            TimeBlock::Night => "22:00-23:00",
        }
    }
}

impl std::fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for TimeBlock {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TimeBlock::ALL
            .into_iter()
            .find(|block| block.as_str() == value)
            .ok_or_else(|| format!("unknown time block '{value}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondStage {
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadAloudStage {
    pub stress: String,
    pub ipa: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensoryStage {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakStage {
    pub expand_prompt: String,
    pub sample_expansion: String,
}

/// The four learning-stage payloads every entry carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stages {
    pub respond: RespondStage,
    pub read_aloud: ReadAloudStage,
    pub sensory: SensoryStage,
    pub speak: SpeakStage,
}

/// One flashcard belonging to a single segment and branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub id: u32,
    pub segment: u32,
    /// `"common"` or an option key of the segment's choice point.
    pub branch: String,
    pub time_block: TimeBlock,
    pub time: String,
    pub scene: String,
    pub korean: String,
    pub english: String,
    pub emoji: String,
    pub stages: Stages,
}

impl ContentEntry {
    pub fn is_common(&self) -> bool {
        self.branch == COMMON_BRANCH
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Option key; matches the `branch` of the entries it unlocks.
    pub branch: String,
    pub label: String,
    pub label_en: String,
    pub emoji: String,
    pub description: String,
}

/// Decision gate attached to the segment it gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicePoint {
    pub id: String,
    pub segment: u32,
    pub time_block: TimeBlock,
    pub time: String,
    pub question: String,
    pub question_en: String,
    pub options: Vec<ChoiceOption>,
}

impl ChoicePoint {
    pub fn option(&self, branch: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|option| option.branch == branch)
    }

    pub fn option_index(&self, branch: &str) -> Option<usize> {
        self.options.iter().position(|option| option.branch == branch)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub entries: Vec<ContentEntry>,
    pub choices: Vec<ChoicePoint>,
}

impl Dataset {
    /// Highest segment across entries and choice points; 0 when empty.
    pub fn max_segment(&self) -> u32 {
        let entries = self.entries.iter().map(|entry| entry.segment);
        let choices = self.choices.iter().map(|choice| choice.segment);
        entries.chain(choices).max().unwrap_or(0)
    }

    /// The choice point gating `segment`, if any.
    ///
    /// Picks the first in stored order; invariants reject duplicates.
    pub fn choice_for_segment(&self, segment: u32) -> Option<&ChoicePoint> {
        self.choices.iter().find(|choice| choice.segment == segment)
    }

    pub fn choice(&self, id: &str) -> Option<&ChoicePoint> {
        self.choices.iter().find(|choice| choice.id == id)
    }

    pub fn entries_in(&self, segment: u32, branch: &str) -> impl Iterator<Item = &ContentEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.segment == segment && entry.branch == branch)
    }

    /// Number of fully-resolved assignments, `None` when it overflows `u64`.
    pub fn journey_count(&self) -> Option<u64> {
        expected_count(&self.choices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{choice, entry, scenario_dataset};

    #[test]
    fn time_block_parses_wire_names() {
        assert_eq!("commute-pm".parse::<TimeBlock>(), Ok(TimeBlock::CommutePm));
        assert!("midnight".parse::<TimeBlock>().is_err());
        let json = serde_json::to_string(&TimeBlock::CommutePm).expect("json");
        assert_eq!(json, "\"commute-pm\"");
    }

    #[test]
    fn max_segment_includes_choice_points() {
        let dataset = Dataset {
            entries: vec![entry(1, 1, "common")],
            choices: vec![choice("late", 5, &["a"])],
        };
        assert_eq!(dataset.max_segment(), 5);
        assert_eq!(Dataset::default().max_segment(), 0);
    }

    #[test]
    fn journey_count_is_product_of_option_counts() {
        assert_eq!(scenario_dataset().journey_count(), Some(9));
        assert_eq!(Dataset::default().journey_count(), Some(1));
    }

    #[test]
    fn entries_in_preserves_stored_order() {
        let dataset = Dataset {
            entries: vec![entry(7, 1, "common"), entry(3, 1, "common"), entry(4, 2, "common")],
            choices: Vec::new(),
        };
        let ids: Vec<u32> = dataset.entries_in(1, COMMON_BRANCH).map(|e| e.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }
}

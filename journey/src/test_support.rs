//! Test-only helpers for constructing journey datasets.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::types::{PathItem, Selections};
use crate::dataset::{
    ChoiceOption, ChoicePoint, ContentEntry, Dataset, ReadAloudStage, RespondStage, SensoryStage,
    SpeakStage, Stages, TimeBlock,
};

/// Entry ids along a path, skipping pending choices.
pub fn entry_ids(path: &[PathItem<'_>]) -> Vec<u32> {
    path.iter()
        .filter_map(PathItem::entry)
        .map(|entry| entry.id)
        .collect()
}

/// Create a deterministic entry in the `morning` block.
pub fn entry(id: u32, segment: u32, branch: &str) -> ContentEntry {
    entry_in_block(id, segment, branch, TimeBlock::Morning)
}

/// Create a deterministic entry with an explicit time block.
pub fn entry_in_block(id: u32, segment: u32, branch: &str, time_block: TimeBlock) -> ContentEntry {
    ContentEntry {
        id,
        segment,
        branch: branch.to_string(),
        time_block,
        time: format!("{:02}:00", 6 + segment),
        scene: format!("scene {id}"),
        korean: format!("문장 {id}"),
        english: format!("sentence {id}"),
        emoji: "🔹".to_string(),
        stages: Stages {
            respond: RespondStage {
                hint: format!("hint {id}"),
            },
            read_aloud: ReadAloudStage {
                stress: format!("STRESS {id}"),
                ipa: "/ˈtɛst/".to_string(),
            },
            sensory: SensoryStage {
                prompt: format!("imagine {id}"),
            },
            speak: SpeakStage {
                expand_prompt: format!("expand {id}"),
                sample_expansion: format!("sample {id}"),
            },
        },
    }
}

/// Create a choice point in the `morning` block with the given option keys.
pub fn choice(id: &str, segment: u32, branches: &[&str]) -> ChoicePoint {
    choice_in_block(id, segment, branches, TimeBlock::Morning)
}

pub fn choice_in_block(
    id: &str,
    segment: u32,
    branches: &[&str],
    time_block: TimeBlock,
) -> ChoicePoint {
    ChoicePoint {
        id: id.to_string(),
        segment,
        time_block,
        time: format!("{:02}:30", 6 + segment),
        question: format!("{id}?"),
        question_en: format!("{id}?"),
        options: branches
            .iter()
            .map(|branch| ChoiceOption {
                branch: branch.to_string(),
                label: branch.to_string(),
                label_en: branch.to_string(),
                emoji: "🔸".to_string(),
                description: format!("pick {branch}"),
            })
            .collect(),
    }
}

/// Four segments: common, gated `first` (a/b/c), common, gated `second` (x/y/z).
///
/// Segments 1-2 sit in `morning`, segments 3-4 in `commute`.
pub fn scenario_dataset() -> Dataset {
    use TimeBlock::{Commute, Morning};
    Dataset {
        entries: vec![
            entry_in_block(1, 1, "common", Morning),
            entry_in_block(2, 2, "a", Morning),
            entry_in_block(3, 2, "b", Morning),
            entry_in_block(4, 2, "c", Morning),
            entry_in_block(5, 3, "common", Commute),
            entry_in_block(6, 4, "x", Commute),
            entry_in_block(7, 4, "y", Commute),
            entry_in_block(8, 4, "z", Commute),
        ],
        choices: vec![
            choice_in_block("first", 2, &["a", "b", "c"], Morning),
            choice_in_block("second", 4, &["x", "y", "z"], Commute),
        ],
    }
}

/// Build a selection map from `(choice id, option key)` pairs.
pub fn selections(pairs: &[(&str, &str)]) -> Selections {
    pairs
        .iter()
        .map(|(choice, branch)| (choice.to_string(), branch.to_string()))
        .collect()
}

/// A dataset serialized into a temporary directory.
pub struct DatasetFile {
    dir: TempDir,
    path: PathBuf,
}

impl DatasetFile {
    pub fn write(dataset: &Dataset) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let path = dir.path().join("journey.json");
        let mut buf = serde_json::to_string_pretty(dataset).context("serialize dataset")?;
        buf.push('\n');
        std::fs::write(&path, buf).with_context(|| format!("write {}", path.display()))?;
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

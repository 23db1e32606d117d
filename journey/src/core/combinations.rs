//! Lazy enumeration of fully-resolved choice assignments.

use std::iter::FusedIterator;

use crate::core::types::Selections;
use crate::dataset::ChoicePoint;

/// Cartesian product of every choice point's options.
///
/// Odometer over option indices: the first choice point is the most
/// significant digit, options advance in their defined order. Each yielded
/// assignment is a fresh map covering every choice point exactly once.
/// Cloning restarts from the clone's current position.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    choices: &'a [ChoicePoint],
    indices: Vec<usize>,
    total: u64,
    remaining: usize,
}

impl<'a> Combinations<'a> {
    /// Start an enumeration over `choices`.
    ///
    /// Fails when the number of assignments does not fit in `u64` or in
    /// `usize` on this target.
    pub fn new(choices: &'a [ChoicePoint]) -> Result<Self, String> {
        let total = expected_count(choices)
            .ok_or_else(|| format!("{} choice points overflow the journey count", choices.len()))?;
        let remaining = usize::try_from(total)
            .map_err(|_| format!("{total} journeys exceed the addressable range"))?;
        Ok(Self {
            choices,
            indices: vec![0; choices.len()],
            total,
            remaining,
        })
    }

    /// Total number of assignments this enumeration produces from the start.
    pub fn expected_count(&self) -> u64 {
        self.total
    }

    fn current(&self) -> Selections {
        self.choices
            .iter()
            .zip(&self.indices)
            .map(|(choice, &index)| (choice.id.clone(), choice.options[index].branch.clone()))
            .collect()
    }

    fn advance(&mut self) {
        for (choice, index) in self.choices.iter().zip(self.indices.iter_mut()).rev() {
            *index += 1;
            if *index < choice.options.len() {
                return;
            }
            *index = 0;
        }
    }
}

/// Product of option counts; zero when any choice point has no options.
///
/// `None` when the product overflows `u64`.
pub fn expected_count(choices: &[ChoicePoint]) -> Option<u64> {
    choices.iter().try_fold(1u64, |count, choice| {
        count.checked_mul(choice.options.len() as u64)
    })
}

impl Iterator for Combinations<'_> {
    type Item = Selections;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let assignment = self.current();
        self.remaining -= 1;
        self.advance();
        Some(assignment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

impl FusedIterator for Combinations<'_> {}

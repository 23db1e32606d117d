//! Stable identity of a journey: its number and signature.

use crate::core::types::Selections;
use crate::dataset::ChoicePoint;

/// 1-based position of `selections` in enumeration order.
///
/// The last choice point is the least significant digit. Missing or unknown
/// selections count as that choice point's first option. `None` when the
/// journey count overflows `u64`.
pub fn journey_number(choices: &[ChoicePoint], selections: &Selections) -> Option<u64> {
    let mut index = 0u64;
    let mut multiplier = 1u64;
    for choice in choices.iter().rev() {
        let digit = selections
            .get(&choice.id)
            .and_then(|branch| choice.option_index(branch))
            .unwrap_or(0);
        index = index.checked_add((digit as u64).checked_mul(multiplier)?)?;
        multiplier = multiplier.checked_mul(choice.options.len() as u64)?;
    }
    index.checked_add(1)
}

/// Chosen option keys in choice order, joined by `-`.
///
/// Unselected choice points are omitted.
pub fn journey_signature(choices: &[ChoicePoint], selections: &Selections) -> String {
    choices
        .iter()
        .filter_map(|choice| selections.get(&choice.id))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::combinations::Combinations;
    use crate::test_support::{choice, scenario_dataset, selections};

    #[test]
    fn number_matches_enumeration_position() {
        let dataset = scenario_dataset();
        let combinations = Combinations::new(&dataset.choices).expect("combinations");
        for (position, assignment) in combinations.enumerate() {
            assert_eq!(
                journey_number(&dataset.choices, &assignment),
                Some(position as u64 + 1)
            );
        }
    }

    #[test]
    fn number_treats_missing_choice_as_first_option() {
        let dataset = scenario_dataset();
        assert_eq!(journey_number(&dataset.choices, &Selections::new()), Some(1));
        assert_eq!(
            journey_number(&dataset.choices, &selections(&[("second", "z")])),
            Some(3)
        );
        assert_eq!(
            journey_number(&dataset.choices, &selections(&[("first", "c"), ("second", "z")])),
            Some(9)
        );
    }

    #[test]
    fn signature_follows_choice_order_not_map_order() {
        let choices = vec![choice("zeta", 1, &["z1", "z2"]), choice("alpha", 2, &["a1", "a2"])];
        let chosen = selections(&[("alpha", "a2"), ("zeta", "z1")]);
        assert_eq!(journey_signature(&choices, &chosen), "z1-a2");
        assert_eq!(
            journey_signature(&choices, &selections(&[("alpha", "a1")])),
            "a1"
        );
    }

    #[test]
    fn number_is_none_when_count_overflows() {
        let choices: Vec<_> = (1..=30)
            .map(|segment| choice(&format!("c{segment}"), segment, &["a", "b", "c", "d", "e"]))
            .collect();
        assert_eq!(journey_number(&choices, &Selections::new()), None);
    }
}

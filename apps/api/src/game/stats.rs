//! Derived statistics — pure functions of `GameState`, recomputed on demand
//! and never stored.
//!
//! Confidence is computed unconditionally; hiding it until reveal is a
//! presentation decision made at the snapshot boundary, not here.

use serde::Serialize;

use crate::game::state::GameState;

/// Snapshot of the derived numbers for one game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub total: usize,
    pub assessed: usize,
    pub correct: usize,
    /// assessed / total, rounded to the nearest whole percent.
    pub progress_percent: u32,
    /// correct / assessed, rounded to the nearest whole percent.
    pub confidence_percent: u32,
}

/// Fraction of statements the player has assessed. 0 when nothing is loaded.
pub fn progress(state: &GameState) -> f64 {
    let total = state.statements().len();
    if total == 0 {
        return 0.0;
    }
    state.assessments().len() as f64 / total as f64
}

/// Number of assessed statements whose guess matches the truth label.
/// Unassessed statements never count — an unset guess is not a guess.
pub fn correct_count(state: &GameState) -> usize {
    state
        .assessments()
        .iter()
        .filter(|(i, guess)| {
            state
                .statements()
                .get(**i)
                .is_some_and(|s| s.is_true == **guess)
        })
        .count()
}

/// Fraction of assessed statements guessed correctly. 0 when nothing is
/// assessed — never divides by zero.
pub fn confidence(state: &GameState) -> f64 {
    let assessed = state.assessments().len();
    if assessed == 0 {
        return 0.0;
    }
    correct_count(state) as f64 / assessed as f64
}

pub fn compute(state: &GameState) -> GameStats {
    GameStats {
        total: state.statements().len(),
        assessed: state.assessments().len(),
        correct: correct_count(state),
        progress_percent: to_percent(progress(state)),
        confidence_percent: to_percent(confidence(state)),
    }
}

/// Rounds a fraction to the nearest whole percent.
fn to_percent(fraction: f64) -> u32 {
    (fraction * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::generator::WitnessStatement;

    fn statement(text: &str, is_true: bool) -> WitnessStatement {
        WitnessStatement {
            text: text.to_string(),
            is_true,
        }
    }

    fn loaded_state(statements: Vec<WitnessStatement>) -> GameState {
        let mut state = GameState::new();
        let seq = state.request_generation().unwrap();
        state.generation_succeeded(seq, statements);
        state
    }

    #[test]
    fn test_empty_state_has_zero_stats() {
        let stats = compute(&GameState::new());
        assert_eq!(
            stats,
            GameStats {
                total: 0,
                assessed: 0,
                correct: 0,
                progress_percent: 0,
                confidence_percent: 0,
            }
        );
    }

    #[test]
    fn test_three_statement_scenario() {
        // A=true, B=false, C=true; guesses true/true/false — only A correct.
        let mut state = loaded_state(vec![
            statement("A", true),
            statement("B", false),
            statement("C", true),
        ]);
        state.assess(0, true);
        state.assess(1, true);
        state.assess(2, false);
        state.reveal();

        let stats = compute(&state);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.assessed, 3);
        assert_eq!(stats.correct, 1);
        assert_eq!(stats.progress_percent, 100);
        assert_eq!(stats.confidence_percent, 33);
    }

    #[test]
    fn test_reveal_with_nothing_assessed() {
        let mut state = loaded_state(vec![statement("A", true), statement("B", false)]);
        state.reveal();

        let stats = compute(&state);
        assert_eq!(stats.progress_percent, 0);
        assert_eq!(stats.confidence_percent, 0);
        assert_eq!(stats.correct, 0);
    }

    #[test]
    fn test_partial_assessment_progress() {
        let mut state = loaded_state(vec![
            statement("A", true),
            statement("B", false),
            statement("C", true),
            statement("D", false),
        ]);
        state.assess(0, true);
        state.assess(3, true);

        let stats = compute(&state);
        assert_eq!(stats.assessed, 2);
        assert_eq!(stats.progress_percent, 50);
        // 0 correct on index 3, 1 correct on index 0 → 1/2.
        assert_eq!(stats.correct, 1);
        assert_eq!(stats.confidence_percent, 50);
    }

    #[test]
    fn test_unassessed_false_statement_is_not_a_correct_guess() {
        // Classic off-by-default bug: index 1 is false and never assessed;
        // it must not score as a correct "false" guess.
        let mut state = loaded_state(vec![statement("A", true), statement("B", false)]);
        state.assess(0, true);

        assert_eq!(correct_count(&state), 1);
        assert_eq!(compute(&state).assessed, 1);
    }

    #[test]
    fn test_confidence_exposed_before_reveal() {
        let mut state = loaded_state(vec![statement("A", true), statement("B", false)]);
        state.assess(0, true);

        // Still Active: the raw number is available; masking is UI policy.
        assert!((confidence(&state) - 1.0).abs() < f64::EPSILON);
    }
}

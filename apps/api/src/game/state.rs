//! Game State Machine — a pure, in-memory reducer over one round of play.
//!
//! Phases: Idle → Loading → Active → Revealed → (reset) → Idle.
//!
//! Every mutation goes through a named transition; illegal transitions are
//! silently ignored so callers never have to guard a dispatch. Completions
//! are tagged with a monotonic sequence number, and only the latest request's
//! completion is ever applied — stale results are dropped on the floor.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::statements::generator::WitnessStatement;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Idle,
    Loading,
    Active,
    Revealed,
}

/// Opaque tag for one in-flight generation request. Returned by
/// `request_generation` and required by the completion transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSeq(u64);

/// State for a single game session. Single-owner: the session registry holds
/// it behind a lock and every caller mutates it only through the transitions
/// below.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    phase: GamePhase,
    statements: Vec<WitnessStatement>,
    /// Explicit finite map — "unassessed" stays distinct from "assessed
    /// false", so an unset guess is never scored as a real one.
    assessments: BTreeMap<usize, bool>,
    error: Option<String>,
    /// Monotonic across resets, so a completion from a pre-reset round can
    /// never match.
    seq: u64,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn statements(&self) -> &[WitnessStatement] {
        &self.statements
    }

    pub fn assessments(&self) -> &BTreeMap<usize, bool> {
        &self.assessments
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starts a new round. Valid from `Idle` or `Revealed`; returns the
    /// sequence tag the eventual completion must present. Returns `None`
    /// while a round is loading or being played — `Loading` doubles as the
    /// mutual-exclusion guard against a second in-flight generation.
    pub fn request_generation(&mut self) -> Option<GenerationSeq> {
        match self.phase {
            GamePhase::Idle | GamePhase::Revealed => {
                self.phase = GamePhase::Loading;
                self.statements.clear();
                self.assessments.clear();
                self.error = None;
                self.seq += 1;
                Some(GenerationSeq(self.seq))
            }
            GamePhase::Loading | GamePhase::Active => None,
        }
    }

    /// Installs a generation result. Ignored unless the state is `Loading`
    /// and `seq` tags the latest request.
    pub fn generation_succeeded(&mut self, seq: GenerationSeq, statements: Vec<WitnessStatement>) {
        if self.phase != GamePhase::Loading || seq.0 != self.seq {
            return;
        }
        self.statements = statements;
        self.phase = GamePhase::Active;
    }

    /// Records a generation failure and returns to `Idle`. Ignored unless
    /// the state is `Loading` and `seq` tags the latest request.
    pub fn generation_failed(&mut self, seq: GenerationSeq, message: String) {
        if self.phase != GamePhase::Loading || seq.0 != self.seq {
            return;
        }
        self.error = Some(message);
        self.phase = GamePhase::Idle;
    }

    /// Upserts the player's guess for one statement. Last write wins.
    /// No-op outside `Active` or for an out-of-range index.
    pub fn assess(&mut self, index: usize, guess: bool) {
        if self.phase != GamePhase::Active || index >= self.statements.len() {
            return;
        }
        self.assessments.insert(index, guess);
    }

    /// Locks guesses and exposes correctness. Valid from `Active` only;
    /// partial assessment is allowed.
    pub fn reveal(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }
        self.phase = GamePhase::Revealed;
    }

    /// Returns to the initial empty state. Valid from any phase, idempotent.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Idle;
        self.statements.clear();
        self.assessments.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(text: &str, is_true: bool) -> WitnessStatement {
        WitnessStatement {
            text: text.to_string(),
            is_true,
        }
    }

    fn three_statements() -> Vec<WitnessStatement> {
        vec![
            statement("A", true),
            statement("B", false),
            statement("C", true),
        ]
    }

    /// Drives a fresh state to `Active` with the given statements.
    fn active_state(statements: Vec<WitnessStatement>) -> GameState {
        let mut state = GameState::new();
        let seq = state.request_generation().unwrap();
        state.generation_succeeded(seq, statements);
        state
    }

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = GameState::new();
        assert_eq!(state.phase(), GamePhase::Idle);
        assert!(state.statements().is_empty());
        assert!(state.assessments().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_happy_path_idle_to_revealed() {
        let mut state = GameState::new();

        let seq = state.request_generation().unwrap();
        assert_eq!(state.phase(), GamePhase::Loading);

        state.generation_succeeded(seq, three_statements());
        assert_eq!(state.phase(), GamePhase::Active);
        assert_eq!(state.statements().len(), 3);

        state.assess(0, true);
        state.reveal();
        assert_eq!(state.phase(), GamePhase::Revealed);
    }

    #[test]
    fn test_request_generation_rejected_while_loading() {
        let mut state = GameState::new();
        let first = state.request_generation().unwrap();

        assert!(state.request_generation().is_none());
        assert_eq!(state.phase(), GamePhase::Loading);

        // The original request still completes normally.
        state.generation_succeeded(first, three_statements());
        assert_eq!(state.phase(), GamePhase::Active);
    }

    #[test]
    fn test_request_generation_rejected_while_active() {
        let mut state = active_state(three_statements());
        assert!(state.request_generation().is_none());
        assert_eq!(state.statements().len(), 3);
    }

    #[test]
    fn test_request_generation_allowed_from_revealed() {
        let mut state = active_state(three_statements());
        state.assess(0, true);
        state.reveal();

        assert!(state.request_generation().is_some());
        assert_eq!(state.phase(), GamePhase::Loading);
        assert!(state.statements().is_empty());
        assert!(state.assessments().is_empty());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut state = GameState::new();
        let stale = state.request_generation().unwrap();

        // The round is torn down and a new request issued before the first
        // completion lands.
        state.reset();
        let fresh = state.request_generation().unwrap();

        state.generation_succeeded(stale, three_statements());
        assert_eq!(state.phase(), GamePhase::Loading);
        assert!(state.statements().is_empty());

        state.generation_succeeded(fresh, vec![statement("D", false), statement("E", true)]);
        assert_eq!(state.phase(), GamePhase::Active);
        assert_eq!(state.statements().len(), 2);
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut state = GameState::new();
        let stale = state.request_generation().unwrap();
        state.reset();
        let fresh = state.request_generation().unwrap();

        state.generation_failed(stale, "boom".to_string());
        assert_eq!(state.phase(), GamePhase::Loading);
        assert!(state.error().is_none());

        state.generation_failed(fresh, "provider down".to_string());
        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.error(), Some("provider down"));
    }

    #[test]
    fn test_failure_returns_to_idle_and_next_attempt_clears_error() {
        let mut state = GameState::new();
        let seq = state.request_generation().unwrap();
        state.generation_failed(seq, "provider down".to_string());

        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.error(), Some("provider down"));

        state.request_generation().unwrap();
        assert!(state.error().is_none());
    }

    #[test]
    fn test_assess_last_write_wins() {
        let mut state = active_state(three_statements());

        state.assess(1, true);
        state.assess(1, false);

        assert_eq!(state.assessments().len(), 1);
        assert_eq!(state.assessments().get(&1), Some(&false));
    }

    #[test]
    fn test_assess_out_of_range_is_ignored() {
        let mut state = active_state(three_statements());
        state.assess(3, true);
        assert!(state.assessments().is_empty());
    }

    #[test]
    fn test_assess_outside_active_is_ignored() {
        let mut state = GameState::new();
        state.assess(0, true);
        assert!(state.assessments().is_empty());

        let mut revealed = active_state(three_statements());
        revealed.reveal();
        revealed.assess(0, true);
        assert!(revealed.assessments().is_empty());
    }

    #[test]
    fn test_reveal_outside_active_is_ignored() {
        let mut state = GameState::new();
        state.reveal();
        assert_eq!(state.phase(), GamePhase::Idle);

        state.request_generation().unwrap();
        state.reveal();
        assert_eq!(state.phase(), GamePhase::Loading);
    }

    #[test]
    fn test_reveal_does_not_require_full_assessment() {
        let mut state = active_state(three_statements());
        state.assess(0, true);
        state.reveal();
        assert_eq!(state.phase(), GamePhase::Revealed);
        assert_eq!(state.assessments().len(), 1);
    }

    #[test]
    fn test_reset_from_every_phase_is_idempotent() {
        let mut loading = GameState::new();
        loading.request_generation().unwrap();

        let mut active = active_state(three_statements());
        active.assess(0, true);

        let mut revealed = active_state(three_statements());
        revealed.reveal();

        for state in [&mut GameState::new(), &mut loading, &mut active, &mut revealed] {
            state.reset();
            state.reset();
            assert_eq!(state.phase(), GamePhase::Idle);
            assert!(state.statements().is_empty());
            assert!(state.assessments().is_empty());
            assert!(state.error().is_none());
        }
    }
}

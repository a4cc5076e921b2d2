//! Multi-stage actions.
//!
//! Some actions resolve through several player decisions. Such an action
//! stays in progress on the game state while the engine repeatedly asks it
//! for the sub-actions on offer, executes the one chosen, and reports it
//! back, until the action declares itself complete.
//!
//! ## Driving a sequence
//!
//! ```text
//! while !seq.execution_complete(&state) {
//!     let options = seq.compute_available_actions(&state);
//!     let choice = decide(seq.current_player(&state), options);
//!     choice.execute(&mut state);
//!     seq.register_action_taken(&mut state, &choice);
//! }
//! ```
//!
//! Stages are cooperative suspension points: an abandoned sequence simply
//! never completes.

use crate::core::PlayerId;

/// An action whose resolution spans several sub-decisions.
pub trait ExtendedSequence {
    /// Game state the sequence reads and mutates.
    type State;

    /// Sub-action type offered to the deciding player.
    type Action;

    /// Sub-actions available at the current stage.
    ///
    /// Returns an empty vec once nothing is left to decide.
    fn compute_available_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The player who decides the current stage.
    fn current_player(&self, state: &Self::State) -> PlayerId;

    /// Advance past a sub-action that has just been executed.
    fn register_action_taken(&mut self, state: &mut Self::State, action: &Self::Action);

    /// True once no further stages remain.
    fn execution_complete(&self, state: &Self::State) -> bool;
}

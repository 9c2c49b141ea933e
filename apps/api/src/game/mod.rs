// Game core: the phase state machine, derived statistics, and the in-memory
// session registry the HTTP handlers drive.

pub mod handlers;
pub mod sessions;
pub mod state;
pub mod stats;

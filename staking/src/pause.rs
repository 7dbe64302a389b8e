//! Pause flag gating stake and unstake.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakingMode {
    #[default]
    Active,
    Paused,
}

/// Persistent pause state. Starts `Active`.
///
/// Transitions are not guarded: pausing a paused pool is accepted and leaves
/// the mode unchanged.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PauseState {
    mode: StakingMode,
}

impl PauseState {
    pub fn mode(&self) -> StakingMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.mode == StakingMode::Paused
    }

    /// Returns the previous mode.
    pub fn pause(&mut self) -> StakingMode {
        std::mem::replace(&mut self.mode, StakingMode::Paused)
    }

    /// Returns the previous mode.
    pub fn resume(&mut self) -> StakingMode {
        std::mem::replace(&mut self.mode, StakingMode::Active)
    }
}

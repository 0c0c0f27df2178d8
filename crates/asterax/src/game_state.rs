//! Game state machine
//!
//! The game is only ever in one `GameState`. `GameStateMask` is a set of
//! states, used by HUD elements that are active only during some of them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Phase of the game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen
    #[default]
    MainMenu,
    /// Level intro
    PreLevel,
    /// Playing
    Level,
    /// Level complete
    PostLevel,
    /// Out of jumps; waiting for the scene reload
    GameOver,
}

impl GameState {
    /// Whether `self -> to` is in the allowed transition table
    pub fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::MainMenu, Self::PreLevel)
                | (Self::PreLevel, Self::Level)
                | (Self::Level, Self::PostLevel | Self::GameOver)
                | (Self::PostLevel, Self::PreLevel)
                | (Self::GameOver, Self::MainMenu)
        )
    }

    /// Checked transition
    pub fn transition_to(&mut self, to: Self) -> Result<(), GameError> {
        if !self.can_transition_to(to) {
            return Err(GameError::InvalidTransition { from: *self, to });
        }
        log::debug!("Game state {:?} -> {:?}", self, to);
        *self = to;
        Ok(())
    }

    /// The single-bit mask for this state
    pub fn mask(self) -> GameStateMask {
        match self {
            Self::MainMenu => GameStateMask::MAIN_MENU,
            Self::PreLevel => GameStateMask::PRE_LEVEL,
            Self::Level => GameStateMask::LEVEL,
            Self::PostLevel => GameStateMask::POST_LEVEL,
            Self::GameOver => GameStateMask::GAME_OVER,
        }
    }
}

bitflags! {
    /// Set of game states
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct GameStateMask: u32 {
        /// Title screen
        const MAIN_MENU = 1 << 0;
        /// Level intro
        const PRE_LEVEL = 1 << 1;
        /// Playing
        const LEVEL = 1 << 2;
        /// Level complete
        const POST_LEVEL = 1 << 3;
        /// Game over
        const GAME_OVER = 1 << 4;
        /// Every state
        const ALL = Self::MAIN_MENU.bits()
            | Self::PRE_LEVEL.bits()
            | Self::LEVEL.bits()
            | Self::POST_LEVEL.bits()
            | Self::GAME_OVER.bits();
    }
}

impl GameStateMask {
    /// Whether something gated by this mask is active in `state`
    pub fn is_active_in(self, state: GameState) -> bool {
        self.contains(state.mask())
    }
}

//! Match state and the messages the orchestrator exchanges with its shell
//!
//! Score, phase counter, what a bullet hits, what a timer does when it fires,
//! and the events handed out to the HUD and router.

use serde::{Deserialize, Serialize};

use super::enemies::{EnemyId, Variant};
use crate::platform::Route;

/// Leaderboard entry for the current run. Only the score is filled in during
/// a match; nickname and position come from the score screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    pub nickname: String,
    pub position: u32,
    pub score: u64,
}

/// Per-match state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchState {
    pub rank: Rank,
    /// Escalation counter, bumped by each timed phase after the first
    pub phase: u32,
    /// Set once `Game::start` has run
    pub started: bool,
    /// Set when the player dies
    pub over: bool,
}

impl MatchState {
    pub fn score(&self) -> u64 {
        self.rank.score
    }

    /// Back to a fresh match. `started` is left alone: the render loop and
    /// listeners outlive a reset.
    pub fn reset(&mut self) {
        self.rank.score = 0;
        self.phase = 0;
        self.over = false;
    }
}

/// What a bullet is allowed to hit, bound when it is fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRule {
    /// Player laser: first live enemy whose box contains the bullet
    Enemies,
    /// Enemy laser: the live player
    Player,
}

/// Deferred work produced by the wall-clock scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    SpawnWave { variant: Variant, quantity: u32 },
    /// Start the phase at this index of [`PHASES`]
    EnterPhase(usize),
    Navigate(Route),
}

/// Events for the shell (HUD, router, logs)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The player took a hit and survived or not; drives the damage flash
    PlayerHit { health: i32 },
    EnemyDestroyed {
        id: EnemyId,
        variant: Variant,
        score: u64,
    },
    /// The player died
    GameOver { score: u64 },
    PhaseAdvanced(u32),
    Navigate(Route),
}

/// One step of the spawn schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub variant: Variant,
    /// Enemies per wave
    pub quantity: u32,
    /// Wave period
    pub period_ms: f64,
    /// Delay after the previous phase started
    pub delay_ms: f64,
}

/// Timed escalation. Each phase keeps spawning once started; later phases add
/// to the earlier ones rather than replacing them.
pub const PHASES: [Phase; 3] = [
    Phase {
        variant: Variant::Blue,
        quantity: 5,
        period_ms: 5000.0,
        delay_ms: 0.0,
    },
    Phase {
        variant: Variant::Red,
        quantity: 2,
        period_ms: 2000.0,
        delay_ms: 20_000.0,
    },
    Phase {
        variant: Variant::Green,
        quantity: 3,
        period_ms: 4000.0,
        delay_ms: 20_000.0,
    },
];

//! Match orchestrator
//!
//! Owns the render surface, the three entity stores, the spawn schedule and
//! the match RNG. One `advance` call per display frame runs the fixed order
//! Player → Enemy → Bullet; `run_timers` applies the wall-clock schedule.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::assets::{PLAYER_LASER, PLAYER_SHIP};
use super::bullets::{BulletId, BulletRegistry, NewBullet};
use super::collision::bullet_hits;
use super::enemies::{EnemyId, EnemyRegistry, Variant};
use super::player::PlayerController;
use super::schedule::Scheduler;
use super::sprite::Sprite;
use super::state::{GameEvent, HitRule, MatchState, PHASES, TimerAction};
use super::surface::{RenderSurface, Stage, VisualKey};
use crate::consts::*;
use crate::platform::{KeyEvent, Route};
use crate::settings::Settings;

pub struct Game<S: RenderSurface = Stage> {
    pub stage: S,
    pub player: PlayerController,
    pub enemies: EnemyRegistry,
    pub bullets: BulletRegistry<HitRule>,
    pub state: MatchState,
    scheduler: Scheduler<TimerAction>,
    rng: Pcg32,
    seed: u64,
    events: Vec<GameEvent>,
    player_health: i32,
    player_speed: f32,
}

impl<S: RenderSurface> Game<S> {
    pub fn new(stage: S, seed: u64, settings: &Settings) -> Self {
        let mut player = PlayerController::new();
        player.set_lean_enabled(settings.effective_lean());

        Self {
            stage,
            player,
            enemies: EnemyRegistry::new(settings.exit_culling),
            bullets: BulletRegistry::new(),
            state: MatchState::default(),
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            events: Vec::new(),
            player_health: settings.player_health,
            player_speed: settings.player_speed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> u64 {
        self.state.rank.score
    }

    pub fn is_over(&self) -> bool {
        self.state.over
    }

    /// Timers still scheduled (spawn intervals, phase changes, navigation)
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Zero the score and phase, drop every enemy and bullet, and cancel the
    /// whole spawn schedule
    pub fn reset(&mut self) {
        self.state.reset();
        self.enemies.clear(&mut self.stage);
        self.bullets.clear(&mut self.stage);
        let cancelled = self.scheduler.cancel_all();
        log::info!("Match reset ({} timers cancelled)", cancelled);
    }

    /// Begin a match at wall-clock time `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        if self.state.started {
            log::warn!("Match restarted without teardown; resetting first");
            self.reset();
        }

        self.scheduler.sync_clock(now_ms);
        self.bullets.initialize();
        self.player
            .initialize(PLAYER_SHIP, self.player_health, self.player_speed);
        self.player.attach(&mut self.stage);
        self.enemies.spawn_wave(
            &mut self.stage,
            &mut self.rng,
            OPENING_WAVE_SIZE,
            Variant::Blue,
        );
        self.enter_phase(0);
        self.state.started = true;

        log::info!("Match started (seed {})", self.seed);
    }

    /// Cancel every timer, clear the stage and zero the match state. The match
    /// can be started again.
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.state.reset();
        self.enemies.clear(&mut self.stage);
        self.bullets.clear(&mut self.stage);
        self.stage.detach(VisualKey::player());
        self.state.started = false;
    }

    pub fn record_key_event(&mut self, event: &KeyEvent) -> bool {
        self.player.record_key_event(event)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Place one enemy centered on `pos`
    pub fn spawn_enemy(&mut self, pos: Vec2, variant: Variant) -> EnemyId {
        self.enemies
            .spawn_one(&mut self.stage, &mut self.rng, pos, variant)
    }

    /// Fire a player laser from `pos` (top-left of the laser)
    pub fn spawn_player_shot(&mut self, pos: Vec2) -> Option<BulletId> {
        self.bullets.spawn(
            &mut self.stage,
            NewBullet {
                sprite: Sprite::new(PLAYER_LASER, pos),
                speed: PLAYER_LASER_SPEED,
                sender: VisualKey::player(),
                rule: HitRule::Enemies,
            },
        )
    }

    /// Pump the wall-clock schedule up to `now_ms`
    pub fn run_timers(&mut self, now_ms: f64) {
        for action in self.scheduler.advance_to(now_ms) {
            self.apply_timer_action(action);
        }
    }

    fn apply_timer_action(&mut self, action: TimerAction) {
        match action {
            TimerAction::SpawnWave { variant, quantity } => {
                self.enemies
                    .spawn_wave(&mut self.stage, &mut self.rng, quantity, variant);
            }
            TimerAction::EnterPhase(index) => self.enter_phase(index),
            TimerAction::Navigate(route) => {
                log::info!("Navigating to {}", route.path());
                self.events.push(GameEvent::Navigate(route));
            }
        }
    }

    /// Start a phase's spawn interval and schedule the one after it
    fn enter_phase(&mut self, index: usize) {
        let Some(phase) = PHASES.get(index) else {
            return;
        };

        self.scheduler.set_interval(
            phase.period_ms,
            TimerAction::SpawnWave {
                variant: phase.variant,
                quantity: phase.quantity,
            },
        );

        if index > 0 {
            self.state.phase += 1;
            log::info!(
                "Phase {}: {} {} enemies every {} ms",
                self.state.phase,
                phase.quantity,
                phase.variant.as_str(),
                phase.period_ms
            );
            self.events.push(GameEvent::PhaseAdvanced(self.state.phase));
        }

        if let Some(next) = PHASES.get(index + 1) {
            self.scheduler
                .set_timeout(next.delay_ms, TimerAction::EnterPhase(index + 1));
        }
    }

    /// Advance one display frame (`dt` in frame units)
    pub fn advance(&mut self, dt: f32) {
        if !self.state.started {
            return;
        }

        // Player
        if let Some(shot) = self.player.advance(dt, &mut self.rng) {
            self.bullets
                .spawn(&mut self.stage, shot.with_rule(HitRule::Enemies));
        }

        // Enemies
        let target_present = self.player.is_alive();
        if let Some(shot) =
            self.enemies
                .advance(dt, &mut self.stage, &mut self.rng, target_present)
        {
            self.bullets
                .spawn(&mut self.stage, shot.with_rule(HitRule::Player));
        }

        // Bullets
        let Self {
            stage,
            player,
            enemies,
            bullets,
            state,
            scheduler,
            events,
            ..
        } = self;

        bullets.advance(dt, stage, |bullet, surface| {
            let point = bullet.sprite.pos;
            match bullet.rule {
                HitRule::Enemies => {
                    let Some((id, variant, score)) = enemies
                        .iter()
                        .find(|e| bullet_hits(point, &e.bounds()))
                        .map(|e| (e.id, e.variant, e.score))
                    else {
                        return false;
                    };

                    if enemies.apply_damage(id, 1, surface) {
                        state.rank.score += score;
                        events.push(GameEvent::EnemyDestroyed { id, variant, score });
                    }
                    true
                }
                HitRule::Player => {
                    let Some(bounds) = player.bounds() else {
                        return false;
                    };
                    if !bullet_hits(point, &bounds) {
                        return false;
                    }

                    let died = player.apply_damage(surface);
                    events.push(GameEvent::PlayerHit {
                        health: player.health(),
                    });
                    if died {
                        state.over = true;
                        log::info!("Player destroyed, final score {}", state.rank.score);
                        events.push(GameEvent::GameOver {
                            score: state.rank.score,
                        });
                        scheduler.set_timeout(
                            GAME_OVER_DELAY_MS,
                            TimerAction::Navigate(Route::SaveScore),
                        );
                    }
                    true
                }
            }
        });
    }
}

impl<S: RenderSurface> Drop for Game<S> {
    fn drop(&mut self) {
        if self.scheduler.pending() > 0 {
            log::debug!("Dropping match with {} live timers", self.scheduler.pending());
        }
        self.teardown();
    }
}

//! Encounter engine: the controller that owns every boss-fight entity.
//!
//! `EncounterEngine` owns the hecs ECS world, processes frontend commands,
//! runs all systems in a fixed order, and produces `EncounterSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyfall_boss_ai::escort::EscortSpawner;
use skyfall_boss_ai::{effects, fsm, TickContext};
use skyfall_core::commands::EncounterCommand;
use skyfall_core::components::*;
use skyfall_core::config::{ConfigError, EncounterConfig};
use skyfall_core::constants::*;
use skyfall_core::enums::{BossPhase, EncounterOutcome};
use skyfall_core::events::EncounterEvent;
use skyfall_core::outbox::Outbox;
use skyfall_core::state::EncounterSnapshot;
use skyfall_core::types::{Color, Position, SimTime};

use crate::encounter::ScoreState;
use crate::render::{self, Surface};
use crate::systems;
use crate::world_setup;

const VICTORY_COLOR: Color = Color::rgb(255, 215, 0);

/// The encounter engine. Owns the ECS world and all encounter state.
pub struct EncounterEngine {
    world: World,
    time: SimTime,
    outcome: EncounterOutcome,
    config: EncounterConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<EncounterCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<EncounterEvent>,

    boss: Option<Entity>,
    player: PlayerStatus,
    scheduled: Vec<ScheduledProjectile>,
    particles: Vec<Particle>,
    texts: Vec<FloatingText>,
    spawner: EscortSpawner,
    score: ScoreState,
}

impl EncounterEngine {
    /// Create an engine with the given config. The config is trusted; use
    /// [`EncounterEngine::try_new`] for configs from outside.
    pub fn new(config: EncounterConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            outcome: EncounterOutcome::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player: PlayerStatus::new(&config.bounds),
            config,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            boss: None,
            scheduled: Vec::new(),
            particles: Vec::new(),
            texts: Vec::new(),
            spawner: EscortSpawner::default(),
            score: ScoreState::default(),
        }
    }

    /// Validate the config, then create an engine.
    pub fn try_new(config: EncounterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create an engine from a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        EncounterConfig::from_json_str(json).map(Self::new)
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: EncounterCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = EncounterCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the encounter by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> EncounterSnapshot {
        self.process_commands();

        match self.outcome {
            EncounterOutcome::InProgress => {
                self.run_systems();
                self.time.advance();
            }
            // Explosions keep playing out after the fight is decided.
            EncounterOutcome::BossDefeated | EncounterOutcome::PlayerDefeated => {
                systems::effects::run(&mut self.particles, &mut self.texts);
                self.time.advance();
            }
            EncounterOutcome::Waiting | EncounterOutcome::Paused => {}
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.outcome,
            &self.player,
            &self.score,
            self.scheduled.len(),
            events,
        )
    }

    /// Draw the current frame onto `surface`.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, shake: Position, debug: bool) {
        render::draw_particles(&self.particles, surface, shake);
        if let Some(entity) = self.boss {
            if let Ok(boss) = self.world.get::<&Boss>(entity) {
                render::draw_boss(&boss, surface, shake, debug);
            }
        }
        let mut escorts = self.world.query::<&Escort>();
        render::draw_escorts(escorts.iter().map(|(_, e)| e), surface, shake);
        let mut projectiles = self.world.query::<&Projectile>();
        render::draw_projectiles(projectiles.iter().map(|(_, p)| p), surface, shake);
    }

    pub fn outcome(&self) -> EncounterOutcome {
        self.outcome
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &PlayerStatus {
        &self.player
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn floating_texts(&self) -> &[FloatingText] {
        &self.texts
    }

    /// Clone of the boss record, if one is in play.
    pub fn boss(&self) -> Option<Boss> {
        let entity = self.boss?;
        self.world.get::<&Boss>(entity).ok().map(|b| (*b).clone())
    }

    /// Mutate the boss record directly (for tests).
    #[cfg(test)]
    pub fn with_boss<T>(&mut self, f: impl FnOnce(&mut Boss) -> T) -> Option<T> {
        let entity = self.boss?;
        let mut boss = self.world.get::<&mut Boss>(entity).ok()?;
        Some(f(&mut *boss))
    }

    /// Put an escort straight into the world (for tests).
    #[cfg(test)]
    pub fn spawn_test_escort(&mut self, x: f64, y: f64) -> Entity {
        let mut escort = skyfall_boss_ai::escort::spawn(x, &self.config.escort, self.time.now_ms(), &mut self.rng);
        escort.position.y = y;
        world_setup::spawn_escort(&mut self.world, escort)
    }

    /// Put an enemy projectile straight into the world (for tests).
    #[cfg(test)]
    pub fn spawn_test_projectile(&mut self, projectile: Projectile) -> Entity {
        world_setup::spawn_enemy_projectile(&mut self.world, projectile)
    }

    /// Add a scheduled projectile (for tests).
    #[cfg(test)]
    pub fn schedule_test_projectile(&mut self, entry: ScheduledProjectile) {
        self.scheduled.push(entry);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: EncounterCommand) {
        match command {
            EncounterCommand::UpdatePlayer { x, y, input_speed } => {
                self.player.position = Position::new(x, y);
                self.player.input_speed = input_speed.abs();
            }
            EncounterCommand::FirePlayerBullet { x, y, damage } => {
                if self.outcome == EncounterOutcome::InProgress && damage > 0 {
                    world_setup::spawn_player_bullet(&mut self.world, x, y, damage);
                }
            }
            EncounterCommand::SetShieldPowerup { active } => {
                self.player.shield_powerup = active;
            }
            EncounterCommand::SpawnBoss => {
                if self.outcome == EncounterOutcome::Waiting {
                    let entity = world_setup::spawn_boss(
                        &mut self.world,
                        &self.config.bounds,
                        &self.config.boss,
                        self.time.now_ms(),
                        &mut self.rng,
                    );
                    self.boss = Some(entity);
                    self.outcome = EncounterOutcome::InProgress;
                    log::info!("boss encounter started (seed {})", self.config.seed);
                    self.events.push(EncounterEvent::BossSpawned);
                }
            }
            EncounterCommand::Pause => {
                if self.outcome == EncounterOutcome::InProgress {
                    self.outcome = EncounterOutcome::Paused;
                }
            }
            EncounterCommand::Resume => {
                if self.outcome == EncounterOutcome::Paused {
                    self.outcome = EncounterOutcome::InProgress;
                }
            }
            EncounterCommand::DevSetBossHealth { .. }
            | EncounterCommand::DevForceShieldPhase
            | EncounterCommand::DevForceFinalPhase => self.handle_dev_command(command),
        }
    }

    fn handle_dev_command(&mut self, command: EncounterCommand) {
        if !self.config.developer_mode {
            log::warn!("ignoring {:?}: developer mode is off", command);
            return;
        }
        let Some(entity) = self.boss else {
            return;
        };
        let Ok(mut boss) = self.world.get::<&mut Boss>(entity) else {
            return;
        };

        match command {
            EncounterCommand::DevSetBossHealth { hit_points } => {
                boss.hit_points = hit_points.clamp(1, boss.max_hit_points);
            }
            EncounterCommand::DevForceShieldPhase => {
                // The transition itself happens on the next boss tick.
                boss.hit_points = boss.hit_points.min(self.config.boss.shield_activate_threshold);
            }
            EncounterCommand::DevForceFinalPhase => {
                if !boss.phase.is_final() {
                    if boss.phase == BossPhase::Entrance {
                        boss.position.y = boss.target_y;
                        boss.displayed_health_pct = 1.0;
                    }
                    boss.hit_points = boss.hit_points.min(self.config.boss.shield_activate_threshold);
                    boss.temporary_invincible = false;
                    boss.shield.health = 0;
                    let mut out = Outbox::new();
                    fsm::enter_final_phase(&mut boss, &mut out);
                    self.events.append(&mut out.events);
                }
            }
            _ => {}
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.now_ms();
        let bounds = self.config.bounds;
        let mut out = Outbox::new();

        // 1. Promote scheduled projectiles
        systems::scheduled::promote(&mut self.world, &mut self.scheduled, now);
        // 2. Enemy projectile kinematics
        systems::projectiles::run(&mut self.world, self.player.position, &mut self.rng, &mut out);
        // 3. Player bullets
        systems::player_bullets::run(&mut self.world);
        // 4. Revenge missiles striking escorts
        let player = self.player.snapshot();
        systems::collision::check_escort_missile_collisions(
            &mut self.world,
            &player,
            &mut self.score,
            &mut self.rng,
            &mut out,
        );
        // 5. Boss AI
        let ctx = TickContext {
            now,
            bounds,
            tuning: &self.config.boss,
        };
        systems::boss_ai::run(&mut self.world, self.boss, &player, &ctx, &mut self.rng, &mut out);
        // 6. Escorts
        systems::escorts::run(&mut self.world, &player, &bounds, now, &mut self.rng, &mut out);
        // 7. Escort spawner
        systems::escort_spawner::run(
            &mut self.world,
            self.boss,
            &mut self.spawner,
            &self.config.escort,
            &bounds,
            now,
            &mut self.rng,
            &mut out,
        );
        // Shots fired this tick are live for the sweep.
        self.flush(&mut out);

        // 8. Collision sweep
        let boss_down = systems::collision::player_bullets_vs_boss(
            &mut self.world,
            self.boss,
            now,
            &mut self.rng,
            &mut out,
        );
        systems::collision::player_bullets_vs_escorts(
            &mut self.world,
            &player,
            now,
            &mut self.score,
            &mut self.rng,
            &mut out,
        );
        systems::collision::enemy_projectiles_vs_player(
            &mut self.world,
            &mut self.player,
            now,
            &mut self.rng,
            &mut out,
        );
        systems::collision::escorts_vs_player(
            &mut self.world,
            &mut self.player,
            now,
            &mut self.score,
            &mut self.rng,
            &mut out,
        );
        systems::collision::check_laser_collision(&self.world, self.boss, &mut self.player, now, &mut out);
        if systems::collision::check_shield_collision(
            &mut self.world,
            self.boss,
            &self.config.boss,
            &player,
            now,
            &mut self.score,
            &mut self.rng,
            &mut out,
        ) {
            self.spawner.enabled = false;
            self.spawner.next_spawn = None;
        }
        self.flush(&mut out);

        // 9. Particles and floating texts
        systems::effects::run(&mut self.particles, &mut self.texts);
        // 10. Cleanup (off-field, spent, defeated)
        systems::cleanup::run(&mut self.world, &bounds, &mut self.despawn_buffer);

        if boss_down {
            self.defeat_boss();
        } else if self.player.health <= 0 {
            log::info!("player defeated");
            self.end_encounter(EncounterOutcome::PlayerDefeated);
        }
    }

    /// Hand everything the subsystems produced to the world and side channels.
    fn flush(&mut self, out: &mut Outbox) {
        for projectile in out.bullets.drain(..).chain(out.missiles.drain(..)) {
            world_setup::spawn_enemy_projectile(&mut self.world, projectile);
        }
        self.scheduled.append(&mut out.scheduled);
        self.particles.append(&mut out.particles);
        self.texts.append(&mut out.texts);
        self.events.append(&mut out.events);
    }

    fn defeat_boss(&mut self) {
        if let Some(boss) = self.boss() {
            self.particles
                .extend(effects::large_explosion(&mut self.rng, boss.position));
            self.texts.push(effects::floating_text(
                format!("+{}", SCORE_BOSS),
                boss.position,
                VICTORY_COLOR,
                36.0,
            ));
        }
        self.score.award(SCORE_BOSS, XP_BOSS);
        self.events.push(EncounterEvent::BossDefeated);
        log::info!("boss defeated at tick {}", self.time.tick);
        self.end_encounter(EncounterOutcome::BossDefeated);
    }

    /// Stop all boss, escort and attack scheduling for good.
    fn end_encounter(&mut self, outcome: EncounterOutcome) {
        self.outcome = outcome;
        self.scheduled.clear();
        self.spawner = EscortSpawner::default();
        world_setup::clear_hostiles(&mut self.world, &mut self.despawn_buffer);
        self.boss = None;
    }
}

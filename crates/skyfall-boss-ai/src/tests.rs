#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use skyfall_core::components::*;
    use skyfall_core::config::{BossTuning, EscortTuning};
    use skyfall_core::constants::*;
    use skyfall_core::enums::{BossPhase, KillCause, LaserStatus, Turret};
    use skyfall_core::events::EncounterEvent;
    use skyfall_core::outbox::Outbox;
    use skyfall_core::timer::Timer;
    use skyfall_core::types::{Bounds, Position};

    use crate::damage::{self, BossHit, BulletContact};
    use crate::escort::{self, EscortSpawner, SpawnOutcome};
    use crate::fsm::{self, Transition};
    use crate::movement::MovementBranch;
    use crate::{attacks, factory, kinematics, shield, update, TickContext};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn roaming_boss(tuning: &BossTuning) -> Boss {
        let mut boss = Boss::spawn(&Bounds::default(), tuning, 0.0, 5);
        boss.phase = BossPhase::Roaming;
        boss.position.y = BOSS_TARGET_Y;
        boss.displayed_health_pct = 1.0;
        boss
    }

    fn shielded_boss(tuning: &BossTuning) -> Boss {
        let mut boss = roaming_boss(tuning);
        boss.hit_points = tuning.shield_activate_threshold;
        boss.phase = BossPhase::Shielded;
        boss
    }

    fn player_at(x: f64, y: f64) -> PlayerSnapshot {
        PlayerSnapshot {
            position: Position::new(x, y),
            input_speed: 0.0,
        }
    }

    fn ctx(tuning: &BossTuning, now: f64) -> TickContext<'_> {
        TickContext {
            now,
            bounds: Bounds::default(),
            tuning,
        }
    }

    // --- Phase machine ---

    #[test]
    fn test_entrance_completes_at_target_height() {
        let tuning = BossTuning::default();
        let mut boss = Boss::spawn(&Bounds::default(), &tuning, 0.0, 5);
        let player = player_at(640.0, 640.0);
        let mut rng = rng();
        let mut out = Outbox::new();

        let mut now = 0.0;
        let mut ticks = 0;
        while boss.phase == BossPhase::Entrance && ticks < 400 {
            now += DT_MS;
            let branch = update(&mut boss, &player, &ctx(&tuning, now), &mut rng, &mut out);
            assert_eq!(branch, MovementBranch::Entrance);
            ticks += 1;
        }

        assert_eq!(boss.phase, BossPhase::Roaming);
        assert!(boss.position.y >= BOSS_TARGET_Y);
        assert_relative_eq!(boss.displayed_health_pct, 1.0);
        assert!(!boss.is_invincible());
    }

    #[test]
    fn test_no_attacks_during_entrance() {
        let tuning = BossTuning::default();
        let mut boss = Boss::spawn(&Bounds::default(), &tuning, 0.0, 5);
        let player = player_at(640.0, 640.0);
        let mut rng = rng();
        let mut out = Outbox::new();

        update(&mut boss, &player, &ctx(&tuning, DT_MS), &mut rng, &mut out);
        assert!(out.bullets.is_empty());
        assert!(out.missiles.is_empty());
        assert!(boss.is_invincible());
    }

    #[test]
    fn test_shield_activation_suppresses_barrage_same_tick() {
        let tuning = BossTuning::default();
        let player = player_at(640.0, 640.0);

        let armed_barrage = |boss: &mut Boss| {
            boss.attacks.barrage = BarrageState::Bursting {
                fired: 0,
                burst: 5,
                doubled: false,
                next_shot: Timer::ready(),
            };
        };

        // One point above the threshold: the volley fires.
        let mut boss = roaming_boss(&tuning);
        boss.hit_points = tuning.shield_activate_threshold + 1;
        armed_barrage(&mut boss);
        let mut out = Outbox::new();
        update(&mut boss, &player, &ctx(&tuning, 1000.0), &mut rng(), &mut out);
        assert_eq!(boss.phase, BossPhase::Roaming);
        assert!(!out.bullets.is_empty());

        // At the threshold: the transition wins and nothing is fired.
        let mut boss = roaming_boss(&tuning);
        boss.hit_points = tuning.shield_activate_threshold;
        armed_barrage(&mut boss);
        let mut out = Outbox::new();
        let branch = update(&mut boss, &player, &ctx(&tuning, 1000.0), &mut rng(), &mut out);
        assert_eq!(boss.phase, BossPhase::ApproachingShield);
        assert_eq!(branch, MovementBranch::Approach);
        assert!(out.bullets.is_empty());
        assert!(out.missiles.is_empty());
        assert!(out.scheduled.is_empty());
        assert!(out.events.contains(&EncounterEvent::ShieldPhaseActivated {
            hit_points: tuning.shield_activate_threshold
        }));
    }

    #[test]
    fn test_shield_phase_latches_once() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        boss.hit_points = 10;
        let mut out = Outbox::new();

        assert_eq!(
            fsm::evaluate_transitions(&mut boss, &tuning, 0.0, &mut out),
            Some(Transition::ShieldActivated)
        );
        assert_eq!(fsm::evaluate_transitions(&mut boss, &tuning, 0.0, &mut out), None);
        assert_eq!(out.events.len(), 1);
        assert_relative_eq!(boss.motion.target_amplitude, 0.0);
    }

    #[test]
    fn test_temporary_invincibility_before_shield() {
        let tuning = BossTuning {
            shield_activate_threshold: 10,
            ..BossTuning::default()
        };
        let mut boss = roaming_boss(&tuning);
        boss.hit_points = tuning.temp_invincible_threshold;
        let mut out = Outbox::new();

        assert_eq!(
            fsm::evaluate_transitions(&mut boss, &tuning, 0.0, &mut out),
            Some(Transition::TemporaryInvincible)
        );
        assert!(boss.is_invincible());
        assert_eq!(
            damage::bullet_contact(&boss, &boss.position, 4.0, 12.0),
            BulletContact::Miss
        );
    }

    #[test]
    fn test_approach_arrival_raises_shield() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        boss.hit_points = tuning.shield_activate_threshold;
        let mut out = Outbox::new();
        fsm::activate_shield_phase(&mut boss, &mut out);

        boss.position = Position::new(840.0, 100.0);
        boss.motion.amplitude = 200.0;
        boss.motion.offset = std::f64::consts::FRAC_PI_2;

        let player = player_at(640.0, 640.0);
        let mut rng = rng();
        let mut now = 0.0;
        let mut ticks = 0;
        while boss.phase == BossPhase::ApproachingShield && ticks < 600 {
            now += DT_MS;
            let branch = update(&mut boss, &player, &ctx(&tuning, now), &mut rng, &mut out);
            assert_eq!(branch, MovementBranch::Approach);
            ticks += 1;
        }

        assert_eq!(boss.phase, BossPhase::Shielded);
        assert_relative_eq!(boss.position.x, Bounds::default().center_x());
        assert_relative_eq!(boss.position.y, BOSS_TARGET_Y);
        assert!(boss.attacks.shield_rocket.is_some());
        assert_eq!(boss.attacks.laser, LaserState::Idle);
        assert!(out.events.contains(&EncounterEvent::ShieldRaised));
        // Nothing but exhaust is produced while approaching.
        assert!(out.bullets.is_empty());
        assert!(out.missiles.is_empty());
    }

    #[test]
    fn test_shielded_boss_holds_position() {
        let tuning = BossTuning::default();
        let mut boss = shielded_boss(&tuning);
        boss.attacks.shield_rocket = Some(Timer::armed(0.0, 10_000.0));
        let before = boss.position;
        let player = player_at(100.0, 640.0);
        let mut rng = rng();
        let mut out = Outbox::new();

        for tick in 1..=120 {
            let branch = update(
                &mut boss,
                &player,
                &ctx(&tuning, tick as f64 * DT_MS),
                &mut rng,
                &mut out,
            );
            assert_eq!(branch, MovementBranch::Holding);
        }
        assert_eq!(boss.position, before);
        assert!(out.bullets.is_empty());
    }

    #[test]
    fn test_break_completes_into_final_phase() {
        let tuning = BossTuning::default();
        let mut boss = shielded_boss(&tuning);
        let mut out = Outbox::new();
        shield::begin_break(&mut boss, &tuning, 1000.0, &mut out);
        assert_eq!(boss.phase, BossPhase::ShieldBreaking);
        assert!(!boss.is_invincible());

        assert_eq!(
            fsm::evaluate_transitions(&mut boss, &tuning, 1000.0 + tuning.shield_break_ms - 1.0, &mut out),
            None
        );
        assert_eq!(
            fsm::evaluate_transitions(&mut boss, &tuning, 1000.0 + tuning.shield_break_ms, &mut out),
            Some(Transition::FinalPhase)
        );
        assert_eq!(boss.phase, BossPhase::PostShield);
        assert!(boss.shield.cracks.is_empty());
        assert_relative_eq!(
            boss.motion.speed,
            BASE_WAVE_SPEED * POST_SHIELD_WAVE_SPEED_FACTOR
        );
        assert_eq!(
            out.events,
            vec![EncounterEvent::ShieldBroken, EncounterEvent::FinalPhaseStarted]
        );
    }

    #[test]
    fn test_engine_exhaust_on_cadence() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        let player = player_at(640.0, 640.0);
        let mut rng = rng();

        let mut out = Outbox::new();
        update(&mut boss, &player, &ctx(&tuning, 100.0), &mut rng, &mut out);
        assert!(!out.particles.is_empty());

        let mut out = Outbox::new();
        update(&mut boss, &player, &ctx(&tuning, 110.0), &mut rng, &mut out);
        assert!(out.particles.is_empty());
    }

    // --- Shield ---

    #[test]
    fn test_shield_hits_crack_then_break_once() {
        let tuning = BossTuning::default();
        let mut boss = shielded_boss(&tuning);
        let mut rng = rng();
        assert_eq!(boss.shield.crack_level, 0);

        let first = shield::apply_hit(&mut boss, &mut rng);
        assert_eq!(first.remaining, 1);
        assert!(!first.broken);
        assert_eq!(boss.shield.crack_level, 1);
        assert!(!boss.shield.cracks.is_empty());

        let second = shield::apply_hit(&mut boss, &mut rng);
        assert_eq!(second.remaining, 0);
        assert!(second.broken);
        assert_eq!(boss.shield.crack_level, 1);

        let third = shield::apply_hit(&mut boss, &mut rng);
        assert_eq!(third.remaining, 0);
        assert!(!third.broken);
        assert_eq!(boss.shield.health, 0);
    }

    #[test]
    fn test_shield_ignores_hits_when_not_raised() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        let hit = shield::apply_hit(&mut boss, &mut rng());
        assert!(!hit.broken);
        assert_eq!(boss.shield.health, tuning.shield_health);
    }

    #[test]
    fn test_crack_generation_is_seeded() {
        let mut a = ShieldState::new(2);
        let mut b = ShieldState::new(2);
        a.crack_level = 1;
        b.crack_level = 1;
        shield::generate_cracks(&mut a, BOSS_WIDTH, &mut rng());
        shield::generate_cracks(&mut b, BOSS_WIDTH, &mut rng());
        assert!(!a.cracks.is_empty());
        assert_eq!(a.cracks, b.cracks);
    }

    #[test]
    fn test_shield_rockets_alternate_turrets() {
        let tuning = BossTuning::default();
        let mut boss = shielded_boss(&tuning);
        boss.attacks.shield_rocket = Some(Timer::ready());
        let mut rng = rng();
        let mut out = Outbox::new();

        attacks::run_shield_attacks(&mut boss, &tuning, 500.0, &mut rng, &mut out);
        assert_eq!(out.missiles.len(), 1);
        assert_eq!(out.missiles[0].kind, ProjectileKind::ShieldRocket);
        assert_eq!(boss.attacks.shield_rocket_turret, Turret::Right);

        let rearmed = boss.attacks.shield_rocket.map(|t| t.duration).unwrap_or(0.0);
        assert!(rearmed >= SHIELD_ROCKET_INTERVAL_MIN_MS);
        assert!(rearmed <= SHIELD_ROCKET_INTERVAL_MAX_MS);
    }

    // --- Attacks ---

    #[test]
    fn test_laser_not_armed_when_player_slower() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        boss.hit_points = tuning.laser_health_threshold;
        boss.motion.speed = 0.1;
        let player = PlayerSnapshot {
            position: Position::new(640.0, 640.0),
            input_speed: 0.05,
        };
        let mut out = Outbox::new();

        attacks::run(&mut boss, &player, &tuning, 1000.0, &mut rng(), &mut out);
        assert_eq!(boss.attacks.laser.status(), LaserStatus::Cooldown);
        assert!(!out.events.contains(&EncounterEvent::LaserCharging));
    }

    #[test]
    fn test_laser_cycle() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        boss.hit_points = tuning.laser_health_threshold;
        boss.motion.speed = 0.001;
        let player = PlayerSnapshot {
            position: Position::new(640.0, 640.0),
            input_speed: 2.0,
        };
        let mut rng = rng();
        let mut out = Outbox::new();

        attacks::run(&mut boss, &player, &tuning, 0.0, &mut rng, &mut out);
        assert_eq!(boss.attacks.laser.status(), LaserStatus::Charging);

        attacks::run(&mut boss, &player, &tuning, LASER_WARNING_MS, &mut rng, &mut out);
        assert!(boss.attacks.laser.is_firing());
        assert!(damage::laser_contact(&boss, &Position::new(640.0, 640.0), 50.0, 50.0));
        assert!(!damage::laser_contact(&boss, &Position::new(200.0, 640.0), 50.0, 50.0));

        attacks::run(
            &mut boss,
            &player,
            &tuning,
            LASER_WARNING_MS + LASER_FIRING_MS,
            &mut rng,
            &mut out,
        );
        assert_eq!(boss.attacks.laser.status(), LaserStatus::Cooldown);
        assert!(out.events.contains(&EncounterEvent::LaserFiring));
    }

    #[test]
    fn test_laser_idle_above_threshold() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        let player = PlayerSnapshot {
            position: Position::new(640.0, 640.0),
            input_speed: 5.0,
        };
        attacks::run(&mut boss, &player, &tuning, 0.0, &mut rng(), &mut Outbox::new());
        assert_eq!(boss.attacks.laser, LaserState::Idle);
    }

    #[test]
    fn test_missile_pair_on_interval() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        let player = player_at(640.0, 640.0);
        attacks::aim_turrets(&mut boss, &player);
        let mut rng = rng();

        let mut out = Outbox::new();
        attacks::run(&mut boss, &player, &tuning, 100.0, &mut rng, &mut out);
        assert_eq!(out.missiles.len(), 2);

        let mut out = Outbox::new();
        attacks::run(&mut boss, &player, &tuning, 100.0 + tuning.missile_interval_ms - 1.0, &mut rng, &mut out);
        assert!(out.missiles.is_empty());

        let mut out = Outbox::new();
        attacks::run(&mut boss, &player, &tuning, 100.0 + tuning.missile_interval_ms, &mut rng, &mut out);
        assert_eq!(out.missiles.len(), 2);
    }

    #[test]
    fn test_final_series_arms_delayed_missile() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        boss.phase = BossPhase::PostShield;
        boss.attacks.barrage = BarrageState::Bursting {
            fired: 0,
            burst: 1,
            doubled: false,
            next_shot: Timer::ready(),
        };
        let player = player_at(640.0, 640.0);
        let mut rng = rng();

        let mut out = Outbox::new();
        attacks::run(&mut boss, &player, &tuning, 10_000.0, &mut rng, &mut out);
        assert!(!out.bullets.is_empty());
        let armed = boss.attacks.final_missile.map(|t| t.deadline());
        assert_eq!(armed, Some(10_000.0 + tuning.final_missile_delay_ms));

        let mut out = Outbox::new();
        let fire_at = 10_000.0 + tuning.final_missile_delay_ms;
        attacks::run(&mut boss, &player, &tuning, fire_at, &mut rng, &mut out);
        assert_eq!(out.missiles.len(), 1);
        assert_eq!(out.missiles[0].kind, ProjectileKind::BasicMissile);
        assert_eq!(boss.attacks.final_missile_turret, Turret::Right);
        assert!(boss.attacks.final_missile.is_none());
    }

    /// Tick a burst of `burst` volleys through `attacks::run` and return
    /// `(immediate, scheduled)` counts per volley.
    fn run_series(doubled: bool, burst: u32) -> Vec<(usize, usize)> {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        boss.attacks.missile = Timer::armed(0.0, 1.0e9);
        boss.attacks.barrage = BarrageState::Bursting {
            fired: 0,
            burst,
            doubled,
            next_shot: Timer::ready(),
        };
        let player = player_at(640.0, 640.0);
        let mut rng = rng();

        let mut volleys = Vec::new();
        let mut now = 1000.0;
        for _ in 0..600 {
            let mut out = Outbox::new();
            attacks::run(&mut boss, &player, &tuning, now, &mut rng, &mut out);
            assert!(out.missiles.is_empty());
            if !out.bullets.is_empty() {
                for copy in &out.scheduled {
                    assert_relative_eq!(copy.fire_at, now + BARRAGE_DOUBLE_DELAY_MS);
                }
                volleys.push((out.bullets.len(), out.scheduled.len()));
            } else {
                assert!(out.scheduled.is_empty(), "copies without a volley at {now}");
            }
            if matches!(boss.attacks.barrage, BarrageState::Resting { .. }) {
                break;
            }
            now += DT_MS;
        }
        assert!(matches!(boss.attacks.barrage, BarrageState::Resting { .. }));
        volleys
    }

    #[test]
    fn test_doubled_series_schedules_every_volley() {
        let volleys = run_series(true, 5);
        assert_eq!(volleys.len(), 5);
        for (immediate, scheduled) in volleys {
            assert!((BARRAGE_BULLETS_MIN as usize..=BARRAGE_BULLETS_MAX as usize).contains(&immediate));
            assert_eq!(scheduled, immediate);
        }
    }

    #[test]
    fn test_single_series_schedules_nothing() {
        let volleys = run_series(false, 4);
        assert_eq!(volleys.len(), 4);
        assert!(volleys.iter().all(|&(_, scheduled)| scheduled == 0));
    }

    // --- Factory ---

    #[test]
    fn test_doubled_volley_schedules_copies() {
        let tuning = BossTuning::default();
        let boss = roaming_boss(&tuning);
        let mut rng = rng();

        let volley = factory::barrage_volley(&boss, Position::new(640.0, 640.0), 2000.0, true, &mut rng);
        let n = volley.immediate.len();
        assert!((BARRAGE_BULLETS_MIN as usize..=BARRAGE_BULLETS_MAX as usize).contains(&n));
        assert_eq!(volley.scheduled.len(), n);
        for (bullet, copy) in volley.immediate.iter().zip(&volley.scheduled) {
            assert_eq!(*bullet, copy.projectile);
            assert_relative_eq!(copy.fire_at, 2000.0 + BARRAGE_DOUBLE_DELAY_MS);
        }

        let single = factory::barrage_volley(&boss, Position::new(640.0, 640.0), 2000.0, false, &mut rng);
        assert!(single.scheduled.is_empty());
    }

    #[test]
    fn test_volley_fans_downward() {
        let tuning = BossTuning::default();
        let boss = roaming_boss(&tuning);
        let volley = factory::barrage_volley(&boss, Position::new(640.0, 640.0), 0.0, false, &mut rng());
        let mean_vy: f64 = volley.immediate.iter().map(|b| b.velocity.y).sum::<f64>()
            / volley.immediate.len() as f64;
        assert!(mean_vy > 0.0, "volley should fan below the boss");
        for bullet in &volley.immediate {
            assert_relative_eq!(bullet.velocity.speed(), BULLET_SPEED, epsilon = 1e-9);
            assert_eq!(bullet.position, boss.nose());
        }
    }

    // --- Kinematics ---

    #[test]
    fn test_boss_missile_homing_decays_to_floor() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        let target = Position::new(200.0, 600.0);
        attacks::aim_turrets(&mut boss, &player_at(target.x, target.y));
        let [mut missile, _] = factory::boss_missile_pair(&boss);

        let strength = |p: &Projectile| match p.kind {
            ProjectileKind::BossMissile(h) => h.strength,
            _ => f64::NAN,
        };
        let mut previous = strength(&missile);
        for _ in 0..1000 {
            kinematics::advance(&mut missile, target);
            let current = strength(&missile);
            assert!(current <= previous);
            assert!(current >= MISSILE_HOMING_MIN);
            assert_relative_eq!(missile.velocity.speed(), MISSILE_SPEED, epsilon = 1e-9);
            previous = current;
        }
        assert_relative_eq!(previous, MISSILE_HOMING_MIN);
    }

    #[test]
    fn test_revenge_missile_accelerates_to_cap() {
        let target = Position::new(640.0, 700.0);
        let mut missile = factory::revenge_missile(Position::new(100.0, 50.0), target);

        let speed = |p: &Projectile| match p.kind {
            ProjectileKind::RevengeMissile(p) => p.speed,
            _ => f64::NAN,
        };
        let mut previous = speed(&missile);
        for _ in 0..500 {
            kinematics::advance(&mut missile, target);
            let current = speed(&missile);
            assert!(current >= previous);
            assert!(current <= REVENGE_MISSILE_MAX_SPEED);
            previous = current;
        }
        assert_relative_eq!(previous, REVENGE_MISSILE_MAX_SPEED);
    }

    #[test]
    fn test_straight_projectile_moves_linearly() {
        let mut bullet = factory::escort_shot(
            Position::new(100.0, 100.0),
            factory::escort_aim(Position::new(100.0, 100.0), Position::new(100.0, 400.0)),
        );
        kinematics::advance(&mut bullet, Position::new(0.0, 0.0));
        assert_relative_eq!(bullet.position.x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(bullet.position.y, 100.0 + BULLET_SPEED, epsilon = 1e-9);
    }

    #[test]
    fn test_normalize_angle() {
        use std::f64::consts::PI;
        assert_relative_eq!(kinematics::normalize_angle(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(kinematics::normalize_angle(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(kinematics::normalize_angle(0.25), 0.25, epsilon = 1e-12);
    }

    // --- Damage ---

    #[test]
    fn test_bullet_contact_by_phase() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        let on_hull = boss.position;
        assert_eq!(damage::bullet_contact(&boss, &on_hull, 4.0, 12.0), BulletContact::Hull);
        assert_eq!(
            damage::bullet_contact(&boss, &Position::new(10.0, 600.0), 4.0, 12.0),
            BulletContact::Miss
        );

        boss.phase = BossPhase::Entrance;
        assert_eq!(damage::bullet_contact(&boss, &on_hull, 4.0, 12.0), BulletContact::Miss);

        boss.phase = BossPhase::Shielded;
        let inside_shield = Position::new(boss.position.x + boss.shield_radius() - 5.0, boss.position.y);
        assert_eq!(damage::bullet_contact(&boss, &inside_shield, 4.0, 12.0), BulletContact::Shield);
    }

    #[test]
    fn test_pre_final_damage_defeats_at_zero() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        boss.hit_points = 5;
        assert_eq!(damage::apply_damage(&mut boss, 4, 0.0), BossHit::Damaged);
        assert_eq!(damage::apply_damage(&mut boss, 1, 0.0), BossHit::Defeated);
        assert!(boss.hit_flash.is_some());
    }

    #[test]
    fn test_final_phase_uses_true_health() {
        let tuning = BossTuning::default();
        let mut boss = roaming_boss(&tuning);
        boss.phase = BossPhase::PostShield;
        boss.hit_points = 30;

        assert_eq!(damage::apply_damage(&mut boss, 1, 0.0), BossHit::Damaged);
        assert_eq!(boss.actual_health, Some(58));
        assert_eq!(boss.hit_points, 29);

        let mut hits = 1;
        let mut result = BossHit::Damaged;
        while result == BossHit::Damaged && hits < 100 {
            result = damage::apply_damage(&mut boss, 1, 0.0);
            hits += 1;
        }
        assert_eq!(result, BossHit::Defeated);
        assert_eq!(hits, 30);
        assert_eq!(boss.hit_points, 0);
    }

    // --- Escorts ---

    #[test]
    fn test_spawner_respects_cap() {
        let tuning = BossTuning::default();
        let escort_tuning = EscortTuning::default();
        let boss = shielded_boss(&tuning);
        let mut spawner = EscortSpawner {
            enabled: true,
            next_spawn: None,
        };

        let outcome = spawner.tick(
            escort_tuning.limit,
            0,
            &boss,
            &Bounds::default(),
            &escort_tuning,
            5000.0,
            &mut rng(),
        );
        assert!(matches!(outcome, SpawnOutcome::AtCapacity));
        assert_eq!(
            spawner.next_spawn.map(|t| t.deadline()),
            Some(5000.0 + ESCORT_CAP_RETRY_MS)
        );

        let outcome = spawner.tick(0, 0, &boss, &Bounds::default(), &escort_tuning, 5500.0, &mut rng());
        assert!(matches!(outcome, SpawnOutcome::NotDue));
    }

    #[test]
    fn test_spawner_disabled_without_shield() {
        let tuning = BossTuning::default();
        let boss = roaming_boss(&tuning);
        let mut spawner = EscortSpawner::default();
        let outcome = spawner.tick(0, 0, &boss, &Bounds::default(), &EscortTuning::default(), 0.0, &mut rng());
        assert!(matches!(outcome, SpawnOutcome::Disabled));
        assert!(spawner.next_spawn.is_none());
    }

    #[test]
    fn test_spawned_escort_clears_shield() {
        let tuning = BossTuning::default();
        let escort_tuning = EscortTuning::default();
        let boss = shielded_boss(&tuning);
        let mut spawner = EscortSpawner {
            enabled: true,
            next_spawn: None,
        };
        let mut rng = rng();

        for attempt in 0..20 {
            spawner.next_spawn = None;
            let now = attempt as f64 * 1000.0;
            if let SpawnOutcome::Spawned(escort) =
                spawner.tick(0, 0, &boss, &Bounds::default(), &escort_tuning, now, &mut rng)
            {
                assert!((escort.position.x - boss.position.x).abs() >= boss.shield_radius() + ESCORT_WIDTH);
                assert_relative_eq!(escort.position.y, -ESCORT_HEIGHT);
                assert_eq!(escort.hit_points, escort_tuning.health);
                assert!(escort.active);
            }
            let interval = spawner.next_spawn.map(|t| t.duration).unwrap_or(0.0);
            assert!(interval >= escort_tuning.spawn_interval_ms.min);
            assert!(interval <= escort_tuning.spawn_interval_ms.max);
        }
    }

    #[test]
    fn test_spawn_interval_doubles_under_missile_load() {
        let tuning = BossTuning::default();
        let escort_tuning = EscortTuning::default();
        let boss = shielded_boss(&tuning);
        let mut spawner = EscortSpawner {
            enabled: true,
            next_spawn: None,
        };

        spawner.tick(
            0,
            escort_tuning.revenge_load_threshold,
            &boss,
            &Bounds::default(),
            &escort_tuning,
            0.0,
            &mut rng(),
        );
        let interval = spawner.next_spawn.map(|t| t.duration).unwrap_or(0.0);
        assert!(interval >= escort_tuning.spawn_interval_ms.min * 2.0);
        assert!(interval <= escort_tuning.spawn_interval_ms.max * 2.0);
    }

    #[test]
    fn test_escort_burst_cycle() {
        let escort_tuning = EscortTuning::default();
        let mut rng = rng();
        let mut escort = escort::spawn(400.0, &escort_tuning, 0.0, &mut rng);
        escort.attack = EscortAttack::Cooldown(Timer::ready());
        let player = player_at(400.0, 640.0);
        let bounds = Bounds::default();
        let mut out = Outbox::new();

        escort::update(&mut escort, &player, &bounds, 0.0, &mut rng, &mut out);
        assert!(matches!(escort.attack, EscortAttack::Warning(_)));
        assert!(out.bullets.is_empty());

        // Aim is fixed when the burst starts, so later player moves are ignored.
        let mut now = ESCORT_WARNING_MS;
        escort::update(&mut escort, &player, &bounds, now, &mut rng, &mut out);
        let moved = player_at(100.0, 640.0);
        for _ in 0..ESCORT_BURST_SHOTS {
            escort::update(&mut escort, &moved, &bounds, now, &mut rng, &mut out);
            now += ESCORT_BURST_SPACING_MS;
        }

        assert_eq!(out.bullets.len(), ESCORT_BURST_SHOTS as usize);
        let heading = out.bullets[0].velocity.heading();
        for bullet in &out.bullets {
            assert_relative_eq!(bullet.velocity.heading(), heading);
            assert_eq!(bullet.kind, ProjectileKind::Turret);
        }
        assert!(matches!(escort.attack, EscortAttack::Cooldown(_)));
    }

    #[test]
    fn test_escort_leaves_field() {
        let mut rng = rng();
        let mut escort = escort::spawn(400.0, &EscortTuning::default(), 0.0, &mut rng);
        let bounds = Bounds::default();
        escort.position.y = bounds.height + escort.height;
        escort::update(&mut escort, &player_at(0.0, 0.0), &bounds, 0.0, &mut rng, &mut Outbox::new());
        assert!(!escort.active);
    }

    #[test]
    fn test_escort_defeat_is_idempotent() {
        let mut rng = rng();
        let mut escort = escort::spawn(400.0, &EscortTuning::default(), 0.0, &mut rng);
        let player = player_at(640.0, 640.0);
        let mut out = Outbox::new();

        assert!(escort::defeat(&mut escort, KillCause::PlayerBullet, &player, &mut rng, &mut out));
        assert!(!escort::defeat(&mut escort, KillCause::ShieldCollapse, &player, &mut rng, &mut out));

        assert_eq!(out.missiles.len(), 1);
        assert!(out.missiles[0].kind.is_revenge());
        assert_eq!(
            out.events,
            vec![EncounterEvent::EscortDefeated {
                cause: KillCause::PlayerBullet
            }]
        );
        assert!(!escort::apply_bullet(&mut escort, 1, 0.0));
    }

    #[test]
    fn test_escort_bullet_damage() {
        let mut rng = rng();
        let mut escort = escort::spawn(400.0, &EscortTuning::default(), 0.0, &mut rng);
        assert!(!escort::apply_bullet(&mut escort, ESCORT_HEALTH - 1, 0.0));
        assert!(escort.hit_flash.is_some());
        assert!(escort::apply_bullet(&mut escort, 1, 0.0));
    }
}

//! Particle and floating-text factories.
//!
//! Visual only: nothing here affects collisions or health.

use std::f64::consts::TAU;

use rand::Rng;

use skyfall_core::components::{Boss, Escort, FloatingText, Particle};
use skyfall_core::constants::*;
use skyfall_core::enums::ParticleShape;
use skyfall_core::types::{Color, Position, Velocity};

use crate::sampling::{between, jitter};

const FIRE_PALETTE: [Color; 3] = [
    Color::rgb(255, 64, 0),
    Color::rgb(255, 119, 0),
    Color::rgb(255, 170, 0),
];

const SHIELD_BLUE: Color = Color::rgb(150, 200, 255);
const SMOKE_GRAY: Color = Color::rgb(140, 140, 140);

fn fire_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    FIRE_PALETTE[rng.gen_range(0..FIRE_PALETTE.len())]
}

/// Evenly spaced ring of particles with randomized speed and size.
#[allow(clippy::too_many_arguments)]
fn ring<R: Rng + ?Sized>(
    rng: &mut R,
    center: Position,
    count: usize,
    speed: (f64, f64),
    size: (f64, f64),
    life: (f64, f64),
    fade: f64,
    color: impl Fn(&mut R) -> Color,
) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            Particle {
                position: center,
                velocity: Velocity::from_angle(angle, between(rng, speed.0, speed.1)),
                size: between(rng, size.0, size.1),
                color: color(rng),
                life: between(rng, life.0, life.1),
                fade,
                shape: ParticleShape::Circle,
            }
        })
        .collect()
}

/// Randomly scattered burst (shield effects).
fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    center: Position,
    count: usize,
    speed: (f64, f64),
    life: (f64, f64),
    alpha: (f64, f64),
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let angle = rng.gen::<f64>() * TAU;
            Particle {
                position: center,
                velocity: Velocity::from_angle(angle, between(rng, speed.0, speed.1)),
                size: between(rng, 1.0, 3.0),
                color: SHIELD_BLUE.with_alpha(between(rng, alpha.0, alpha.1)),
                life: between(rng, life.0, life.1),
                fade: 0.03,
                shape: ParticleShape::Circle,
            }
        })
        .collect()
}

/// Projectile impact, 15 particles.
pub fn small_explosion<R: Rng + ?Sized>(rng: &mut R, at: Position) -> Vec<Particle> {
    ring(rng, at, 15, (1.0, 3.0), (2.0, 4.0), (0.8, 0.8), 0.03, fire_color)
}

/// Escort destroyed, 50 particles.
pub fn escort_explosion<R: Rng + ?Sized>(rng: &mut R, at: Position) -> Vec<Particle> {
    ring(rng, at, 50, (1.2, 4.0), (3.5, 7.0), (0.7, 1.1), 0.02, fire_color)
}

/// Boss destroyed.
pub fn large_explosion<R: Rng + ?Sized>(rng: &mut R, at: Position) -> Vec<Particle> {
    let mut particles = ring(rng, at, 30, (2.0, 5.0), (3.0, 6.0), (1.0, 1.0), 0.015, fire_color);
    for _ in 0..4 {
        let offset = Position::new(at.x + jitter(rng, 160.0), at.y + jitter(rng, 160.0));
        particles.extend(escort_explosion(rng, offset));
    }
    particles
}

/// Bullet absorbed by the shield, 8 particles.
pub fn shield_impact<R: Rng + ?Sized>(rng: &mut R, at: Position) -> Vec<Particle> {
    scatter(rng, at, 8, (1.0, 2.5), (0.2, 0.4), (0.5, 1.0))
}

/// Shield collapse, 40 particles.
pub fn shield_break<R: Rng + ?Sized>(rng: &mut R, at: Position) -> Vec<Particle> {
    scatter(rng, at, 40, (2.0, 6.0), (0.5, 1.0), (0.6, 1.0))
}

/// Two exhaust particles per boss engine.
pub fn boss_exhaust<R: Rng + ?Sized>(rng: &mut R, boss: &Boss) -> Vec<Particle> {
    let y = boss.position.y + boss.height / 4.0;
    let mut particles = Vec::with_capacity(4);
    for side in [-1.0, 1.0] {
        let x = boss.position.x + side * boss.width / 3.0;
        for _ in 0..2 {
            let color = if rng.gen_bool(0.7) {
                FIRE_PALETTE[1]
            } else {
                FIRE_PALETTE[2]
            };
            particles.push(Particle {
                position: Position::new(x, y),
                velocity: Velocity::new(jitter(rng, 1.0), between(rng, 4.0, 7.0)),
                size: between(rng, 1.0, 3.0),
                color: color.with_alpha(0.7),
                life: 0.7,
                fade: between(rng, 0.04, 0.08),
                shape: ParticleShape::Circle,
            });
        }
    }
    particles
}

/// Escort tail exhaust, drifting toward the top of the screen.
pub fn escort_exhaust<R: Rng + ?Sized>(rng: &mut R, escort: &Escort) -> Vec<Particle> {
    let tail = Position::new(
        escort.position.x,
        escort.position.y - escort.height * 0.45,
    );
    (0..2)
        .map(|_| Particle {
            position: tail,
            velocity: Velocity::new(jitter(rng, 1.0), -between(rng, 2.0, 3.0)),
            size: between(rng, 1.0, 3.0),
            color: fire_color(rng),
            life: between(rng, 0.3, 0.5),
            fade: 0.04,
            shape: ParticleShape::Circle,
        })
        .collect()
}

/// Damage sparks from a badly hit escort.
pub fn escort_sparks<R: Rng + ?Sized>(rng: &mut R, escort: &Escort) -> Vec<Particle> {
    let at = Position::new(
        escort.position.x + jitter(rng, escort.width * 0.6),
        escort.position.y + jitter(rng, escort.height * 0.6),
    );
    vec![
        Particle {
            position: at,
            velocity: Velocity::new(jitter(rng, 2.0), jitter(rng, 2.0)),
            size: between(rng, 1.0, 2.5),
            color: SMOKE_GRAY,
            life: 0.6,
            fade: 0.03,
            shape: ParticleShape::Circle,
        },
        Particle {
            position: at,
            velocity: Velocity::from_angle(rng.gen::<f64>() * TAU, between(rng, 2.0, 4.0)),
            size: 1.0,
            color: Color::rgb(255, 230, 80),
            life: 0.4,
            fade: 0.05,
            shape: ParticleShape::Spark,
        },
    ]
}

/// Smoke puff behind a missile.
pub fn missile_trail<R: Rng + ?Sized>(rng: &mut R, at: Position) -> Particle {
    Particle {
        position: at,
        velocity: Velocity::new(jitter(rng, 0.4), jitter(rng, 0.4)),
        size: between(rng, 2.0, 4.0),
        color: SMOKE_GRAY.with_alpha(0.5),
        life: 0.5,
        fade: 0.03,
        shape: ParticleShape::Circle,
    }
}

/// Rising label at a world position.
pub fn floating_text(text: impl Into<String>, at: Position, color: Color, size: f64) -> FloatingText {
    FloatingText {
        text: text.into(),
        position: at,
        color,
        size,
        life: FLOATING_TEXT_LIFE,
    }
}

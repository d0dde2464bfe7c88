//! Immediate-mode drawing against an abstract 2D surface.
//!
//! The engine never owns a canvas. A frontend implements [`Surface`] and
//! calls the draw functions after each tick. Entities whose position is not
//! finite, or sits at the origin from a construction bug, are skipped with a
//! warning instead of being drawn.

use std::f64::consts::FRAC_PI_2;

use skyfall_core::components::*;
use skyfall_core::constants::*;
use skyfall_core::enums::{BossPhase, ParticleShape, Turret};
use skyfall_core::types::{Color, Position};

const HULL_COLOR: Color = Color::rgb(90, 96, 110);
const HULL_TRIM: Color = Color::rgb(160, 170, 190);
const FLASH_COLOR: Color = Color::rgb(255, 255, 255);
const SHIELD_COLOR: Color = Color::rgb(80, 180, 255);
const CRACK_COLOR: Color = Color::rgba(230, 245, 255, 0.9);
const TURRET_COLOR: Color = Color::rgb(60, 64, 74);
const LASER_COLOR: Color = Color::rgb(255, 40, 40);
const HEALTH_BACK: Color = Color::rgba(40, 40, 40, 0.8);
const HEALTH_FILL: Color = Color::rgb(220, 40, 40);
const ESCORT_COLOR: Color = Color::rgb(170, 60, 60);
const WARNING_COLOR: Color = Color::rgb(255, 80, 0);
const DEBUG_COLOR: Color = Color::rgb(0, 255, 0);

const TURRET_BARREL: f64 = 24.0;
const SHIELD_LAYERS: u32 = 3;

/// Drawing primitives a frontend must provide.
pub trait Surface {
    /// Height of the drawable area; the laser beam runs to this edge.
    fn height(&self) -> f64;
    fn fill_polygon(&mut self, points: &[Position], color: Color);
    fn stroke_polygon(&mut self, points: &[Position], color: Color, line_width: f64);
    fn fill_circle(&mut self, center: Position, radius: f64, color: Color);
    fn stroke_circle(&mut self, center: Position, radius: f64, color: Color, line_width: f64);
    fn line(&mut self, from: Position, to: Position, color: Color, line_width: f64);
    fn fill_rect(&mut self, top_left: Position, width: f64, height: f64, color: Color);
}

fn shifted(p: Position, shake: Position) -> Position {
    Position::new(p.x + shake.x, p.y + shake.y)
}

fn drawable(what: &str, at: &Position) -> bool {
    if at.is_drawable() {
        return true;
    }
    log::warn!("skipping {} with undrawable position ({}, {})", what, at.x, at.y);
    false
}

/// Draw the boss: hull, health bar, shield and cracks, turrets and laser.
/// Returns false if the boss was skipped.
pub fn draw_boss<S: Surface + ?Sized>(
    boss: &Boss,
    surface: &mut S,
    shake: Position,
    debug: bool,
) -> bool {
    if !drawable("boss", &boss.position) {
        return false;
    }
    let center = shifted(boss.position, shake);
    let (w, h) = (boss.width, boss.height);

    draw_laser(boss, surface, shake);

    let hull: Vec<Position> = [
        (0.0, 0.5),
        (0.2, 0.3),
        (0.5, 0.0),
        (0.35, -0.4),
        (-0.35, -0.4),
        (-0.5, 0.0),
        (-0.2, 0.3),
    ]
    .iter()
    .map(|(fx, fy)| Position::new(center.x + fx * w, center.y + fy * h))
    .collect();
    let hull_color = if boss.hit_flash.is_some() {
        FLASH_COLOR
    } else {
        HULL_COLOR
    };
    surface.fill_polygon(&hull, hull_color);
    surface.stroke_polygon(&hull, HULL_TRIM, 2.0);

    for turret in [Turret::Left, Turret::Right] {
        let origin = shifted(boss.turret_origin(turret), shake);
        let angle = boss.turrets.angle(turret);
        let tip = Position::new(
            origin.x + angle.cos() * TURRET_BARREL,
            origin.y + angle.sin() * TURRET_BARREL,
        );
        surface.fill_circle(origin, 10.0, TURRET_COLOR);
        surface.line(origin, tip, TURRET_COLOR, 5.0);
    }

    draw_health_bar(boss, surface, center);

    if boss.phase.shield_visible() {
        draw_shield(boss, surface, center);
    }

    if debug {
        surface.stroke_circle(center, boss.shield_radius(), DEBUG_COLOR, 1.0);
        let (hw, hh) = (w / 2.0, h / 2.0);
        let bounds = [
            Position::new(center.x - hw, center.y - hh),
            Position::new(center.x + hw, center.y - hh),
            Position::new(center.x + hw, center.y + hh),
            Position::new(center.x - hw, center.y + hh),
        ];
        surface.stroke_polygon(&bounds, DEBUG_COLOR, 1.0);
        surface.fill_circle(shifted(boss.nose(), shake), 3.0, DEBUG_COLOR);
    }
    true
}

fn draw_health_bar<S: Surface + ?Sized>(boss: &Boss, surface: &mut S, center: Position) {
    let fraction = if boss.max_hit_points > 0 {
        (boss.displayed_health() / boss.max_hit_points as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let top_left = Position::new(center.x - boss.width / 2.0, center.y - boss.height / 2.0 - 14.0);
    surface.fill_rect(top_left, boss.width, 6.0, HEALTH_BACK);
    surface.fill_rect(top_left, boss.width * fraction, 6.0, HEALTH_FILL);
}

/// Radial gradient approximated by layered translucent circles.
fn draw_shield<S: Surface + ?Sized>(boss: &Boss, surface: &mut S, center: Position) {
    let radius = boss.width * SHIELD_VISUAL_RADIUS_FACTOR;
    let mut alpha = boss.shield.alpha.clamp(0.0, 1.0);
    if boss.phase == BossPhase::ShieldBreaking {
        alpha *= 0.5;
    }

    for layer in 0..SHIELD_LAYERS {
        let scale = 1.0 - layer as f64 * 0.12;
        let layer_alpha = alpha * (0.35 + 0.25 * layer as f64);
        surface.fill_circle(center, radius * scale, SHIELD_COLOR.with_alpha(layer_alpha));
    }
    surface.stroke_circle(center, radius, SHIELD_COLOR.with_alpha(alpha.max(0.4)), 2.0);

    for crack in &boss.shield.cracks {
        let from = Position::new(center.x + crack.from.x, center.y + crack.from.y);
        let to = Position::new(center.x + crack.to.x, center.y + crack.to.y);
        surface.line(from, to, CRACK_COLOR, 1.5);
    }
}

fn draw_laser<S: Surface + ?Sized>(boss: &Boss, surface: &mut S, shake: Position) {
    let nose = shifted(boss.nose(), shake);
    let bottom = Position::new(nose.x, surface.height());
    match boss.attacks.laser {
        LaserState::Charging(_) => {
            surface.line(nose, bottom, LASER_COLOR.with_alpha(0.35), 1.0);
            surface.fill_circle(nose, LASER_WIDTH, LASER_COLOR.with_alpha(0.6));
        }
        LaserState::Firing(_) => {
            let top_left = Position::new(nose.x - LASER_WIDTH / 2.0, nose.y);
            surface.fill_rect(top_left, LASER_WIDTH, surface.height() - nose.y, LASER_COLOR);
            surface.line(nose, bottom, FLASH_COLOR, LASER_WIDTH / 3.0);
        }
        LaserState::Idle | LaserState::Cooldown(_) => {}
    }
}

/// Draw active escorts. Returns how many were drawn.
pub fn draw_escorts<'a, S: Surface + ?Sized>(
    escorts: impl IntoIterator<Item = &'a Escort>,
    surface: &mut S,
    shake: Position,
) -> usize {
    let mut drawn = 0;
    for escort in escorts.into_iter().filter(|e| e.active) {
        if !drawable("escort", &escort.position) {
            continue;
        }
        let c = shifted(escort.position, shake);
        let (hw, hh) = (escort.width / 2.0, escort.height / 2.0);
        let body = [
            Position::new(c.x, c.y + hh),
            Position::new(c.x + hw, c.y - hh),
            Position::new(c.x, c.y - hh * 0.5),
            Position::new(c.x - hw, c.y - hh),
        ];
        let color = if escort.hit_flash.is_some() {
            FLASH_COLOR
        } else {
            ESCORT_COLOR
        };
        surface.fill_polygon(&body, color);
        if matches!(escort.attack, EscortAttack::Warning(_)) {
            surface.stroke_circle(c, hw, WARNING_COLOR, 2.0);
        }
        drawn += 1;
    }
    drawn
}

/// Draw projectiles as rectangles oriented along their heading.
pub fn draw_projectiles<'a, S: Surface + ?Sized>(
    projectiles: impl IntoIterator<Item = &'a Projectile>,
    surface: &mut S,
    shake: Position,
) -> usize {
    let mut drawn = 0;
    for projectile in projectiles {
        if !drawable("projectile", &projectile.position) {
            continue;
        }
        let c = shifted(projectile.position, shake);
        // Length runs along the heading.
        let (along_x, along_y) = (projectile.angle.cos(), projectile.angle.sin());
        let (across_x, across_y) = (
            (projectile.angle + FRAC_PI_2).cos(),
            (projectile.angle + FRAC_PI_2).sin(),
        );
        let (hl, hw) = (projectile.height / 2.0, projectile.width / 2.0);
        let corner = |l: f64, w: f64| {
            Position::new(
                c.x + along_x * l + across_x * w,
                c.y + along_y * l + across_y * w,
            )
        };
        let outline = [corner(hl, hw), corner(hl, -hw), corner(-hl, -hw), corner(-hl, hw)];
        surface.fill_polygon(&outline, projectile.color);
        drawn += 1;
    }
    drawn
}

pub fn draw_particles<'a, S: Surface + ?Sized>(
    particles: impl IntoIterator<Item = &'a Particle>,
    surface: &mut S,
    shake: Position,
) {
    for particle in particles {
        let at = shifted(particle.position, shake);
        let color = particle.color.with_alpha(particle.color.a * particle.life.clamp(0.0, 1.0));
        match particle.shape {
            ParticleShape::Circle => surface.fill_circle(at, particle.size, color),
            ParticleShape::Spark => {
                let tail = Position::new(at.x - particle.velocity.x * 2.0, at.y - particle.velocity.y * 2.0);
                surface.line(at, tail, color, particle.size);
            }
        }
    }
}

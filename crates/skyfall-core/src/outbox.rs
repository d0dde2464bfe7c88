//! Collaborator output lists.
//!
//! Boss and escort logic never touches the world directly. Everything they
//! produce (projectiles, scheduled shots, particles, texts, events) goes into
//! an `Outbox` that the encounter controller drains once per tick.

use crate::components::{FloatingText, Particle, Projectile, ScheduledProjectile};
use crate::enums::ProjectileClass;
use crate::events::EncounterEvent;

/// Per-tick output of the boss and escort subsystems.
#[derive(Debug, Default)]
pub struct Outbox {
    pub bullets: Vec<Projectile>,
    pub missiles: Vec<Projectile>,
    pub scheduled: Vec<ScheduledProjectile>,
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
    pub events: Vec<EncounterEvent>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a batch of bullets. Malformed entries are dropped with a warning.
    pub fn enqueue_bullets(&mut self, batch: impl IntoIterator<Item = Projectile>) {
        accept(batch, ProjectileClass::Bullet, &mut self.bullets);
    }

    /// Accept a batch of missiles. Malformed entries are dropped with a warning.
    pub fn enqueue_missiles(&mut self, batch: impl IntoIterator<Item = Projectile>) {
        accept(batch, ProjectileClass::Missile, &mut self.missiles);
    }

    pub fn enqueue_missile(&mut self, missile: Projectile) {
        self.enqueue_missiles([missile]);
    }

    /// Accept projectiles to be promoted at a later timestamp.
    pub fn enqueue_scheduled(&mut self, batch: impl IntoIterator<Item = ScheduledProjectile>) {
        for entry in batch {
            if entry.projectile.is_well_formed() && entry.fire_at.is_finite() {
                self.scheduled.push(entry);
            } else {
                log::warn!("dropping malformed scheduled projectile: {:?}", entry);
            }
        }
    }

    pub fn enqueue_particles(&mut self, batch: impl IntoIterator<Item = Particle>) {
        self.particles.extend(batch);
    }

    pub fn push_text(&mut self, text: FloatingText) {
        self.texts.push(text);
    }

    pub fn emit(&mut self, event: EncounterEvent) {
        self.events.push(event);
    }
}

fn accept(
    batch: impl IntoIterator<Item = Projectile>,
    class: ProjectileClass,
    into: &mut Vec<Projectile>,
) {
    let before = into.len();
    let mut offered = 0usize;
    for projectile in batch {
        offered += 1;
        if !projectile.is_well_formed() {
            log::warn!("dropping malformed projectile: {:?}", projectile);
            continue;
        }
        if projectile.class() != class {
            log::warn!(
                "dropping {:?} offered to the {:?} set",
                projectile.kind,
                class
            );
            continue;
        }
        into.push(projectile);
    }
    if offered == 0 {
        log::warn!("empty {:?} batch enqueued", class);
    } else if into.len() == before {
        log::warn!("no valid entries in {:?} batch of {}", class, offered);
    }
}

//! Particle and floating text integration.

use skyfall_core::components::{FloatingText, Particle};
use skyfall_core::constants::{FLOATING_TEXT_FADE, FLOATING_TEXT_RISE};

/// Step every particle and label, dropping the ones that have faded out.
pub fn run(particles: &mut Vec<Particle>, texts: &mut Vec<FloatingText>) {
    for particle in particles.iter_mut() {
        particle.position = particle.position.offset(&particle.velocity);
        particle.life -= particle.fade;
    }
    particles.retain(|p| p.life > 0.0);

    for text in texts.iter_mut() {
        text.position.y -= FLOATING_TEXT_RISE;
        text.life -= FLOATING_TEXT_FADE;
    }
    texts.retain(|t| t.life > 0.0);
}

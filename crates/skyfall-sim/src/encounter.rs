//! Encounter bookkeeping kept outside the ECS world.

use skyfall_core::components::PlayerStatus;
use skyfall_core::constants::PLAYER_INVULNERABLE_MS;
use skyfall_core::events::EncounterEvent;
use skyfall_core::outbox::Outbox;
use skyfall_core::state::ScoreView;
use skyfall_core::timer::Timer;

/// Running score state tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: u32,
    pub experience: u32,
    pub escorts_destroyed: u32,
}

impl ScoreState {
    pub fn award(&mut self, score: u32, experience: u32) {
        self.score += score;
        self.experience += experience;
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            experience: self.experience,
            escorts_destroyed: self.escorts_destroyed,
        }
    }
}

/// Apply damage to the player and open the invulnerability window.
pub fn hit_player(player: &mut PlayerStatus, damage: i32, now: f64, out: &mut Outbox) {
    player.health = (player.health - damage).max(0);
    player.invulnerable = Some(Timer::armed(now, PLAYER_INVULNERABLE_MS));
    log::debug!("player hit for {}, {} remaining", damage, player.health);
    out.emit(EncounterEvent::PlayerHit {
        damage,
        remaining: player.health,
    });
}

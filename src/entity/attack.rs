//! Attack cooldown state
//!
//! Every combatant carries an [`AttackProfile`] (how it attacks) and an
//! [`AttackTimer`] (when it may attack next). The timer is a plain
//! accumulator with two logical states: charging while `elapsed < cooldown`,
//! ready once `elapsed >= cooldown`.

use serde::{Deserialize, Serialize};

/// Static attack parameters for one combatant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    /// Minimum seconds between attacks
    pub cooldown_s: f32,
    /// Mana gained per landed attack (when the magic bonus did not fire)
    pub mp_gain_on_attack: i32,
}

impl AttackProfile {
    pub fn new(cooldown_s: f32, mp_gain_on_attack: i32) -> Self {
        Self {
            cooldown_s,
            mp_gain_on_attack,
        }
    }
}

/// Cooldown accumulator
///
/// `dt` and cooldowns are caller-contract non-negative; there is no clamp
/// because a reset always follows use.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AttackTimer {
    pub elapsed_s: f32,
}

impl AttackTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed_s += dt;
    }

    pub fn ready(&self, cooldown_s: f32) -> bool {
        self.elapsed_s >= cooldown_s
    }

    pub fn reset(&mut self) {
        self.elapsed_s = 0.0;
    }
}

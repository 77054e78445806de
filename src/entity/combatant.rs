//! The shared combatant core
//!
//! Party members and enemies both wrap a [`Combatant`]: identity, stats,
//! resource pools, attack state, and an optional board position. Combatants
//! are created when the party or wave is built and only ever mutated in
//! place afterwards.

use serde::{Deserialize, Serialize};

use crate::board::hex::HexCoord;
use crate::core::types::CombatantId;
use crate::entity::attack::{AttackProfile, AttackTimer};
use crate::entity::stats::{Health, Mana, Stats};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub stats: Stats,
    pub health: Health,
    /// Enemies typically have no mana pool and never trigger the magic bonus
    pub mana: Option<Mana>,
    /// Bonus damage dealt when the mana pool is full at the moment of attack
    pub magic_damage: i32,
    pub attack_profile: AttackProfile,
    pub attack_timer: AttackTimer,
    /// Board cell, `None` while unplaced (e.g. an overflow spawn waiting
    /// for a free cell)
    pub position: Option<HexCoord>,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        stats: Stats,
        mana: Option<Mana>,
        magic_damage: i32,
        attack_profile: AttackProfile,
    ) -> Self {
        Self {
            id: CombatantId::new(),
            name: name.into(),
            health: Health::full(stats.max_hp),
            stats,
            mana,
            magic_damage,
            attack_profile,
            attack_timer: AttackTimer::new(),
            position: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    /// Alive and standing on a board cell, so targetable by proximity
    pub fn is_targetable(&self) -> bool {
        !self.is_dead() && self.is_placed()
    }
}

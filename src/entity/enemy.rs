//! Wave enemies: rewards and level scaling on top of the combatant core

use serde::{Deserialize, Serialize};

use crate::encounter::loot::DropEntry;
use crate::entity::attack::AttackProfile;
use crate::entity::combatant::Combatant;
use crate::entity::stats::Stats;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub combatant: Combatant,
    pub level: u32,
    /// Flat XP granted to every living party member on defeat
    pub xp_reward: i32,
    pub munny_reward: i32,
    pub drops: Vec<DropEntry>,
}

impl Enemy {
    /// Instantiate an enemy from base numbers at the given level.
    ///
    /// Levels above 1 multiply hp/atk/defense/speed by the level, and the
    /// enemy spawns at its scaled full health. Enemies carry no mana pool,
    /// so they never trigger the magic damage bonus.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        hp: i32,
        atk: i32,
        defense: i32,
        speed: i32,
        cooldown_s: f32,
        level: u32,
        xp_reward: i32,
        munny_reward: i32,
        drops: Vec<DropEntry>,
    ) -> Self {
        let level = level.max(1);
        let stats = Stats::new(
            scale_stat(hp, level),
            scale_stat(atk, level),
            scale_stat(defense, level),
            scale_stat(speed, level),
            0,
        );
        Self {
            combatant: Combatant::new(name, stats, None, 0, AttackProfile::new(cooldown_s, 0)),
            level,
            xp_reward,
            munny_reward: munny_reward.max(0),
            drops,
        }
    }
}

fn scale_stat(base: i32, level: u32) -> i32 {
    if level <= 1 {
        return base;
    }
    (base * level as i32).max(1)
}

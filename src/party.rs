//! Party construction and access
//!
//! The party is an ordered, fixed-membership list for the whole session.
//! Members are knocked out on defeat, never removed, so list order is a
//! stable processing order for the combat tick.

use serde::{Deserialize, Serialize};

use crate::core::types::CombatantId;
use crate::entity::attack::AttackProfile;
use crate::entity::combatant::Combatant;
use crate::entity::member::PartyMember;
use crate::entity::stats::{Mana, Stats};

/// Blueprint for one party member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyTemplate {
    pub name: String,
    pub hp: i32,
    pub atk: i32,
    pub defense: i32,
    pub speed: i32,
    pub mp_max: i32,
    pub cooldown_s: f32,
    pub mp_gain_on_attack: i32,
    pub magic_damage: i32,
    pub level: u32,
}

impl PartyTemplate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hp: 20,
            atk: 5,
            defense: 1,
            speed: 1,
            mp_max: 10,
            cooldown_s: 0.2,
            mp_gain_on_attack: 1,
            magic_damage: 12,
            level: 1,
        }
    }
}

/// The stock three-member roster used by the demo binary and tests.
/// Frontends inject their own templates instead of mutating this.
pub fn default_party_templates() -> Vec<PartyTemplate> {
    vec![
        PartyTemplate {
            atk: 5,
            cooldown_s: 0.2,
            ..PartyTemplate::named("Kael")
        },
        PartyTemplate {
            atk: 4,
            cooldown_s: 0.3,
            ..PartyTemplate::named("Mira")
        },
        PartyTemplate {
            atk: 3,
            cooldown_s: 0.4,
            ..PartyTemplate::named("Torv")
        },
    ]
}

/// Ordered, fixed-membership party owned by the battle session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub members: Vec<PartyMember>,
}

impl Party {
    pub fn from_templates(templates: &[PartyTemplate]) -> Self {
        let members = templates
            .iter()
            .map(|template| {
                let combatant = Combatant::new(
                    template.name.clone(),
                    Stats::new(
                        template.hp,
                        template.atk,
                        template.defense,
                        template.speed,
                        template.mp_max,
                    ),
                    Some(Mana::empty(template.mp_max)),
                    template.magic_damage,
                    AttackProfile::new(template.cooldown_s, template.mp_gain_on_attack),
                );
                PartyMember::new(combatant, template.level)
            })
            .collect();
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member(&self, id: CombatantId) -> Option<&PartyMember> {
        self.members
            .iter()
            .find(|member| member.combatant.id == id)
    }

    pub fn member_mut(&mut self, id: CombatantId) -> Option<&mut PartyMember> {
        self.members
            .iter_mut()
            .find(|member| member.combatant.id == id)
    }

    /// Count of members with health remaining
    pub fn living_count(&self) -> usize {
        self.members
            .iter()
            .filter(|member| !member.combatant.is_dead())
            .count()
    }

    /// Grant flat XP to every living member
    pub fn grant_xp_to_living(&mut self, amount: i32) {
        for member in &mut self.members {
            if !member.combatant.is_dead() {
                member.gain_xp(amount);
            }
        }
    }
}

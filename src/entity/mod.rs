//! Combatant data model: stats, resources, attack state, and the two
//! combatant kinds (party members and wave enemies)

pub mod attack;
pub mod combatant;
pub mod enemy;
pub mod member;
pub mod stats;

pub use attack::{AttackProfile, AttackTimer};
pub use combatant::Combatant;
pub use enemy::Enemy;
pub use member::{EquipmentSet, EquippedItem, PartyMember};
pub use stats::{Health, Mana, Stats};

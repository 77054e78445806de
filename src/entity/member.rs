//! Party members: progression and equipment on top of the combatant core

use serde::{Deserialize, Serialize};

use crate::content::{EquipSlot, ItemDef};
use crate::entity::combatant::Combatant;

/// An item currently worn by a member: the id it came from plus the resolved
/// definition, so removal reverts exactly the bonuses that were applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub item_id: String,
    pub def: ItemDef,
}

/// One explicit slot per equipment kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSet {
    pub weapon: Option<EquippedItem>,
    pub armor: Option<EquippedItem>,
    pub accessory: Option<EquippedItem>,
}

impl EquipmentSet {
    pub fn get(&self, slot: EquipSlot) -> Option<&EquippedItem> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Accessory => self.accessory.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<EquippedItem> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory => &mut self.accessory,
        }
    }
}

/// A player-side combatant with levels, experience, and equipment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyMember {
    pub combatant: Combatant,
    pub level: u32,
    pub xp: i32,
    pub xp_to_level: i32,
    pub equipment: EquipmentSet,
}

impl PartyMember {
    pub fn new(combatant: Combatant, level: u32) -> Self {
        let level = level.max(1);
        Self {
            combatant,
            level,
            xp: 0,
            xp_to_level: xp_threshold(level),
            equipment: EquipmentSet::default(),
        }
    }

    /// Add experience, applying as many level-ups as the total supports.
    ///
    /// Each level raises caps, bumps attributes, and heals to full.
    pub fn gain_xp(&mut self, amount: i32) {
        self.xp += amount;
        while self.xp >= self.xp_to_level {
            self.xp -= self.xp_to_level;
            self.level += 1;

            let stats = &mut self.combatant.stats;
            stats.max_hp += 5;
            stats.atk += 2;
            stats.defense += 1;
            stats.speed += 1;
            stats.mp_max += 2;

            self.combatant.health.max = stats.max_hp;
            self.combatant.health.current = self.combatant.health.max;
            if let Some(mana) = self.combatant.mana.as_mut() {
                mana.max = stats.mp_max;
                mana.clamp();
            }

            self.xp_to_level = xp_threshold(self.level);
        }
    }

    /// Equip an item, applying its bonuses. Returns the id of the item it
    /// displaced, if the slot was occupied; the caller decides where that
    /// goes (typically back into inventory storage).
    pub fn equip(&mut self, def: ItemDef) -> Option<String> {
        let displaced = self.unequip(def.slot);
        self.apply_item_bonuses(&def, false);
        let slot = def.slot;
        *self.equipment.slot_mut(slot) = Some(EquippedItem {
            item_id: def.id.clone(),
            def,
        });
        displaced
    }

    /// Remove whatever is in `slot`, reverting its bonuses. Returns the
    /// removed item id, if any.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<String> {
        let removed = self.equipment.slot_mut(slot).take()?;
        self.apply_item_bonuses(&removed.def, true);
        Some(removed.item_id)
    }

    fn apply_item_bonuses(&mut self, def: &ItemDef, remove: bool) {
        let sign = if remove { -1 } else { 1 };
        let stats = &mut self.combatant.stats;
        stats.atk += sign * def.atk;
        stats.defense += sign * def.defense;
        stats.mp_max += sign * def.mp;
        if let Some(mana) = self.combatant.mana.as_mut() {
            mana.max += sign * def.mp;
            mana.clamp();
        }
    }
}

/// XP required to clear the given level
fn xp_threshold(level: u32) -> i32 {
    100 + (level as i32 - 1) * 50
}

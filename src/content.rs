//! Static content and inventory collaborator interfaces
//!
//! The core never owns content tables or player storage; it consumes them
//! through these traits. `StaticCatalog` and `SlotInventory` are the
//! in-memory implementations used by the demo binary and tests; real
//! frontends substitute their own.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Equipment slot kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EquipSlot::Weapon => "weapon",
            EquipSlot::Armor => "armor",
            EquipSlot::Accessory => "accessory",
        };
        write!(f, "{label}")
    }
}

/// Equippable item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub slot: EquipSlot,
    pub atk: i32,
    pub defense: i32,
    pub mp: i32,
}

/// Synthesis material definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    pub id: String,
    pub name: String,
}

/// Read-only lookup into the static content tables
pub trait ContentCatalog {
    fn item(&self, id: &str) -> Result<ItemDef>;
    fn material(&self, id: &str) -> Result<MaterialDef>;
}

/// Side-effecting player storage
///
/// The core consumes nothing from these calls beyond success/failure;
/// display and persistence belong to the frontend.
pub trait Inventory {
    /// Store an item. Fails with [`SimError::SlotsFull`] when the slot kind
    /// is at capacity.
    fn add_item(&mut self, def: &ItemDef) -> Result<()>;
    fn add_material(&mut self, id: &str, amount: u32);
    fn add_munny(&mut self, amount: i32);
}

/// In-memory content tables
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: HashMap<String, ItemDef>,
    materials: HashMap<String, MaterialDef>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock tables matching the default encounter drops
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for item in [
            ItemDef {
                id: "iron_sword".into(),
                name: "Iron Sword".into(),
                slot: EquipSlot::Weapon,
                atk: 1,
                defense: 0,
                mp: 1,
            },
            ItemDef {
                id: "mages_staff".into(),
                name: "Mage's Staff".into(),
                slot: EquipSlot::Weapon,
                atk: 2,
                defense: 0,
                mp: 2,
            },
            ItemDef {
                id: "knights_shield".into(),
                name: "Knight's Shield".into(),
                slot: EquipSlot::Weapon,
                atk: 1,
                defense: 1,
                mp: 0,
            },
            ItemDef {
                id: "champion_belt".into(),
                name: "Champion Belt".into(),
                slot: EquipSlot::Armor,
                atk: 0,
                defense: 1,
                mp: 0,
            },
            ItemDef {
                id: "heros_crest".into(),
                name: "Hero's Crest".into(),
                slot: EquipSlot::Armor,
                atk: 0,
                defense: 2,
                mp: 0,
            },
            ItemDef {
                id: "elven_bandana".into(),
                name: "Elven Bandana".into(),
                slot: EquipSlot::Accessory,
                atk: 0,
                defense: 1,
                mp: 0,
            },
        ] {
            catalog.add_item_def(item);
        }

        for (id, name) in [
            ("bright_shard", "Bright Shard"),
            ("dark_shard", "Dark Shard"),
            ("mythril_fragment", "Mythril Fragment"),
        ] {
            catalog.add_material_def(MaterialDef {
                id: id.into(),
                name: name.into(),
            });
        }
        catalog
    }

    pub fn add_item_def(&mut self, def: ItemDef) {
        self.items.insert(def.id.clone(), def);
    }

    pub fn add_material_def(&mut self, def: MaterialDef) {
        self.materials.insert(def.id.clone(), def);
    }
}

impl ContentCatalog for StaticCatalog {
    fn item(&self, id: &str) -> Result<ItemDef> {
        self.items
            .get(id)
            .cloned()
            .ok_or_else(|| SimError::UnknownItem(id.to_string()))
    }

    fn material(&self, id: &str) -> Result<MaterialDef> {
        self.materials
            .get(id)
            .cloned()
            .ok_or_else(|| SimError::UnknownMaterial(id.to_string()))
    }
}

/// In-memory inventory with per-slot-kind capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotInventory {
    weapon_slots: usize,
    armor_slots: usize,
    accessory_slots: usize,
    stored: HashMap<EquipSlot, Vec<String>>,
    materials: HashMap<String, u32>,
    munny: i32,
}

impl SlotInventory {
    pub fn new(weapon_slots: usize, armor_slots: usize, accessory_slots: usize) -> Self {
        Self {
            weapon_slots,
            armor_slots,
            accessory_slots,
            stored: HashMap::new(),
            materials: HashMap::new(),
            munny: 0,
        }
    }

    fn capacity(&self, slot: EquipSlot) -> usize {
        match slot {
            EquipSlot::Weapon => self.weapon_slots,
            EquipSlot::Armor => self.armor_slots,
            EquipSlot::Accessory => self.accessory_slots,
        }
    }

    pub fn items_in_slot(&self, slot: EquipSlot) -> &[String] {
        self.stored.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn material_count(&self, id: &str) -> u32 {
        self.materials.get(id).copied().unwrap_or(0)
    }

    pub fn munny(&self) -> i32 {
        self.munny
    }
}

impl Inventory for SlotInventory {
    fn add_item(&mut self, def: &ItemDef) -> Result<()> {
        let cap = self.capacity(def.slot);
        let stored = self.stored.entry(def.slot).or_default();
        if stored.len() >= cap {
            return Err(SimError::SlotsFull(def.slot));
        }
        stored.push(def.id.clone());
        Ok(())
    }

    fn add_material(&mut self, id: &str, amount: u32) {
        *self.materials.entry(id.to_string()).or_insert(0) += amount;
    }

    fn add_munny(&mut self, amount: i32) {
        self.munny += amount.max(0);
    }
}

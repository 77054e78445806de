//! Drop tables and loot resolution
//!
//! Every drop entry rolls independently against its own chance. A failed
//! item grant (inventory at capacity) is lost, not queued; unknown content
//! ids skip their entry instead of aborting the rest of the table.

use std::fmt;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::content::{ContentCatalog, Inventory};
use crate::core::error::SimError;

/// What a drop entry yields when its roll succeeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropKind {
    Item { item_id: String },
    Material { material_id: String, amount: u32 },
}

/// One independently rolled drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    #[serde(flatten)]
    pub kind: DropKind,
    /// Probability of the drop in `[0.0, 1.0]`
    pub chance: f32,
}

impl DropEntry {
    pub fn item(item_id: impl Into<String>, chance: f32) -> Self {
        Self {
            kind: DropKind::Item {
                item_id: item_id.into(),
            },
            chance,
        }
    }

    pub fn material(material_id: impl Into<String>, amount: u32, chance: f32) -> Self {
        Self {
            kind: DropKind::Material {
                material_id: material_id.into(),
                amount,
            },
            chance,
        }
    }
}

/// Outcome of one reward step, for the frontend to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootOutcome {
    XpAwarded { amount: i32 },
    ItemGained { item_id: String, name: String },
    /// The roll succeeded but storage was full; the item is lost
    InventoryFull { item_id: String, name: String },
    MaterialGained { material_id: String, amount: u32 },
    MunnyGained { amount: i32 },
}

impl fmt::Display for LootOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LootOutcome::XpAwarded { amount } => write!(f, "Party gained {amount} XP each."),
            LootOutcome::ItemGained { name, .. } => write!(f, "Obtained {name}!"),
            LootOutcome::InventoryFull { name, .. } => write!(f, "Inventory full: {name}"),
            LootOutcome::MaterialGained {
                material_id,
                amount,
            } => write!(f, "Found {amount}x {material_id}."),
            LootOutcome::MunnyGained { amount } => write!(f, "Collected {amount} munny."),
        }
    }
}

/// Roll a drop table against the shared session RNG.
pub fn resolve_drops(
    drops: &[DropEntry],
    rng: &mut ChaCha8Rng,
    catalog: &dyn ContentCatalog,
    inventory: &mut dyn Inventory,
) -> Vec<LootOutcome> {
    let mut outcomes = Vec::new();
    for entry in drops {
        if rng.gen::<f32>() > entry.chance {
            continue;
        }
        match &entry.kind {
            DropKind::Item { item_id } => {
                let def = match catalog.item(item_id) {
                    Ok(def) => def,
                    Err(err) => {
                        tracing::debug!(%err, "skipping drop entry");
                        continue;
                    }
                };
                match inventory.add_item(&def) {
                    Ok(()) => outcomes.push(LootOutcome::ItemGained {
                        item_id: item_id.clone(),
                        name: def.name,
                    }),
                    Err(SimError::SlotsFull(_)) => outcomes.push(LootOutcome::InventoryFull {
                        item_id: item_id.clone(),
                        name: def.name,
                    }),
                    Err(err) => {
                        tracing::debug!(%err, "skipping drop entry");
                    }
                }
            }
            DropKind::Material {
                material_id,
                amount,
            } => {
                if let Err(err) = catalog.material(material_id) {
                    tracing::debug!(%err, "skipping drop entry");
                    continue;
                }
                inventory.add_material(material_id, *amount);
                outcomes.push(LootOutcome::MaterialGained {
                    material_id: material_id.clone(),
                    amount: *amount,
                });
            }
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::content::{SlotInventory, StaticCatalog};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_certain_drop_always_grants() {
        let catalog = StaticCatalog::with_defaults();
        let mut inventory = SlotInventory::new(3, 10, 10);
        let drops = vec![DropEntry::item("champion_belt", 1.0)];
        let mut rng = rng();

        for _ in 0..20 {
            let outcomes = resolve_drops(&drops, &mut rng, &catalog, &mut inventory);
            assert!(matches!(outcomes[0], LootOutcome::ItemGained { .. }));
        }
    }

    #[test]
    fn test_impossible_drop_roll_still_consumes_rng() {
        let catalog = StaticCatalog::with_defaults();
        let mut inventory = SlotInventory::new(3, 10, 10);
        let drops = vec![
            DropEntry::material("bright_shard", 1, 0.0),
            DropEntry::material("dark_shard", 1, 1.0),
        ];
        let outcomes = resolve_drops(&drops, &mut rng(), &catalog, &mut inventory);
        // The certain second entry lands regardless of the first one's roll.
        assert!(outcomes
            .iter()
            .any(|outcome| matches!(outcome, LootOutcome::MaterialGained { .. })));
        assert_eq!(inventory.material_count("dark_shard"), 1);
    }

    #[test]
    fn test_full_inventory_yields_distinct_outcome() {
        let catalog = StaticCatalog::with_defaults();
        let mut inventory = SlotInventory::new(3, 0, 10);
        let drops = vec![DropEntry::item("champion_belt", 1.0)];

        let outcomes = resolve_drops(&drops, &mut rng(), &catalog, &mut inventory);

        assert!(matches!(outcomes[0], LootOutcome::InventoryFull { .. }));
        assert!(inventory
            .items_in_slot(crate::content::EquipSlot::Armor)
            .is_empty());
    }

    #[test]
    fn test_unknown_ids_skip_entry_without_aborting() {
        let catalog = StaticCatalog::with_defaults();
        let mut inventory = SlotInventory::new(3, 10, 10);
        let drops = vec![
            DropEntry::item("no_such_item", 1.0),
            DropEntry::material("no_such_material", 2, 1.0),
            DropEntry::material("mythril_fragment", 1, 1.0),
        ];

        let outcomes = resolve_drops(&drops, &mut rng(), &catalog, &mut inventory);

        assert_eq!(outcomes.len(), 1);
        assert_eq!(inventory.material_count("mythril_fragment"), 1);
    }

    #[test]
    fn test_material_amounts_accumulate() {
        let catalog = StaticCatalog::with_defaults();
        let mut inventory = SlotInventory::new(3, 10, 10);
        let drops = vec![DropEntry::material("bright_shard", 3, 1.0)];

        resolve_drops(&drops, &mut rng(), &catalog, &mut inventory);
        resolve_drops(&drops, &mut rng(), &catalog, &mut inventory);

        assert_eq!(inventory.material_count("bright_shard"), 6);
    }
}

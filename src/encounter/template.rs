//! Enemy definitions and encounter pools
//!
//! A definition is the canonical stat block for one enemy kind; a template
//! is a pool entry referencing a definition by id plus per-pool overrides
//! (level, rewards, drop table). Pools are injected configuration; nothing
//! here is global or mutable at module level.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::encounter::loot::DropEntry;
use crate::entity::enemy::Enemy;

/// Canonical stat block for one enemy kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub atk: i32,
    pub defense: i32,
    pub speed: i32,
    pub cooldown_s: f32,
    pub xp_reward: i32,
    pub munny_reward: i32,
    pub drops: Vec<DropEntry>,
}

/// One pool entry: a definition reference plus overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterTemplate {
    pub definition_id: String,
    pub level: u32,
    #[serde(default)]
    pub xp_reward: Option<i32>,
    #[serde(default)]
    pub munny_reward: Option<i32>,
    #[serde(default)]
    pub drops: Option<Vec<DropEntry>>,
}

impl EncounterTemplate {
    pub fn new(definition_id: impl Into<String>, level: u32) -> Self {
        Self {
            definition_id: definition_id.into(),
            level,
            xp_reward: None,
            munny_reward: None,
            drops: None,
        }
    }
}

/// Definition table plus named template pools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterTables {
    definitions: HashMap<String, EnemyDefinition>,
    pools: HashMap<String, Vec<EncounterTemplate>>,
}

impl EncounterTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock definitions and pools used by the demo binary and tests
    pub fn with_defaults() -> Self {
        let mut tables = Self::new();

        tables.add_definition(EnemyDefinition {
            id: "shade".into(),
            name: "Shade".into(),
            hp: 22,
            atk: 2,
            defense: 1,
            speed: 1,
            cooldown_s: 2.5,
            xp_reward: 12,
            munny_reward: 6,
            drops: vec![
                DropEntry::material("bright_shard", 1, 0.5),
                DropEntry::material("dark_shard", 1, 0.4),
            ],
        });
        tables.add_definition(EnemyDefinition {
            id: "sentinel".into(),
            name: "Sentinel".into(),
            hp: 24,
            atk: 2,
            defense: 1,
            speed: 1,
            cooldown_s: 2.0,
            xp_reward: 24,
            munny_reward: 12,
            drops: vec![
                DropEntry::item("champion_belt", 0.25),
                DropEntry::material("mythril_fragment", 1, 0.5),
            ],
        });

        tables.add_pool(
            "shadefen_edge",
            vec![
                EncounterTemplate::new("shade", 1),
                EncounterTemplate::new("sentinel", 2),
            ],
        );
        tables.add_pool(
            "shadefen_deep",
            vec![
                EncounterTemplate {
                    xp_reward: Some(16),
                    munny_reward: Some(10),
                    ..EncounterTemplate::new("shade", 2)
                },
                EncounterTemplate {
                    xp_reward: Some(32),
                    munny_reward: Some(18),
                    drops: Some(vec![
                        DropEntry::item("champion_belt", 0.4),
                        DropEntry::material("mythril_fragment", 1, 0.65),
                    ]),
                    ..EncounterTemplate::new("sentinel", 3)
                },
            ],
        );
        tables
    }

    pub fn add_definition(&mut self, definition: EnemyDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    pub fn add_pool(&mut self, name: impl Into<String>, templates: Vec<EncounterTemplate>) {
        self.pools.insert(name.into(), templates);
    }

    /// Append a template to a pool, creating the pool if needed
    pub fn add_template(&mut self, pool: impl Into<String>, template: EncounterTemplate) {
        self.pools.entry(pool.into()).or_default().push(template);
    }

    pub fn has_pool(&self, name: &str) -> bool {
        self.pools.contains_key(name)
    }

    pub fn pool(&self, name: &str) -> Result<&[EncounterTemplate]> {
        self.pools
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SimError::UnknownPool(name.to_string()))
    }

    /// Build a live enemy from a pool entry, applying its overrides
    pub fn instantiate(&self, template: &EncounterTemplate) -> Result<Enemy> {
        let definition = self
            .definitions
            .get(&template.definition_id)
            .ok_or_else(|| SimError::UnknownDefinition(template.definition_id.clone()))?;

        let xp_reward = template.xp_reward.unwrap_or(definition.xp_reward);
        let munny_reward = template.munny_reward.unwrap_or(definition.munny_reward);
        let drops = template
            .drops
            .clone()
            .unwrap_or_else(|| definition.drops.clone());

        Ok(Enemy::new(
            definition.name.clone(),
            definition.hp,
            definition.atk,
            definition.defense,
            definition.speed,
            definition.cooldown_s,
            template.level,
            xp_reward,
            munny_reward,
            drops,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_have_both_pools() {
        let tables = EncounterTables::with_defaults();
        assert!(tables.has_pool("shadefen_edge"));
        assert!(tables.has_pool("shadefen_deep"));
        assert!(!tables.has_pool("shadefen_abyss"));
    }

    #[test]
    fn test_instantiate_uses_definition_values() {
        let tables = EncounterTables::with_defaults();
        let template = EncounterTemplate::new("shade", 1);
        let enemy = tables.instantiate(&template).unwrap();

        assert_eq!(enemy.combatant.name, "Shade");
        assert_eq!(enemy.combatant.stats.max_hp, 22);
        assert_eq!(enemy.xp_reward, 12);
        assert_eq!(enemy.drops.len(), 2);
    }

    #[test]
    fn test_instantiate_applies_overrides() {
        let tables = EncounterTables::with_defaults();
        let template = EncounterTemplate {
            xp_reward: Some(99),
            drops: Some(vec![DropEntry::item("heros_crest", 1.0)]),
            ..EncounterTemplate::new("sentinel", 1)
        };
        let enemy = tables.instantiate(&template).unwrap();

        assert_eq!(enemy.xp_reward, 99);
        assert_eq!(enemy.munny_reward, 12); // definition value kept
        assert_eq!(enemy.drops.len(), 1);
    }

    #[test]
    fn test_instantiate_unknown_definition_fails() {
        let tables = EncounterTables::with_defaults();
        let template = EncounterTemplate::new("behemoth", 1);
        let result = tables.instantiate(&template);
        assert!(matches!(result, Err(SimError::UnknownDefinition(_))));
    }

    #[test]
    fn test_add_template_extends_pool() {
        let mut tables = EncounterTables::with_defaults();
        tables.add_template("shadefen_edge", EncounterTemplate::new("sentinel", 5));
        assert_eq!(tables.pool("shadefen_edge").unwrap().len(), 3);
    }

    #[test]
    fn test_unknown_pool_lookup_fails() {
        let tables = EncounterTables::with_defaults();
        assert!(matches!(
            tables.pool("nowhere"),
            Err(SimError::UnknownPool(_))
        ));
    }
}

//! Wave lifecycle: spawning, placement, defeat handling
//!
//! The director owns the wave list and the template pools. Board occupancy
//! is mutated only through the grid passed into each call, and the shared
//! session RNG drives wave size, template picks, cell shuffling, and loot
//! rolls so one seed reproduces a whole run.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::board::grid::HexGrid;
use crate::content::{ContentCatalog, Inventory};
use crate::core::error::{Result, SimError};
use crate::core::types::CombatantId;
use crate::encounter::loot::{resolve_drops, LootOutcome};
use crate::encounter::template::{EncounterTables, EncounterTemplate};
use crate::entity::enemy::Enemy;
use crate::party::Party;

#[derive(Debug)]
pub struct EncounterDirector {
    tables: EncounterTables,
    current_pool: String,
    wave: Vec<Enemy>,
    wave_size_min: usize,
    wave_size_max: usize,
}

impl EncounterDirector {
    pub fn new(
        tables: EncounterTables,
        default_pool: impl Into<String>,
        wave_size_min: usize,
        wave_size_max: usize,
    ) -> Result<Self> {
        let current_pool = default_pool.into();
        if !tables.has_pool(&current_pool) {
            return Err(SimError::UnknownPool(current_pool));
        }
        Ok(Self {
            tables,
            current_pool,
            wave: Vec::new(),
            wave_size_min,
            wave_size_max,
        })
    }

    pub fn current_pool(&self) -> &str {
        &self.current_pool
    }

    pub fn set_pool(&mut self, name: &str) -> Result<()> {
        if !self.tables.has_pool(name) {
            return Err(SimError::UnknownPool(name.to_string()));
        }
        self.current_pool = name.to_string();
        Ok(())
    }

    /// Append a template to a pool at runtime
    pub fn add_template(&mut self, pool: impl Into<String>, template: EncounterTemplate) {
        self.tables.add_template(pool, template);
    }

    pub fn wave(&self) -> &[Enemy] {
        &self.wave
    }

    pub fn wave_mut(&mut self) -> &mut [Enemy] {
        &mut self.wave
    }

    /// The single active opponent: first living enemy in wave order
    pub fn current_target(&self) -> Option<usize> {
        self.wave
            .iter()
            .position(|enemy| !enemy.combatant.is_dead())
    }

    /// Replace the wave with a freshly drawn one.
    ///
    /// Lingering tokens from the prior wave are cleared from the grid first
    /// (stale entries are a no-op). The new size is `size_hint` or a uniform
    /// roll in the configured range, bounded by the free-cell count; enemies
    /// land on a shuffled selection of free cells. An enemy that cannot be
    /// placed keeps `position: None` and stays inactive until a cell frees.
    pub fn spawn_wave(
        &mut self,
        grid: &mut HexGrid,
        rng: &mut ChaCha8Rng,
        size_hint: Option<usize>,
    ) -> Result<usize> {
        let pool_len = self.tables.pool(&self.current_pool)?.len();
        if pool_len == 0 {
            return Err(SimError::EmptyPool(self.current_pool.clone()));
        }

        for enemy in self.wave.drain(..) {
            grid.clear_token(enemy.combatant.id);
        }

        let size = size_hint
            .unwrap_or_else(|| rng.gen_range(self.wave_size_min..=self.wave_size_max));
        let mut free = grid.free_cells();
        free.shuffle(rng);
        let count = size.min(free.len());

        let mut spawned = Vec::with_capacity(count);
        for _ in 0..count {
            let pick = rng.gen_range(0..pool_len);
            let template = &self.tables.pool(&self.current_pool)?[pick];
            let mut enemy = self.tables.instantiate(template)?;
            match free.pop() {
                Some(cell) => match grid.place(enemy.combatant.id, cell) {
                    Ok(()) => enemy.combatant.position = Some(cell),
                    Err(err) => {
                        tracing::debug!(%err, name = %enemy.combatant.name,
                            "spawned enemy left unplaced");
                    }
                },
                None => {
                    tracing::debug!(name = %enemy.combatant.name,
                        "board full, spawned enemy left unplaced");
                }
            }
            spawned.push(enemy);
        }
        self.wave = spawned;

        tracing::debug!(
            pool = %self.current_pool,
            count = self.wave.len(),
            "wave spawned"
        );
        Ok(self.wave.len())
    }

    /// Resolve an enemy defeat: rewards, loot, board cleanup, respawn.
    ///
    /// A stale id (already removed, e.g. across a wave transition) is a
    /// no-op that returns no outcomes.
    pub fn on_enemy_defeated(
        &mut self,
        id: CombatantId,
        party: &mut Party,
        grid: &mut HexGrid,
        rng: &mut ChaCha8Rng,
        catalog: &dyn ContentCatalog,
        inventory: &mut dyn Inventory,
    ) -> Result<Vec<LootOutcome>> {
        let Some(index) = self
            .wave
            .iter()
            .position(|enemy| enemy.combatant.id == id)
        else {
            return Ok(Vec::new());
        };
        let enemy = self.wave.remove(index);
        grid.clear_token(enemy.combatant.id);

        let mut outcomes = Vec::new();

        party.grant_xp_to_living(enemy.xp_reward);
        if enemy.xp_reward > 0 {
            outcomes.push(LootOutcome::XpAwarded {
                amount: enemy.xp_reward,
            });
        }

        outcomes.extend(resolve_drops(&enemy.drops, rng, catalog, inventory));

        if enemy.munny_reward > 0 {
            inventory.add_munny(enemy.munny_reward);
            outcomes.push(LootOutcome::MunnyGained {
                amount: enemy.munny_reward,
            });
        }

        tracing::debug!(name = %enemy.combatant.name, "enemy defeated");

        self.place_stragglers(grid, rng);
        if self.wave.is_empty() {
            self.spawn_wave(grid, rng, None)?;
        }
        Ok(outcomes)
    }

    /// Give unplaced living enemies a cell now that some may have freed up
    fn place_stragglers(&mut self, grid: &mut HexGrid, rng: &mut ChaCha8Rng) {
        let mut free = grid.free_cells();
        if free.is_empty() {
            return;
        }
        free.shuffle(rng);
        for enemy in &mut self.wave {
            if enemy.combatant.is_placed() || enemy.combatant.is_dead() {
                continue;
            }
            let Some(cell) = free.pop() else {
                return;
            };
            if grid.place(enemy.combatant.id, cell).is_ok() {
                enemy.combatant.position = Some(cell);
            }
        }
    }
}

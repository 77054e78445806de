//! Battle session: ownership and per-frame orchestration
//!
//! The session owns every piece of shared mutable state (party, grid, wave,
//! knockout records, RNG) and is stepped by an external loop once per
//! rendered frame. Everything else reads the session through the accessors
//! at the bottom; the core pushes no events beyond registered post-attack
//! observers.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::grid::HexGrid;
use crate::combat::driver::FixedStep;
use crate::combat::system::{AttackObserver, CombatSystem};
use crate::content::{ContentCatalog, Inventory};
use crate::core::config::SimConfig;
use crate::core::error::Result;
use crate::core::types::CombatantId;
use crate::encounter::director::EncounterDirector;
use crate::encounter::loot::LootOutcome;
use crate::encounter::template::EncounterTables;
use crate::entity::enemy::Enemy;
use crate::knockout::KnockoutTracker;
use crate::party::{Party, PartyTemplate};

pub struct BattleSession {
    config: SimConfig,
    party: Party,
    grid: HexGrid,
    director: EncounterDirector,
    ko: KnockoutTracker,
    combat: CombatSystem,
    driver: FixedStep,
    rng: ChaCha8Rng,
    catalog: Box<dyn ContentCatalog>,
    inventory: Box<dyn Inventory>,
    recent_loot: Vec<LootOutcome>,
}

impl BattleSession {
    /// Build a session: party from templates, an empty board with the party
    /// placed on the low-q edge, and an initial wave.
    pub fn new(
        config: SimConfig,
        party_templates: &[PartyTemplate],
        tables: EncounterTables,
        default_pool: &str,
        catalog: Box<dyn ContentCatalog>,
        inventory: Box<dyn Inventory>,
    ) -> Result<Self> {
        let mut party = Party::from_templates(party_templates);
        let mut grid = HexGrid::new(config.board_cols, config.board_rows);
        let mut director = EncounterDirector::new(
            tables,
            default_pool,
            config.wave_size_min,
            config.wave_size_max,
        )?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        // Party deploys on the first free cells of the low-q edge, in
        // member order, before any enemies land.
        let mut free = grid.free_cells();
        free.reverse();
        for member in &mut party.members {
            if let Some(cell) = free.pop() {
                grid.place(member.combatant.id, cell)?;
                member.combatant.position = Some(cell);
            }
        }

        director.spawn_wave(&mut grid, &mut rng, None)?;

        Ok(Self {
            driver: FixedStep::new(config.tick_length_s),
            ko: KnockoutTracker::new(config.revival_delay_s),
            combat: CombatSystem::new(),
            config,
            party,
            grid,
            director,
            rng,
            catalog,
            inventory,
            recent_loot: Vec::new(),
        })
    }

    /// Register a post-attack observer; call before the first update.
    pub fn register_observer(&mut self, observer: AttackObserver) {
        self.combat.register_observer(observer);
    }

    /// Per-frame entry point. Banks `dt` and runs however many fixed ticks
    /// it covers; loot outcomes produced this frame replace the previous
    /// frame's in `recent_loot`.
    pub fn update(&mut self, dt: f32) {
        self.recent_loot.clear();
        self.driver.accumulate(dt);
        while let Some(step) = self.driver.try_step() {
            self.fixed_tick(step);
        }
    }

    fn fixed_tick(&mut self, step: f32) {
        let active = self.director.current_target();
        self.combat.on_tick(
            step,
            &mut self.party,
            &self.ko,
            self.director.wave_mut(),
            active,
        );

        // Revive first, then pick up fresh casualties, so a new knockout
        // waits its full delay.
        self.ko.tick(step, &mut self.party);
        self.ko.track_casualties(&mut self.party);

        let defeated: Vec<CombatantId> = self
            .director
            .wave()
            .iter()
            .filter(|enemy| enemy.combatant.is_dead())
            .map(|enemy| enemy.combatant.id)
            .collect();
        for id in defeated {
            match self.director.on_enemy_defeated(
                id,
                &mut self.party,
                &mut self.grid,
                &mut self.rng,
                self.catalog.as_ref(),
                self.inventory.as_mut(),
            ) {
                Ok(outcomes) => self.recent_loot.extend(outcomes),
                Err(err) => tracing::debug!(%err, "defeat resolution failed"),
            }
        }
    }

    // === READ-ONLY VIEWS ===

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn wave(&self) -> &[Enemy] {
        self.director.wave()
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn director(&self) -> &EncounterDirector {
        &self.director
    }

    pub fn is_down(&self, id: CombatantId) -> bool {
        self.ko.is_down(id)
    }

    /// Seconds until the given member revives, `None` if not down
    pub fn ko_remaining(&self, id: CombatantId) -> Option<f32> {
        self.ko.remaining(id)
    }

    /// Loot outcomes produced during the most recent `update` call
    pub fn recent_loot(&self) -> &[LootOutcome] {
        &self.recent_loot
    }

    /// Switch the encounter pool used for future waves
    pub fn set_pool(&mut self, name: &str) -> Result<()> {
        self.director.set_pool(name)
    }
}

//! Headless auto-battle runner
//!
//! Drives a battle session for a fixed number of simulated frames and logs
//! attacks, knockouts, and loot to the terminal. Useful for tuning and for
//! eyeballing a seed's behavior end-to-end.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hexfray::combat::system::AttackReport;
use hexfray::content::{SlotInventory, StaticCatalog};
use hexfray::core::config::SimConfig;
use hexfray::encounter::template::EncounterTables;
use hexfray::party::default_party_templates;
use hexfray::session::BattleSession;

#[derive(Parser, Debug)]
#[command(name = "skirmish", about = "Run a headless auto-battle")]
struct Args {
    /// Session RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of simulated frames
    #[arg(long, default_value_t = 1800)]
    frames: u32,

    /// Simulated seconds per frame
    #[arg(long, default_value_t = 0.016)]
    frame_dt: f32,

    /// Encounter pool to fight in
    #[arg(long, default_value = "shadefen_edge")]
    pool: String,
}

fn main() -> hexfray::core::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = SimConfig {
        seed: args.seed,
        ..SimConfig::default()
    };

    let mut session = BattleSession::new(
        config,
        &default_party_templates(),
        EncounterTables::with_defaults(),
        &args.pool,
        Box::new(StaticCatalog::with_defaults()),
        Box::new(SlotInventory::new(3, 10, 10)),
    )?;
    session.register_observer(Box::new(|report: &AttackReport| {
        tracing::info!(
            "{} hits {} for {} (HP {})",
            report.attacker_name,
            report.defender_name,
            report.damage,
            report.defender_hp_after
        );
    }));

    tracing::info!(seed = args.seed, pool = %args.pool, "battle started");

    for _ in 0..args.frames {
        session.update(args.frame_dt);
        for outcome in session.recent_loot() {
            tracing::info!("{outcome}");
        }
    }

    tracing::info!("battle finished");
    for member in &session.party().members {
        let combatant = &member.combatant;
        let mana = combatant.mana.map(|mana| mana.current).unwrap_or(0);
        let status = if session.is_down(combatant.id) {
            format!(
                "DOWN {:.1}s",
                session.ko_remaining(combatant.id).unwrap_or(0.0)
            )
        } else {
            "OK".into()
        };
        tracing::info!(
            "{} Lv{} HP {}/{} MP {} [{}]",
            combatant.name,
            member.level,
            combatant.health.current,
            combatant.health.max,
            mana,
            status
        );
    }
    for enemy in session.wave() {
        tracing::info!(
            "{} Lv{} HP {}/{}",
            enemy.combatant.name,
            enemy.level,
            enemy.combatant.health.current,
            enemy.combatant.health.max
        );
    }
    Ok(())
}

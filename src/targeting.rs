//! Nearest-opponent target selection
//!
//! Selection is a pure function over candidate lists built from the current
//! party/wave state. Ties on distance keep the first candidate encountered,
//! so results are deterministic in list order but carry no stronger
//! nearest-unique guarantee.

use crate::board::hex::HexCoord;
use crate::core::types::CombatantId;
use crate::entity::enemy::Enemy;
use crate::knockout::KnockoutTracker;
use crate::party::Party;

/// One eligible opponent: alive, on the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCandidate {
    pub id: CombatantId,
    /// Index into the list the candidate came from (wave or party order)
    pub index: usize,
    pub position: HexCoord,
}

/// Pick the candidate closest to `origin`; first encountered wins ties.
pub fn select_nearest(
    origin: HexCoord,
    candidates: &[TargetCandidate],
) -> Option<TargetCandidate> {
    let mut best: Option<(u32, TargetCandidate)> = None;
    for candidate in candidates {
        let dist = origin.distance(&candidate.position);
        match best {
            Some((best_dist, _)) if dist >= best_dist => {}
            _ => best = Some((dist, *candidate)),
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Enemies a party member may target: living and placed, in wave order
pub fn enemy_candidates(wave: &[Enemy]) -> Vec<TargetCandidate> {
    wave.iter()
        .enumerate()
        .filter_map(|(index, enemy)| {
            if enemy.combatant.is_dead() {
                return None;
            }
            Some(TargetCandidate {
                id: enemy.combatant.id,
                index,
                position: enemy.combatant.position?,
            })
        })
        .collect()
}

/// Party members an enemy may target: living, placed, and not knocked out
pub fn member_candidates(party: &Party, ko: &KnockoutTracker) -> Vec<TargetCandidate> {
    party
        .members
        .iter()
        .enumerate()
        .filter_map(|(index, member)| {
            if member.combatant.is_dead() || ko.is_down(member.combatant.id) {
                return None;
            }
            Some(TargetCandidate {
                id: member.combatant.id,
                index,
                position: member.combatant.position?,
            })
        })
        .collect()
}

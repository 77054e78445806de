//! Knockout tracking and timed revival for party members
//!
//! A member whose health reaches zero goes down for a fixed delay instead of
//! leaving the party. While down it neither acts nor appears in target
//! candidate lists. Each record is created once, the instant health hits
//! zero, and destroyed exactly once at expiry.

use serde::{Deserialize, Serialize};

use crate::core::types::CombatantId;
use crate::party::Party;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KoRecord {
    pub member: CombatantId,
    pub remaining_s: f32,
    /// Mana at the moment of knockout, restored on revival
    pub saved_mana: i32,
}

// Repeated fixed-step decrements accumulate float error well below this;
// without the slack a 10s delay can overshoot by one whole tick.
const EXPIRY_SLACK_S: f32 = 1e-4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnockoutTracker {
    revival_delay_s: f32,
    records: Vec<KoRecord>,
}

impl KnockoutTracker {
    pub fn new(revival_delay_s: f32) -> Self {
        Self {
            revival_delay_s,
            records: Vec::new(),
        }
    }

    pub fn is_down(&self, id: CombatantId) -> bool {
        self.records.iter().any(|record| record.member == id)
    }

    /// Seconds until revival, `None` when the member is not down
    pub fn remaining(&self, id: CombatantId) -> Option<f32> {
        self.records
            .iter()
            .find(|record| record.member == id)
            .map(|record| record.remaining_s)
    }

    pub fn down_count(&self) -> usize {
        self.records.len()
    }

    /// Start tracking any member that died since the last call.
    ///
    /// Snapshots current mana and resets the attack timer so a downed member
    /// cannot come back mid-cooldown.
    pub fn track_casualties(&mut self, party: &mut Party) {
        for member in &mut party.members {
            if !member.combatant.is_dead() || self.is_down(member.combatant.id) {
                continue;
            }
            let saved_mana = member
                .combatant
                .mana
                .map(|mana| mana.current)
                .unwrap_or(0);
            member.combatant.attack_timer.reset();
            self.records.push(KoRecord {
                member: member.combatant.id,
                remaining_s: self.revival_delay_s,
                saved_mana,
            });
            tracing::debug!(name = %member.combatant.name, "party member knocked out");
        }
    }

    /// Count down all records; revive and drop the ones that expire.
    pub fn tick(&mut self, dt: f32, party: &mut Party) {
        let mut expired = Vec::new();
        for record in &mut self.records {
            record.remaining_s -= dt;
            if record.remaining_s <= EXPIRY_SLACK_S {
                expired.push(*record);
            }
        }
        if expired.is_empty() {
            return;
        }

        self.records
            .retain(|record| !expired.iter().any(|e| e.member == record.member));

        for record in expired {
            if let Some(member) = party.member_mut(record.member) {
                member.combatant.health.current = member.combatant.health.max;
                if let Some(mana) = member.combatant.mana.as_mut() {
                    mana.current = record.saved_mana;
                    mana.clamp();
                }
                member.combatant.attack_timer.reset();
                tracing::debug!(name = %member.combatant.name, "party member revived");
            }
        }
    }
}

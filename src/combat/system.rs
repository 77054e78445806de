//! Per-tick combat orchestration
//!
//! Each fixed tick runs two passes: every able party member in stable list
//! order, then the single active enemy. An actor acts when its timer has
//! charged past its cooldown and a living opponent stands on the board.

use std::fmt;

use crate::combat::damage::calc_damage;
use crate::core::types::CombatantId;
use crate::entity::combatant::Combatant;
use crate::entity::enemy::Enemy;
use crate::knockout::KnockoutTracker;
use crate::party::Party;
use crate::targeting;

/// What one resolved attack did, as seen by post-attack observers
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    pub attacker: CombatantId,
    pub attacker_name: String,
    pub defender: CombatantId,
    pub defender_name: String,
    pub damage: i32,
    pub defender_hp_after: i32,
}

/// Post-attack hook, invoked synchronously after each resolved attack
pub type AttackObserver = Box<dyn FnMut(&AttackReport)>;

/// Drives attack timers and resolves basic attacks
pub struct CombatSystem {
    observers: Vec<AttackObserver>,
}

impl CombatSystem {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Register a post-attack observer. Observers run in registration order;
    /// register them at construction time, before the first tick.
    pub fn register_observer(&mut self, observer: AttackObserver) {
        self.observers.push(observer);
    }

    /// Advance one fixed tick.
    ///
    /// `active_enemy` is the wave index of the single opponent that drives
    /// attacks this tick (see `EncounterDirector::current_target`); the rest
    /// of the wave stays passive.
    pub fn on_tick(
        &mut self,
        dt: f32,
        party: &mut Party,
        ko: &KnockoutTracker,
        wave: &mut [Enemy],
        active_enemy: Option<usize>,
    ) {
        // Party pass, stable list order. Dead and knocked-out members
        // neither charge nor act.
        for index in 0..party.members.len() {
            let member = &mut party.members[index];
            if member.combatant.is_dead() || ko.is_down(member.combatant.id) {
                continue;
            }
            member.combatant.attack_timer.tick(dt);
            if !member
                .combatant
                .attack_timer
                .ready(member.combatant.attack_profile.cooldown_s)
            {
                continue;
            }
            let Some(origin) = member.combatant.position else {
                continue;
            };

            let candidates = targeting::enemy_candidates(wave);
            let Some(target) = targeting::select_nearest(origin, &candidates) else {
                continue;
            };
            self.basic_attack(
                &mut party.members[index].combatant,
                &mut wave[target.index].combatant,
            );
        }

        // Opposing pass: only the active enemy attacks.
        let Some(active) = active_enemy else {
            return;
        };
        let Some(enemy) = wave.get_mut(active) else {
            return;
        };
        if enemy.combatant.is_dead() {
            return;
        }
        enemy.combatant.attack_timer.tick(dt);
        if !enemy
            .combatant
            .attack_timer
            .ready(enemy.combatant.attack_profile.cooldown_s)
        {
            return;
        }
        let Some(origin) = enemy.combatant.position else {
            return;
        };

        let candidates = targeting::member_candidates(party, ko);
        let Some(target) = targeting::select_nearest(origin, &candidates) else {
            return;
        };
        self.basic_attack(
            &mut wave[active].combatant,
            &mut party.members[target.index].combatant,
        );
    }

    /// Resolve one attack and notify observers.
    ///
    /// Damage is `max(1, atk - defense)`. A full mana pool converts into the
    /// attacker's magic bonus and empties; otherwise the pool charges by the
    /// profile's gain. The defender's health clamps at zero and the
    /// attacker's timer resets. Returns the damage dealt, bonus included.
    pub fn basic_attack(&mut self, attacker: &mut Combatant, defender: &mut Combatant) -> i32 {
        let mut damage = calc_damage(attacker.stats.atk, defender.stats.defense);
        match attacker.mana.as_mut() {
            Some(mana) if mana.is_full() => {
                damage += attacker.magic_damage;
                mana.current = 0;
            }
            Some(mana) => {
                mana.current += attacker.attack_profile.mp_gain_on_attack;
                mana.clamp();
            }
            None => {}
        }

        defender.health.current -= damage;
        defender.health.clamp();
        attacker.attack_timer.reset();

        tracing::debug!(
            attacker = %attacker.name,
            defender = %defender.name,
            damage,
            defender_hp = defender.health.current,
            "attack resolved"
        );

        let report = AttackReport {
            attacker: attacker.id,
            attacker_name: attacker.name.clone(),
            defender: defender.id,
            defender_name: defender.name.clone(),
            damage,
            defender_hp_after: defender.health.current,
        };
        for observer in &mut self.observers {
            observer(&report);
        }
        damage
    }
}

impl Default for CombatSystem {
    fn default() -> Self {
        Self::new()
    }
}

// Boxed observer closures are not Debug, so report the count only.
impl fmt::Debug for CombatSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatSystem")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::board::hex::HexCoord;
    use crate::entity::attack::AttackProfile;
    use crate::entity::stats::{Mana, Stats};
    use crate::party::{default_party_templates, PartyTemplate};

    fn test_party() -> Party {
        let mut party = Party::from_templates(&default_party_templates());
        for (index, member) in party.members.iter_mut().enumerate() {
            member.combatant.position = Some(HexCoord::new(0, index as i32));
        }
        party
    }

    fn test_enemy(q: i32, r: i32) -> Enemy {
        let mut enemy = Enemy::new("Shade", 30, 4, 1, 1, 0.4, 1, 12, 6, Vec::new());
        enemy.combatant.position = Some(HexCoord::new(q, r));
        enemy
    }

    #[test]
    fn test_basic_attack_damage_and_timer_reset() {
        let mut system = CombatSystem::new();
        let mut party = test_party();
        let mut enemy = test_enemy(3, 0);

        party.members[0].combatant.attack_timer.tick(1.0);
        let damage = system.basic_attack(
            &mut party.members[0].combatant,
            &mut enemy.combatant,
        );

        // atk 5 vs defense 1
        assert_eq!(damage, 4);
        assert_eq!(enemy.combatant.health.current, 26);
        assert_eq!(party.members[0].combatant.attack_timer.elapsed_s, 0.0);
    }

    #[test]
    fn test_full_mana_adds_bonus_and_empties() {
        let mut system = CombatSystem::new();
        let mut party = test_party();
        let mut enemy = test_enemy(3, 0);

        let member = &mut party.members[0].combatant;
        let mana = member.mana.as_mut().unwrap();
        mana.current = mana.max;

        let damage = system.basic_attack(member, &mut enemy.combatant);

        // atk 5 - defense 1 + magic 12
        assert_eq!(damage, 16);
        assert_eq!(party.members[0].combatant.mana.unwrap().current, 0);
    }

    #[test]
    fn test_partial_mana_gains_without_bonus() {
        let mut system = CombatSystem::new();
        let mut party = test_party();
        let mut enemy = test_enemy(3, 0);

        let damage = system.basic_attack(
            &mut party.members[0].combatant,
            &mut enemy.combatant,
        );

        assert_eq!(damage, 4);
        assert_eq!(party.members[0].combatant.mana.unwrap().current, 1);
    }

    #[test]
    fn test_mana_gain_clamped_to_cap() {
        let mut system = CombatSystem::new();
        let mut party = test_party();
        let mut enemy = test_enemy(3, 0);

        let member = &mut party.members[0].combatant;
        member.attack_profile.mp_gain_on_attack = 50;
        system.basic_attack(member, &mut enemy.combatant);

        let mana = party.members[0].combatant.mana.unwrap();
        assert_eq!(mana.current, mana.max);
    }

    #[test]
    fn test_manaless_attacker_gets_no_bonus() {
        let mut system = CombatSystem::new();
        let mut attacker = test_enemy(0, 0);
        let mut defender = test_enemy(1, 0);

        let damage = system.basic_attack(&mut attacker.combatant, &mut defender.combatant);
        assert_eq!(damage, 3); // atk 4 - defense 1
    }

    #[test]
    fn test_defender_health_clamps_at_zero() {
        let mut system = CombatSystem::new();
        let mut party = test_party();
        let mut enemy = test_enemy(3, 0);
        enemy.combatant.health.current = 2;

        system.basic_attack(&mut party.members[0].combatant, &mut enemy.combatant);
        assert_eq!(enemy.combatant.health.current, 0);
        assert!(enemy.combatant.is_dead());
    }

    #[test]
    fn test_observers_run_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut system = CombatSystem::new();
        for tag in ["first", "second"] {
            let order = Rc::clone(&order);
            system.register_observer(Box::new(move |report: &AttackReport| {
                order.borrow_mut().push((tag, report.damage));
            }));
        }

        let mut party = test_party();
        let mut enemy = test_enemy(3, 0);
        system.basic_attack(&mut party.members[0].combatant, &mut enemy.combatant);

        assert_eq!(order.borrow().as_slice(), &[("first", 4), ("second", 4)]);
    }

    #[test]
    fn test_on_tick_ready_members_attack_nearest() {
        let mut system = CombatSystem::new();
        let mut party = test_party();
        let mut wave = vec![test_enemy(5, 5), test_enemy(1, 0)];
        let ko = KnockoutTracker::new(10.0);

        // Long enough for every member cooldown.
        system.on_tick(0.5, &mut party, &ko, &mut wave, None);

        // All three members hit the nearer enemy (index 1).
        assert_eq!(wave[0].combatant.health.current, 30);
        assert!(wave[1].combatant.health.current < 30);
    }

    #[test]
    fn test_on_tick_charging_members_hold() {
        let mut system = CombatSystem::new();
        let mut party = test_party();
        let mut wave = vec![test_enemy(1, 0)];
        let ko = KnockoutTracker::new(10.0);

        // Below every cooldown: nobody fires.
        system.on_tick(0.1, &mut party, &ko, &mut wave, None);
        assert_eq!(wave[0].combatant.health.current, 30);
        assert!(party.members[0].combatant.attack_timer.elapsed_s > 0.0);
    }

    #[test]
    fn test_on_tick_skips_dead_and_downed_members() {
        let mut system = CombatSystem::new();
        let mut party = test_party();
        let mut wave = vec![test_enemy(1, 0)];
        let mut ko = KnockoutTracker::new(10.0);

        party.members[0].combatant.health.current = 0;
        ko.track_casualties(&mut party);
        party.members[1].combatant.health.current = 0; // dead, untracked

        system.on_tick(0.5, &mut party, &ko, &mut wave, None);

        // Only the third member attacked: one hit of 3 - 1 = 2.
        assert_eq!(wave[0].combatant.health.current, 28);
        // Downed member's timer stayed reset.
        assert_eq!(party.members[0].combatant.attack_timer.elapsed_s, 0.0);
    }

    #[test]
    fn test_active_enemy_attacks_nearest_member() {
        let mut system = CombatSystem::new();
        let mut party = test_party();
        // Put the second member adjacent to the enemy.
        party.members[1].combatant.position = Some(HexCoord::new(2, 0));
        let mut wave = vec![test_enemy(3, 0)];
        let ko = KnockoutTracker::new(10.0);

        system.on_tick(0.4, &mut party, &ko, &mut wave, Some(0));

        let hp: Vec<i32> = party
            .members
            .iter()
            .map(|member| member.combatant.health.current)
            .collect();
        // Member 1 took 4 - 1 = 3; the others were untouched.
        assert_eq!(hp[1], party.members[1].combatant.health.max - 3);
        assert_eq!(hp[0], party.members[0].combatant.health.max);
        assert_eq!(hp[2], party.members[2].combatant.health.max);
    }

    #[test]
    fn test_enemy_ignores_downed_members() {
        let mut system = CombatSystem::new();
        let mut templates = vec![
            PartyTemplate::named("Near"),
            PartyTemplate::named("Far"),
        ];
        templates[0].cooldown_s = 100.0;
        templates[1].cooldown_s = 100.0;
        let mut party = Party::from_templates(&templates);
        party.members[0].combatant.position = Some(HexCoord::new(2, 0));
        party.members[1].combatant.position = Some(HexCoord::new(0, 0));

        let mut ko = KnockoutTracker::new(10.0);
        party.members[0].combatant.health.current = 0;
        ko.track_casualties(&mut party);

        let mut wave = vec![test_enemy(3, 0)];
        system.on_tick(0.4, &mut party, &ko, &mut wave, Some(0));

        // The nearer member is down, so the farther one takes the hit.
        let far = &party.members[1].combatant;
        assert_eq!(far.health.current, far.health.max - 3);
    }

    #[test]
    fn test_no_active_enemy_means_no_enemy_attack() {
        let mut system = CombatSystem::new();
        let mut party = test_party();
        let mut wave = vec![test_enemy(3, 0)];
        wave[0].combatant.stats.atk = 100;
        let ko = KnockoutTracker::new(10.0);

        system.on_tick(10.0, &mut party, &ko, &mut wave, None);

        for member in &party.members {
            assert_eq!(member.combatant.health.current, member.combatant.health.max);
        }
    }
}

//! Combat caps and resource pools
//!
//! `Stats` holds base attributes and caps; transient values (current HP/MP)
//! live in `Health` and `Mana` so a stat change never silently moves a
//! current value past its cap without a clamp.

use serde::{Deserialize, Serialize};

/// Base attributes and resource caps for one combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub max_hp: i32,
    pub atk: i32,
    pub defense: i32,
    pub speed: i32,
    pub mp_max: i32,
}

impl Stats {
    pub fn new(max_hp: i32, atk: i32, defense: i32, speed: i32, mp_max: i32) -> Self {
        Self {
            max_hp,
            atk,
            defense,
            speed,
            mp_max,
        }
    }
}

/// Current/maximum hit points
///
/// Invariant: `0 <= current <= max` after every mutation (callers clamp).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(current: i32, max: i32) -> Self {
        let mut health = Self { current, max };
        health.clamp();
        health
    }

    /// Create at full health
    pub fn full(max: i32) -> Self {
        Self::new(max, max)
    }

    pub fn clamp(&mut self) {
        self.current = self.current.clamp(0, self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Fraction of health remaining, 0.0 to 1.0
    pub fn ratio(&self) -> f32 {
        if self.max <= 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

/// Current/maximum mana
///
/// Same clamp invariant as [`Health`]. A full pool is the trigger for the
/// magic damage bonus in attack resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mana {
    pub current: i32,
    pub max: i32,
}

impl Mana {
    pub fn new(current: i32, max: i32) -> Self {
        let mut mana = Self { current, max };
        mana.clamp();
        mana
    }

    /// Create an empty pool with the given cap
    pub fn empty(max: i32) -> Self {
        Self::new(0, max)
    }

    pub fn clamp(&mut self) {
        self.current = self.current.clamp(0, self.max);
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Fraction of mana remaining, 0.0 to 1.0
    pub fn ratio(&self) -> f32 {
        if self.max <= 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_clamps_on_construction() {
        let health = Health::new(50, 30);
        assert_eq!(health.current, 30);

        let health = Health::new(-5, 30);
        assert_eq!(health.current, 0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_health_clamp_after_mutation() {
        let mut health = Health::full(20);
        health.current -= 35;
        health.clamp();
        assert_eq!(health.current, 0);
        assert!(health.is_dead());

        health.current += 100;
        health.clamp();
        assert_eq!(health.current, 20);
    }

    #[test]
    fn test_health_ratio() {
        let health = Health::new(5, 20);
        assert!((health.ratio() - 0.25).abs() < 1e-6);

        let zero_cap = Health::new(0, 0);
        assert_eq!(zero_cap.ratio(), 0.0);
    }

    #[test]
    fn test_mana_full_predicate() {
        let mut mana = Mana::empty(10);
        assert!(!mana.is_full());
        mana.current = 10;
        assert!(mana.is_full());
    }

    #[test]
    fn test_mana_clamp() {
        let mut mana = Mana::new(4, 10);
        mana.current += 20;
        mana.clamp();
        assert_eq!(mana.current, 10);
    }
}

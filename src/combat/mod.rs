//! Combat resolution: damage rule, fixed-step driver, per-tick system

pub mod damage;
pub mod driver;
pub mod system;

pub use damage::calc_damage;
pub use driver::FixedStep;
pub use system::{AttackObserver, AttackReport, CombatSystem};

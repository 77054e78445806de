//! Simulation configuration with documented constants
//!
//! All tuning values are collected here with explanations of their purpose
//! and how they interact with each other.

/// Configuration for a battle session
///
/// These values have been tuned to produce readable combat pacing.
/// Changing them will affect how fast fights resolve and how punishing
/// a knockout is.
#[derive(Debug, Clone)]
pub struct SimConfig {
    // === TIMING ===
    /// Length of one fixed simulation step in seconds
    ///
    /// The external loop may call `update` with any frame delta; the
    /// fixed-step driver converts it into steps of exactly this length.
    /// Smaller = smoother attack timing, more steps per frame.
    pub tick_length_s: f32,

    /// How long a knocked-out party member stays down before reviving
    ///
    /// At the default (10.0s) a knockout costs roughly 50 fixed steps of
    /// lost offense, which is long enough to hurt but short enough that a
    /// single mistake does not end the session.
    pub revival_delay_s: f32,

    // === BOARD ===
    /// Board width in axial columns
    pub board_cols: i32,

    /// Board height in axial rows
    ///
    /// The default 6x6 board gives 36 cells: enough room for a three-member
    /// party plus the largest wave with space to spare, small enough that
    /// nearest-target selection stays meaningful.
    pub board_rows: i32,

    // === WAVES ===
    /// Smallest wave the director will roll when no size hint is given
    pub wave_size_min: usize,

    /// Largest wave the director will roll when no size hint is given
    ///
    /// Wave sizes are drawn uniformly from `[wave_size_min, wave_size_max]`
    /// and then bounded by the number of free board cells at spawn time.
    pub wave_size_max: usize,

    // === DETERMINISM ===
    /// Seed for the session RNG
    ///
    /// One ChaCha8 generator seeded from this value drives wave composition,
    /// cell shuffling, and loot rolls, so a given seed reproduces a whole
    /// run end-to-end.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_length_s: 0.2,
            revival_delay_s: 10.0,
            board_cols: 6,
            board_rows: 6,
            wave_size_min: 2,
            wave_size_max: 4,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Total number of board cells
    pub fn board_cells(&self) -> usize {
        (self.board_cols * self.board_rows).max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_sane() {
        let config = SimConfig::default();
        assert!(config.tick_length_s > 0.0);
        assert!(config.revival_delay_s > 0.0);
        assert!(config.wave_size_min <= config.wave_size_max);
        assert!(config.wave_size_max <= config.board_cells());
    }
}

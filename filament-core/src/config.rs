use std::f32::consts::FRAC_PI_6;

/// Tunable parameters for spawning and branching.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between automatic line spawns, in milliseconds.
    pub spawn_interval_ms: f64,
    /// Bounds for the random growth/erase duration of a line, in
    /// milliseconds.
    pub min_duration_ms: f64,
    pub max_duration_ms: f64,
    /// Bounds for the random length of spawned and branched lines.
    pub min_length: f32,
    pub max_length: f32,
    /// Half-width of the random angular jitter applied to the
    /// border-to-center direction of a spawned line, in radians.
    pub spawn_jitter: f32,
    /// Erase progress below which a line makes its branch decision.
    pub branch_threshold: f32,
    /// Base branch probability; the effective chance is
    /// `branch_chance / decay`.
    pub branch_chance: f32,
    /// Amount added to a parent's decay for each child generation.
    pub decay_step: f32,
    /// Bounds (inclusive) for the number of children per branch.
    pub min_branches: u32,
    pub max_branches: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 4000.0,
            min_duration_ms: 500.0,
            max_duration_ms: 1500.0,
            min_length: 50.0,
            max_length: 200.0,
            spawn_jitter: FRAC_PI_6,
            branch_threshold: 0.3,
            branch_chance: 0.9,
            decay_step: 2.0,
            min_branches: 1,
            max_branches: 2,
        }
    }
}

//! Scoring for row sweeps

/// Points awarded for clearing one line in a sweep
pub const DEFAULT_LINE_CLEAR_BASE: u64 = 100;

/// Score delta for a single sweep: `base * 2^(lines - 1)`, or 0 for no lines
///
/// With the default base: 1 line = 100, 2 = 200, 3 = 400, 4 = 800.
pub fn sweep_score(lines: u32, base: u64) -> u64 {
    match lines {
        0 => 0,
        n => base.saturating_mul(1u64.checked_shl(n - 1).unwrap_or(u64::MAX)),
    }
}

/// Running score for a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the result of one sweep and return the points it was worth
    pub fn add_sweep(&mut self, lines: u32, base: u64) -> u64 {
        let delta = sweep_score(lines, base);
        self.points = self.points.saturating_add(delta);
        self.lines = self.lines.saturating_add(lines);
        delta
    }
}

/// Experience and level progression rules
///
/// This module implements the gamification loop: completing a task grants a
/// fixed amount of XP, and accumulating XP raises the user's level. XP is a
/// lifetime total. It never resets on level-up, so the threshold for the next
/// level keeps growing with the level itself.
///
/// # Rules
///
/// - Completing a task grants [`XP_PER_TASK`] (10) XP.
/// - While `xp >= level * 50`, the level increases by one.
///
/// The level-up check repeats until the threshold is no longer met, so a
/// single large grant can raise the level several times in one step.
///
/// # Progression Table
///
/// | Level | XP required to leave it |
/// |-------|-------------------------|
/// | 1     | 50                      |
/// | 2     | 100                     |
/// | 3     | 150                     |
/// | 4     | 200                     |
///
/// # Example
///
/// ```
/// use questlog_shared::leveling::{Progress, XP_PER_TASK};
///
/// let progress = Progress { xp: 40, level: 1 };
/// let after = progress.grant(XP_PER_TASK);
///
/// assert_eq!(after.xp, 50);
/// assert_eq!(after.level, 2);
/// ```

use serde::{Deserialize, Serialize};

/// XP granted for completing a single task
pub const XP_PER_TASK: i32 = 10;

/// XP required per level: the next level starts at `level * 50`
pub const XP_PER_LEVEL_STEP: i32 = 50;

/// A user's gamification progress: lifetime XP and current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Lifetime XP total (never decreases)
    pub xp: i32,

    /// Current level (starts at 1)
    pub level: i32,
}

impl Progress {
    /// Starting progress for a new user
    pub fn new() -> Self {
        Progress { xp: 0, level: 1 }
    }

    /// Grants XP and applies any level-ups the new total unlocks
    ///
    /// The level-up condition is re-checked after each increment, so a grant
    /// large enough to cross several thresholds raises the level accordingly
    /// in one call.
    ///
    /// # Example
    ///
    /// ```
    /// use questlog_shared::leveling::Progress;
    ///
    /// // A 200 XP grant at level 1 crosses the thresholds for
    /// // levels 2 (50), 3 (100), 4 (150) and 5 (200).
    /// let after = Progress::new().grant(200);
    /// assert_eq!(after.level, 5);
    /// ```
    pub fn grant(mut self, delta: i32) -> Self {
        self.xp += delta;
        while self.xp >= self.level * XP_PER_LEVEL_STEP {
            self.level += 1;
        }
        self
    }

    /// XP total at which the next level is reached
    pub fn next_level_at(&self) -> i32 {
        self.level * XP_PER_LEVEL_STEP
    }
}

impl Default for Progress {
    fn default() -> Self {
        Progress::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progress_starts_at_level_one() {
        let progress = Progress::new();
        assert_eq!(progress.xp, 0);
        assert_eq!(progress.level, 1);
    }

    #[test]
    fn test_grant_accumulates_xp() {
        let progress = Progress::new().grant(XP_PER_TASK);
        assert_eq!(progress.xp, 10);
        assert_eq!(progress.level, 1);
    }

    #[test]
    fn test_level_up_at_exact_threshold() {
        let progress = Progress { xp: 40, level: 1 }.grant(XP_PER_TASK);
        assert_eq!(progress.xp, 50);
        assert_eq!(progress.level, 2);
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let progress = Progress { xp: 30, level: 1 }.grant(XP_PER_TASK);
        assert_eq!(progress.xp, 40);
        assert_eq!(progress.level, 1);
    }

    #[test]
    fn test_large_grant_crosses_multiple_levels() {
        let progress = Progress::new().grant(200);
        assert_eq!(progress.xp, 200);
        assert_eq!(progress.level, 5);
    }

    #[test]
    fn test_xp_is_not_reset_on_level_up() {
        let progress = Progress { xp: 45, level: 1 }.grant(XP_PER_TASK);
        assert_eq!(progress.xp, 55);
        assert_eq!(progress.level, 2);

        // The next threshold is now 100, reached by lifetime total
        let progress = progress.grant(45);
        assert_eq!(progress.xp, 100);
        assert_eq!(progress.level, 3);
    }

    #[test]
    fn test_threshold_grows_with_level() {
        // Ten completions: 100 XP, crossing 50 (level 2) and 100 (level 3)
        let mut progress = Progress::new();
        for _ in 0..10 {
            progress = progress.grant(XP_PER_TASK);
        }
        assert_eq!(progress.xp, 100);
        assert_eq!(progress.level, 3);
    }

    #[test]
    fn test_next_level_at() {
        assert_eq!(Progress::new().next_level_at(), 50);
        assert_eq!(Progress { xp: 60, level: 2 }.next_level_at(), 100);
    }

    #[test]
    fn test_zero_grant_still_applies_pending_level_ups() {
        // A row persisted with xp over the threshold catches up on the
        // next grant, even an empty one
        let progress = Progress { xp: 75, level: 1 }.grant(0);
        assert_eq!(progress.level, 2);
    }
}

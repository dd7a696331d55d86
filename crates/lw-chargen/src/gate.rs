//! Social-status gate for cards tagged `status`.
//!
//! A gated card is only offered if a d100 roll lands at or under a threshold
//! derived from the character's social status and the run's lucky streak.

use rand::rngs::StdRng;

use crate::draw::roll_percentile;

/// Lowest and highest social status.
pub const STATUS_RANGE: (i64, i64) = (-2, 2);

const BASE_PERCENT: i64 = 55;
const PER_STATUS_STEP: i64 = 12;
const LUCK_BONUS: i64 = 10;
const MIN_PERCENT: i64 = 10;
const MAX_PERCENT: i64 = 95;

/// Clamp a raw status value into [`STATUS_RANGE`].
pub fn clamp_status(status: i64) -> i64 {
    status.clamp(STATUS_RANGE.0, STATUS_RANGE.1)
}

/// Pass threshold in whole percent (10-95).
pub fn pass_threshold(status: i64, lucky: bool) -> u32 {
    let luck = if lucky { LUCK_BONUS } else { 0 };
    let percent = BASE_PERCENT + PER_STATUS_STEP * clamp_status(status) + luck;
    percent.clamp(MIN_PERCENT, MAX_PERCENT) as u32
}

/// The outcome of one gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateCheck {
    /// The d100 roll.
    pub roll: u32,
    /// Highest passing roll.
    pub threshold: u32,
    /// Clamped social status used.
    pub status: i64,
    /// Whether the lucky streak was active.
    pub lucky: bool,
}

impl GateCheck {
    /// Whether the card may be offered.
    pub fn passed(&self) -> bool {
        self.roll <= self.threshold
    }

    /// Log line for a rejected card.
    pub fn miss_note(&self, title: &str) -> String {
        format!(
            "Missed \"{title}\" (roll {} > {}, status {}, lucky {})",
            self.roll,
            self.threshold,
            self.status,
            if self.lucky { "yes" } else { "no" }
        )
    }
}

/// Roll the gate for one candidate card.
pub fn check_status_gate(status: i64, lucky: bool, rng: &mut StdRng) -> GateCheck {
    GateCheck {
        roll: roll_percentile(rng),
        threshold: pass_threshold(status, lucky),
        status: clamp_status(status),
        lucky,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn thresholds_by_status() {
        assert_eq!(pass_threshold(-2, false), 31);
        assert_eq!(pass_threshold(-1, false), 43);
        assert_eq!(pass_threshold(0, false), 55);
        assert_eq!(pass_threshold(1, false), 67);
        assert_eq!(pass_threshold(2, false), 79);
        assert_eq!(pass_threshold(2, true), 89);
        assert_eq!(pass_threshold(-2, true), 41);
    }

    #[test]
    fn status_is_clamped() {
        assert_eq!(pass_threshold(9, true), pass_threshold(2, true));
        assert_eq!(pass_threshold(-9, false), pass_threshold(-2, false));
        assert_eq!(clamp_status(-5), -2);
    }

    #[test]
    fn checks_pass_at_roughly_the_threshold_rate() {
        let mut rng = StdRng::seed_from_u64(11);
        let trials = 10_000;
        let passes = (0..trials)
            .filter(|_| check_status_gate(0, false, &mut rng).passed())
            .count();
        let rate = passes as f64 / trials as f64;
        assert!((rate - 0.55).abs() < 0.03, "pass rate {rate}");
    }

    #[test]
    fn roll_at_threshold_passes() {
        let check = GateCheck {
            roll: 55,
            threshold: 55,
            status: 0,
            lucky: false,
        };
        assert!(check.passed());
        let check = GateCheck { roll: 56, ..check };
        assert!(!check.passed());
    }

    #[test]
    fn miss_note_mentions_everything() {
        let check = GateCheck {
            roll: 90,
            threshold: 67,
            status: 1,
            lucky: true,
        };
        assert_eq!(
            check.miss_note("Court Page"),
            "Missed \"Court Page\" (roll 90 > 67, status 1, lucky yes)"
        );
    }
}

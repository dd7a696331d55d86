//! Characteristic advancement along the dice/modifier ladder.
//!
//! A characteristic is rated `NdK+M`. Each step raises the modifier until it
//! reaches 3; the next step trades the modifier for another die
//! (`1d6+3` → `2d6+0`).

use std::fmt;

use lw_core::CharacterStore;

use crate::config::AttributeKeys;

/// Highest modifier before the ladder carries into another die.
pub const MAX_MODIFIER: u32 = 3;

/// A characteristic's dice count and flat modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatPair {
    /// Number of d6 rolled (at least 1).
    pub dice: u32,
    /// Flat modifier (0-3 once on the ladder).
    pub modifier: u32,
}

impl Default for StatPair {
    fn default() -> Self {
        Self {
            dice: 1,
            modifier: 0,
        }
    }
}

impl StatPair {
    /// Build a pair, flooring dice at 1.
    pub fn new(dice: u32, modifier: u32) -> Self {
        Self {
            dice: dice.max(1),
            modifier,
        }
    }

    /// Read a characteristic from the character, defaulting to `1d6+0`.
    pub fn read(store: &dyn CharacterStore, keys: &AttributeKeys, characteristic: &str) -> Self {
        let dice = store.read_number(&keys.stat_dice(characteristic), 1.0).max(1.0);
        let modifier = store.read_number(&keys.stat_mod(characteristic), 0.0).max(0.0);
        Self::new(dice.floor() as u32, modifier.floor() as u32)
    }

    /// The pair after `steps` ladder increments.
    ///
    /// Each die is worth four rungs (`+0` to `+3`). A modifier above 3 counts
    /// as 3, so the first step carries. Dice saturate at `u32::MAX`.
    pub fn advanced(self, steps: u32) -> Self {
        if steps == 0 {
            return self;
        }
        let rungs = u64::from(MAX_MODIFIER) + 1;
        let position = u64::from(self.dice) * rungs
            + u64::from(self.modifier.min(MAX_MODIFIER))
            + u64::from(steps);
        match u32::try_from(position / rungs) {
            Ok(dice) => Self::new(dice, (position % rungs) as u32),
            Err(_) => Self::new(u32::MAX, MAX_MODIFIER),
        }
    }
}

impl fmt::Display for StatPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d6+{}", self.dice, self.modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lw_core::Character;

    #[test]
    fn five_steps_from_base() {
        assert_eq!(StatPair::default().advanced(5), StatPair::new(2, 1));
    }

    #[test]
    fn carry_at_three() {
        assert_eq!(StatPair::new(1, 3).advanced(1), StatPair::new(2, 0));
        assert_eq!(StatPair::new(2, 2).advanced(1), StatPair::new(2, 3));
    }

    #[test]
    fn zero_steps_is_identity() {
        assert_eq!(StatPair::new(3, 2).advanced(0), StatPair::new(3, 2));
    }

    #[test]
    fn oversized_modifier_carries_immediately() {
        assert_eq!(StatPair::new(1, 5).advanced(1), StatPair::new(2, 0));
    }

    #[test]
    fn read_defaults_and_floors() {
        let keys = AttributeKeys::default();
        let c = Character::new("Anna")
            .with_attribute("Stats_StrengthDice", "0")
            .with_attribute("Stats_StrengthMod", "-2")
            .with_attribute("Stats_WitsDice", "3")
            .with_attribute("Stats_WitsMod", "2");
        assert_eq!(StatPair::read(&c, &keys, "Strength"), StatPair::new(1, 0));
        assert_eq!(StatPair::read(&c, &keys, "Wits"), StatPair::new(3, 2));
        assert_eq!(StatPair::read(&c, &keys, "Charm"), StatPair::default());
    }

    #[test]
    fn huge_step_counts_are_computed_directly() {
        assert_eq!(StatPair::default().advanced(u32::MAX), StatPair::new(1_073_741_824, 3));
    }

    #[test]
    fn dice_saturate_instead_of_wrapping() {
        let keys = AttributeKeys::default();
        let c = Character::new("Anna")
            .with_attribute("Stats_StrDice", "1e20")
            .with_attribute("Stats_StrMod", "3");
        let pair = StatPair::read(&c, &keys, "Str");
        assert_eq!(pair, StatPair::new(u32::MAX, 3));
        assert_eq!(pair.advanced(1), StatPair::new(u32::MAX, 3));
        assert_eq!(StatPair::new(u32::MAX, 0).advanced(2), StatPair::new(u32::MAX, 2));
    }

    #[test]
    fn display_notation() {
        assert_eq!(StatPair::new(2, 1).to_string(), "2d6+1");
    }
}

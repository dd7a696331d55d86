use crate::character::CharacterStore;

/// Answer from a skill-progression capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillStep {
    /// The next unlocked node on the way to the target.
    Node {
        /// Skill key to raise.
        name: String,
        /// Level the skill should reach.
        level: u32,
    },
    /// Nothing to do: the target is already reachable or is a dead end.
    NoStep,
}

/// Finds the next unlocked node in a host-defined skill tree.
///
/// The tree itself is the host's business; the engine only asks for the next
/// step toward a target.
pub trait SkillProgression {
    /// The next step that moves `character` toward `target_key` at `target_level`.
    fn next_step_toward(
        &self,
        character: &dyn CharacterStore,
        target_key: &str,
        target_level: u32,
    ) -> SkillStep;
}

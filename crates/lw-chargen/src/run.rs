//! The persisted run and the per-character state blob.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lw_core::CharacterStore;

use crate::choice::Reward;
use crate::config::{ChargenSetup, ContactTables};
use crate::error::ChargenResult;
use crate::offer::Card;

/// Where a run stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    /// Cards are on offer and the next Choose is pending.
    #[default]
    AwaitingChoice,
    /// The run has ended; history and biography are kept for audit.
    Finished,
}

/// One committed choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Table the card was drawn from.
    pub table_ref: String,
    /// Title of the chosen card.
    pub choice_title: String,
    /// The reward that was applied.
    pub reward_applied: Reward,
    /// When the choice was made.
    pub chosen_at: DateTime<Utc>,
}

/// A resumable character-generation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    /// Table the current offer was drawn from.
    pub current_table_ref: String,
    /// Cards offered per draw.
    pub choices_per_draw: u32,
    /// Choices left before the run ends. Authoritative.
    pub remaining_global_rolls: u32,
    /// Choices left on the current table. Informational only.
    pub remaining_here: u32,
    /// Biography lines produced by this run, in order.
    #[serde(rename = "biographyLog")]
    pub biography: Vec<String>,
    /// Committed choices, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Run-scoped luck flag; never written to character attributes.
    pub lucky_streak: bool,
    /// The current offer.
    pub offered_cards: Vec<Card>,
    /// Status-gated cards that failed their roll while drawing the current offer.
    #[serde(default)]
    pub gate_log: Vec<String>,
    /// Default contact tables.
    #[serde(default)]
    pub contact_table_refs: Option<ContactTables>,
    /// Default bodily-change table.
    #[serde(default)]
    pub body_table_ref: Option<String>,
    /// Default misc table.
    #[serde(default)]
    pub misc_table_ref: Option<String>,
    /// Default item table.
    #[serde(default)]
    pub item_table_ref: Option<String>,
    /// Current status.
    #[serde(default)]
    pub status: RunStatus,
    /// When the run was started.
    pub started_at: DateTime<Utc>,
}

impl Run {
    /// A fresh run for `setup`, with no offer yet.
    pub fn new(setup: &ChargenSetup) -> Self {
        Self {
            current_table_ref: setup.table_ref.clone(),
            choices_per_draw: setup.choices_per_draw.max(1),
            remaining_global_rolls: setup.max_rolls,
            remaining_here: setup.max_rolls,
            biography: Vec::new(),
            history: Vec::new(),
            lucky_streak: false,
            offered_cards: Vec::new(),
            gate_log: Vec::new(),
            contact_table_refs: setup.contact_table_refs.clone(),
            body_table_ref: setup.body_table_ref.clone(),
            misc_table_ref: setup.misc_table_ref.clone(),
            item_table_ref: setup.item_table_ref.clone(),
            status: RunStatus::AwaitingChoice,
            started_at: Utc::now(),
        }
    }

    /// Whether the run has ended.
    pub fn is_finished(&self) -> bool {
        self.status == RunStatus::Finished
    }

    /// Number of choices committed so far.
    pub fn rolls_used(&self) -> usize {
        self.history.len()
    }

    /// Default contact table for a role.
    pub(crate) fn contact_table(&self, role: ContactRole) -> Option<&str> {
        let tables = self.contact_table_refs.as_ref()?;
        match role {
            ContactRole::Profession => tables.profession.as_deref(),
            ContactRole::Region => tables.region.as_deref(),
            ContactRole::Connection => tables.connection.as_deref(),
        }
    }
}

/// The three draws that make up a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContactRole {
    Profession,
    Region,
    Connection,
}

impl ContactRole {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Profession => "profession",
            Self::Region => "region",
            Self::Connection => "connection",
        }
    }
}

/// Coarse session state derived from the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No run; only the setup is remembered.
    Uninitialized,
    /// A run is waiting for the next choice.
    AwaitingChoice,
    /// The run has ended.
    Finished,
}

/// Everything persisted for one character: the setup and the active run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargenState {
    /// Last-known setup, reused by Reset.
    pub setup: ChargenSetup,
    /// Active run; `None` means setup-only mode.
    pub run: Option<Run>,
}

impl ChargenState {
    /// Read the blob stored under `scope`, or an empty state if there is none.
    pub fn load(store: &dyn CharacterStore, scope: &str) -> ChargenResult<Self> {
        match store.read_flag(scope) {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// The blob as JSON.
    pub fn to_value(&self) -> ChargenResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Whether there is no run.
    pub fn is_setup_mode(&self) -> bool {
        self.run.is_none()
    }

    /// The coarse phase.
    pub fn phase(&self) -> SessionPhase {
        match &self.run {
            None => SessionPhase::Uninitialized,
            Some(run) if run.is_finished() => SessionPhase::Finished,
            Some(_) => SessionPhase::AwaitingChoice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lw_core::Character;

    #[test]
    fn new_run_copies_setup() {
        let setup = ChargenSetup::new("origins")
            .with_choices(3)
            .with_max_rolls(4)
            .with_body_table("bodies");
        let run = Run::new(&setup);
        assert_eq!(run.current_table_ref, "origins");
        assert_eq!(run.choices_per_draw, 3);
        assert_eq!(run.remaining_global_rolls, 4);
        assert_eq!(run.remaining_here, 4);
        assert_eq!(run.body_table_ref.as_deref(), Some("bodies"));
        assert!(!run.lucky_streak);
        assert!(run.biography.is_empty());
        assert!(!run.is_finished());
    }

    #[test]
    fn contact_defaults() {
        let setup = ChargenSetup::new("t").with_contact_tables(ContactTables {
            profession: Some("profs".to_string()),
            region: None,
            connection: Some("bonds".to_string()),
        });
        let run = Run::new(&setup);
        assert_eq!(run.contact_table(ContactRole::Profession), Some("profs"));
        assert_eq!(run.contact_table(ContactRole::Region), None);
        assert_eq!(run.contact_table(ContactRole::Connection), Some("bonds"));
    }

    #[test]
    fn missing_blob_is_setup_mode() {
        let c = Character::new("Anna");
        let state = ChargenState::load(&c, "chargen").unwrap();
        assert!(state.is_setup_mode());
        assert_eq!(state.phase(), SessionPhase::Uninitialized);
    }

    #[test]
    fn blob_layout() {
        let state = ChargenState {
            setup: ChargenSetup::new("origins"),
            run: Some(Run::new(&ChargenSetup::new("origins"))),
        };
        let json = state.to_value().unwrap();
        assert_eq!(json["setup"]["tableRef"], "origins");
        assert_eq!(json["run"]["remainingGlobalRolls"], 10);
        assert!(json["run"]["biographyLog"].is_array());
        assert_eq!(json["run"]["status"], "awaitingChoice");

        let back: ChargenState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
        assert_eq!(back.phase(), SessionPhase::AwaitingChoice);
    }

    #[test]
    fn null_run_round_trips() {
        let json = serde_json::json!({"setup": {"tableRef": "x"}, "run": null});
        let state: ChargenState = serde_json::from_value(json).unwrap();
        assert!(state.is_setup_mode());
        assert_eq!(state.setup.max_rolls, 10);
    }

    #[test]
    fn corrupt_blob_is_state_error() {
        let mut c = Character::new("Anna");
        lw_core::CharacterStore::write_flag(&mut c, "chargen", serde_json::json!({"run": 5}))
            .unwrap();
        let err = ChargenState::load(&c, "chargen").unwrap_err();
        assert!(matches!(err, crate::error::ChargenError::State(_)));
    }
}

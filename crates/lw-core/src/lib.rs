//! Core types for Lebensweg: character records, roll tables, and host capabilities.
//!
//! This crate defines the boundary that the character-generation engine talks
//! to. The host owns characters and tables; the engine only sees them through
//! the [`CharacterStore`] and [`TableProvider`] traits. In-memory
//! implementations ([`Character`], [`TableLibrary`]) back the CLI and tests.

/// Typed attribute values stored on a character record.
pub mod attribute;
/// Character record store trait and the in-memory character.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Fire-and-forget notification channel.
pub mod notify;
/// Optional skill-progression capability.
pub mod skill;
/// Roll tables, rows, and table lookup.
pub mod table;

/// Re-export attribute types.
pub use attribute::AttrValue;
/// Re-export character types.
pub use character::{Character, CharacterStore};
/// Re-export error types.
pub use error::{LwError, LwResult};
/// Re-export notification types.
pub use notify::{Notification, Notifier};
/// Re-export skill capability types.
pub use skill::{SkillProgression, SkillStep};
/// Re-export table types.
pub use table::{Table, TableLibrary, TableProvider, TableRow};

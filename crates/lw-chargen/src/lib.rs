//! Card-draw character generation.
//!
//! A run offers a few choice cards drawn from a roll table. Picking one
//! applies a weighted reward to the character and may chain to another table,
//! until the roll budget runs out. Runs persist on the character and can be
//! resumed, rerolled, finished early, or reset.

pub mod apply;
pub mod choice;
pub mod config;
pub mod draw;
pub mod error;
pub mod gate;
pub mod ladder;
pub mod offer;
pub mod run;
pub mod session;
pub mod summary;

pub use choice::{Change, Choice, NextTable, Reward, decode_choice};
pub use config::{AttributeKeys, ChargenConfig, ChargenSetup, ContactTables};
pub use error::{ChargenError, ChargenResult};
pub use offer::Card;
pub use run::{ChargenState, Run, RunStatus, SessionPhase};
pub use session::{ChargenSession, ChooseOutcome};
pub use summary::Summary;

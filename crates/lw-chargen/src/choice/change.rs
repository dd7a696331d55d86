//! Changes a reward applies to the character.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value;

/// One atomic mutation applied as part of a reward.
///
/// Table content is externally authored, so decoding never fails on a change:
/// anything unusable becomes [`Change::Unrecognized`] and is skipped when the
/// reward is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Change {
    /// Add silver to the money scalar.
    Money {
        /// Amount added (may be negative).
        amount: f64,
    },
    /// Draw profession, region, and connection and record a contact.
    Contact {
        /// Profession table; falls back to the run's default.
        profession_table: Option<String>,
        /// Region table; falls back to the run's default.
        region_table: Option<String>,
        /// Connection table; falls back to the run's default.
        connection_table: Option<String>,
    },
    /// Draw a bodily change.
    Body {
        /// Table to draw from; falls back to the run's default.
        table: Option<String>,
    },
    /// Draw a miscellaneous reward.
    Misc {
        /// Table to draw from; falls back to the run's default.
        table: Option<String>,
    },
    /// Draw an item.
    Item {
        /// Table to draw from; falls back to the run's default.
        table: Option<String>,
        /// Quantity (at least 1).
        qty: u32,
    },
    /// Advance a characteristic along the dice/modifier ladder.
    Stat {
        /// Characteristic name, e.g. `Strength`.
        characteristic: String,
        /// Ladder steps.
        steps: u32,
    },
    /// Move one step through the skill tree toward a target.
    Skill {
        /// Target skill key.
        target_key: String,
        /// Target level.
        target_level: u32,
        /// Applied when no skill step is available.
        fallback: Option<Box<Change>>,
    },
    /// Adjust social status within -2..=2.
    Social {
        /// Delta.
        amount: i64,
        /// Optional reason for the biography.
        reason: Option<String>,
    },
    /// Set the run's lucky-streak flag.
    Luck {
        /// New flag value.
        on: bool,
        /// Optional reason for the biography.
        reason: Option<String>,
    },
    /// Anything that could not be interpreted.
    Unrecognized {
        /// The original entry.
        raw: Value,
    },
}

impl Change {
    /// Interpret one entry of a reward's `changes` list.
    pub fn from_value(raw: &Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return Self::unrecognized(raw);
        };
        let kind = obj
            .get("type")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();
        let table = || value::text(obj, &["tableUuid", "tableRef", "table"]);

        match kind.as_str() {
            "money" => Self::Money {
                amount: value::number(obj.get("amount")).unwrap_or(0.0),
            },
            "contact" => Self::Contact {
                profession_table: value::text(obj, &["professionTable"]),
                region_table: value::text(obj, &["regionTable"]),
                connection_table: value::text(obj, &["connectionTable"]),
            },
            "body" => Self::Body { table: table() },
            "misc" => Self::Misc { table: table() },
            "item" => Self::Item {
                table: table(),
                qty: value::count(obj.get("qty"), 1).max(1),
            },
            "stat" => Self::Stat {
                characteristic: value::text(obj, &["characteristic"]).unwrap_or_default(),
                steps: value::count(obj.get("steps"), 1),
            },
            "skill" => Self::Skill {
                target_key: value::text(obj, &["targetKey"]).unwrap_or_default(),
                target_level: value::count(obj.get("targetLevel"), 0),
                fallback: obj
                    .get("fallback")
                    .filter(|f| f.is_object())
                    .map(|f| Box::new(Self::from_value(f))),
            },
            "social" => Self::Social {
                amount: value::number(obj.get("amount"))
                    .map(|n| n.round() as i64)
                    .unwrap_or(0),
                reason: value::text(obj, &["reason"]),
            },
            "luck" => Self::Luck {
                on: value::flag(obj.get("on")).unwrap_or(true),
                reason: value::text(obj, &["reason"]),
            },
            _ => Self::unrecognized(raw),
        }
    }

    fn unrecognized(raw: &Value) -> Self {
        Self::Unrecognized { raw: raw.clone() }
    }

    /// Short name of the change kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Money { .. } => "money",
            Self::Contact { .. } => "contact",
            Self::Body { .. } => "body",
            Self::Misc { .. } => "misc",
            Self::Item { .. } => "item",
            Self::Stat { .. } => "stat",
            Self::Skill { .. } => "skill",
            Self::Social { .. } => "social",
            Self::Luck { .. } => "luck",
            Self::Unrecognized { .. } => "unrecognized",
        }
    }
}

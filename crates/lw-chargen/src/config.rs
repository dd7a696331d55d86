//! Setup and runtime configuration for a chargen session.

use serde::{Deserialize, Serialize};

/// Tables used by `contact` changes that don't name their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactTables {
    /// Profession table reference.
    pub profession: Option<String>,
    /// Region table reference.
    pub region: Option<String>,
    /// Connection table reference.
    pub connection: Option<String>,
}

/// The persisted setup a run is started from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargenSetup {
    /// Starting table reference.
    pub table_ref: String,
    /// Cards offered per draw (at least 1).
    pub choices_per_draw: u32,
    /// Global roll budget (at least 1).
    pub max_rolls: u32,
    /// Default contact tables.
    pub contact_table_refs: Option<ContactTables>,
    /// Default table for `body` changes.
    pub body_table_ref: Option<String>,
    /// Default table for `misc` changes.
    pub misc_table_ref: Option<String>,
    /// Default table for `item` changes.
    pub item_table_ref: Option<String>,
}

impl Default for ChargenSetup {
    fn default() -> Self {
        Self {
            table_ref: String::new(),
            choices_per_draw: 2,
            max_rolls: 10,
            contact_table_refs: None,
            body_table_ref: None,
            misc_table_ref: None,
            item_table_ref: None,
        }
    }
}

impl ChargenSetup {
    /// Setup starting from `table_ref` with default counts.
    pub fn new(table_ref: impl Into<String>) -> Self {
        Self {
            table_ref: table_ref.into().trim().to_string(),
            ..Self::default()
        }
    }

    /// Set the number of cards per draw (min 1).
    pub fn with_choices(mut self, choices: u32) -> Self {
        self.choices_per_draw = choices.max(1);
        self
    }

    /// Set the global roll budget (min 1).
    pub fn with_max_rolls(mut self, rolls: u32) -> Self {
        self.max_rolls = rolls.max(1);
        self
    }

    /// Set the default contact tables.
    pub fn with_contact_tables(mut self, tables: ContactTables) -> Self {
        self.contact_table_refs = Some(tables);
        self
    }

    /// Set the default bodily-change table.
    pub fn with_body_table(mut self, table: impl Into<String>) -> Self {
        self.body_table_ref = Some(table.into());
        self
    }

    /// Set the default misc table.
    pub fn with_misc_table(mut self, table: impl Into<String>) -> Self {
        self.misc_table_ref = Some(table.into());
        self
    }

    /// Set the default item table.
    pub fn with_item_table(mut self, table: impl Into<String>) -> Self {
        self.item_table_ref = Some(table.into());
        self
    }

    /// Clamp counts to their minimums. Applied when a run starts, since
    /// setups can also arrive deserialized.
    pub fn normalized(mut self) -> Self {
        self.table_ref = self.table_ref.trim().to_string();
        self.choices_per_draw = self.choices_per_draw.max(1);
        self.max_rolls = self.max_rolls.max(1);
        self
    }
}

/// Character attribute keys the engine reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeKeys {
    /// Money scalar.
    pub money: String,
    /// Contacts list.
    pub contacts: String,
    /// Bodily changes list.
    pub bodily_changes: String,
    /// Misc rewards list.
    pub misc_rewards: String,
    /// Items list.
    pub items: String,
    /// Social status scalar (-2..=2).
    pub social_status: String,
    /// Biography text.
    pub biography: String,
    /// Prefix of the stat dice/modifier keys.
    pub stat_prefix: String,
}

impl Default for AttributeKeys {
    fn default() -> Self {
        Self {
            money: "Inventory_Money".to_string(),
            contacts: "Contacts".to_string(),
            bodily_changes: "BodilyChanges".to_string(),
            misc_rewards: "MiscRewards".to_string(),
            items: "Inventory_Items".to_string(),
            social_status: "Social_Status".to_string(),
            biography: "Biography".to_string(),
            stat_prefix: "Stats_".to_string(),
        }
    }
}

impl AttributeKeys {
    /// Key holding the dice count for a characteristic.
    pub fn stat_dice(&self, characteristic: &str) -> String {
        format!("{}{characteristic}Dice", self.stat_prefix)
    }

    /// Key holding the modifier for a characteristic.
    pub fn stat_mod(&self, characteristic: &str) -> String {
        format!("{}{characteristic}Mod", self.stat_prefix)
    }
}

/// Runtime configuration for a session. Not persisted.
#[derive(Debug, Clone)]
pub struct ChargenConfig {
    /// RNG seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Flag scope the state blob is stored under.
    pub flag_scope: String,
    /// Skills whose names start with this prefix are never granted.
    pub reserved_skill_prefix: String,
    /// Attribute keys.
    pub keys: AttributeKeys,
}

impl Default for ChargenConfig {
    fn default() -> Self {
        Self {
            seed: None,
            flag_scope: "chargen".to_string(),
            reserved_skill_prefix: "Traits_".to_string(),
            keys: AttributeKeys::default(),
        }
    }
}

impl ChargenConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the flag scope.
    pub fn with_flag_scope(mut self, scope: impl Into<String>) -> Self {
        self.flag_scope = scope.into();
        self
    }

    /// Set the reserved skill prefix.
    pub fn with_reserved_skill_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reserved_skill_prefix = prefix.into();
        self
    }
}

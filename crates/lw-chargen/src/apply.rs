//! Reward application.
//!
//! Changes are applied in list order against a [`Draft`], an in-memory overlay
//! of the character. Later changes see earlier writes. Nothing reaches the
//! real record until the session commits the draft at the end of a
//! successful transition.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use tracing::{debug, warn};

use lw_core::{AttrValue, CharacterStore, LwError, LwResult, SkillProgression, SkillStep, TableProvider};

use crate::choice::Change;
use crate::config::ChargenConfig;
use crate::error::{ChargenError, ChargenResult};
use crate::gate::clamp_status;
use crate::ladder::StatPair;
use crate::run::{ContactRole, Run};

/// Pending writes layered over a character record.
pub struct Draft<'s> {
    base: &'s dyn CharacterStore,
    attributes: BTreeMap<String, AttrValue>,
}

/// Everything a draft would write.
#[derive(Debug, Default, PartialEq)]
pub struct DraftUpdates {
    /// Attribute overwrites, for one batch write.
    pub attributes: BTreeMap<String, AttrValue>,
}

impl<'s> Draft<'s> {
    /// Start an empty draft over `base`.
    pub fn new(base: &'s dyn CharacterStore) -> Self {
        Self {
            base,
            attributes: BTreeMap::new(),
        }
    }

    /// Set one attribute.
    pub fn set(&mut self, key: &str, value: impl Into<AttrValue>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    /// Append a line to a newline-separated list attribute.
    pub fn append_line(&mut self, key: &str, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let mut lines = self.read_lines(key);
        lines.push(line.to_string());
        self.set(key, AttrValue::from_lines(&lines));
    }

    /// Consume the draft.
    pub fn into_updates(self) -> DraftUpdates {
        DraftUpdates {
            attributes: self.attributes,
        }
    }
}

impl CharacterStore for Draft<'_> {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn read_attribute(&self, key: &str) -> Option<AttrValue> {
        self.attributes
            .get(key)
            .cloned()
            .or_else(|| self.base.read_attribute(key))
    }

    fn write_attributes(&mut self, updates: BTreeMap<String, AttrValue>) -> LwResult<()> {
        self.attributes.extend(updates);
        Ok(())
    }

    fn read_flag(&self, scope: &str) -> Option<serde_json::Value> {
        self.base.read_flag(scope)
    }

    /// Flags belong to the session; a draft only carries attributes.
    fn write_flag(&mut self, scope: &str, _value: serde_json::Value) -> LwResult<()> {
        Err(LwError::UpdateRejected(format!(
            "flag \"{scope}\" cannot be written through a reward draft"
        )))
    }
}

/// Format a number the way the host stores it: integers without a fraction.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Applies reward changes to a draft.
pub struct RewardApplier<'a> {
    tables: &'a dyn TableProvider,
    skills: Option<&'a dyn SkillProgression>,
    config: &'a ChargenConfig,
}

impl<'a> RewardApplier<'a> {
    /// Create an applier.
    pub fn new(
        tables: &'a dyn TableProvider,
        skills: Option<&'a dyn SkillProgression>,
        config: &'a ChargenConfig,
    ) -> Self {
        Self {
            tables,
            skills,
            config,
        }
    }

    /// Record a biography line on the run and on the character.
    pub fn add_bio(&self, draft: &mut Draft<'_>, run: &mut Run, line: impl Into<String>) {
        let line = line.into();
        if line.trim().is_empty() {
            return;
        }
        draft.append_line(&self.config.keys.biography, &line);
        run.biography.push(line);
    }

    /// Apply `changes` in order.
    ///
    /// Unrecognized changes are skipped. Table lookups that fail abort the
    /// whole reward; the caller discards the draft.
    pub fn apply(
        &self,
        draft: &mut Draft<'_>,
        run: &mut Run,
        changes: &[Change],
        rng: &mut StdRng,
    ) -> ChargenResult<()> {
        for change in changes {
            self.apply_one(draft, run, change, rng)?;
        }
        Ok(())
    }

    fn apply_one(
        &self,
        draft: &mut Draft<'_>,
        run: &mut Run,
        change: &Change,
        rng: &mut StdRng,
    ) -> ChargenResult<()> {
        let keys = &self.config.keys;
        debug!(kind = change.kind(), "applying change");
        match change {
            Change::Money { amount } => {
                let before = draft.read_number(&keys.money, 0.0);
                let after = before + amount;
                draft.set(&keys.money, format_number(after));
                self.add_bio(
                    draft,
                    run,
                    format!("Received {} silver", format_number(after - before)),
                );
            }
            Change::Contact {
                profession_table,
                region_table,
                connection_table,
            } => {
                let mut part = |own: &Option<String>, role: ContactRole| {
                    let reference = own.as_deref().or_else(|| run.contact_table(role));
                    self.draw_text(reference, role.label(), rng)
                };
                let profession = part(profession_table, ContactRole::Profession)?;
                let region = part(region_table, ContactRole::Region)?;
                let connection = part(connection_table, ContactRole::Connection)?;
                let contact = format!("{profession} from {region} ({connection})");
                draft.append_line(&keys.contacts, &contact);
                self.add_bio(draft, run, format!("Gained a contact: {contact}"));
            }
            Change::Body { table } => {
                let reference = table.as_deref().or(run.body_table_ref.as_deref());
                let text = self.draw_text(reference, "body", rng)?;
                draft.append_line(&keys.bodily_changes, &text);
                self.add_bio(draft, run, format!("Bodily change: {text}"));
            }
            Change::Misc { table } => {
                let reference = table.as_deref().or(run.misc_table_ref.as_deref());
                let text = self.draw_text(reference, "misc", rng)?;
                draft.append_line(&keys.misc_rewards, &text);
                self.add_bio(draft, run, format!("Misc: {text}"));
            }
            Change::Item { table, qty } => {
                let reference = table.as_deref().or(run.item_table_ref.as_deref());
                let name = self.draw_text(reference, "item", rng)?;
                let entry = if *qty > 1 {
                    format!("{name} (x{qty})")
                } else {
                    name
                };
                draft.append_line(&keys.items, &entry);
                self.add_bio(draft, run, format!("Acquired item: {entry}"));
            }
            Change::Stat {
                characteristic,
                steps,
            } => {
                let characteristic = characteristic.trim();
                if characteristic.is_empty() || *steps == 0 {
                    debug!(kind = change.kind(), "skipping stat change without target");
                    return Ok(());
                }
                let before = StatPair::read(&*draft, keys, characteristic);
                let after = before.advanced(*steps);
                draft.set(&keys.stat_dice(characteristic), after.dice.to_string());
                draft.set(&keys.stat_mod(characteristic), after.modifier.to_string());
                self.add_bio(
                    draft,
                    run,
                    format!("Improved {characteristic} ({before} → {after})"),
                );
            }
            Change::Skill {
                target_key,
                target_level,
                fallback,
            } => {
                let step = match self.skills {
                    Some(skills) => skills.next_step_toward(&*draft, target_key, *target_level),
                    None => {
                        warn!(target = %target_key, "skill progression unavailable");
                        SkillStep::NoStep
                    }
                };
                match step {
                    SkillStep::Node { name, level }
                        if !name.starts_with(&self.config.reserved_skill_prefix) =>
                    {
                        let current = draft.read_number(&name, 0.0).max(0.0);
                        let next = current.max(f64::from(level));
                        draft.set(&name, format_number(next));
                        self.add_bio(draft, run, format!("Learned {name} {}", format_number(next)));
                    }
                    other => {
                        if let SkillStep::Node { name, .. } = &other {
                            debug!(skill = %name, "refusing reserved skill");
                        }
                        if let Some(fallback) = fallback {
                            self.apply_one(draft, run, fallback, rng)?;
                        }
                    }
                }
            }
            Change::Social { amount, reason } => {
                let before = clamp_status(draft.read_number(&keys.social_status, 0.0).round() as i64);
                let after = clamp_status(before.saturating_add(*amount));
                draft.set(&keys.social_status, after.to_string());
                let suffix = reason
                    .as_deref()
                    .map(|r| format!(" ({r})"))
                    .unwrap_or_default();
                self.add_bio(
                    draft,
                    run,
                    format!("Social status {before} → {after}{suffix}"),
                );
            }
            Change::Luck { on, reason } => {
                run.lucky_streak = *on;
                let line = if *on {
                    "Lucky streak begins"
                } else {
                    "Lucky streak ends"
                };
                let suffix = reason
                    .as_deref()
                    .map(|r| format!(" ({r})"))
                    .unwrap_or_default();
                self.add_bio(draft, run, format!("{line}{suffix}"));
            }
            Change::Unrecognized { raw } => {
                debug!(change = %raw, "skipping unrecognized change");
            }
        }
        Ok(())
    }

    /// One uniform draw, returning the row's display text.
    fn draw_text(
        &self,
        reference: Option<&str>,
        role: &str,
        rng: &mut StdRng,
    ) -> ChargenResult<String> {
        let reference = reference
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ChargenError::TableNotFound(format!("(no {role} table configured)")))?;
        let table = self
            .tables
            .resolve_table(reference)
            .ok_or_else(|| ChargenError::TableNotFound(reference.to_string()))?;
        let row = table
            .draw_row(rng)
            .ok_or_else(|| ChargenError::EmptyTable(table.name.clone()))?;
        Ok(row.display_text().to_string())
    }
}

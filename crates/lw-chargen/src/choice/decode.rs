//! Table row payload decoding.
//!
//! Card tables store each choice as JSON in the row description. Rich-text
//! editors tend to wrap that JSON in markup and escape its quotes, so the
//! decoder strips tags, decodes entities, and slices out the outermost
//! object before parsing.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use super::change::Change;
use super::value;
use super::{Choice, NextTable, Reward};
use crate::error::{ChargenError, ChargenResult};

/// Maximum number of characters of the raw payload quoted in a decode error.
pub const PREVIEW_LIMIT: usize = 500;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity pattern is valid")
});

/// Decode a row payload into a validated [`Choice`].
pub fn decode_choice(raw: &str, table_name: &str) -> ChargenResult<Choice> {
    let fail = |message: String| ChargenError::Decode {
        table: table_name.to_string(),
        message,
        preview: raw.chars().take(PREVIEW_LIMIT).collect(),
    };

    let cleaned = extract_json(raw);
    let root: Value = serde_json::from_str(&cleaned).map_err(|e| fail(e.to_string()))?;
    let Some(root) = root.as_object() else {
        return Err(fail("JSON root must be an object.".to_string()));
    };

    let choice = root.get("choice").and_then(Value::as_object);
    let title = choice
        .and_then(|c| value::text(c, &["title"]))
        .ok_or_else(|| fail("Missing choice.title".to_string()))?;

    let rewards: Vec<Reward> = root
        .get("rewards")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(normalize_reward).collect())
        .unwrap_or_default();
    if rewards.is_empty() {
        return Err(fail("Missing rewards[]".to_string()));
    }

    let tags = choice
        .and_then(|c| c.get("tags"))
        .or_else(|| root.get("tags"))
        .map(string_list)
        .unwrap_or_default();

    Ok(Choice {
        title,
        text: choice.and_then(|c| value::text(c, &["text"])),
        icon: choice.and_then(|c| value::text(c, &["icon", "img"])),
        tags,
        bio: value::text(root, &["bio"]).or_else(|| choice.and_then(|c| value::text(c, &["bio"]))),
        rewards,
    })
}

/// Reduce a raw payload to the JSON text it carries.
fn extract_json(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    if text.starts_with('<') {
        let stripped = TAG.replace_all(&text, "");
        text = decode_entities(&stripped).trim().to_string();
    }
    if !text.starts_with('{')
        && let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
        && start < end
    {
        text = text[start..=end].to_string();
    }
    text
}

/// Decode named and numeric HTML entities. Unknown entities are left as-is.
fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures<'_>| {
        let body = &caps[1];
        let decoded = if let Some(hex) = body
            .strip_prefix("#x")
            .or_else(|| body.strip_prefix("#X"))
        {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = body.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            match body {
                "quot" => Some('"'),
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "apos" => Some('\''),
                // JSON only accepts ASCII whitespace between tokens.
                "nbsp" => Some(' '),
                _ => None,
            }
        };
        decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
    })
}

fn normalize_reward(raw: &Value) -> Option<Reward> {
    let obj = raw.as_object()?;
    let weight = value::number(obj.get("weight")).unwrap_or(1.0);
    let changes = obj
        .get("changes")
        .and_then(Value::as_array)
        .map(|list| list.iter().map(Change::from_value).collect())
        .unwrap_or_default();
    let next = obj
        .get("next")
        .and_then(Value::as_object)
        .and_then(normalize_next);

    Some(Reward {
        weight,
        changes,
        next,
    })
}

fn normalize_next(obj: &Map<String, Value>) -> Option<NextTable> {
    let table_ref = value::text(obj, &["tableRef", "tableUuid", "table"])?;
    let rolls_override = value::count(obj.get("rollsOverride").or_else(|| obj.get("rolls")), 0);
    Some(NextTable {
        table_ref,
        rolls_override,
    })
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

//! Decoded choice cards: the choice itself, its weighted rewards, and the
//! changes each reward applies.

pub mod change;
pub mod decode;
mod value;

pub use change::Change;
pub use decode::decode_choice;

use serde::{Deserialize, Serialize};

use crate::draw::Weighted;

/// The decoded content of a table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Card title. Never empty.
    pub title: String,
    /// Card body text.
    pub text: Option<String>,
    /// Card icon.
    pub icon: Option<String>,
    /// Free-form tags, e.g. `status`.
    pub tags: Vec<String>,
    /// Extra biography line added when the card is chosen.
    pub bio: Option<String>,
    /// Possible outcomes. Never empty.
    pub rewards: Vec<Reward>,
}

impl Choice {
    /// Whether the card must pass the social-status gate before it is offered.
    pub fn is_status_gated(&self) -> bool {
        self.tags.iter().any(|t| t.trim().eq_ignore_ascii_case("status"))
    }

    /// The follow-up table after `selected` was applied.
    ///
    /// Only one reward usually carries the link in table data, so when the
    /// selected reward has none, the first sibling that does wins.
    pub fn next_table<'a>(&'a self, selected: &'a Reward) -> Option<&'a NextTable> {
        selected
            .next
            .as_ref()
            .or_else(|| self.rewards.iter().find_map(|r| r.next.as_ref()))
    }
}

/// One weighted outcome of a choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    /// Selection weight (finite; zero means "only if nothing else").
    pub weight: f64,
    /// Changes applied in order.
    pub changes: Vec<Change>,
    /// Follow-up table.
    pub next: Option<NextTable>,
}

impl Weighted for Reward {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Link to the table the next round draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTable {
    /// Table reference.
    pub table_ref: String,
    /// Per-table roll count override; 0 means no override.
    pub rolls_override: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reward(next: Option<&str>) -> Reward {
        Reward {
            weight: 1.0,
            changes: Vec::new(),
            next: next.map(|t| NextTable {
                table_ref: t.to_string(),
                rolls_override: 0,
            }),
        }
    }

    fn choice(tags: &[&str], rewards: Vec<Reward>) -> Choice {
        Choice {
            title: "Born Poor".to_string(),
            text: None,
            icon: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            bio: None,
            rewards,
        }
    }

    #[test]
    fn status_tag_is_case_insensitive() {
        assert!(choice(&["Status"], vec![reward(None)]).is_status_gated());
        assert!(choice(&["war", " STATUS "], vec![reward(None)]).is_status_gated());
        assert!(!choice(&["statusy"], vec![reward(None)]).is_status_gated());
        assert!(!choice(&[], vec![reward(None)]).is_status_gated());
    }

    #[test]
    fn next_prefers_selected_reward() {
        let c = choice(&[], vec![reward(Some("a")), reward(Some("b"))]);
        assert_eq!(c.next_table(&c.rewards[1]).unwrap().table_ref, "b");
    }

    #[test]
    fn next_falls_back_to_sibling() {
        let c = choice(&[], vec![reward(None), reward(Some("youth"))]);
        assert_eq!(c.next_table(&c.rewards[0]).unwrap().table_ref, "youth");
    }

    #[test]
    fn next_absent_everywhere() {
        let c = choice(&[], vec![reward(None), reward(None)]);
        assert!(c.next_table(&c.rewards[0]).is_none());
    }
}

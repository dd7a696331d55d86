//! Card offer assembly.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lw_core::Table;

use crate::choice::{Choice, decode_choice};
use crate::draw::DistinctDraw;
use crate::error::{ChargenError, ChargenResult};
use crate::gate::check_status_gate;

/// One decoded, offerable choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Id of the table row the card came from.
    pub source_row_id: String,
    /// The row payload as drawn.
    pub raw_payload: String,
    /// The decoded choice.
    pub choice: Choice,
    /// Image to show: the row's, else the table's, else empty.
    pub display_image: String,
}

impl Card {
    /// Card title.
    pub fn title(&self) -> &str {
        &self.choice.title
    }

    /// Card body text, empty if none.
    pub fn text(&self) -> &str {
        self.choice.text.as_deref().unwrap_or("")
    }

    /// Card icon, empty if none.
    pub fn icon(&self) -> &str {
        self.choice.icon.as_deref().unwrap_or("")
    }
}

/// The result of one assembly pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Offer {
    /// Accepted cards, in draw order.
    pub cards: Vec<Card>,
    /// One note per status-gated card that failed its roll.
    pub misses: Vec<String>,
}

/// Draw up to `count` cards from `table`.
///
/// Rows are drawn without replacement. Status-gated choices that fail their
/// roll are dropped and do not count toward `count`. Running out of rows
/// yields a short offer; a row that fails to decode fails the whole offer.
pub fn assemble_offer(
    table: &Table,
    count: u32,
    status: i64,
    lucky: bool,
    rng: &mut StdRng,
) -> ChargenResult<Offer> {
    if table.rows().is_empty() {
        return Err(ChargenError::EmptyTable(table.name.clone()));
    }

    let mut offer = Offer::default();
    let mut pool = DistinctDraw::new(table.rows());
    while offer.cards.len() < count as usize {
        let Some(row) = pool.next(rng) else {
            break;
        };
        let raw = row.raw_payload();
        let choice = decode_choice(raw, &table.name)?;

        if choice.is_status_gated() {
            let check = check_status_gate(status, lucky, rng);
            if !check.passed() {
                debug!(
                    table = %table.name,
                    title = %choice.title,
                    roll = check.roll,
                    threshold = check.threshold,
                    "status gate rejected card"
                );
                offer.misses.push(check.miss_note(&choice.title));
                continue;
            }
        }

        let display_image = [row.image.as_deref(), table.image.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or("")
            .to_string();

        offer.cards.push(Card {
            source_row_id: row.id.clone(),
            raw_payload: raw.to_string(),
            choice,
            display_image,
        });
    }
    Ok(offer)
}

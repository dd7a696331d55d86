//! Finish summary rendering.

use serde::{Deserialize, Serialize};

/// Heading used in every rendering of a summary.
pub const SUMMARY_TITLE: &str = "Character Generation Finished";

/// The biography of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Character name.
    pub character: String,
    /// Biography lines in order.
    pub biography: Vec<String>,
}

impl Summary {
    /// Create a summary.
    pub fn new(character: impl Into<String>, biography: Vec<String>) -> Self {
        Self {
            character: character.into(),
            biography,
        }
    }

    /// Render as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = format!("# {SUMMARY_TITLE}\n\n");
        out.push_str(&format!("**{}** biography:\n\n", self.character));
        if self.biography.is_empty() {
            out.push_str("*Nothing happened.*\n");
        }
        for line in &self.biography {
            out.push_str(&format!("- {line}\n"));
        }
        out
    }

    /// Render as plain text.
    pub fn export_text(&self) -> String {
        let mut out = format!("{SUMMARY_TITLE}\n\n");
        out.push_str(&format!("{} biography:\n", self.character));
        if self.biography.is_empty() {
            out.push_str("  (nothing happened)\n");
        }
        for line in &self.biography {
            out.push_str(&format!("  - {line}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Summary {
        Summary::new(
            "Anna",
            vec!["Chose: Born Poor".to_string(), "Received 5 silver".to_string()],
        )
    }

    #[test]
    fn markdown() {
        let md = summary().export_markdown();
        assert!(md.starts_with("# Character Generation Finished\n"));
        assert!(md.contains("**Anna** biography:"));
        assert!(md.contains("- Chose: Born Poor\n- Received 5 silver\n"));
    }

    #[test]
    fn text() {
        let text = summary().export_text();
        assert!(text.starts_with("Character Generation Finished"));
        assert!(text.contains("  - Received 5 silver"));
        assert!(!text.contains('*'));
    }

    #[test]
    fn empty_biography() {
        let s = Summary::new("Anna", Vec::new());
        assert!(s.export_markdown().contains("Nothing happened"));
        assert!(s.export_text().contains("nothing happened"));
    }
}

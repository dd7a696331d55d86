use std::path::Path;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{LwError, LwResult};

/// One row of a roll table. Rows are read-only; drawing never marks them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRow {
    /// Row identifier, unique within its table.
    pub id: String,
    /// Short display name.
    pub name: String,
    /// Rich description; holds the choice payload for card tables.
    pub description: String,
    /// Legacy text field, consulted when the description is blank.
    pub text: String,
    /// Optional display image.
    pub image: Option<String>,
}

impl TableRow {
    /// The raw payload: description, else legacy text, else name.
    pub fn raw_payload(&self) -> &str {
        [&self.description, &self.text, &self.name]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    /// Text shown when this row is drawn as a plain result.
    pub fn display_text(&self) -> &str {
        let name = self.name.trim();
        if !name.is_empty() {
            return name;
        }
        match self.raw_payload() {
            "" => "Unknown",
            raw => raw,
        }
    }
}

/// A roll table: an ordered collection of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    /// Table identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Fallback display image for rows without one.
    pub image: Option<String>,
    /// The rows, in table order.
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create an empty table.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style row append.
    pub fn with_row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    /// All rows in table order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Draw a single row uniformly at random. Returns `None` for an empty table.
    pub fn draw_row(&self, rng: &mut StdRng) -> Option<&TableRow> {
        if self.rows.is_empty() {
            return None;
        }
        Some(&self.rows[rng.random_range(0..self.rows.len())])
    }
}

/// Resolves table references to tables.
pub trait TableProvider {
    /// Look up a table by reference.
    fn resolve_table(&self, reference: &str) -> Option<&Table>;
}

/// An in-memory set of tables.
#[derive(Debug, Clone, Default)]
pub struct TableLibrary {
    tables: Vec<Table>,
}

impl TableLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table. Fails if a table with the same id exists.
    pub fn add(&mut self, table: Table) -> LwResult<()> {
        if self.tables.iter().any(|t| t.id == table.id) {
            return Err(LwError::DuplicateTable(table.id));
        }
        self.tables.push(table);
        Ok(())
    }

    /// Load every `*.json` file in `dir` as a table, in file-name order.
    pub fn load_dir(dir: &Path) -> LwResult<Self> {
        let io_err = |source| LwError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths: Vec<_> = std::fs::read_dir(dir)
            .map_err(io_err)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut library = Self::new();
        for path in paths {
            let text = std::fs::read_to_string(&path).map_err(|source| LwError::Io {
                path: path.clone(),
                source,
            })?;
            library.add(serde_json::from_str(&text)?)?;
        }
        Ok(library)
    }

    /// All tables in insertion order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the library holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableProvider for TableLibrary {
    /// Match by id, then by the last segment of a dotted document reference
    /// (`RollTable.abc123`), then by name ignoring case.
    fn resolve_table(&self, reference: &str) -> Option<&Table> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if let Some(t) = self.tables.iter().find(|t| t.id == reference) {
            return Some(t);
        }
        if let Some((_, last)) = reference.rsplit_once('.')
            && let Some(t) = self.tables.iter().find(|t| t.id == last)
        {
            return Some(t);
        }
        let lower = reference.to_lowercase();
        self.tables.iter().find(|t| t.name.to_lowercase() == lower)
    }
}

use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use lw_core::TableLibrary;

pub fn run(dir: &Path) -> Result<(), String> {
    let library = TableLibrary::load_dir(dir).map_err(|e| e.to_string())?;

    if library.is_empty() {
        println!("  No tables found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Rows"]);
    for t in library.tables() {
        table.add_row(vec![t.id.clone(), t.name.clone(), t.rows().len().to_string()]);
    }

    println!("{table}");
    println!();
    println!("  {} tables", library.len());
    Ok(())
}

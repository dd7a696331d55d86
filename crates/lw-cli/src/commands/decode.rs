use std::path::Path;

use lw_chargen::decode_choice;

pub fn run(file: &Path, table_name: &str) -> Result<(), String> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let choice = decode_choice(&raw, table_name).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&choice).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

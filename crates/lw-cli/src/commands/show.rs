use colored::Colorize;

use lw_chargen::ChargenSession;

use super::{SessionArgs, Workspace};

pub fn run(args: &SessionArgs) -> Result<(), String> {
    let mut ws = Workspace::load(args)?;
    let config = ws.config();
    let name = ws.character.name.clone();
    let state = ChargenSession::open(&mut ws.character, &ws.library, config)
        .state()
        .map_err(|e| e.to_string())?;

    println!("  {}", name.bold());
    println!();

    let Some(run) = state.run else {
        if state.setup.table_ref.is_empty() {
            println!("  No character generation in progress.");
        } else {
            println!(
                "  No run in progress. Setup: table {}, {} cards per draw, {} rolls.",
                state.setup.table_ref, state.setup.choices_per_draw, state.setup.max_rolls
            );
        }
        return Ok(());
    };

    super::print_run(&run);
    println!("  {} {}", "Choices made:".bold(), run.rolls_used());

    if !run.biography.is_empty() {
        println!();
        println!("  {}", "Biography".bold().underline());
        for line in &run.biography {
            println!("  - {line}");
        }
    }

    if !run.gate_log.is_empty() {
        println!();
        println!("  {}", "Status gate".bold().underline());
        for note in &run.gate_log {
            println!("  {}", note.dimmed());
        }
    }
    Ok(())
}

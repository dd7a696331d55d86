use colored::Colorize;

use lw_chargen::{ChargenSession, ChooseOutcome};

use super::{ConsoleNotifier, SessionArgs, SummaryFormat, Workspace};

pub fn run(args: &SessionArgs, number: usize, format: SummaryFormat) -> Result<(), String> {
    let mut ws = Workspace::load(args)?;
    let config = ws.config();
    let notifier = ConsoleNotifier;

    // Card numbers start at 1; 0 falls outside the offer and ends the run.
    let index = number.checked_sub(1).unwrap_or(usize::MAX);
    let (outcome, run) = {
        let mut session =
            ChargenSession::open(&mut ws.character, &ws.library, config).with_notifier(&notifier);
        let outcome = session.choose(index).map_err(|e| e.to_string())?;
        let run = session.state().map_err(|e| e.to_string())?.run;
        (outcome, run)
    };
    ws.save()?;

    match outcome {
        ChooseOutcome::Advanced { table_ref, .. } => {
            println!("  {} {}", "Next table:".bold(), table_ref);
            if let Some(run) = &run {
                if let Some(line) = run.biography.last() {
                    println!("  {}", line.dimmed());
                }
                println!();
                super::print_run(run);
            }
        }
        ChooseOutcome::Finished(summary) => {
            println!();
            super::print_summary(&summary, format);
        }
    }
    Ok(())
}

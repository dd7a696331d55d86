use lw_chargen::ChargenSession;

use super::{ConsoleNotifier, SessionArgs, SummaryFormat, Workspace};

pub fn run(args: &SessionArgs, format: SummaryFormat) -> Result<(), String> {
    let mut ws = Workspace::load(args)?;
    let config = ws.config();
    let notifier = ConsoleNotifier;

    let summary = ChargenSession::open(&mut ws.character, &ws.library, config)
        .with_notifier(&notifier)
        .finish()
        .map_err(|e| e.to_string())?;
    ws.save()?;

    println!();
    super::print_summary(&summary, format);
    Ok(())
}

use lw_chargen::ChargenSession;

use super::{ConsoleNotifier, SessionArgs, Workspace};

pub fn run(args: &SessionArgs) -> Result<(), String> {
    let mut ws = Workspace::load(args)?;
    let config = ws.config();
    let notifier = ConsoleNotifier;

    let run = ChargenSession::open(&mut ws.character, &ws.library, config)
        .with_notifier(&notifier)
        .reset()
        .map_err(|e| e.to_string())?;
    ws.save()?;

    match run {
        Some(run) => {
            println!();
            super::print_run(&run);
        }
        None => println!("  No setup to restart from; run `lw start` first."),
    }
    Ok(())
}

use colored::Colorize;

use lw_chargen::ChargenSession;

use super::{ConsoleNotifier, SessionArgs, SetupArgs, Workspace};

pub fn run(args: &SessionArgs, setup: &SetupArgs, setup_only: bool) -> Result<(), String> {
    let mut ws = Workspace::load(args)?;
    let config = ws.config();
    let notifier = ConsoleNotifier;
    let setup = setup.to_setup();

    let run = {
        let mut session =
            ChargenSession::open(&mut ws.character, &ws.library, config).with_notifier(&notifier);
        if setup_only {
            session.configure(setup).map_err(|e| e.to_string())?;
            None
        } else {
            Some(session.start(setup).map_err(|e| e.to_string())?)
        }
    };
    ws.save()?;

    match run {
        Some(run) => {
            println!(
                "  {} character generation for {}",
                "Started".bold(),
                ws.character.name.bold()
            );
            println!();
            super::print_run(&run);
        }
        None => println!("  Setup saved for {}.", ws.character.name),
    }
    Ok(())
}

pub mod choose;
pub mod decode;
pub mod finish;
pub mod reroll;
pub mod reset;
pub mod show;
pub mod start;
pub mod tables;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use lw_chargen::{ChargenConfig, ChargenSetup, ContactTables, Run, Summary};
use lw_core::{Character, Notification, Notifier, TableLibrary};

/// Where the character and tables live.
#[derive(Args)]
pub struct SessionArgs {
    /// Character JSON file
    #[arg(short, long)]
    pub character: PathBuf,

    /// Directory of table JSON files
    #[arg(short, long, default_value = ".")]
    pub tables: PathBuf,

    /// RNG seed for reproducible draws
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Run setup flags for `start`.
#[derive(Args)]
pub struct SetupArgs {
    /// Starting table (id, `RollTable.<id>`, or name)
    #[arg(long)]
    pub table: String,

    /// Cards offered per draw
    #[arg(long, default_value = "2")]
    pub choices: u32,

    /// Total choices in the run
    #[arg(long, default_value = "10")]
    pub rolls: u32,

    /// Default profession table for contacts
    #[arg(long)]
    pub profession_table: Option<String>,

    /// Default region table for contacts
    #[arg(long)]
    pub region_table: Option<String>,

    /// Default connection table for contacts
    #[arg(long)]
    pub connection_table: Option<String>,

    /// Default table for bodily changes
    #[arg(long)]
    pub body_table: Option<String>,

    /// Default table for misc rewards
    #[arg(long)]
    pub misc_table: Option<String>,

    /// Default table for items
    #[arg(long)]
    pub item_table: Option<String>,
}

impl SetupArgs {
    pub fn to_setup(&self) -> ChargenSetup {
        let mut setup = ChargenSetup::new(&self.table)
            .with_choices(self.choices)
            .with_max_rolls(self.rolls);
        if self.profession_table.is_some()
            || self.region_table.is_some()
            || self.connection_table.is_some()
        {
            setup = setup.with_contact_tables(ContactTables {
                profession: self.profession_table.clone(),
                region: self.region_table.clone(),
                connection: self.connection_table.clone(),
            });
        }
        if let Some(t) = &self.body_table {
            setup = setup.with_body_table(t);
        }
        if let Some(t) = &self.misc_table {
            setup = setup.with_misc_table(t);
        }
        if let Some(t) = &self.item_table {
            setup = setup.with_item_table(t);
        }
        setup
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SummaryFormat {
    Markdown,
    Text,
}

/// A loaded character file plus its table directory.
pub struct Workspace {
    pub character: Character,
    pub library: TableLibrary,
    path: PathBuf,
    seed: Option<u64>,
}

impl Workspace {
    pub fn load(args: &SessionArgs) -> Result<Self, String> {
        let character = Character::load(&args.character).map_err(|e| e.to_string())?;
        let library = TableLibrary::load_dir(&args.tables).map_err(|e| e.to_string())?;
        Ok(Self {
            character,
            library,
            path: args.character.clone(),
            seed: args.seed,
        })
    }

    pub fn config(&self) -> ChargenConfig {
        match self.seed {
            Some(seed) => ChargenConfig::default().with_seed(seed),
            None => ChargenConfig::default(),
        }
    }

    pub fn save(&self) -> Result<(), String> {
        self.character.save(&self.path).map_err(|e| e.to_string())
    }
}

/// Prints informational notifications to stdout.
///
/// Errors are reported by `main` on exit and summaries by the command that
/// produced them, in the format the user asked for.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn post(&self, notification: Notification) {
        if let Notification::Info(message) = notification {
            println!("  {}", message.green());
        }
    }
}

/// Print the offer and budget of a run.
pub fn print_run(run: &Run) {
    println!(
        "  {} {}   {} {}   {} {}",
        "Table:".bold(),
        run.current_table_ref,
        "Rolls left:".bold(),
        run.remaining_global_rolls,
        "Lucky:".bold(),
        if run.lucky_streak { "yes" } else { "no" },
    );
    println!();

    if run.is_finished() {
        println!("  {}", "Run finished.".dimmed());
        return;
    }
    if run.offered_cards.is_empty() {
        println!("  No cards on offer. Choose any number to finish.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Card", "Tags", "Text"]);
    for (i, card) in run.offered_cards.iter().enumerate() {
        let text = if card.text().chars().count() > 60 {
            format!("{}...", card.text().chars().take(57).collect::<String>())
        } else {
            card.text().to_string()
        };
        table.add_row(vec![
            (i + 1).to_string(),
            card.title().to_string(),
            card.choice.tags.join(", "),
            text,
        ]);
    }
    println!("{table}");
}

pub fn print_summary(summary: &Summary, format: SummaryFormat) {
    match format {
        SummaryFormat::Markdown => print!("{}", summary.export_markdown()),
        SummaryFormat::Text => print!("{}", summary.export_text()),
    }
}

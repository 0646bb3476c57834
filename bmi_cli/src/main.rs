use bmi_core::*;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "Body mass index calculator with a persistent history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute BMI for a measurement and add it to the history
    Calc {
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Height in centimetres
        #[arg(long)]
        height: f64,

        /// Age in years
        #[arg(long, default_value_t = 25)]
        age: u32,

        #[arg(long, value_enum, default_value_t = GenderArg::Female)]
        gender: GenderArg,

        /// Name shown alongside the result
        #[arg(long)]
        name: Option<String>,
    },

    /// List past results, newest first (default)
    History,

    /// Delete a history entry by id
    Delete {
        /// Entry id as shown by `history`
        id: String,
    },

    /// Export the history to a CSV file
    Export {
        /// Destination CSV path
        path: PathBuf,
    },

    /// Show the configured profile
    Profile,
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

fn main() -> Result<()> {
    bmi_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);
    let mut session = open_session(data_dir, &config);

    match cli.command {
        Some(Commands::Calc {
            weight,
            height,
            age,
            gender,
            name,
        }) => {
            let input = MeasurementInput {
                name,
                age,
                gender: gender.into(),
                weight_kg: weight,
                height_cm: height,
            };
            cmd_calc(&mut session, input);
        }
        Some(Commands::History) | None => cmd_history(&mut session),
        Some(Commands::Delete { id }) => cmd_delete(&mut session, &id),
        Some(Commands::Export { path }) => cmd_export(&session, &path)?,
        Some(Commands::Profile) => cmd_profile(&mut session, &config),
    }

    Ok(())
}

fn open_session(data_dir: PathBuf, config: &Config) -> SessionController<JsonFileBackend> {
    let backend = JsonFileBackend::new(data_dir);
    let history = HistoryStore::open(backend, config.data.history_key.clone());
    SessionController::new(history, config.display.date_format.clone())
}

fn cmd_calc(session: &mut SessionController<JsonFileBackend>, input: MeasurementInput) {
    let record = session.submit_measurement(input);
    display_result(&record);
    println!("✓ Saved to history ({} entries)", session.state().history.len());
}

fn cmd_history(session: &mut SessionController<JsonFileBackend>) {
    session.navigate(View::History);
    let history = session.state().history;

    if history.is_empty() {
        println!("No history yet. Run `bmi calc` to add a result.");
        return;
    }

    println!("{} result(s), newest first:\n", history.len());
    for record in history {
        println!(
            "  {:>5.1}  {:<14} {}",
            record.bmi,
            record.category.label(),
            record.display_date
        );
        println!("         {}", record.summary_line());
        println!("         id: {}", record.id);
        println!();
    }
}

fn cmd_delete(session: &mut SessionController<JsonFileBackend>, id: &str) {
    session.navigate(View::History);
    let existed = session.history().get(id).is_some();
    session.delete_history_entry(id);

    if existed {
        println!("✓ Deleted {}", id);
    } else {
        println!("No history entry with id {} - nothing deleted.", id);
    }
}

fn cmd_export(session: &SessionController<JsonFileBackend>, path: &std::path::Path) -> Result<()> {
    let count = write_history_csv(session.state().history, path)?;
    println!("✓ Exported {} records", count);
    println!("  CSV: {}", path.display());
    Ok(())
}

fn cmd_profile(session: &mut SessionController<JsonFileBackend>, config: &Config) {
    session.navigate(View::Profile);
    let profile = &config.profile;

    if profile.name.is_none() && profile.details.is_empty() {
        println!("No profile configured.");
        println!("  Add a [profile] section to {}", Config::default_config_path().display());
        return;
    }

    if let Some(ref name) = profile.name {
        println!("  {}", name);
    }
    for detail in &profile.details {
        println!("  {}: {}", detail.label, detail.value);
    }
}

fn display_result(record: &ResultRecord) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  YOUR BMI");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {:.1}", record.bmi);
    println!("  {}", record.category.label());
    println!("  {}", record.summary_line());
    println!();
    println!("  {}", scale_line(record.category));
    println!(
        "  {:>15}{:>9}{:>9}",
        SCALE_TICKS[0], SCALE_TICKS[1], SCALE_TICKS[2]
    );
    println!();
    println!("  → Ideal weight: {}", record.ideal_weight_label);
    println!("  → {}", record.display_date);
    println!();
}

/// Four-band scale with the current band marked
fn scale_line(category: Category) -> String {
    let position = category.info().scale_position as usize;
    (0..4)
        .map(|band| if band == position { "[ ▲ ]" } else { "[   ]" })
        .collect::<Vec<_>>()
        .join("----")
}

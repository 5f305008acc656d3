use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod notifier;

#[derive(Parser)]
#[command(name = "habit", version, about = "Habit tracker CLI")]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new habit
    Add(commands::habit::AddArgs),
    /// List habits with today's status
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a habit
    Update(commands::habit::UpdateArgs),
    /// Delete a habit and its history
    Delete {
        /// Habit ID
        id: String,
    },
    /// Mark or unmark a habit as done
    Toggle {
        /// Habit ID
        id: String,
        /// Date to toggle (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Deactivate a habit without deleting it
    Archive {
        /// Habit ID
        id: String,
    },
    /// Reactivate an archived habit
    Activate {
        /// Habit ID
        id: String,
    },
    /// Streaks, progress and reports
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Show earned and locked badges
    Badges {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Notification settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Toggle the dark mode preference
    DarkMode,
    /// Send streak warnings and today's summary
    Remind,
    /// Export, import and reset habit data
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Add(args) => commands::habit::add(args),
        Commands::List { json } => commands::habit::list(json),
        Commands::Update(args) => commands::habit::update(args),
        Commands::Delete { id } => commands::habit::delete(&id),
        Commands::Toggle { id, date } => commands::habit::toggle(&id, date.as_deref()),
        Commands::Archive { id } => commands::habit::set_active(&id, false),
        Commands::Activate { id } => commands::habit::set_active(&id, true),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Badges { json } => commands::badges::run(json),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::DarkMode => commands::settings::dark_mode(),
        Commands::Remind => commands::remind::run(),
        Commands::Data { action } => commands::data::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

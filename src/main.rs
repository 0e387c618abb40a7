use anyhow::Result;
use clap::{Parser, Subcommand};

use moneyplan::cli::{
    handle_export_command, handle_module_command, handle_plan_command, handle_report_command,
    handle_reset, handle_signin, handle_signout, handle_signup, handle_transaction_command,
    handle_whoami,
};
use moneyplan::config::{paths::MoneyplanPaths, settings::Settings};
use moneyplan::storage::Storage;

#[derive(Parser)]
#[command(
    name = "moneyplan",
    version,
    about = "Percentage-based budget planning and tracking for the terminal",
    long_about = "Moneyplan partitions a total balance into named modules by \
                  percentage, records expenses and income against them, and \
                  tracks saving goals and emergency-fund thresholds from the \
                  command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Signup {
        /// Email address
        email: String,
        /// Currency code (USD, INR, EUR, GBP, JPY)
        #[arg(short, long)]
        currency: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long, env = "MONEYPLAN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign in to an existing account
    Signin {
        /// Email address
        email: String,
        /// Password (prompted when omitted)
        #[arg(long, env = "MONEYPLAN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out of the current session
    Signout,

    /// Show the signed-in user
    Whoami,

    /// Plan management commands
    #[command(subcommand)]
    Plan(moneyplan::cli::PlanCommands),

    /// Module management commands
    #[command(subcommand, alias = "mod")]
    Module(moneyplan::cli::ModuleCommands),

    /// Transaction commands
    #[command(subcommand, alias = "transaction")]
    Txn(moneyplan::cli::TransactionCommands),

    /// Report commands
    #[command(subcommand)]
    Report(moneyplan::cli::ReportCommands),

    /// Export commands
    #[command(subcommand)]
    Export(moneyplan::cli::ExportCommands),

    /// Delete every plan for the signed-in user
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = MoneyplanPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Signup {
            email,
            currency,
            password,
        }) => {
            handle_signup(&storage, &settings, &email, currency, password)?;
        }
        Some(Commands::Signin { email, password }) => {
            handle_signin(&storage, &email, password)?;
        }
        Some(Commands::Signout) => {
            handle_signout(&storage)?;
        }
        Some(Commands::Whoami) => {
            handle_whoami(&storage)?;
        }
        Some(Commands::Plan(cmd)) => {
            handle_plan_command(&storage, cmd)?;
        }
        Some(Commands::Module(cmd)) => {
            handle_module_command(&storage, cmd)?;
        }
        Some(Commands::Txn(cmd)) => {
            handle_transaction_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Reset { yes }) => {
            handle_reset(&storage, yes)?;
        }
        Some(Commands::Config) => {
            // Materialize the settings file so users have something to edit
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("Moneyplan Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!(
                "Initialized:    {}",
                if storage.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Default currency: {}", settings.default_currency.code());
            println!("  Date format:      {}", settings.date_format);
        }
        None => {
            println!("Moneyplan - Percentage-based budgeting for the terminal");
            println!();
            println!("Run 'moneyplan --help' for usage information.");
            println!("Run 'moneyplan signup <email>' to create an account.");
        }
    }

    Ok(())
}

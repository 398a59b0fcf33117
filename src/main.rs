use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fincalc::cli::calculate::CalculateArgs;
use fincalc::core::log::init_logging;
use fincalc::core::{CalculationMode, CalculationRequest};
use fincalc::{AppCommand, Backend};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct RemoteArgs {
    /// Calculate on a remote backend; the URL defaults to remote.base_url
    /// from the config, then FINCALC_API_URL
    #[arg(long, value_name = "URL", num_args = 0..=1)]
    remote: Option<Option<String>>,
}

impl From<RemoteArgs> for Backend {
    fn from(args: RemoteArgs) -> Backend {
        match args.remote {
            None => Backend::Local,
            Some(url) => Backend::Remote(url),
        }
    }
}

#[derive(Args)]
struct InputArgs {
    /// Monthly investment (sip) or loan amount (emi)
    #[arg(short, long)]
    amount: f64,

    /// Annual rate in percent
    #[arg(short, long)]
    rate: f64,

    /// Duration in years; fractions are allowed
    #[arg(short, long)]
    years: f64,

    /// Also print the yearly growth or monthly amortization table
    #[arg(short, long)]
    schedule: bool,

    #[command(flatten)]
    remote: RemoteArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Future value of a monthly investment plan
    Sip {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Monthly installment of a loan
    Emi {
        #[command(flatten)]
        input: InputArgs,

        /// Date the loan is disbursed (YYYY-MM-DD); dates the schedule rows
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
    /// Evaluate the scenarios saved in the configuration
    Scenarios {
        #[command(flatten)]
        remote: RemoteArgs,
    },
    /// Run the HTTP backend
    Serve {
        /// Address to bind, overriding server.host
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding server.port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn calculate_command(
    mode: CalculationMode,
    input: InputArgs,
    start_date: Option<NaiveDate>,
) -> AppCommand {
    AppCommand::Calculate {
        args: CalculateArgs {
            mode,
            request: CalculationRequest::new(input.amount, input.rate, input.years),
            schedule: input.schedule,
            start_date,
        },
        backend: input.remote.into(),
    }
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Setup => AppCommand::Setup,
            Commands::Sip { input } => calculate_command(CalculationMode::Sip, input, None),
            Commands::Emi { input, start_date } => {
                calculate_command(CalculationMode::Emi, input, start_date)
            }
            Commands::Scenarios { remote } => AppCommand::Scenarios {
                backend: remote.into(),
            },
            Commands::Serve { host, port } => AppCommand::Serve { host, port },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let serving = matches!(cli.command, Some(Commands::Serve { .. }));
    init_logging(cli.verbose, serving);

    let result = match cli.command {
        Some(cmd) => fincalc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

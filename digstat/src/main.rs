use clap::{Parser, Subcommand};
use digstat_core::cli;
use digstat_core::conf::ConfigOverrides;
use digstat_core::logging::init_cli_logging;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "digstat",
    version,
    about = "Digstat: access-log PV/UV counters"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tail the access log and count page views (default)
    Run {
        /// Path to the Digstat config file
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },

    /// Print the counters for the current day, hour and minute
    Report {
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Resource id whose own score is shown next to each total
        #[arg(long, default_value_t = 1)]
        member: i64,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCmd {
    /// Validate a config file and print what would run
    Check {
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Run { config, overrides }) => cli::run::run(config.as_deref(), overrides),

        Some(Command::Config {
            cmd: ConfigCmd::Check { config, overrides },
        }) => cli::config::check(config.as_deref(), overrides),

        Some(Command::Report {
            config,
            overrides,
            member,
            json,
        }) => {
            init_cli_logging();
            cli::report::report(config.as_deref(), overrides, member, json)
        }

        None => cli::run::run(None, ConfigOverrides::default()),
    };

    if let Err(e) = result {
        eprintln!("digstat: {e:#}");
        std::process::exit(1);
    }
}

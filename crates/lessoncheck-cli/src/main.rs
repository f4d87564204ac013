//! lessoncheck CLI: run and check lesson quizzes from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod console;

use commands::BankFilter;

#[derive(Parser)]
#[command(
    name = "lessoncheck",
    version,
    about = "Quiz and knowledge-check runner for lesson banks"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate lesson files
    Validate {
        /// Path to a lesson file or directory (default: banks_dir from config)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Take a quiz interactively
    Take {
        /// Path to a lesson file
        #[arg(long)]
        bank: PathBuf,

        /// Run the lesson's inline knowledge checks before the quiz
        #[arg(long)]
        with_checks: bool,

        /// Save the attempt record to output_dir
        #[arg(long)]
        save: bool,

        /// Directory for the saved attempt record (implies --save)
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: BankFilter,
    },

    /// Grade a comma-separated list of answers without prompting
    Grade {
        /// Path to a lesson file
        #[arg(long)]
        bank: PathBuf,

        /// 1-based option numbers, one per question (e.g. "1,3,2")
        #[arg(long)]
        answers: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit code 1 if the attempt does not reach the pass mark
        #[arg(long)]
        fail_under_pass: bool,

        #[command(flatten)]
        filter: BankFilter,
    },

    /// Create starter config and example lesson bank
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    #[value(alias = "md")]
    Markdown,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "lessoncheck=info"
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Validate { bank } => commands::validate::execute(bank, config),
        Commands::Take {
            bank,
            with_checks,
            save,
            output,
            filter,
        } => commands::take::execute(bank, with_checks, save, output, filter, config),
        Commands::Grade {
            bank,
            answers,
            format,
            fail_under_pass,
            filter,
        } => commands::grade::execute(bank, answers, format, fail_under_pass, filter, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

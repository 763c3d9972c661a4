//! paperly CLI — generate, merge, store, and practice question papers.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use paperly_core::model::PaperId;

mod commands;

use commands::ParamsArgs;

#[derive(Parser)]
#[command(name = "paperly", version, about = "Question paper generator and practice tool")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a candidate paper
    Generate {
        #[command(flatten)]
        params: ParamsArgs,

        /// Write the candidate paper as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save the paper to the store
        #[arg(long)]
        save: bool,
    },

    /// Merge stored papers into a new one
    Merge {
        /// Ids of the papers to merge, in order
        #[arg(required = true)]
        ids: Vec<PaperId>,

        /// Title for the merged paper (default: suggested)
        #[arg(long)]
        title: Option<String>,

        /// Subject for the merged paper (default: suggested)
        #[arg(long)]
        subject: Option<String>,

        /// Grade for the merged paper (default: suggested)
        #[arg(long)]
        grade: Option<String>,

        /// Save the merged paper to the store
        #[arg(long)]
        save: bool,
    },

    /// Apply a JSON list of edits to a copy of a stored paper
    Edit {
        /// Paper to start from
        id: PaperId,

        /// JSON file holding the edits
        #[arg(long)]
        edits: PathBuf,

        /// Write the edited paper as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save the edited paper as a new paper
        #[arg(long)]
        save: bool,
    },

    /// List stored papers
    List {
        /// Only papers created by the configured identity
        #[arg(long)]
        mine: bool,
    },

    /// Search stored papers by title
    Search {
        /// Text to look for in titles
        term: String,
    },

    /// Show one stored paper
    Show {
        id: PaperId,

        /// Print the paper as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a candidate paper JSON file
    Validate {
        /// Path to the paper JSON
        file: PathBuf,
    },

    /// Practice a stored or freshly generated paper
    Practice {
        /// Stored paper to practice; generates one from the paper flags otherwise
        #[arg(long)]
        paper: Option<PaperId>,

        #[command(flatten)]
        params: ParamsArgs,
    },

    /// Create starter config and example params file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paperly=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Generate {
            params,
            output,
            save,
        } => commands::generate::execute(params, output, save, config).await,
        Commands::Merge {
            ids,
            title,
            subject,
            grade,
            save,
        } => commands::merge::execute(ids, title, subject, grade, save, config).await,
        Commands::Edit {
            id,
            edits,
            output,
            save,
        } => commands::edit::execute(id, edits, output, save, config).await,
        Commands::List { mine } => commands::papers::list(mine, config).await,
        Commands::Search { term } => commands::papers::search(term, config).await,
        Commands::Show { id, json } => commands::papers::show(id, json, config).await,
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Practice { paper, params } => {
            commands::practice::execute(paper, params, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

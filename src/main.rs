use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wit::areas::repository::Repository;
use wit::commands::porcelain::checkout::CheckoutOutcome;
use wit::errors::WitError;

const LOG_ENV: &str = "WIT_LOG";

#[derive(Parser)]
#[command(
    name = "wit",
    version = "0.1.0",
    about = "A minimal snapshot-based version control system",
    long_about = "wit keeps full copies of the staged tree as commits, tracks branches \
    as named pointers into the commit graph and can check out or merge them.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    /// Run as if started in this directory
    #[arg(short = 'C', long = "path", global = true)]
    path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .wit control directory in the current directory \
        or at the path given with --path. Running it again changes nothing."
    )]
    Init,
    #[command(
        name = "add",
        about = "Add files or directories to the staging area",
        long_about = "This command copies the given paths from the working tree into the staging area. \
        A directory replaces its staged copy wholesale."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The paths to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "rm",
        about = "Remove files or directories from the staging area",
        long_about = "This command removes the given paths from the staging area only. \
        The working tree is left untouched."
    )]
    Rm {
        #[arg(index = 1, required = true, help = "The paths to unstage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the staging area as a new commit on top of HEAD."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        text: Option<String>,
        #[arg(
            short,
            long,
            conflicts_with = "text",
            required_unless_present = "text",
            help = "The commit message"
        )]
        message: Option<String>,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command lists staged changes, unstaged changes and untracked files."
    )]
    Status,
    #[command(
        name = "branch",
        about = "Point a branch at the current HEAD",
        long_about = "This command creates the branch, or moves it if it already exists, \
        so that it points at the current HEAD commit."
    )]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Switch the working tree to a branch or commit",
        long_about = "This command restores the working tree and staging area to the snapshot \
        of a branch or commit id. It refuses to run while there are pending changes."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch name or commit id")]
        target: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the active branch",
        long_about = "This command records a merge commit whose tree is the merged branch's snapshot. \
        The working tree follows it unless local changes would be lost."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
    #[command(
        name = "graph",
        about = "Print the commit graph as Graphviz DOT",
        long_about = "This command prints every ancestor of HEAD and the references pointing at them \
        in DOT format, ready to be piped into Graphviz."
    )]
    Graph {
        #[arg(short, long, help = "Abbreviate commit ids")]
        short: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let path = match cli.path {
        Some(path) => path,
        None => std::env::current_dir().context("failed to read the current directory")?,
    };
    let repository = Repository::new(&path, Box::new(std::io::stdout()))
        .with_context(|| format!("failed to open repository at {}", path.display()))?;

    match &cli.command {
        Commands::Init => repository.init().await?,
        Commands::Add { paths } => repository.add(paths).await?,
        Commands::Rm { paths } => repository.rm(paths).await?,
        Commands::Commit { text, message } => {
            let message = message.as_deref().or(text.as_deref()).unwrap_or_default();
            repository.commit(message).await?;
        }
        Commands::Status => {
            repository.status().await?;
        }
        Commands::Branch { name } => repository.branch(name)?,
        Commands::Checkout { target } => {
            if let CheckoutOutcome::Blocked(pending) = repository.checkout(target).await? {
                return Err(WitError::UncommittedChangesBlockCheckout(pending.paths()).into());
            }
        }
        Commands::Merge { branch } => {
            repository.merge(branch).await?;
        }
        Commands::Graph { short } => {
            repository.graph(*short)?;
        }
    }

    Ok(())
}

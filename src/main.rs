use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::{PagerWriter, page, should_page};
use gitlet::errors;
use is_terminal::IsTerminal;
use minus::Pager;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GITLET_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A tiny local version-control system",
    long_about = "Gitlet snapshots the files of the current directory into content-addressed \
    commits, keeps a staging area of pending changes, and restores files or whole branches \
    from any recorded snapshot.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates a .gitlet directory in the current directory, \
        with a single root commit on the master branch."
    )]
    Init,
    #[command(
        name = "add",
        about = "Stage a file for the next commit",
        long_about = "This command copies the current content of a file into the staging area. \
        Adding a file identical to the committed version unstages it instead."
    )]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage it for removal",
        long_about = "This command unstages a file staged for addition. If the file is tracked \
        by the head commit it is also staged for removal and deleted from the working directory."
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes as a new commit",
        long_about = "This command creates a new commit from the head commit and the staging area, \
        and advances the checked-out branch to it."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(
        name = "log",
        about = "Show the history of the checked-out branch",
        long_about = "This command lists the commits from the head back to the root commit."
    )]
    Log,
    #[command(
        name = "global-log",
        about = "Show every commit ever made",
        long_about = "This command lists every commit in the commit store, in no particular order."
    )]
    GlobalLog,
    #[command(
        name = "find",
        about = "Print the ids of commits with the given message",
        long_about = "This command prints the id of every commit whose message matches exactly."
    )]
    Find {
        #[arg(index = 1, help = "The commit message to look for")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show branches, staged files and working tree changes"
    )]
    Status,
    #[command(
        name = "branch",
        about = "Create a new branch at the head commit",
        long_about = "This command creates a branch pointing at the head commit. \
        It does not switch to the new branch."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the new branch")]
        name: String,
    },
    #[command(
        name = "rm-branch",
        about = "Delete a branch",
        long_about = "This command deletes a branch pointer. The commits it pointed at are kept."
    )]
    RmBranch {
        #[arg(index = 1, help = "The name of the branch to delete")]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the head commit.\n\
        checkout <commit-id> -- <file> restores a file from the given commit.\n\
        checkout <branch> switches to the given branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A commit id (with -- <file>) or a branch name")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_repository(writer: Box<dyn std::io::Write>) -> anyhow::Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), writer)
}

fn run_paged(
    stdout_is_terminal: bool,
    command: impl FnOnce(&Repository) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    if should_page(stdout_is_terminal) {
        let pager = Pager::new();
        let repository = open_repository(Box::new(PagerWriter::new(pager.clone())))?;
        command(&repository)?;
        page(pager)
    } else {
        let repository = open_repository(Box::new(std::io::stdout()))?;
        command(&repository)
    }
}

fn run(cli: Cli, stdout_is_terminal: bool) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Log => return run_paged(stdout_is_terminal, Repository::log),
        Commands::GlobalLog => return run_paged(stdout_is_terminal, Repository::global_log),
        _ => {}
    }

    let repository = open_repository(Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(file),
        Commands::Rm { file } => repository.rm(file),
        Commands::Commit { message } => repository.commit(message.as_deref().unwrap_or_default()),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status(),
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file(file),
            (Some(revision), Some(file)) => repository.checkout_commit_file(revision, file),
            (Some(branch), None) => repository.checkout_branch(branch),
            (None, None) => Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "checkout needs a branch name or -- <file>",
                )
                .exit(),
        },
        Commands::Log | Commands::GlobalLog => Ok(()),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let stdout_is_terminal = std::io::stdout().is_terminal();
    if !stdout_is_terminal {
        colored::control::set_override(false);
    }

    match run(cli, stdout_is_terminal) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match errors::classify(&error) {
                Some(gitlet_error) => println!("{}", gitlet_error),
                None => eprintln!("fatal: {:#}", error),
            }
            ExitCode::FAILURE
        }
    }
}

use crate::areas::repository::Repository;
use crate::errors::RepoError;
use anyhow::Result;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;
mod errors;

#[derive(Parser)]
#[command(
    name = "mygit",
    version = "0.1.0",
    about = "A minimal content-addressed version control engine",
    long_about = "A minimal version control engine keeping an on-disk store of \
    immutable blobs, trees, and commits identified by the hash of their serialized \
    form, together with a staging index and a linear history. \
    The repository lives in a .mygit directory in the current working directory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
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
        long_about = "Creates the .mygit directory layout in the current directory. \
        Refuses to run when a repository already exists."
    )]
    Init,
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, help = "Write the blob to the object database")]
        write: bool,
        #[arg(index = 1, help = "The file to hash")]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, size, or type of an object"
    )]
    CatFile {
        #[arg(short = 'p', help = "Print the object content")]
        pretty: bool,
        #[arg(short = 's', help = "Print the payload size in bytes")]
        size: bool,
        #[arg(short = 't', help = "Print the object type")]
        kind: bool,
        #[arg(index = 1, help = "The 40-hex object id")]
        sha: String,
    },
    #[command(
        name = "add",
        about = "Add files or directories to the index",
        long_about = "Stages the given files, recursively stages directories, or \
        stages the whole working tree for '.'. Hidden paths are skipped."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "write-tree",
        about = "Write a tree object from the current working directory"
    )]
    WriteTree,
    #[command(name = "ls-tree", about = "List the entries of a tree object")]
    LsTree {
        #[arg(long, help = "Print only entry names")]
        name_only: bool,
        #[arg(index = 1, help = "The 40-hex tree id")]
        sha: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit from the staged entries"
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: Option<String>,
    },
    #[command(name = "log", about = "Show the commit history, newest first")]
    Log,
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(
        name = "show",
        about = "Show a commit (default HEAD) with its diff against the parent"
    )]
    Show {
        #[arg(index = 1, help = "The 40-hex commit id")]
        sha: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Restore a commit's tree into the working directory and move HEAD"
    )]
    Checkout {
        #[arg(index = 1, help = "The 40-hex commit id")]
        sha: String,
    },
    #[command(
        name = "reset",
        about = "Unstage files, or reset HEAD and the working tree",
        long_about = "With no arguments, clears the index. With --hard and an \
        optional commit sha, restores that commit (default HEAD) and clears the \
        index. With a lone commit sha, moves HEAD to it and clears the index. \
        Anything else is treated as paths to reset to their HEAD version."
    )]
    Reset {
        #[arg(long, help = "Reset the working tree as well (destructive)")]
        hard: bool,
        #[arg(index = 1, help = "A commit sha and/or paths")]
        args: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;
    let writer = Box::new(std::io::stdout());

    match &cli.command {
        Commands::Init => Repository::new(pwd, writer).init()?,
        Commands::HashObject { write, file } => {
            Repository::open(pwd, writer)?.hash_object(file, *write)?
        }
        Commands::CatFile {
            pretty,
            size,
            kind,
            sha,
        } => {
            if !pretty && !size && !kind {
                return Err(RepoError::Usage(
                    "mygit cat-file {-p|-s|-t} <object-sha>".to_string(),
                )
                .into());
            }
            Repository::open(pwd, writer)?.cat_file(sha, *pretty, *size, *kind)?
        }
        Commands::Add { paths } => Repository::open(pwd, writer)?.add(paths)?,
        Commands::WriteTree => Repository::open(pwd, writer)?.write_tree()?,
        Commands::LsTree { name_only, sha } => {
            Repository::open(pwd, writer)?.ls_tree(sha, *name_only)?
        }
        Commands::Commit { message } => {
            Repository::open(pwd, writer)?.commit(message.as_deref())?
        }
        Commands::Log => Repository::open(pwd, writer)?.log()?,
        Commands::Status => Repository::open(pwd, writer)?.status()?,
        Commands::Show { sha } => Repository::open(pwd, writer)?.show(sha.as_deref())?,
        Commands::Checkout { sha } => Repository::open(pwd, writer)?.checkout(sha)?,
        Commands::Reset { hard, args } => Repository::open(pwd, writer)?.reset(*hard, args)?,
    }

    Ok(())
}

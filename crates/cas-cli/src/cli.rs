use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "casd",
    about = "Content-addressable blob store daemon",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP blob server
    Serve(ServeArgs),
    /// Print the blob name of a local file
    Name(NameArgs),
    /// Show where a blob is stored on disk
    Locate(LocateArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// host:port to listen on
    #[arg(long)]
    pub listen: Option<SocketAddr>,
    /// Root directory to store blobs in
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// TOML configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Realm advertised in authentication challenges
    #[arg(long)]
    pub realm: Option<String>,
}

#[derive(Args)]
pub struct NameArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct LocateArgs {
    /// Bare blob name, e.g. sha1-<40 hex digits>
    pub name: String,
    #[arg(long, default_value = "/tmp/casroot")]
    pub root: PathBuf,
}

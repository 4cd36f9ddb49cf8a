use std::path::Path;

use anyhow::Context;
use cas_crypto::DigestRegistry;
use cas_server::{CasServer, ServerConfig};
use cas_types::{HashFamily, ObjectRef};
use colored::Colorize;

use crate::cli::*;

/// Environment variable holding the shared secret.
pub const SHARED_SECRET_ENV: &str = "CASD_SHARED_SECRET";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Name(args) => cmd_name(args),
        Command::Locate(args) => cmd_locate(args),
    }
}

/// Layer defaults, the optional config file, flags and the secret from the
/// environment, then validate. A non-empty secret in the environment wins
/// over `shared_secret` in the file; one of the two must be set.
fn build_config(args: &ServeArgs, secret: Option<String>) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(listen) = args.listen {
        config.bind_addr = listen;
    }
    if let Some(root) = &args.root {
        config.storage_root = root.clone();
    }
    if let Some(realm) = &args.realm {
        config.realm = realm.clone();
    }
    if let Some(secret) = secret.filter(|s| !s.is_empty()) {
        config.shared_secret = secret;
    }
    if config.shared_secret.is_empty() {
        anyhow::bail!(
            "no shared secret: set {SHARED_SECRET_ENV} or shared_secret in the config file"
        );
    }
    config.validate()?;
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = build_config(&args, std::env::var(SHARED_SECRET_ENV).ok())?;
    println!(
        "{} Serving blobs from {} on {}",
        "✓".green().bold(),
        config.storage_root.display().to_string().bold(),
        format!("http://{}/", config.bind_addr).cyan()
    );
    let runtime = tokio::runtime::Runtime::new().context("unable to start runtime")?;
    runtime.block_on(CasServer::new(config).serve())?;
    Ok(())
}

fn name_of(path: &Path) -> anyhow::Result<ObjectRef> {
    let runtime = tokio::runtime::Runtime::new().context("unable to start runtime")?;
    let digest = runtime.block_on(async {
        let mut file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("unable to open {}", path.display()))?;
        let digest = DigestRegistry::default()
            .digest_reader(HashFamily::Sha1, &mut file)
            .await?;
        Ok::<_, anyhow::Error>(digest)
    })?;
    Ok(ObjectRef::from_name(&format!("{}-{digest}", HashFamily::Sha1))?)
}

fn cmd_name(args: NameArgs) -> anyhow::Result<()> {
    let oref = name_of(&args.file)?;
    println!("{}", oref.to_string().yellow());
    Ok(())
}

fn cmd_locate(args: LocateArgs) -> anyhow::Result<()> {
    let oref: ObjectRef = args
        .name
        .parse()
        .with_context(|| format!("invalid blob name '{}'", args.name))?;
    let path = oref.final_path(&args.root);
    let state = if path.is_file() {
        "present".green()
    } else {
        "absent".red()
    };
    println!("{} ({})", path.display().to_string().bold(), state);
    Ok(())
}

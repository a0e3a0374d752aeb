use super::progress::TerminalProgress;
use super::render::print_messages;
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use usergen::api::UsergenApi;
use usergen::config::{StoreConfig, UsergenConfig};
use usergen::error::{Result, UsergenError};
use usergen::roles::ConfiguredRoles;
use usergen::source::RecordSource;
use usergen::store::fs::FileStore;
use usergen::store::rest::WpRestStore;
use usergen::store::AccountStore;

struct AppContext {
    api: UsergenApi<dyn AccountStore, ConfiguredRoles>,
    source: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Generate { count } => handle_generate(&mut ctx, &count),
        Commands::Purge { yes } => handle_purge(&mut ctx, yes),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "usergen", "usergen")
        .ok_or_else(|| UsergenError::Config("could not determine a home directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = match &cli.config {
        Some(dir) => dir.clone(),
        None => project_dirs()?.config_dir().to_path_buf(),
    };
    let config = UsergenConfig::load(&config_dir)?;
    debug!(config_dir = %config_dir.display(), "loaded config");

    let store = open_store(cli.store.clone(), &config)?;
    let roles = ConfiguredRoles::new(config.roles.clone());
    let api = UsergenApi::new(store, roles, &config);

    Ok(AppContext {
        api,
        source: cli.source.clone().or_else(|| config.source.clone()),
    })
}

fn open_store(
    override_dir: Option<PathBuf>,
    config: &UsergenConfig,
) -> Result<Box<dyn AccountStore>> {
    let file_store = |root: PathBuf| -> Box<dyn AccountStore> {
        debug!(root = %root.display(), "using file store");
        Box::new(FileStore::new(root).with_default_role(&config.default_role))
    };

    if let Some(dir) = override_dir {
        return Ok(file_store(dir));
    }

    match &config.store {
        StoreConfig::File { path: Some(path) } => Ok(file_store(path.clone())),
        StoreConfig::File { path: None } => {
            Ok(file_store(project_dirs()?.data_dir().to_path_buf()))
        }
        StoreConfig::Rest {
            site_url,
            username,
            app_password,
        } => {
            let store = WpRestStore::new(site_url, username, app_password);
            debug!(endpoint = store.users_url(), "using REST store");
            Ok(Box::new(store))
        }
    }
}

fn handle_generate(ctx: &mut AppContext, count: &str) -> Result<()> {
    let source = match &ctx.source {
        Some(location) => RecordSource::parse(location),
        None => RecordSource::installed()?,
    };
    debug!(%source, "mock data source");

    let mut progress = TerminalProgress::new();
    let result = ctx.api.generate(count, &source, &mut progress)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_purge(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let mut progress = TerminalProgress::new();
    let result = ctx.api.purge(yes, &mut confirm_on_stdin, &mut progress)?;
    if !result.cancelled {
        println!();
    }
    print_messages(&result.messages);
    Ok(())
}

fn confirm_on_stdin(prompt: &str) -> Result<bool> {
    println!();
    print!("{} [y/n] ", prompt);
    io::stdout().flush().map_err(UsergenError::Io)?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(UsergenError::Io)?;

    Ok(matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

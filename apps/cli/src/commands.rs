//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use topicshelf_core::ContentRoot;
use topicshelf_markdown::RenderOptions;
use topicshelf_shared::{
    AppConfig, ServeConfig, ServeOverrides, config_file_path, init_config_at, load_config,
    load_config_from, resolve_content_dir,
};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Topicshelf: browse and search a directory of markdown topics.
#[derive(Parser)]
#[command(
    name = "topicshelf",
    version,
    about = "Serve a directory tree of markdown documents as browsable, searchable topics.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.topicshelf/topicshelf.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Content root directory.
    #[arg(long, env = "CONTENT_DIR", global = true)]
    pub content_dir: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the HTTP server.
    Serve {
        /// Interface to bind.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on.
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Built frontend directory served for non-API paths.
        #[arg(long, env = "FRONTEND_DIST")]
        frontend_dist: Option<PathBuf>,
    },

    /// List the child topics of a directory topic.
    List {
        /// Topic path (defaults to the content root).
        path: Option<String>,
    },

    /// Print a topic as JSON.
    Show {
        /// Topic path, e.g. `focus/pomodoro`.
        path: String,
    },

    /// Search topic documents.
    Search {
        /// Search terms; every term must appear.
        #[arg(required = true)]
        query: Vec<String>,

        /// Restrict the search to this topic path.
        #[arg(long)]
        scope: Option<String>,

        /// Maximum number of results (defaults to `search.max_results`).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "topicshelf=info,tower_http=info",
        1 => "topicshelf=debug,tower_http=debug",
        _ => "topicshelf=trace,tower_http=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = load_app_config(cli.config.as_deref())?;
    let content_dir = cli.content_dir;

    match cli.command {
        Command::Serve {
            host,
            port,
            frontend_dist,
        } => {
            let overrides = ServeOverrides {
                content_dir,
                host,
                port,
                frontend_dist,
            };
            cmd_serve(&config, overrides).await
        }
        Command::List { path } => {
            let content = content_root(content_dir.as_deref(), &config)?;
            cmd_list(&content, path.as_deref()).await
        }
        Command::Show { path } => {
            let content = content_root(content_dir.as_deref(), &config)?;
            cmd_show(&content, &path).await
        }
        Command::Search {
            query,
            scope,
            limit,
        } => {
            let content = content_root(content_dir.as_deref(), &config)?;
            let limit = limit.unwrap_or(config.search.max_results);
            cmd_search(&content, &query.join(" "), scope.as_deref(), limit).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(cli.config.as_deref()).await,
            ConfigAction::Show => cmd_config_show(&config).await,
        },
    }
}

/// An explicit `--config` must exist; the default location may be absent.
fn load_app_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

fn content_root(explicit: Option<&Path>, config: &AppConfig) -> Result<ContentRoot> {
    let dir = resolve_content_dir(explicit, config)?;
    debug!(dir = %dir.display(), "resolved content directory");
    Ok(ContentRoot::new(dir).with_render_options(RenderOptions {
        allow_raw_html: config.render.allow_raw_html,
    }))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_serve(config: &AppConfig, overrides: ServeOverrides) -> Result<()> {
    let serve_config = ServeConfig::resolve(config, overrides)?;
    info!(
        content_dir = %serve_config.content_dir.display(),
        bind_addr = %serve_config.bind_addr,
        "starting server"
    );
    topicshelf_server::serve(serve_config).await?;
    Ok(())
}

async fn cmd_list(content: &ContentRoot, path: Option<&str>) -> Result<()> {
    let topics = match path {
        Some(path) => content.list(path)?,
        None => content.list_root()?,
    };

    if topics.is_empty() {
        println!("No topics found.");
        return Ok(());
    }

    for topic in &topics {
        let marker = if topic.is_dir { "dir " } else { "doc " };
        println!("{marker} {:<28} {}", topic.slug, topic.title);
        if !topic.description.is_empty() {
            println!("     {:<28} {}", "", topic.description);
        }
    }
    Ok(())
}

async fn cmd_show(content: &ContentRoot, path: &str) -> Result<()> {
    let detail = content.topic(path)?;
    let json = serde_json::to_string_pretty(&detail).wrap_err("failed to serialize topic")?;
    println!("{json}");
    Ok(())
}

async fn cmd_search(
    content: &ContentRoot,
    query: &str,
    scope: Option<&str>,
    limit: usize,
) -> Result<()> {
    if limit == 0 {
        return Err(eyre!("--limit must be at least 1"));
    }

    let results = content.search(scope, query, limit)?;
    if results.is_empty() {
        println!("No matches for '{query}'.");
        return Ok(());
    }

    for result in &results {
        println!("{}  {}", result.path, result.title);
        println!("    {}", result.snippet);
    }
    Ok(())
}

async fn cmd_config_init(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };
    init_config_at(&path)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

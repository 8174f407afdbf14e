//! Community Hub CLI
//!
//! Command-line front end for the CommunityAPI backend:
//! - Browse communities and their posts, announcements and members
//! - Join and leave communities
//! - Create posts
//! - Show the dashboard and act on feed cards

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use community_hub::client::{FileTokenStore, HttpCommunityApi};
use community_hub::config::{generate_default_config, Config, LoggingConfig};
use community_hub::model::{CommunityId, PostId};
use community_hub::view::render;
use community_hub::{CommunityApi, CommunityBrowser, DashboardView, Tab};

#[derive(Parser)]
#[command(name = "community-hub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and join communities on a CommunityAPI server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./community-hub.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CommunityAPI base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all communities and the ones you have joined
    Communities,

    /// Show posts, announcements and members of a community
    Show {
        /// Community id
        id: CommunityId,
        /// Display name (default: looked up from the community list)
        #[arg(short, long)]
        name: Option<String>,
        /// Tab to show (posts, announcements, members)
        #[arg(short, long)]
        tab: Option<Tab>,
    },

    /// Join a community
    Join {
        id: CommunityId,
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Leave a community
    Leave {
        id: CommunityId,
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Create a post in a community
    Post {
        id: CommunityId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show the dashboard: profile, communities, post feed, notifications
    Dashboard,

    /// Join the community of a post in the dashboard feed
    FeedJoin {
        /// Post id
        post_id: PostId,
    },

    /// Store the bearer token used for API requests
    Login {
        #[arg(long)]
        token: String,
    },

    /// Remove the stored bearer token
    Logout,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::load_default().context("Failed to load config")?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_tracing(&config.logging);
    tracing::debug!(base_url = %config.api.base_url, "Using CommunityAPI");

    match cli.command {
        Commands::Login { token } => {
            let store = FileTokenStore::new(config.auth.token_file.clone());
            store.save(&token).context("Failed to store token")?;
            println!("Token saved to {:?}", store.path());
            return Ok(());
        }
        Commands::Logout => {
            let store = FileTokenStore::new(config.auth.token_file.clone());
            store.clear().context("Failed to remove token")?;
            println!("Logged out");
            return Ok(());
        }
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("Failed to create {:?}", parent))?;
                    }
                    std::fs::write(&path, &content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            return Ok(());
        }
        _ => {}
    }

    let api: Arc<dyn CommunityApi> = Arc::new(
        HttpCommunityApi::new(&config.api, config.token_source())
            .context("Failed to create HTTP client")?,
    );

    match cli.command {
        Commands::Communities => {
            let browser = CommunityBrowser::new(api);
            browser.fetch_and_render_communities().await;
            let snap = browser.snapshot().await;
            output(cli.format, browser.take_alerts().await, &snap, || {
                render::render_community_lists(&snap)
            })?;
        }

        Commands::Show { id, name, tab } => {
            let browser = CommunityBrowser::new(api);
            let name = resolve_name(&browser, id, name).await;
            browser.load_community_data(id, &name).await;
            if let Some(tab) = tab {
                browser.select_tab(tab).await;
            }
            let snap = browser.snapshot().await;
            output(cli.format, browser.take_alerts().await, &snap, || {
                render::render_community_detail(&snap)
            })?;
        }

        Commands::Join { id, name } => {
            let browser = CommunityBrowser::new(api);
            // Lists first so the joined cache can short-circuit duplicates
            browser.fetch_and_render_communities().await;
            let name = resolve_name(&browser, id, name).await;
            browser.add_to_joined_communities(id, &name).await;
            let snap = browser.snapshot().await;
            output(cli.format, browser.take_alerts().await, &snap, || {
                render::render_community_lists(&snap)
            })?;
        }

        Commands::Leave { id, name } => {
            let browser = CommunityBrowser::new(api);
            browser.fetch_and_render_communities().await;
            let name = resolve_name(&browser, id, name).await;
            browser.remove_from_joined_communities(id, &name).await;
            let snap = browser.snapshot().await;
            output(cli.format, browser.take_alerts().await, &snap, || {
                render::render_community_lists(&snap)
            })?;
        }

        Commands::Post {
            id,
            title,
            content,
            name,
        } => {
            let browser = CommunityBrowser::new(api);
            let name = resolve_name(&browser, id, name).await;
            browser.load_community_data(id, &name).await;
            browser.set_post_title(&title).await;
            browser.set_post_content(&content).await;
            browser.submit_post().await;
            let snap = browser.snapshot().await;
            output(cli.format, browser.take_alerts().await, &snap, || {
                render::render_community_detail(&snap)
            })?;
        }

        Commands::Dashboard => {
            let dashboard = DashboardView::new(api);
            dashboard.init().await;
            let snap = dashboard.snapshot().await;
            output(cli.format, dashboard.take_alerts().await, &snap, || {
                render::render_dashboard(&snap)
            })?;
        }

        Commands::FeedJoin { post_id } => {
            let dashboard = DashboardView::new(api);
            dashboard.init().await;
            dashboard.toggle_join(post_id).await;
            let snap = dashboard.snapshot().await;
            output(cli.format, dashboard.take_alerts().await, &snap, || {
                render::render_dashboard(&snap)
            })?;
        }

        Commands::Login { .. } | Commands::Logout | Commands::Config { .. } => {}
    }

    Ok(())
}

/// Logs go to stderr so rendered views on stdout stay clean
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("community_hub={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Use the given name, else the rendered list entry, else a generic label
async fn resolve_name(browser: &CommunityBrowser, id: CommunityId, name: Option<String>) -> String {
    if let Some(name) = name {
        return name;
    }

    let mut snap = browser.snapshot().await;
    if snap.all_communities.items().is_empty() {
        browser.render_all().await;
        snap = browser.snapshot().await;
    }

    snap.all_communities
        .items()
        .iter()
        .chain(snap.joined_communities.items())
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("Community {}", id))
}

fn output<T: Serialize>(
    format: OutputFormat,
    alerts: Vec<String>,
    snapshot: &T,
    render: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            for alert in &alerts {
                println!("! {}", alert);
            }
            if !alerts.is_empty() {
                println!();
            }
            print!("{}", render());
        }
        OutputFormat::Json => {
            let body = serde_json::json!({
                "alerts": alerts,
                "view": snapshot,
            });
            let text = serde_json::to_string_pretty(&body).context("Failed to encode output")?;
            println!("{}", text);
        }
    }
    Ok(())
}

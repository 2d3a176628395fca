//! Theme server binary - serves theme static resources

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quarto_theme::{server, ServerConfig, ThemeContext, ThemeDescriptor, ThemeSettings};

#[derive(Parser, Debug)]
#[command(name = "theme-server")]
#[command(about = "Serve theme static resources")]
struct Args {
    /// Theme configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short = 'P', long, default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Web document root (overrides the config file)
    #[arg(long)]
    docroot: Option<PathBuf>,

    /// Directory searched for themes (can be specified multiple times)
    #[arg(long = "search-path", value_name = "DIR")]
    search_paths: Vec<PathBuf>,

    /// Name of the untyped theme (overrides the config file)
    #[arg(long)]
    theme: Option<String>,

    /// Active theme type (overrides the config file)
    #[arg(long = "type", value_name = "TYPE")]
    theme_type: Option<String>,

    /// Additional template directory the theme templates are appended to
    #[arg(long = "template-path", value_name = "DIR")]
    template_paths: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quarto_theme=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "Loading theme configuration");
            ThemeSettings::load(path)?
        }
        None => ThemeSettings::default(),
    };

    // CLI flags override the config file; their paths are relative to the working directory
    let cwd = std::env::current_dir()?;
    if let Some(docroot) = args.docroot {
        settings.docroot = Some(cwd.join(docroot));
    }
    if !args.search_paths.is_empty() {
        settings.search_paths = args.search_paths.iter().map(|p| cwd.join(p)).collect();
    }
    if let Some(theme) = args.theme {
        settings.descriptor = Some(ThemeDescriptor::named(theme));
    }
    if let Some(theme_type) = args.theme_type {
        settings.active_type = Some(theme_type);
    }

    let ctx = ThemeContext::assemble(settings)?;

    // Fails when the active theme has no templates directory
    let template_paths = ctx.template_paths(args.template_paths)?;
    info!(paths = ?template_paths.paths(), "Template search paths");

    let config = ServerConfig {
        port: args.port,
        host: args.host,
    };

    server::run_server(ctx, config).await?;

    Ok(())
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Panogallery: 360° Sphere & Panorama Gallery
//!
//! Command line entry point: serve the gallery, inspect catalogs and
//! set up a new gallery folder.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use panogallery::catalog::{CatalogProvider, Category, ImageDescriptor};
use panogallery::config::AppConfig;
use panogallery::{GalleryError, Result};

/// Panogallery CLI - 360° Sphere & Panorama Gallery
#[derive(Parser, Debug)]
#[command(name = "panogallery")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "1.0.0")]
#[command(about = "Web gallery for 360° sphere and panorama photographs", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the gallery web server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Images root (overrides config)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },

    /// List the images of a category
    List {
        /// `sphere`, `panorama` or `all`
        #[arg(default_value = "all")]
        category: String,

        /// Images root (overrides config)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Initialize a new gallery
    Init {
        /// Directory to initialize (default: current)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Force overwrite existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Some(Commands::Serve { host, port, root, open }) => {
            run_serve(config, host, port, root, open).await
        }
        Some(Commands::List { category, root, format }) => {
            run_list(config, &category, root, &format)
        }
        Some(Commands::Init { dir, force }) => run_init(dir, force),
        Some(Commands::Config { action }) => run_config_command(config, action, &cli.config),
        None => run_serve(config, None, None, None, false).await,
    }
}

/// Start the web server with CLI overrides applied
async fn run_serve(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    root: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    info!("Panogallery v1.0.0");

    if let Some(host) = host {
        config.web.host = host;
    }
    if let Some(port) = port {
        config.web.port = port;
    }
    if let Some(root) = root {
        config.images_root = root;
    }

    if !config.images_root.exists() {
        info!("Images root {:?} does not exist yet, galleries will be empty", config.images_root);
    }

    if open {
        let url = format!("http://{}", config.bind_addr());
        if let Err(e) = open_browser(&url) {
            error!("Failed to open browser: {}", e);
        }
    }

    panogallery::web::start_server(config).await
}

/// Print catalogs to stdout
fn run_list(config: AppConfig, category: &str, root: Option<PathBuf>, format: &str) -> Result<()> {
    let provider = CatalogProvider::new(root.unwrap_or(config.images_root));

    let images: Vec<ImageDescriptor> = if category == "all" {
        provider.all_images()
    } else {
        let category: Category = category.parse()?;
        provider.scan(category)?.into_vec()
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }

    if images.is_empty() {
        println!("No images found under {:?}", provider.root());
        return Ok(());
    }

    println!("{:<10} {:<40} {}", "Category", "Filename", "Path");
    println!("{}", "-".repeat(80));
    for image in &images {
        println!("{:<10} {:<40} {}", image.category, image.filename, image.relative_path);
    }
    println!("\n{} image(s)", images.len());

    Ok(())
}

/// Initialize a new gallery directory
fn run_init(dir: Option<PathBuf>, force: bool) -> Result<()> {
    let target = dir.unwrap_or_else(|| PathBuf::from("."));
    let config_path = target.join("config.json");

    if config_path.exists() && !force {
        return Err(GalleryError::Config(
            "config.json already exists. Use --force to overwrite".to_string()
        ));
    }

    let images_root = target.join("public").join("images");
    for category in Category::ALL {
        std::fs::create_dir_all(images_root.join(category.as_str()))?;
    }

    let config = AppConfig {
        images_root: images_root.clone(),
        ..AppConfig::default()
    };
    config.save(&config_path)?;

    println!("Panogallery initialized in {:?}", target);
    println!("\nCreated:");
    println!("  - config.json");
    println!("  - {}", images_root.join("sphere").display());
    println!("  - {}", images_root.join("panorama").display());
    println!("\nNext steps:");
    println!("  1. Copy photos into the sphere/ and panorama/ folders");
    println!("  2. Start the gallery: panogallery serve");

    Ok(())
}

fn run_config_command(config: AppConfig, action: ConfigCommands, config_path: &Path) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}

fn open_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()?;
    }
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }
    Ok(())
}

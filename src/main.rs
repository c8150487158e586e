use clap::{Parser, Subcommand};
use gallery_pages::{backup, config, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gallery-pages")]
#[command(about = "Generate static album pages from a directory of images")]
#[command(long_about = "\
Generate static album pages from a directory of images

Every subdirectory of the images root is an album. Each album gets one HTML
page listing its images, and an overview page links all albums.

Project structure:

  ./
  ├── gallery.toml          # Optional config (see 'gallery-pages gen-config')
  ├── image/                # Images root (falls back to web/image/)
  │   ├── Home/
  │   │   └── c.gif
  │   └── Trip/
  │       ├── a.jpg
  │       └── b.png
  └── web/                  # Output directory
      ├── thumbs/Trip/a.jpg # Optional thumbnail, shown instead of the original
      ├── album1.htm        # Home
      ├── album2.htm        # Trip
      └── albums.htm        # Overview

Albums and images are sorted by name. Existing pages are renamed to
<name>.<YYYYMMDDHHMMSS>.bak before being regenerated.")]
#[command(version)]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file [default: <root>/gallery.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Write all album pages and the overview (default)
    Build,
    /// Show what a build would write, without writing
    Check,
    /// Print the resolved build plan as JSON
    Plan,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("gallery_pages=debug"))
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let (site_config, plan) = load(&cli)?;
            let stamp = backup::timestamp();
            let report = generate::build(&plan, &site_config, &stamp, output::print_build_event)?;
            if !plan.is_empty() {
                println!();
                output::print_summary(&report);
            }
            if !report.is_success() {
                return Err(format!(
                    "{} of {} outputs failed",
                    report.failures.len(),
                    report.failures.len() + report.written.len()
                )
                .into());
            }
        }
        Command::Check => {
            let (_, plan) = load(&cli)?;
            output::print_plan(&plan);
        }
        Command::Plan => {
            let (_, plan) = load(&cli)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config (explicit `--config` or `<root>/gallery.toml`) and plan the build.
fn load(cli: &Cli) -> Result<(config::GalleryConfig, generate::Plan), Box<dyn std::error::Error>> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(config::CONFIG_FILENAME));
    let site_config = config::load_config_file(&config_path)?;
    let plan = generate::load_plan(&cli.root, &site_config)?;
    Ok((site_config, plan))
}

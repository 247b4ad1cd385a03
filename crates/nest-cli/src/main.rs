//! CLI entry point for the nest-scaffold generator.
//!
//! Generates (or removes) a Rails scaffold whose resource is nested under an
//! owner resource: model, migration, nested controller, views, fixtures,
//! specs, and a route.
//!
//! # Usage
//!
//! ```bash
//! nest-scaffold generate ModelName --owner=OwnerName field:type field:type
//!
//! # Preview without writing
//! nest-scaffold generate category --owner=site title:string --pretend
//!
//! # Undo a previous generation
//! nest-scaffold destroy category --owner=site
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use color_eyre::config::{HookBuilder, Theme};
use nest_core::{CollisionPolicy, GeneratorConfig, ResourceSpec};
use nest_generator::{Generator, Mode};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

const USAGE: &str = "nest-scaffold generate ModelName --owner=OwnerName field:type field:type";

/// Scaffold generator for resources nested under an owner resource.
#[derive(Parser)]
#[command(name = "nest-scaffold", version, about, long_about = None)]
#[command(override_usage = USAGE)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Application root to generate into.
    #[arg(long, global = true, env = "NEST_SCAFFOLD_ROOT")]
    root: Option<Utf8PathBuf>,

    /// JSON generator configuration file.
    #[arg(long, global = true, env = "NEST_SCAFFOLD_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Generate a nested scaffold.
    #[command(override_usage = USAGE)]
    Generate(ScaffoldArgs),

    /// Remove a previously generated nested scaffold.
    #[command(
        override_usage = "nest-scaffold destroy ModelName --owner=OwnerName field:type field:type"
    )]
    Destroy(ScaffoldArgs),
}

/// Arguments shared by `generate` and `destroy`.
#[derive(Args)]
struct ScaffoldArgs {
    /// Resource name, optionally module-qualified (`admin/report`).
    name: String,

    /// Model attributes as `field:type`.
    attributes: Vec<String>,

    /// Owner resource the scaffold is nested under (singular or plural).
    #[arg(short, long)]
    owner: Option<String>,

    /// Don't generate a migration file for the model.
    #[arg(long)]
    skip_migration: bool,

    /// Overwrite files that already exist.
    #[arg(long, conflicts_with = "skip")]
    force: bool,

    /// Keep files that already exist.
    #[arg(long)]
    skip: bool,

    /// Report what would be done without writing anything.
    #[arg(short, long)]
    pretend: bool,

    /// Suppress the per-file report.
    #[arg(short, long)]
    quiet: bool,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Returns `false` when colors are disabled by `--no-color` or the
/// `NO_COLOR` env var.
fn color_enabled(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none()
}

/// Error and panic report hooks; uncolored reports use a blank theme.
fn error_hooks(use_color: bool) -> HookBuilder {
    let hooks = HookBuilder::default();
    if use_color {
        hooks
    } else {
        hooks.theme(Theme::new())
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Respects `RUST_LOG` if set. Otherwise logs at `debug` with `--verbose`
/// and `warn` by default, since the per-file report is the normal output.
/// Logs go to stderr so they never interleave with the report.
fn init_tracing(verbose: bool, use_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_color)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`GeneratorConfig`] from the config file and CLI flags.
///
/// Flags override values from the file.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
fn build_config(cli: &Cli, args: &ScaffoldArgs) -> color_eyre::Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(root) = &cli.root {
        config.destination_root.clone_from(root);
    }
    if args.force {
        config.collision = CollisionPolicy::Force;
    } else if args.skip {
        config.collision = CollisionPolicy::Skip;
    }
    config.pretend |= args.pretend;

    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Plans the scaffold and executes it in `mode`, printing one line per
/// entry unless `--quiet` is set.
///
/// # Errors
///
/// Returns an error for invalid names, collisions, or filesystem failures.
fn run_scaffold(config: GeneratorConfig, args: &ScaffoldArgs, mode: Mode) -> color_eyre::Result<()> {
    info!(root = %config.destination_root, name = %args.name, ?mode, "Starting scaffold");

    let spec = ResourceSpec::new(args.name.as_str(), args.owner.as_deref())
        .with_skip_migration(args.skip_migration)
        .with_attributes(&args.attributes);

    let generator = Generator::new(config)?;
    let manifest = generator.plan(&spec)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    generator.run_with(&manifest, mode, |report| {
        if !args.quiet {
            let _ = writeln!(handle, "{report}");
        }
    })?;

    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Parse CLI arguments (clap reports its own errors)
    let cli = Cli::parse();
    let use_color = color_enabled(cli.no_color);

    // 2. Install color-eyre before anything can fail or panic
    error_hooks(use_color).install()?;

    // 3. Initialize tracing with the same color choice
    init_tracing(cli.verbose, use_color);

    // 4. Route to the command
    match &cli.command {
        Commands::Generate(args) => run_scaffold(build_config(&cli, args)?, args, Mode::Create),
        Commands::Destroy(args) => run_scaffold(build_config(&cli, args)?, args, Mode::Destroy),
    }
}

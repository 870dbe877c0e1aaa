mod config;
mod render;
mod server;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conveyor_core::{LineReport, evaluate};
use rmcp::{ServiceExt, transport::stdio};

use crate::config::{ParamOverrides, resolve_params};

#[derive(Parser)]
#[command(
    name = "conveyor",
    about = "Packing-line throughput calculator and conveyor animation"
)]
struct Cli {
    /// Line config file (TOML). Falls back to $CONVEYOR_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(flatten)]
    overrides: ParamOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show capacity, shortfall, overflow time and utilization
    Kpis,

    /// Show conveyor buffer fill-up hour by hour
    Projection,

    /// Play the conveyor animation in the terminal
    Animate {
        /// Print all frames without pausing
        #[arg(long)]
        no_delay: bool,
    },

    /// Print KPIs, projection and frames as JSON
    Report {
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Start MCP server on stdio transport
    Serve,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_report(cli: &Cli) -> Result<LineReport> {
    let params = resolve_params(cli.config.as_deref(), &cli.overrides)?;
    evaluate(&params).context("cannot evaluate line")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Kpis => cmd_kpis(&cli),
        Commands::Projection => cmd_projection(&cli),
        Commands::Animate { no_delay } => cmd_animate(&cli, *no_delay).await,
        Commands::Report { pretty } => cmd_report(&cli, *pretty),
        Commands::Serve => cmd_serve(&cli).await,
    }
}

fn cmd_kpis(cli: &Cli) -> Result<()> {
    let report = load_report(cli)?;
    println!("{}", render::kpi_block(&report.kpis()));
    Ok(())
}

fn cmd_projection(cli: &Cli) -> Result<()> {
    let report = load_report(cli)?;
    let (points, truncated) = render::collect_points(&report)?;

    match points {
        Some(points) => {
            println!(
                "{}",
                render::projection_table(&points, report.conveyor_capacity())
            );
            if truncated {
                println!("... (first {} hours shown)", render::MAX_POINTS);
            }
        }
        None => {
            tracing::info!("shortfall is not positive, nothing to project");
            println!("{}", render::NO_OVERFLOW);
        }
    }
    Ok(())
}

async fn cmd_animate(cli: &Cli, no_delay: bool) -> Result<()> {
    let report = load_report(cli)?;
    let pause = Duration::try_from_secs_f64(report.params().animation_speed)
        .context("animation_speed is not a usable frame pause")?;
    let animation = report.animation()?;
    let total = animation.total_frames();
    tracing::info!(
        "animating {} totes over {} cells ({total} frames)",
        animation.num_totes(),
        animation.num_cells()
    );

    for frame in animation {
        println!("{frame}");
        if no_delay || frame.step + 1 == total {
            continue;
        }
        tokio::select! {
            _ = tokio::time::sleep(pause) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("animation cancelled after frame {}", frame.step);
                return Ok(());
            }
        }
    }

    tracing::info!("animation finished");
    Ok(())
}

fn cmd_report(cli: &Cli, pretty: bool) -> Result<()> {
    let report = load_report(cli)?;
    let json = render::report_json(&report)?;
    let text = if pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    }
    .context("failed to serialize report")?;
    println!("{text}");
    Ok(())
}

async fn cmd_serve(cli: &Cli) -> Result<()> {
    let params = resolve_params(cli.config.as_deref(), &cli.overrides)?;
    // Fail fast on a broken base line; tool calls may still override it.
    evaluate(&params).context("invalid base line parameters")?;
    tracing::info!("starting MCP server");

    let service = server::LineServer::new(params)
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await?;
    Ok(())
}

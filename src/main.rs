mod cli;
mod render;
mod report;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use trussx_joints::{analyze, check_determinacy, read_truss_file, ForceRange, Palette};

use cli::{Cli, OutputFormat};
use render::render_svg;
use report::{render_json, render_text};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Install a stderr subscriber; `-v` flags take precedence over `RUST_LOG`.
fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.analysis_config()?;
    debug!(?config, "Resolved configuration");

    // Read the geometry, supports and loads. The file format and its index
    // convention are documented in `trussx_joints::input`.
    let input = read_truss_file(&cli.input, config.index_base)
        .with_context(|| format!("failed to read truss from {}", cli.input.display()))?;
    info!(
        title = %input.title,
        nodes = input.geometry.node_count(),
        members = input.geometry.member_count(),
        loads = input.conditions.loads.len(),
        "Loaded truss"
    );
    debug!(
        determinacy = %check_determinacy(input.geometry.node_count(), input.geometry.member_count()),
        "Counted equations and unknowns"
    );

    // Solve the joint equilibrium equations. Any failure here is terminal for
    // this input, so it is reported as-is.
    let solution = analyze(&input.geometry, &input.conditions, &config)
        .with_context(|| format!("failed to solve {}", cli.input.display()))?;
    info!(
        max_residual = solution.max_residual,
        tension = solution.tension_members().count(),
        compression = solution.compression_members().count(),
        "Solved truss"
    );
    if config.residual_is_large(solution.max_residual) {
        warn!(
            max_residual = solution.max_residual,
            threshold = config.residual_warning,
            "Equilibrium residual is large; the system may be ill-conditioned"
        );
    }

    let report = match cli.format {
        OutputFormat::Text => render_text(&input, &solution),
        OutputFormat::Json => render_json(&input, &solution).context("failed to encode report")?,
    };
    println!("{}", report.trim_end());

    if let Some(path) = &cli.svg {
        let palette = Palette::diverging(config.palette.size).context("invalid palette size")?;
        let range = config
            .palette
            .range
            .unwrap_or_else(|| ForceRange::covering(&solution.members));
        let svg = render_svg(&input.geometry, &input.conditions, &solution, &palette, &range);
        std::fs::write(path, svg)
            .with_context(|| format!("failed to write drawing to {}", path.display()))?;
        info!(
            path = %path.display(),
            max_compression = range.max_compression,
            max_tension = range.max_tension,
            "Wrote drawing"
        );
    }

    Ok(())
}

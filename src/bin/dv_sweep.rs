use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use orbit_calc::export;
use orbit_calc::impulsive::RatioSweep;
use orbit_calc::impulsive::sweep::{MAX_SAMPLES, Range};
use orbit_calc::scenario;

/// Write the apogee-first / perigee-first Hohmann delta-v ratio grid as CSV.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Delta-v ratio sweep (apogee-first vs perigee-first Hohmann)"
)]
struct Cli {
    /// Take sweep settings from a scenario file's `sweep` section
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Perigee radius of the base orbit (km)
    #[arg(long)]
    base_radius: Option<f64>,

    /// Apogee of the base orbit as a multiple of its perigee
    #[arg(long)]
    base_apogee_factor: Option<f64>,

    /// Target apogee range in base radii as `start,stop,step`
    #[arg(long, value_parser = parse_range)]
    x: Option<Range>,

    /// Target perigee range in base radii as `start,stop,step`
    #[arg(long, value_parser = parse_range)]
    y: Option<Range>,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/dv_ratio.csv")]
    output: PathBuf,
}

fn parse_range(raw: &str) -> Result<Range, String> {
    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid range `{raw}`: {err}"))?;
    match values.as_slice() {
        [start, stop, step] => {
            let range = Range::new(*start, *stop, *step);
            if range.is_empty() {
                return Err(format!(
                    "range `{raw}` is empty or has more than the allowed samples \
                     (start <= stop, step > 0, at most {MAX_SAMPLES} samples)"
                ));
            }
            Ok(range)
        }
        _ => Err(format!("expected `start,stop,step`, got `{raw}`")),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut sweep = match &cli.scenario {
        Some(path) => scenario::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?
            .sweep
            .unwrap_or_default(),
        None => RatioSweep::default(),
    };
    if let Some(radius) = cli.base_radius {
        sweep.base_radius_km = radius;
    }
    if let Some(factor) = cli.base_apogee_factor {
        sweep.base_apogee_factor = factor;
    }
    if let Some(x) = cli.x {
        sweep.x = x;
    }
    if let Some(y) = cli.y {
        sweep.y = y;
    }

    let grid = sweep.run();
    let rows = export::sweep::write_csv(&cli.output, &grid)?;
    info!("wrote {rows} ratio cells to {}", cli.output.display());
    if cli.output.as_os_str() != "-" {
        println!("Wrote {} cells to {}", rows, cli.output.display());
    }
    Ok(())
}

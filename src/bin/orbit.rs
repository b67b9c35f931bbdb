use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use log::info;
use orbit_calc::export::{self, summary::OrbitSummary};
use orbit_calc::impulsive::lambert::{self, Trajectory};
use orbit_calc::impulsive::transfers::{circular_hohmann, hohmann};
use orbit_calc::orbits::factory::elliptical_from_radii;
use orbit_calc::orbits::propagation::{elements_at_time_with, period};
use orbit_calc::constants::TWO_PI;
use orbit_calc::orbits::{MAX_PATH_POINTS, Orbit, OrbitalElements, to_cartesian, to_elements};
use orbit_calc::scenario;
use orbit_calc::units::{deg_to_rad, rad_to_deg};
use orbit_calc::vector::Vector3;
use orbit_calc::{newton::NewtonOptions, time};

/// Two-body orbit calculator about Earth.
#[derive(Parser)]
#[command(author, version, about = "Orbit calculator (two-body, Earth-centred)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classical elements from a position/velocity pair
    Elements {
        /// Position in km as `x,y,z`
        #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
        position: Vector3,
        /// Velocity in km/s as `x,y,z`
        #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
        velocity: Vector3,
    },
    /// Position and velocity from classical elements
    State(ElementArgs),
    /// Advance an orbit to a given time since perigee
    Propagate {
        #[command(flatten)]
        elements: ElementArgs,
        /// Seconds since perigee passage
        #[arg(long = "time", allow_hyphen_values = true)]
        seconds: f64,
        /// Newton iteration budget for Kepler's equation
        #[arg(long, default_value_t = 100)]
        max_iterations: usize,
    },
    /// Hohmann transfer between two coaxial orbits given by their apsis radii
    Hohmann {
        /// Perigee radius of the initial orbit (km)
        #[arg(long)]
        from_perigee: f64,
        /// Apogee radius of the initial orbit (km, defaults to circular)
        #[arg(long)]
        from_apogee: Option<f64>,
        /// Perigee radius of the target orbit (km)
        #[arg(long)]
        to_perigee: f64,
        /// Apogee radius of the target orbit (km, defaults to circular)
        #[arg(long)]
        to_apogee: Option<f64>,
        /// Start the transfer at the inner apogee instead of the inner perigee
        #[arg(long, default_value_t = false)]
        apogee_first: bool,
        /// Also print the closed-form estimate for circular orbits
        #[arg(long, default_value_t = false)]
        estimate_circular: bool,
    },
    /// Transfer orbit between two positions and a time of flight
    Lambert {
        /// Departure position in km as `x,y,z`
        #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
        r1: Vector3,
        /// Arrival position in km as `x,y,z`
        #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
        r2: Vector3,
        /// Time of flight in seconds
        #[arg(long)]
        tof: f64,
        /// Use the retrograde branch
        #[arg(long, default_value_t = false)]
        retrograde: bool,
    },
    /// Load a scenario file and print its orbits
    Scenario {
        /// Scenario file (YAML, or TOML by extension)
        path: PathBuf,
        /// Write a JSON summary of every orbit (use '-' for stdout)
        #[arg(long)]
        summary: Option<PathBuf>,
        /// Orbit whose path is sampled into `--path-csv`
        #[arg(long, requires = "path_csv")]
        orbit: Option<String>,
        /// Path CSV output (use '-' for stdout)
        #[arg(long, requires = "orbit")]
        path_csv: Option<PathBuf>,
        /// True-anomaly step for path sampling (rad)
        #[arg(long, default_value_t = 0.1, value_parser = parse_step)]
        step: f64,
    },
}

/// Classical elements with angles in degrees.
#[derive(Args)]
struct ElementArgs {
    /// True anomaly (deg)
    #[arg(long, default_value_t = 0.0)]
    theta: f64,
    /// Specific angular momentum (km^2/s)
    #[arg(long)]
    h: f64,
    /// Eccentricity
    #[arg(long)]
    e: f64,
    /// Right ascension of the ascending node (deg)
    #[arg(long, default_value_t = 0.0)]
    raan: f64,
    /// Inclination (deg)
    #[arg(long, default_value_t = 0.0)]
    inclination: f64,
    /// Argument of perigee (deg)
    #[arg(long, default_value_t = 0.0)]
    arg_perigee: f64,
}

impl ElementArgs {
    fn to_elements(&self) -> OrbitalElements {
        OrbitalElements::new(
            deg_to_rad(self.theta),
            self.h,
            self.e,
            deg_to_rad(self.raan),
            deg_to_rad(self.inclination),
            deg_to_rad(self.arg_perigee),
        )
    }
}

fn parse_vector(raw: &str) -> Result<Vector3, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected three comma-separated values, got `{raw}`"));
    }
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|err| format!("invalid component `{part}`: {err}"))?;
    }
    Ok(out)
}

fn parse_step(raw: &str) -> Result<f64, String> {
    let step: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("invalid step `{raw}`: {err}"))?;
    if !(step.is_finite() && step > 0.0) {
        return Err(format!("step must be positive, got `{raw}`"));
    }
    if TWO_PI / step >= MAX_PATH_POINTS as f64 {
        return Err(format!("step `{raw}` gives more than {MAX_PATH_POINTS} path points"));
    }
    Ok(step)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Elements { position, velocity } => {
            let elements = to_elements(&position, &velocity);
            print_elements(&elements);
            print_shape(&Orbit::from(elements));
        }
        Command::State(args) => {
            let elements = args.to_elements();
            print_state(&elements);
            println!(
                "  t = {:.3} s since perigee",
                Orbit::from(elements).time_since_perigee()
            );
        }
        Command::Propagate {
            elements,
            seconds,
            max_iterations,
        } => {
            let options = NewtonOptions {
                max_iterations,
                ..NewtonOptions::default()
            };
            let start = elements.to_elements();
            let advanced = elements_at_time_with(&start, seconds, &options);
            println!(
                "Propagated {:.1} s ({:.3} h) of a {:.1} min orbit",
                seconds,
                time::seconds_to_hours(seconds),
                time::seconds_to_minutes(period(&start))
            );
            print_elements(&advanced);
            print_state(&advanced);
        }
        Command::Hohmann {
            from_perigee,
            from_apogee,
            to_perigee,
            to_apogee,
            apogee_first,
            estimate_circular,
        } => {
            let initial = Orbit::from(elliptical_from_radii(
                from_perigee,
                from_apogee.unwrap_or(from_perigee),
            ));
            let target = Orbit::from(elliptical_from_radii(
                to_perigee,
                to_apogee.unwrap_or(to_perigee),
            ));
            let result = hohmann(&initial, &target, !apogee_first);
            println!("Hohmann transfer");
            println!(
                "  transfer: rp = {:.3} km, ra = {:.3} km, e = {:.6}",
                result.transfer.r_perigee(),
                result.transfer.r_apogee(),
                result.transfer.elements().e
            );
            println!("  departure burn : {:+.6} km/s", result.dv_departure_km_s);
            println!("  arrival burn   : {:+.6} km/s", result.dv_arrival_km_s);
            println!("  total delta-v  : {:.6} km/s", result.dv_total_km_s);
            println!(
                "  time of flight : {:.1} s ({:.3} h)",
                result.tof_seconds,
                time::seconds_to_hours(result.tof_seconds)
            );
            if estimate_circular {
                if from_apogee.is_some() || to_apogee.is_some() {
                    bail!("--estimate-circular needs circular orbits (omit the apogee radii)");
                }
                let estimate = circular_hohmann(from_perigee, to_perigee);
                println!(
                    "  circular estimate: dv1 = {:+.6} km/s, dv2 = {:+.6} km/s, total = {:.6} km/s",
                    estimate.dv1_km_s, estimate.dv2_km_s, estimate.dv_total_km_s
                );
            }
        }
        Command::Lambert {
            r1,
            r2,
            tof,
            retrograde,
        } => {
            let trajectory = if retrograde {
                Trajectory::Retrograde
            } else {
                Trajectory::Prograde
            };
            let solution =
                lambert::solve_checked(&r1, &r2, tof, trajectory, &NewtonOptions::default())
                    .context("lambert solve failed")?;
            info!("lambert converged to z = {}", solution.z);
            println!("Departure velocity: {}", format_vector(&solution.departure_velocity));
            println!("Arrival velocity  : {}", format_vector(&solution.arrival_velocity));
            print_elements(&solution.elements);
            print_shape(&Orbit::from(solution.elements));
        }
        Command::Scenario {
            path,
            summary,
            orbit,
            path_csv,
            step,
        } => {
            let scenario = scenario::load(&path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?;

            println!(
                "{:<12} {:>12} {:>12} {:>10} {:>12} {:>10}",
                "name", "rp_km", "ra_km", "e", "period_min", "dv_km_s"
            );
            for entry in &scenario.orbits {
                let dv = entry
                    .delta_v_km_s
                    .map(|dv| format!("{dv:.4}"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<12} {:>12.3} {:>12.3} {:>10.6} {:>12.3} {:>10}",
                    entry.name,
                    entry.orbit.r_perigee(),
                    entry.orbit.r_apogee(),
                    entry.orbit.elements().e,
                    time::seconds_to_minutes(entry.orbit.period()),
                    dv
                );
            }

            if let (Some(name), Some(out)) = (orbit.as_deref(), path_csv.as_deref()) {
                let Some(entry) = scenario.find(name) else {
                    bail!("scenario has no orbit named `{name}`");
                };
                let rows = export::path::write_csv(out, &entry.orbit, step)?;
                info!("wrote {rows} path points for {name} to {}", out.display());
            }

            if let Some(out) = summary.as_deref() {
                let summaries: Vec<OrbitSummary> = scenario
                    .orbits
                    .iter()
                    .map(|entry| OrbitSummary::new(entry.name.as_str(), &entry.orbit))
                    .collect();
                export::summary::write_json(out, scenario.name.as_deref(), &summaries)?;
            }
        }
    }

    Ok(())
}

fn format_vector(v: &Vector3) -> String {
    format!("[{:.6}, {:.6}, {:.6}]", v[0], v[1], v[2])
}

fn print_elements(el: &OrbitalElements) {
    println!("  h     = {:.6} km^2/s", el.h);
    println!("  e     = {:.8}", el.e);
    println!("  i     = {:.6} deg", rad_to_deg(el.inclination));
    println!("  raan  = {:.6} deg", rad_to_deg(el.raan));
    println!("  w     = {:.6} deg", rad_to_deg(el.arg_perigee));
    println!("  theta = {:.6} deg", rad_to_deg(el.theta));
}

fn print_shape(orbit: &Orbit) {
    println!(
        "  rp = {:.3} km, ra = {:.3} km, a = {:.3} km, T = {:.3} min",
        orbit.r_perigee(),
        orbit.r_apogee(),
        orbit.semi_major_axis(),
        time::seconds_to_minutes(orbit.period())
    );
}

fn print_state(el: &OrbitalElements) {
    let state = to_cartesian(el);
    println!("  r = {} km", format_vector(&state.position));
    println!("  v = {} km/s", format_vector(&state.velocity));
}

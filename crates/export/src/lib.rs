//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod path {
    use std::io::{self, Write};
    use std::path::Path;

    use orbit_orbits::Orbit;

    pub const HEADER: &str = "theta_rad,x_km,y_km,z_km,vx_km_s,vy_km_s,vz_km_s";

    /// Write the sampled path of `orbit` (true-anomaly step `step` rad) as CSV.
    pub fn write_rows(writer: &mut dyn Write, orbit: &Orbit, step: f64) -> io::Result<usize> {
        writeln!(writer, "{}", HEADER)?;
        let points = orbit.path_points(step);
        for (theta, state) in &points {
            let [x, y, z] = state.position;
            let [vx, vy, vz] = state.velocity;
            writeln!(
                writer,
                "{:.6},{:.6},{:.6},{:.6},{:.9},{:.9},{:.9}",
                theta, x, y, z, vx, vy, vz
            )?;
        }
        writer.flush()?;
        Ok(points.len())
    }

    /// [`write_rows`] into a file, or stdout for `-`. Returns the number of rows written.
    pub fn write_csv(path: &Path, orbit: &Orbit, step: f64) -> io::Result<usize> {
        let mut writer = super::writer_for_path(path)?;
        write_rows(writer.as_mut(), orbit, step)
    }
}

pub mod sweep {
    use std::io::{self, Write};
    use std::path::Path;

    use orbit_impulsive::RatioGrid;

    pub const HEADER: &str = "x_ratio,y_ratio,dv_ratio";

    /// One row per grid cell, `y` outer and `x` inner.
    pub fn write_rows(writer: &mut dyn Write, grid: &RatioGrid) -> io::Result<usize> {
        writeln!(writer, "{}", HEADER)?;
        let mut rows = 0;
        for (x, y, ratio) in grid.cells() {
            writeln!(writer, "{:.3},{:.3},{:.9}", x, y, ratio)?;
            rows += 1;
        }
        writer.flush()?;
        Ok(rows)
    }

    pub fn write_csv(path: &Path, grid: &RatioGrid) -> io::Result<usize> {
        let mut writer = super::writer_for_path(path)?;
        write_rows(writer.as_mut(), grid)
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};
    use std::path::Path;

    use orbit_orbits::{CartesianState, Orbit, OrbitalElements};

    /// Elements and derived quantities of one named orbit.
    #[derive(Debug, Clone, Serialize)]
    pub struct OrbitSummary {
        pub name: String,
        pub elements: OrbitalElements,
        pub semi_major_axis_km: f64,
        pub r_perigee_km: f64,
        pub r_apogee_km: f64,
        pub period_s: f64,
        pub speed_km_s: f64,
        pub state: CartesianState,
    }

    impl OrbitSummary {
        pub fn new(name: impl Into<String>, orbit: &Orbit) -> Self {
            Self {
                name: name.into(),
                elements: *orbit.elements(),
                semi_major_axis_km: orbit.semi_major_axis(),
                r_perigee_km: orbit.r_perigee(),
                r_apogee_km: orbit.r_apogee(),
                period_s: orbit.period(),
                speed_km_s: orbit.velocity(),
                state: orbit.state(),
            }
        }
    }

    #[derive(Serialize)]
    struct Envelope<'a> {
        scenario: Option<&'a str>,
        orbits: &'a [OrbitSummary],
    }

    pub fn write_to(
        writer: &mut dyn Write,
        scenario: Option<&str>,
        orbits: &[OrbitSummary],
    ) -> io::Result<()> {
        to_writer_pretty(&mut *writer, &Envelope { scenario, orbits })?;
        writeln!(writer)?;
        writer.flush()
    }

    /// Pretty-printed JSON summary written to a file, or stdout for `-`.
    pub fn write_json(
        path: &Path,
        scenario: Option<&str>,
        orbits: &[OrbitSummary],
    ) -> io::Result<()> {
        let mut writer = super::writer_for_path(path)?;
        write_to(writer.as_mut(), scenario, orbits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_impulsive::RatioSweep;
    use orbit_impulsive::sweep::Range;
    use orbit_orbits::Orbit;
    use orbit_orbits::factory::elliptical_from_radii;

    #[test]
    fn path_csv_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("path.csv");
        let orbit = Orbit::from(elliptical_from_radii(7_000.0, 12_000.0));
        let rows = path::write_csv(&out, &orbit, 0.1).unwrap();
        assert_eq!(rows, 63);

        let mut reader = csv::Reader::from_path(&out).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>().join(","), path::HEADER);
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 63);
        let x0: f64 = records[0][1].parse().unwrap();
        assert!((x0 - 7_000.0).abs() < 1e-3);
    }

    #[test]
    fn sweep_csv_has_one_row_per_cell() {
        let grid = RatioSweep {
            x: Range::new(6.0, 7.0, 0.5),
            y: Range::new(2.0, 3.0, 1.0),
            ..RatioSweep::default()
        }
        .run();
        let mut buffer = Vec::new();
        let rows = sweep::write_rows(&mut buffer, &grid).unwrap();
        assert_eq!(rows, 6);

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 6);
        assert_eq!(&records[1][0], "6.500");
        assert_eq!(&records[1][1], "2.000");
        assert!(records.iter().all(|r| r[2].parse::<f64>().unwrap() > 0.0));
    }

    #[test]
    fn summary_json_contains_elements() {
        let orbit = Orbit::from(elliptical_from_radii(7_000.0, 21_000.0));
        let summaries = [summary::OrbitSummary::new("E1", &orbit)];
        let mut buffer = Vec::new();
        summary::write_to(&mut buffer, Some("demo"), &summaries).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["scenario"], "demo");
        assert_eq!(value["orbits"][0]["name"], "E1");
        assert_eq!(value["orbits"][0]["elements"]["e"], 0.5);
        let a = value["orbits"][0]["semi_major_axis_km"].as_f64().unwrap();
        assert!((a - 14_000.0).abs() < 1e-6);
    }
}

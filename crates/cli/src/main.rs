//! Fixture-generation command-line tools.
//!
//! Each subcommand covers one of the batch programs of the fixture
//! toolchain: random generation, regular-polygon perturbation, template
//! perturbation, edge description and singular-value fingerprinting, plus a
//! single-polygon interactive mode.
//!
//! Exit policy: bad arguments, unreadable/unwritable files, malformed input
//! and solver failures exit non-zero; exhausting the retry cap without
//! finding a simple n-gon is reported with a diagnostic and exits 0,
//! matching the behavior existing fixture tooling expects.

mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use ngon::gen::source::{
    Combine, Dispersion, PerturbSource, PromptSource, RegularSource, UniformSource,
};
use ngon::gen::{assemble, generate_simple, generate_simple_plain, GenCfg, Outcome, ReplayToken};
use ngon::geom::{describe, normalize, simplify_check, GeomCfg, Polygon};
use ngon::io::{
    read_descriptors, read_polygons, write_descriptors, write_polygons, write_signature,
};
use ngon::signature::fingerprint;

#[derive(Parser)]
#[command(name = "ngon")]
#[command(about = "Polygon fixture synthesis, description and fingerprinting")]
struct Cmd {
    /// Base seed mixed with the polygon index for reproducible batches
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate uniform-random simple n-gons, normalized to unit diameter
    Generate {
        /// Number of polygons to generate (at least 1)
        count: usize,
        /// Number of vertices of each polygon (at least 3)
        vertices: usize,
        /// Output polygon file
        out: PathBuf,
    },
    /// Emit a regular n-gon plus perturbed variants of it
    Regular {
        /// Number of polygons including the regular base (at least 1)
        count: usize,
        /// Number of vertices of each polygon (at least 3)
        vertices: usize,
        /// Standard deviation of the vertex displacement (strictly positive)
        sd: f64,
        /// Output polygon file
        out: PathBuf,
        /// Dispersion rule for displacement deviations
        #[arg(long, value_enum, default_value_t = Mode::Constant)]
        mode: Mode,
    },
    /// Read polygons and emit each followed by perturbed variants
    Perturb {
        /// Input polygon file
        input: PathBuf,
        /// Number of polygons to read (at least 1)
        read: usize,
        /// Number of vertices of each polygon (at least 3)
        vertices: usize,
        /// Polygons emitted per input polygon, the original included (at least 1)
        per: usize,
        /// Standard deviation of the vertex displacement (strictly positive)
        sd: f64,
        /// Output polygon file
        out: PathBuf,
    },
    /// Compute edge lengths and turning angles of stored polygons
    Describe {
        /// Input polygon file
        input: PathBuf,
        /// Number of polygons to read (at least 1)
        count: usize,
        /// Number of vertices of each polygon (at least 3)
        vertices: usize,
        /// Output descriptor file
        out: PathBuf,
    },
    /// Compute singular-value signatures of stored descriptors
    Fingerprint {
        /// Input descriptor file
        input: PathBuf,
        /// Number of polygons to read (at least 1)
        count: usize,
        /// Number of vertices of each polygon (at least 3)
        vertices: usize,
        /// Output signature file
        out: PathBuf,
    },
    /// Type a polygon in at the terminal and inspect its canonical form
    Interactive {
        /// Number of vertices (at least 3)
        vertices: usize,
    },
}

/// How displacement deviations are derived in `regular` mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// The given standard deviation for every vertex
    Constant,
    /// sd times the shorter of the two base edges meeting at the vertex
    MinNeighbors,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            count,
            vertices,
            out,
        } => run_generate(cmd.seed, count, vertices, &out),
        Action::Regular {
            count,
            vertices,
            sd,
            out,
            mode,
        } => run_regular(cmd.seed, count, vertices, sd, mode, &out),
        Action::Perturb {
            input,
            read,
            vertices,
            per,
            sd,
            out,
        } => run_perturb(cmd.seed, &input, read, vertices, per, sd, &out),
        Action::Describe {
            input,
            count,
            vertices,
            out,
        } => run_describe(&input, count, vertices, &out),
        Action::Fingerprint {
            input,
            count,
            vertices,
            out,
        } => run_fingerprint(&input, count, vertices, &out),
        Action::Interactive { vertices } => run_interactive(vertices),
    }
}

fn validate_counts(count: usize, vertices: usize) -> Result<()> {
    if count < 1 {
        bail!("number of polygons must be at least 1");
    }
    if vertices < 3 {
        bail!("number of vertices must be at least 3");
    }
    Ok(())
}

fn validate_sd(sd: f64) -> Result<()> {
    if !(sd.is_finite() && sd > 0.0) {
        bail!("standard deviation must be strictly positive");
    }
    Ok(())
}

fn open_out(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let f = File::create(path).with_context(|| format!("opening {} for write", path.display()))?;
    Ok(BufWriter::new(f))
}

fn open_in(path: &Path) -> Result<BufReader<File>> {
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(f))
}

fn run_generate(seed: u64, count: usize, vertices: usize, out: &Path) -> Result<()> {
    validate_counts(count, vertices)?;
    let cfg = GenCfg::default();
    let geom = GeomCfg::default();
    let mut polys = Vec::with_capacity(count);
    for index in 0..count as u64 {
        let tok = ReplayToken { seed, index };
        let mut src = UniformSource::new(tok.to_std_rng());
        match generate_simple(vertices, &mut src, &cfg, &geom) {
            Outcome::Accepted {
                mut polygon,
                attempts,
            } => {
                tracing::debug!(index, attempts, "polygon accepted");
                normalize(&mut polygon, &geom);
                polys.push(polygon);
            }
            Outcome::Exhausted { attempts } => {
                println!("No simple {vertices}-gon found in {attempts} attempts.");
                break;
            }
        }
    }
    let mut w = open_out(out)?;
    write_polygons(&mut w, &polys)?;
    w.flush()?;
    provenance::write_sidecar(
        out,
        "generate",
        json!({"seed": seed, "count": count, "vertices": vertices, "written": polys.len()}),
    )?;
    tracing::info!(written = polys.len(), out = %out.display(), "generate done");
    Ok(())
}

/// Perturb `base` into a family of `count` polygons, the base itself first;
/// every member is normalized before return. On retry exhaustion the index
/// of the failing variant comes back as the error.
fn perturb_family(
    seed: u64,
    family: u64,
    base: &Polygon,
    count: usize,
    dispersion: &Dispersion,
    cfg: &GenCfg,
    geom: &GeomCfg,
) -> std::result::Result<Vec<Polygon>, usize> {
    let n = base.len();
    let mut out = Vec::with_capacity(count);
    out.push(base.clone());
    for j in 1..count {
        let tok = ReplayToken {
            seed,
            index: family.wrapping_mul(0x1_0000).wrapping_add(j as u64),
        };
        let mut src = PerturbSource::new(base.pts.clone(), dispersion.clone(), tok.to_std_rng());
        match generate_simple_plain(n, &mut src, cfg, geom) {
            Outcome::Accepted { polygon, .. } => out.push(polygon),
            Outcome::Exhausted { .. } => return Err(j),
        }
    }
    for p in &mut out {
        normalize(p, geom);
    }
    Ok(out)
}

fn run_regular(
    seed: u64,
    count: usize,
    vertices: usize,
    sd: f64,
    mode: Mode,
    out: &Path,
) -> Result<()> {
    validate_counts(count, vertices)?;
    validate_sd(sd)?;
    let cfg = GenCfg::default();
    let geom = GeomCfg::default();

    let mut src = RegularSource::new(vertices);
    let base = Polygon::from_points(assemble(vertices, &mut src));
    let dispersion = match mode {
        Mode::Constant => Dispersion::Constant(sd),
        Mode::MinNeighbors => Dispersion::Combine {
            lengths: describe(&base).l.iter().map(|l| l * sd).collect(),
            rule: Combine::Min,
        },
    };

    match perturb_family(seed, 0, &base, count, &dispersion, &cfg, &geom) {
        Ok(polys) => {
            let mut w = open_out(out)?;
            write_polygons(&mut w, &polys)?;
            w.flush()?;
            provenance::write_sidecar(
                out,
                "regular",
                json!({
                    "seed": seed, "count": count, "vertices": vertices,
                    "sd": sd, "mode": format!("{mode:?}")
                }),
            )?;
            tracing::info!(written = polys.len(), "regular done");
        }
        Err(j) => {
            println!("Generation of the perturbed polygon ({j}) failed.");
        }
    }
    Ok(())
}

fn run_perturb(
    seed: u64,
    input: &Path,
    read: usize,
    vertices: usize,
    per: usize,
    sd: f64,
    out: &Path,
) -> Result<()> {
    validate_counts(read, vertices)?;
    if per < 1 {
        bail!("number of polygons to generate per input must be at least 1");
    }
    validate_sd(sd)?;
    let cfg = GenCfg::default();
    let geom = GeomCfg::default();

    let mut r = open_in(input)?;
    let originals = read_polygons(&mut r, read, vertices)
        .with_context(|| format!("reading {}", input.display()))?;

    let mut w = open_out(out)?;
    let dispersion = Dispersion::Constant(sd);
    let mut written = 0usize;
    for (i, base) in originals.iter().enumerate() {
        match perturb_family(seed, i as u64, base, per, &dispersion, &cfg, &geom) {
            Ok(family) => {
                write_polygons(&mut w, &family)?;
                written += family.len();
            }
            Err(j) => {
                println!("Generation of the perturbed polygon ({j}) from input {i} failed.");
                break;
            }
        }
    }
    w.flush()?;
    provenance::write_sidecar(
        out,
        "perturb",
        json!({
            "seed": seed, "input": input.to_string_lossy(), "read": read,
            "vertices": vertices, "per": per, "sd": sd, "written": written
        }),
    )?;
    tracing::info!(written, "perturb done");
    Ok(())
}

fn run_describe(input: &Path, count: usize, vertices: usize, out: &Path) -> Result<()> {
    validate_counts(count, vertices)?;
    let mut r = open_in(input)?;
    let polys = read_polygons(&mut r, count, vertices)
        .with_context(|| format!("reading {}", input.display()))?;
    let mut w = open_out(out)?;
    for p in &polys {
        write_descriptors(&mut w, &describe(p))?;
    }
    w.flush()?;
    provenance::write_sidecar(
        out,
        "describe",
        json!({"input": input.to_string_lossy(), "count": count, "vertices": vertices}),
    )?;
    Ok(())
}

fn run_fingerprint(input: &Path, count: usize, vertices: usize, out: &Path) -> Result<()> {
    validate_counts(count, vertices)?;
    let mut r = open_in(input)?;
    let rows = read_descriptors(&mut r, count, vertices)
        .with_context(|| format!("reading {}", input.display()))?;
    let mut w = open_out(out)?;
    for (i, row) in rows.iter().enumerate() {
        // A solver failure must not degrade into an all-zero signature;
        // abort the run instead.
        let s_l = fingerprint(&row.l)
            .with_context(|| format!("length signature of polygon {i} unavailable"))?;
        let angles: Vec<f64> = row.phi.iter().map(|a| a / std::f64::consts::PI).collect();
        let s_phi = fingerprint(&angles)
            .with_context(|| format!("angle signature of polygon {i} unavailable"))?;
        write_signature(&mut w, &s_l, &s_phi)?;
    }
    w.flush()?;
    provenance::write_sidecar(
        out,
        "fingerprint",
        json!({"input": input.to_string_lossy(), "count": count, "vertices": vertices}),
    )?;
    Ok(())
}

fn run_interactive(vertices: usize) -> Result<()> {
    validate_counts(1, vertices)?;
    let geom = GeomCfg::default();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut src = PromptSource::new(stdin.lock(), stdout.lock());
    let mut pts = assemble(vertices, &mut src);
    if !(simplify_check(&mut pts, &geom) && pts.len() == vertices) {
        println!(
            "Not a simple {vertices}-gon: {} vertices remain after simplification.",
            pts.len()
        );
        return Ok(());
    }
    let mut poly = Polygon::from_points(pts);
    normalize(&mut poly, &geom);
    let d = describe(&poly);
    println!("normalized vertices:");
    for p in &poly.pts {
        println!("  {:.8}\t{:.8}", p.x, p.y);
    }
    println!("edge lengths: {:?}", d.l);
    println!("turning angles (rad): {:?}", d.phi);
    match fingerprint(&d.l) {
        Ok(s) => println!("length signature: {s:?}"),
        Err(e) => println!("length signature unavailable: {e}"),
    }
    match fingerprint(&d.angles_in_pi_units()) {
        Ok(s) => println!("angle signature: {s:?}"),
        Err(e) => println!("angle signature unavailable: {e}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngon::geom::{check, diameter};
    use tempfile::tempdir;

    #[test]
    fn validation_rejects_bad_parameters() {
        assert!(validate_counts(0, 4).is_err());
        assert!(validate_counts(1, 2).is_err());
        assert!(validate_counts(1, 3).is_ok());
        assert!(validate_sd(0.0).is_err());
        assert!(validate_sd(-1.0).is_err());
        assert!(validate_sd(f64::NAN).is_err());
        assert!(validate_sd(0.1).is_ok());
    }

    #[test]
    fn generate_writes_normalized_simple_polygons() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("polys.txt");
        run_generate(7, 3, 4, &out).unwrap();
        let mut r = open_in(&out).unwrap();
        let polys = read_polygons(&mut r, 3, 4).unwrap();
        let geom = GeomCfg::default();
        for p in &polys {
            assert!(check(&p.pts, &geom));
            assert!((diameter(&p.pts) - 1.0).abs() < 1e-6);
        }
        assert!(out.with_file_name("polys.provenance.json").exists());
    }

    #[test]
    fn describe_then_fingerprint_round_trip() {
        let dir = tempdir().unwrap();
        let polys = dir.path().join("polys.txt");
        let descs = dir.path().join("descs.txt");
        let sigs = dir.path().join("sigs.txt");
        run_generate(11, 2, 5, &polys).unwrap();
        run_describe(&polys, 2, 5, &descs).unwrap();
        run_fingerprint(&descs, 2, 5, &sigs).unwrap();
        let text = std::fs::read_to_string(&sigs).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        // n length singular values followed by n angle singular values.
        assert_eq!(lines[0].split_whitespace().count(), 10);
    }

    #[test]
    fn regular_emits_the_base_polygon_first() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("reg.txt");
        run_regular(3, 4, 6, 0.05, Mode::Constant, &out).unwrap();
        let mut r = open_in(&out).unwrap();
        let polys = read_polygons(&mut r, 4, 6).unwrap();
        let geom = GeomCfg::default();
        // The base is the normalized regular hexagon: all edges equal
        // (up to the fixture file's write precision).
        let d = describe(&polys[0]);
        for l in &d.l {
            assert!((l - d.l[0]).abs() < 1e-6);
        }
        for p in &polys {
            assert!(check(&p.pts, &geom));
            assert!((diameter(&p.pts) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn perturb_reads_and_extends_fixture_files() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("base.txt");
        let out = dir.path().join("perturbed.txt");
        run_generate(5, 1, 4, &base).unwrap();
        run_perturb(5, &base, 1, 4, 3, 0.02, &out).unwrap();
        let mut r = open_in(&out).unwrap();
        let polys = read_polygons(&mut r, 3, 4).unwrap();
        let geom = GeomCfg::default();
        for p in &polys {
            assert!(check(&p.pts, &geom));
        }
    }

    #[test]
    fn missing_input_fails_with_nonzero_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let out = dir.path().join("out.txt");
        assert!(run_describe(&missing, 1, 3, &out).is_err());
    }
}

//! Run the full pipeline on a few polygons for quick visual sanity.
//!
//! Usage:
//!   cargo run -p ngon --example fixture_demo -- [n] [count]
//!
//! Prints each accepted polygon's attempt count, edge lengths and the two
//! singular-value signatures.

use ngon::gen::source::UniformSource;
use ngon::gen::{generate_simple, GenCfg, Outcome, ReplayToken};
use ngon::geom::{describe, normalize, GeomCfg};
use ngon::signature::fingerprint;

fn main() {
    let mut args = std::env::args().skip(1);
    let n: usize = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(6)
        .max(3);
    let count: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(3);

    let cfg = GenCfg::default();
    let geom = GeomCfg::default();
    for index in 0..count as u64 {
        let tok = ReplayToken { seed: 2026, index };
        let mut src = UniformSource::new(tok.to_std_rng());
        match generate_simple(n, &mut src, &cfg, &geom) {
            Outcome::Accepted {
                mut polygon,
                attempts,
            } => {
                normalize(&mut polygon, &geom);
                let d = describe(&polygon);
                println!("polygon {index}: accepted after {attempts} attempt(s)");
                println!("  lengths: {:?}", d.l);
                match fingerprint(&d.l) {
                    Ok(s) => println!("  length signature: {s:?}"),
                    Err(e) => println!("  length signature unavailable: {e}"),
                }
                match fingerprint(&d.angles_in_pi_units()) {
                    Ok(s) => println!("  angle signature:  {s:?}"),
                    Err(e) => println!("  angle signature unavailable: {e}"),
                }
            }
            Outcome::Exhausted { attempts } => {
                println!("polygon {index}: no simple {n}-gon found in {attempts} attempts");
            }
        }
    }
}

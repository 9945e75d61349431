//! CKKS Bound Sweep CLI
//!
//! Standalone command-line tool printing the security and noise bounds of a search
//! space, with the largest depth reachable at the smallest admissible delta.

use ckks_params::bounds::{BoundCalculator, split_log_q};
use ckks_params::utils::{fmt_bound, init_logging};
use clap::Parser;
use shared::SearchSpaceConfig;
use shared::constants::{FIXED_LOG2_Q0, LOG2_QI_UPPER, SIGMA};

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Print CKKS security/noise bounds for security levels, ring dimensions and Hamming weights"
)]
struct Args {
    /// Security levels λ (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = [128u32, 196, 256])]
    security_levels: Vec<u32>,

    /// Ring dimension exponents log2(N) (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = [14u32, 15, 16, 17])]
    log2_ring_dims: Vec<u32>,

    /// Secret-key Hamming weights h (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = [256u64])]
    hamming_weights: Vec<u64>,

    /// Error standard deviation σ
    #[arg(long, default_value_t = SIGMA)]
    sigma: f64,

    /// Ceiling on log2(delta)
    #[arg(long, default_value_t = LOG2_QI_UPPER)]
    log2_qi_upper: u32,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = SearchSpaceConfig {
        security_levels: args.security_levels,
        log2_ring_dims: args.log2_ring_dims,
        hamming_weights: args.hamming_weights,
        sigma: args.sigma,
        log2_qi_upper: args.log2_qi_upper,
        ..Default::default()
    };
    if let Err(e) = config.validate() {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }

    println!("== CKKS bounds (σ = {}, log2(delta) ≤ {}) ==", config.sigma, config.log2_qi_upper);
    println!("Security: log2(Q) < 7.2·N/(λ+110) + log2(σ)");
    println!("Noise:    log2(delta) ≥ log2(N + 2·B_clean)\n");

    let calculator = BoundCalculator::from_config(&config);
    let mut infeasible = 0usize;

    for &security_level in &config.security_levels {
        for &log2_ring_dim in &config.log2_ring_dims {
            for &hamming_weight in &config.hamming_weights {
                let bound = match calculator.bound(security_level, log2_ring_dim, hamming_weight) {
                    Ok(bound) => bound,
                    Err(e) => {
                        infeasible += 1;
                        println!("λ={security_level:<4} log2(N)={log2_ring_dim:<3} h={hamming_weight:<5} ✗ {e}");
                        continue;
                    }
                };

                println!("{}", fmt_bound(&bound));
                let (log2_q, log2_p) = split_log_q(bound.max_log2_q);
                println!("    split: log2(q) ≤ {log2_q}, log2(P) ≤ {log2_p}");

                match calculator.max_depth_for_delta(
                    security_level,
                    bound.ring_dim(),
                    bound.min_log2_delta,
                    hamming_weight,
                ) {
                    Some(limit) => println!(
                        "    q0={FIXED_LOG2_Q0}, delta={}: max L={} log2(Q)={:.2} precision={} bits",
                        limit.log2_delta, limit.depth, limit.log2_total, limit.precision
                    ),
                    None => println!(
                        "    q0={FIXED_LOG2_Q0}, delta={}: no depth fits",
                        bound.min_log2_delta
                    ),
                }
            }
        }
    }

    if infeasible > 0 {
        println!("\n{infeasible} combination(s) have no valid delta.");
    }
}

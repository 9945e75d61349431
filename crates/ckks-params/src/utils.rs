use log::LevelFilter;
use shared::{Bound, ParameterTuple};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Initialise terminal logging at `Info`, or `Debug` when verbose.
///
/// A second call is ignored, so binaries and tests can both call it.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

pub fn fmt_ring_dim(log2_ring_dim: u32) -> String {
    format!("2^{log2_ring_dim} ({})", 1u64 << log2_ring_dim)
}

pub fn fmt_bound(bound: &Bound) -> String {
    format!(
        "λ={:<4} N={:<16} h={:<5} log2(Q) < {:<6} log2(delta) ≥ {}",
        bound.security_level,
        fmt_ring_dim(bound.log2_ring_dim),
        bound.hamming_weight,
        bound.max_log2_q,
        bound.min_log2_delta
    )
}

pub fn fmt_tuple(tuple: &ParameterTuple) -> String {
    let achieved = tuple
        .achieved_precision
        .map(|p| format!("  achieved={p}"))
        .unwrap_or_default();
    format!(
        "λ={:<4} log2(N)={:<3} delta={:<3} q0={:<3} L={:<3} precision={:<3} log2(Q)={:.2}{achieved}",
        tuple.security_level,
        tuple.log2_ring_dim,
        tuple.log2_delta,
        tuple.q0,
        tuple.depth,
        tuple.precision,
        tuple.log2_total_modulus()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_ring_dim() {
        assert_eq!(fmt_ring_dim(15), "2^15 (32768)");
    }

    #[test]
    fn test_fmt_tuple() {
        let tuple = ParameterTuple {
            security_level: 128,
            log2_ring_dim: 15,
            log2_delta: 40,
            q0: 42,
            depth: 10,
            precision: 19,
            achieved_precision: Some(17),
        };
        let line = fmt_tuple(&tuple);
        assert!(line.contains("delta=40"));
        assert!(line.contains("log2(Q)=552.50"));
        assert!(line.ends_with("achieved=17"));
    }
}

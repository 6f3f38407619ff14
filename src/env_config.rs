//! Shared environment configuration for the simulation binary.
//!
//! Consolidates `RAYON_NUM_THREADS` / `OMP_NUM_THREADS` and `RUST_LOG` reads.

/// Initialize `env_logger` with `info` as the default level.
/// Tolerates an already-installed logger (tests, repeated calls).
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

/// Thread count from `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`).
/// `None` when neither is set to a positive integer.
pub fn configured_threads() -> Option<usize> {
    std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n > 0)
}

/// Build the rayon global thread pool from the environment.
/// Tolerates an already-initialized pool. Returns the thread count in use.
pub fn init_rayon_threads() -> usize {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = configured_threads() {
        builder = builder.num_threads(n);
    }
    if let Err(e) = builder.build_global() {
        log::debug!("rayon global pool already initialized: {}", e);
    }
    let num_threads = rayon::current_num_threads();
    log::info!("Rayon threads: {}", num_threads);
    num_threads
}

/// Environment variable overriding the worker count.
pub const WORKERS_ENV: &str = "SCANLINE_WORKERS";

/// Knobs for a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterConfig {
    /// Number of row blocks, and threads in the per-draw pool. Always >= 1.
    pub workers: usize,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self { workers: num_cpus::get().max(1) }
    }
}

impl RasterConfig {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers: workers.max(1) }
    }

    /// Reads `SCANLINE_WORKERS`, falling back to the logical core count.
    pub fn from_env() -> Self {
        Self::parse_workers(std::env::var(WORKERS_ENV).ok().as_deref())
    }

    fn parse_workers(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        match value.trim().parse::<usize>() {
            Ok(workers) if workers > 0 => Self { workers },
            _ => {
                let fallback = Self::default();
                log::warn!(
                    "ignoring {WORKERS_ENV}={value:?}, using {} workers",
                    fallback.workers
                );
                fallback
            }
        }
    }
}

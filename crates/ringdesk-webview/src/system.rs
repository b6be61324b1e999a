//! CPU metrics for `SYSTEM_CPU_INFO` and `SYSTEM_CPU_USAGE`.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

/// Cumulative tick counters for one core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub sys: u64,
    pub idle: u64,
    pub irq: u64,
}

impl CpuTimes {
    pub fn total(&self) -> u64 {
        self.user + self.nice + self.sys + self.idle + self.irq
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuInfo {
    pub cores: usize,
    pub model: String,
}

/// Source of CPU facts. Sampled on the control thread.
pub trait CpuSampler: Send {
    fn info(&self) -> CpuInfo;
    /// Per-core counters since boot.
    fn times(&self) -> Vec<CpuTimes>;
}

/// Idle fraction over all cores.
///
/// An all-zero sample yields NaN, which reaches content as `null`.
pub fn cpu_usage(samples: &[CpuTimes]) -> f64 {
    let (idle, total) = samples
        .iter()
        .fold((0u64, 0u64), |(idle, total), t| (idle + t.idle, total + t.total()));
    idle as f64 / total as f64
}

// =============================================================================
// /proc
// =============================================================================

/// Reads `/proc/stat` and `/proc/cpuinfo`.
pub struct ProcCpuSampler {
    root: PathBuf,
}

impl ProcCpuSampler {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, name: &str) -> Option<String> {
        let path = self.root.join(name);
        match fs::read_to_string(&path) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read cpu stats");
                None
            }
        }
    }
}

impl Default for ProcCpuSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSampler for ProcCpuSampler {
    fn info(&self) -> CpuInfo {
        let model = self
            .read("cpuinfo")
            .and_then(|s| parse_model(&s))
            .unwrap_or_default();
        let cores = self
            .read("stat")
            .map(|s| parse_proc_stat(&s).len())
            .filter(|n| *n > 0)
            .unwrap_or_else(available_cores);
        CpuInfo { cores, model }
    }

    fn times(&self) -> Vec<CpuTimes> {
        self.read("stat")
            .map(|s| parse_proc_stat(&s))
            .unwrap_or_default()
    }
}

/// Per-core lines (`cpu0`, `cpu1`, ...); the aggregate `cpu` line is skipped.
pub fn parse_proc_stat(contents: &str) -> Vec<CpuTimes> {
    contents
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let label = fields.next()?;
            let index = label.strip_prefix("cpu")?;
            if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let ticks: Vec<u64> = fields.map(|f| f.parse().unwrap_or(0)).collect();
            let at = |i: usize| ticks.get(i).copied().unwrap_or(0);
            // user nice system idle iowait irq ...
            Some(CpuTimes {
                user: at(0),
                nice: at(1),
                sys: at(2),
                idle: at(3),
                irq: at(5),
            })
        })
        .collect()
}

pub fn parse_model(cpuinfo: &str) -> Option<String> {
    cpuinfo.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key.trim() == "model name").then(|| value.trim().to_string())
    })
}

// =============================================================================
// FALLBACK
// =============================================================================

/// Hosts without `/proc`: core count only, no tick counters.
pub struct FallbackCpuSampler;

impl CpuSampler for FallbackCpuSampler {
    fn info(&self) -> CpuInfo {
        CpuInfo {
            cores: available_cores(),
            model: String::new(),
        }
    }

    fn times(&self) -> Vec<CpuTimes> {
        vec![CpuTimes::default(); available_cores()]
    }
}

fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// The best sampler for this host.
pub fn default_sampler() -> Box<dyn CpuSampler> {
    if cfg!(target_os = "linux") {
        Box::new(ProcCpuSampler::new())
    } else {
        Box::new(FallbackCpuSampler)
    }
}

use common::config::{Config, RatioConfig, Report, Settings};
use log_bar::LogBar;

pub const LATENCY_CSV: &str = "latency_results.csv";
pub const CONCURRENCY_CSV: &str = "concurrency_results.csv";

/// Latency chart with baseline ratios, then the concurrency chart.
pub fn default_config() -> Config {
    Config {
        name: "oidbs".to_owned(),
        settings: Settings::default(),
        reports: vec![
            Report {
                name: "latency".to_owned(),
                input: LATENCY_CSV.to_owned(),
                plots: Some(vec![Box::new(
                    LogBar::new(
                        "oidbs_bench_latency_results.png",
                        "OIDBS Benchmark - Query Latency",
                        "Queries",
                        "End-to-end Query Time (log scale) (microseconds)",
                    )
                    .with_reference_lines(&[1e3, 1e6]),
                )]),
                ratios: Some(RatioConfig::default()),
            },
            Report {
                name: "concurrency".to_owned(),
                input: CONCURRENCY_CSV.to_owned(),
                plots: Some(vec![Box::new(
                    LogBar::new(
                        "oidbs_bench_concurrency_results.png",
                        "OIDBS Benchmark - Query Concurrency",
                        "Queries",
                        "Number of Queries Per Second (log scale)",
                    )
                    .with_reference_lines(&[1e2, 1e3, 1e4]),
                )]),
                ratios: None,
            },
        ],
    }
}

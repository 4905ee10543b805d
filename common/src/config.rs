use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{BASELINE, plot::Plot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub name: String,
    #[serde(default)]
    pub settings: Settings,
    pub reports: Vec<Report>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Searched for inputs after the working directory, defaults to the executable's directory
    pub fallback_dir: Option<PathBuf>,
    /// Where charts are written, defaults to the working directory
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    /// CSV file name, resolved against the working and fallback directories
    pub input: String,
    pub plots: Option<Vec<Box<dyn Plot>>>,
    pub ratios: Option<RatioConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioConfig {
    #[serde(default = "default_baseline")]
    pub baseline: String,
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
        }
    }
}

fn default_baseline() -> String {
    BASELINE.to_owned()
}

use std::{
    env,
    fs::read_to_string,
    io::Write,
    path::{Path, PathBuf},
};

use common::{
    config::{Config, Report, Settings},
    plot::plot,
    ratio::write_ratios,
    resolve::{executable_dir, resolve_input},
    table::ResultTable,
};
use eyre::{Context, Result};
use tracing::{debug, info};

use crate::defaults::default_config;

pub fn load_config(config_file: Option<&Path>) -> Result<Config> {
    match config_file {
        Some(path) => {
            let data = read_to_string(path).with_context(|| format!("Read {}", path.display()))?;
            serde_yml::from_str(&data).with_context(|| format!("Parse {}", path.display()))
        }
        None => Ok(default_config()),
    }
}

/// Resolves, reshapes, plots and reports, in that order, for each report.
#[derive(Debug, Clone)]
pub struct Runner {
    work_dir: PathBuf,
    fallback_dir: Option<PathBuf>,
    output_dir: PathBuf,
}

impl Runner {
    /// `fallback_dir` takes precedence over the one in `settings`
    pub fn new(settings: &Settings, fallback_dir: Option<PathBuf>) -> Result<Self> {
        let work_dir = env::current_dir().context("Read working directory")?;
        let fallback_dir = fallback_dir
            .or_else(|| settings.fallback_dir.clone())
            .or_else(executable_dir);
        let output_dir = match &settings.output_dir {
            Some(dir) => work_dir.join(dir),
            None => work_dir.clone(),
        };
        debug!("Inputs from {work_dir:?} then {fallback_dir:?}, charts to {output_dir:?}");
        Ok(Self {
            work_dir,
            fallback_dir,
            output_dir,
        })
    }

    pub fn load(&self, input: &str) -> Result<ResultTable> {
        let path = resolve_input(input, &self.work_dir, self.fallback_dir.as_deref())?;
        let table =
            ResultTable::from_path(&path).with_context(|| format!("Reshape {}", path.display()))?;
        let (rows, columns) = table.shape();
        debug!(
            "{input}: {rows} queries, {columns} strategies {:?}",
            table.column_names()
        );
        Ok(table)
    }

    pub fn run_report<W: Write>(&self, report: &Report, out: &mut W) -> Result<()> {
        let table = self.load(&report.input)?;
        plot(&report.plots, &table, &self.output_dir)
            .with_context(|| format!("Plot {} report", report.name))?;
        if let Some(ratios) = &report.ratios {
            write_ratios(out, &table, &ratios.baseline)
                .with_context(|| format!("Ratios for {} report", report.name))?;
        }
        Ok(())
    }

    /// Stops at the first failing report
    pub fn run<W: Write>(&self, config: &Config, out: &mut W) -> Result<()> {
        for report in &config.reports {
            info!("Running {} report from {}", report.name, report.input);
            self.run_report(report, out)?;
        }
        out.flush()?;
        Ok(())
    }
}

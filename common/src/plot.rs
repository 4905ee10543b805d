use core::fmt::Debug;
use std::path::{Path, PathBuf};

use downcast_rs::{Downcast, impl_downcast};
use dyn_clone::{DynClone, clone_trait_object};
use eyre::Result;
use tracing::debug;

use crate::table::ResultTable;

#[typetag::serde(tag = "type")]
pub trait Plot: Debug + DynClone + Downcast + Send + Sync {
    /// Renders the table into a file
    ///
    /// Arguments:
    /// * `table` - The reshaped results, queries as rows and strategies as columns
    /// * `plot_path` - The directory the chart is written to
    ///
    /// Returns the path of the written file.
    fn plot(&self, table: &ResultTable, plot_path: &Path) -> Result<PathBuf>;
}
clone_trait_object!(Plot);
impl_downcast!(Plot);

pub fn plot(
    plots: &Option<Vec<Box<dyn Plot>>>,
    table: &ResultTable,
    plot_path: &Path,
) -> Result<Vec<PathBuf>> {
    let Some(plots) = plots else {
        debug!("No plots");
        return Ok(Vec::new());
    };

    let mut written = Vec::with_capacity(plots.len());
    for plot in plots {
        written.push(plot.plot(table, plot_path)?);
    }
    Ok(written)
}

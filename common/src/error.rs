use std::{io, path::PathBuf};

use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Could not find {name}, searched {searched:?}")]
    MissingInput { name: String, searched: Vec<PathBuf> },
    #[error("IO Error {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("CSV has no header row")]
    EmptyHeader,
    #[error("Non-numeric value {value:?} for {row} in column {column}")]
    NotNumeric {
        row: String,
        column: String,
        value: String,
    },
    #[error("Table has no rows or no columns")]
    EmptyTable,
    #[error("Missing baseline column {0}")]
    MissingBaseline(String),
    #[error("{columns} columns but only {colors} colors")]
    PaletteExhausted { columns: usize, colors: usize },
    #[error("Unknown color {0}")]
    UnknownColor(String),
    #[error("No positive values to place on a log axis")]
    NothingToPlot,
    #[error("Values between {lo:e} and {hi:e} do not fit a log axis")]
    OutsideLogRange { lo: f64, hi: f64 },
}

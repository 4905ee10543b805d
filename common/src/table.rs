use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, Trim};

use crate::error::{ReportError, ReportResult};

/// One strategy's measurements, aligned with [`ResultTable::index`]
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Benchmark results indexed by query, one column per strategy.
///
/// Built from the file layout the benchmark tools write, where each CSV row
/// is a strategy and each column after the first is a query:
///
/// ```text
/// db,Q1,Q2
/// JoinBase,10,20
/// Other,30,40
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    index: Vec<String>,
    columns: Vec<Series>,
}

impl ResultTable {
    pub fn new(index: Vec<String>, columns: Vec<Series>) -> Self {
        Self { index, columns }
    }

    pub fn from_path(path: &Path) -> ReportResult<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Reads the CSV and transposes it so queries become rows.
    ///
    /// Cells are trimmed, empty cells become `NaN`. The first cell of every
    /// row names the column it turns into; a repeated name overwrites the
    /// earlier column in place.
    pub fn from_reader<R: Read>(reader: R) -> ReportResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?;
        if headers.is_empty() {
            return Err(ReportError::EmptyHeader);
        }
        let index: Vec<String> = headers.iter().skip(1).map(str::to_owned).collect();

        let mut table = Self {
            index,
            columns: Vec::new(),
        };
        for record in reader.records() {
            let record = record?;
            let name = record.get(0).unwrap_or_default().to_owned();
            let values = record
                .iter()
                .skip(1)
                .zip(&table.index)
                .map(|(cell, query)| parse_cell(cell, query, &name))
                .collect::<ReportResult<Vec<_>>>()?;
            table.insert(Series { name, values });
        }
        Ok(table)
    }

    fn insert(&mut self, series: Series) {
        match self.columns.iter_mut().find(|c| c.name == series.name) {
            Some(existing) => existing.values = series.values,
            None => self.columns.push(series),
        }
    }

    /// Query names, in header order
    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Series> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.columns.is_empty()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }
}

fn parse_cell(cell: &str, query: &str, strategy: &str) -> ReportResult<f64> {
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| ReportError::NotNumeric {
        row: query.to_owned(),
        column: strategy.to_owned(),
        value: cell.to_owned(),
    })
}

use std::{fmt, io::Write};

use crate::{
    error::{ReportError, ReportResult},
    table::ResultTable,
};

/// One strategy's measurements divided by the baseline's, per query
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSeries {
    pub name: String,
    pub baseline: String,
    pub index: Vec<String>,
    pub values: Vec<f64>,
}

/// Divides every column except `baseline` by the `baseline` column.
pub fn ratios_to(table: &ResultTable, baseline: &str) -> ReportResult<Vec<RatioSeries>> {
    let base = table
        .column(baseline)
        .ok_or_else(|| ReportError::MissingBaseline(baseline.to_owned()))?;

    Ok(table
        .columns()
        .iter()
        .filter(|c| c.name != baseline)
        .map(|c| RatioSeries {
            name: c.name.clone(),
            baseline: baseline.to_owned(),
            index: table.index().to_vec(),
            values: c
                .values
                .iter()
                .zip(&base.values)
                .map(|(v, b)| v / b)
                .collect(),
        })
        .collect())
}

pub fn write_ratios<W: Write>(
    out: &mut W,
    table: &ResultTable,
    baseline: &str,
) -> ReportResult<()> {
    for series in ratios_to(table, baseline)? {
        writeln!(out, "{series}")?;
    }
    Ok(())
}

impl fmt::Display for RatioSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time cost ratio - {}:{}", self.name, self.baseline)?;
        let width = self.index.iter().map(|q| q.chars().count()).max().unwrap_or(0);
        for (query, value) in self.index.iter().zip(&self.values) {
            write!(f, "\n{query:<width$}    {}", format_ratio(*value))?;
        }
        Ok(())
    }
}

fn format_ratio(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let s = format!("{value:.6}");
    let s = s.trim_end_matches('0');
    if s.ends_with('.') {
        format!("{s}0")
    } else {
        s.to_owned()
    }
}

use std::ops::Range;

use common::{
    error::{ReportError, ReportResult},
    table::ResultTable,
};

/// Share of each query's slot taken up by its group of bars
pub const GROUP_WIDTH: f64 = 0.5;

/// Log axis bounds covering every positive value and reference line.
///
/// Both ends snap outwards to a power of ten, so the smallest bar always
/// has a visible height.
pub fn log_y_range(table: &ResultTable, reference_lines: &[f64]) -> ReportResult<Range<f64>> {
    let (lo, hi) = table
        .columns()
        .iter()
        .flat_map(|c| c.values.iter())
        .chain(reference_lines)
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(ReportError::NothingToPlot)?;

    let start = 10f64.powi(lo.log10().ceil() as i32 - 1);
    let end = 10f64.powi(hi.log10().floor() as i32 + 1);
    if !start.is_normal() || !end.is_finite() {
        return Err(ReportError::OutsideLogRange { lo, hi });
    }
    Ok(start..end)
}

/// Horizontal extent of one bar, query slots are centred on integers.
pub fn bar_span(query: usize, column: usize, columns: usize) -> (f64, f64) {
    let bar_width = GROUP_WIDTH / columns as f64;
    let left = query as f64 - GROUP_WIDTH / 2.0 + column as f64 * bar_width;
    (left, left + bar_width)
}

/// Tick label for the x axis, blank between query slots
pub fn query_label(index: &[String], x: f64) -> String {
    let slot = x.round();
    if slot < 0.0 || (x - slot).abs() > 0.1 {
        return String::new();
    }
    index.get(slot as usize).cloned().unwrap_or_default()
}

/// Tick label for the y axis, only decades are labelled
pub fn decade_label(y: f64) -> String {
    if y <= 0.0 {
        return String::new();
    }
    let exp = y.log10();
    if (exp - exp.round()).abs() < 1e-6 {
        format!("1e{}", exp.round() as i32)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use common::table::Series;

    use super::*;

    fn table(values: &[&[f64]]) -> ResultTable {
        ResultTable::new(
            (1..=values[0].len()).map(|i| format!("Q{i}")).collect(),
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Series {
                    name: format!("s{i}"),
                    values: v.to_vec(),
                })
                .collect(),
        )
    }

    #[test]
    fn range_snaps_to_decades() {
        let t = table(&[&[1500.0, 2.5e5], &[40_000.0, 7.0e4]]);
        assert_eq!(log_y_range(&t, &[]).unwrap(), 1000.0..1.0e6);
    }

    #[test]
    fn reference_lines_widen_range() {
        let t = table(&[&[1500.0, 2.5e5]]);
        assert_eq!(log_y_range(&t, &[1e3, 1e6]).unwrap(), 100.0..1.0e7);
        let t = table(&[&[500.0]]);
        assert_eq!(log_y_range(&t, &[1e2, 1e3, 1e4]).unwrap(), 10.0..1.0e5);
    }

    #[test]
    fn ignores_unplottable_values() {
        let t = table(&[&[0.0, f64::NAN, -3.0, 20.0]]);
        assert_eq!(log_y_range(&t, &[]).unwrap(), 10.0..100.0);
        let t = table(&[&[0.0, f64::NAN]]);
        assert!(matches!(
            log_y_range(&t, &[]),
            Err(ReportError::NothingToPlot)
        ));
    }

    #[test]
    fn extreme_values_are_rejected() {
        for value in [1e308, f64::MAX, 5e-324, 1e-310, f64::MIN_POSITIVE] {
            let t = table(&[&[value]]);
            assert!(
                matches!(
                    log_y_range(&t, &[]),
                    Err(ReportError::OutsideLogRange { .. })
                ),
                "{value:e} accepted"
            );
        }
        let t = table(&[&[1e-300, 1e300]]);
        let range = log_y_range(&t, &[]).unwrap();
        assert!(range.start.is_normal() && range.start < 1e-300);
        assert!(range.end.is_finite() && range.end > 1e300);
    }

    #[test]
    fn bars_tile_each_group() {
        assert_eq!(bar_span(0, 0, 2), (-0.25, 0.0));
        assert_eq!(bar_span(0, 1, 2), (0.0, 0.25));
        assert_eq!(bar_span(3, 0, 1), (2.75, 3.25));
        let (_, right) = bar_span(1, 2, 3);
        assert!((right - 1.25).abs() < 1e-12);
    }

    #[test]
    fn labels() {
        let index = vec!["Q1".to_owned(), "Q2".to_owned()];
        assert_eq!(query_label(&index, 1.0), "Q2");
        assert_eq!(query_label(&index, 0.5), "");
        assert_eq!(query_label(&index, -0.5), "");
        assert_eq!(query_label(&index, 2.0), "");
        assert_eq!(decade_label(1000.0), "1e3");
        assert_eq!(decade_label(2000.0), "");
    }
}

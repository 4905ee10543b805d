use std::{
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

use common::{
    error::{ReportError, ReportResult},
    plot::Plot,
    table::ResultTable,
};
use eyre::{Context, Result};
use plotters::{element::DashedPathElement, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub mod color;
pub mod layout;

use color::parse_color;
use layout::{bar_span, decade_label, log_y_range, query_label};

const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 16;
const LEGEND_FONT_SIZE: u32 = 16;

/// Grouped bar chart on a log axis, one group per query and one bar per
/// strategy, with dashed horizontal reference lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogBar {
    /// Written into the plot directory, overwritten if present
    pub filename: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(default)]
    pub reference_lines: Vec<f64>,
    /// Bar colors in column order
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_colors() -> Vec<String> {
    ["g", "lightblue", "orange"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    768
}

impl LogBar {
    pub fn new(filename: &str, title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            filename: filename.to_owned(),
            title: title.to_owned(),
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            reference_lines: Vec::new(),
            colors: default_colors(),
            width: default_width(),
            height: default_height(),
        }
    }

    pub fn with_reference_lines(mut self, lines: &[f64]) -> Self {
        self.reference_lines = lines.to_vec();
        self
    }

    fn palette(&self, columns: usize) -> ReportResult<Vec<RGBColor>> {
        if columns > self.colors.len() {
            return Err(ReportError::PaletteExhausted {
                columns,
                colors: self.colors.len(),
            });
        }
        self.colors
            .iter()
            .take(columns)
            .map(|c| parse_color(c))
            .collect()
    }

    fn render(
        &self,
        table: &ResultTable,
        palette: &[RGBColor],
        y_range: Range<f64>,
        filepath: &Path,
    ) -> Result<()> {
        let index = table.index();
        let num_queries = index.len();
        let num_columns = table.columns().len();
        let x_range = -0.5..(num_queries as f64 - 0.5);
        let bottom = y_range.start;

        let root = BitMapBackend::new(filepath, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", TITLE_FONT_SIZE))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_range.clone(), y_range.log_scale())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(num_queries + 1)
            .x_label_formatter(&|x| query_label(index, *x))
            .y_label_formatter(&|y| decade_label(*y))
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        for (column, (series, &color)) in table.columns().iter().zip(palette).enumerate() {
            let bars = series
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite() && **v > 0.0)
                .map(|(query, v)| {
                    let (left, right) = bar_span(query, column, num_columns);
                    [(left, bottom), (right, *v)]
                })
                .collect::<Vec<_>>();
            debug!("{}: {} of {} bars drawn", series.name, bars.len(), num_queries);

            chart
                .draw_series(bars.iter().map(|c| Rectangle::new(*c, color.filled())))?
                .label(series.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
            chart.draw_series(bars.iter().map(|c| Rectangle::new(*c, BLACK.stroke_width(1))))?;
        }

        for &y in &self.reference_lines {
            chart.draw_series(std::iter::once(DashedPathElement::new(
                vec![(x_range.start, y), (x_range.end, y)],
                10,
                6,
                BLACK.stroke_width(2),
            )))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", LEGEND_FONT_SIZE))
            .draw()?;

        root.present()?;
        Ok(())
    }
}

#[typetag::serde]
impl Plot for LogBar {
    fn plot(&self, table: &ResultTable, plot_path: &Path) -> Result<PathBuf> {
        if table.is_empty() {
            return Err(ReportError::EmptyTable.into());
        }
        let palette = self.palette(table.columns().len())?;
        let y_range = log_y_range(table, &self.reference_lines)?;

        if !plot_path.exists() {
            fs::create_dir_all(plot_path)?;
        }
        let filepath = plot_path.join(&self.filename);
        self.render(table, &palette, y_range, &filepath)
            .with_context(|| format!("Render {}", filepath.display()))?;

        info!("Wrote {}", filepath.display());
        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use common::table::Series;

    use super::*;

    fn latency() -> ResultTable {
        ResultTable::from_reader(
            "db,Q1,Q2,Q3\nJoinBase,850,1200,40000\nTimescale,9100,350000,2000000\nPostgreSQL,12000,800000,\n"
                .as_bytes(),
        )
        .unwrap()
    }

    fn chart() -> LogBar {
        LogBar::new(
            "latency.png",
            "OIDBS Benchmark - Query Latency",
            "Queries",
            "End-to-end Query Time (log scale) (microseconds)",
        )
        .with_reference_lines(&[1e3, 1e6])
    }

    #[test]
    fn writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = chart().plot(&latency(), dir.path()).unwrap();
        assert_eq!(path, dir.path().join("latency.png"));
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn creates_plot_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("plots").join("oidbs");
        let path = chart().plot(&latency(), &nested).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn same_input_same_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let first = fs::read(chart().plot(&latency(), dir.path()).unwrap()).unwrap();
        let second = fs::read(chart().plot(&latency(), dir.path()).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn too_many_columns() {
        let table = ResultTable::new(
            vec!["Q1".into()],
            (0..4)
                .map(|i| Series {
                    name: format!("db{i}"),
                    values: vec![10.0],
                })
                .collect(),
        );
        let dir = tempfile::tempdir().unwrap();
        let err = chart().plot(&table, dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::PaletteExhausted {
                columns: 4,
                colors: 3
            })
        ));
        assert!(!dir.path().join("latency.png").exists());
    }

    #[test]
    fn extreme_values_fail_fast() {
        let dir = tempfile::tempdir().unwrap();
        for data in ["db,Q1\nJoinBase,1e308\n", "db,Q1\nJoinBase,5e-324\n"] {
            let table = ResultTable::from_reader(data.as_bytes()).unwrap();
            let err = chart().plot(&table, dir.path()).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<ReportError>(),
                Some(ReportError::OutsideLogRange { .. })
            ));
        }
        assert!(!dir.path().join("latency.png").exists());
    }

    #[test]
    fn empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let err = chart().plot(&ResultTable::default(), dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::EmptyTable)
        ));
    }

    #[test]
    fn yaml_config() {
        let plot: Box<dyn Plot> = serde_yml::from_str(
            "type: LogBar\nfilename: c.png\ntitle: t\nx_label: x\ny_label: y\nreference_lines: [100.0, 1000.0, 10000.0]\n",
        )
        .unwrap();
        let yaml = serde_yml::to_string(&plot).unwrap();
        assert!(yaml.contains("type: LogBar"));
        assert!(yaml.contains("lightblue"));
        assert!(yaml.contains("width: 1024"));
    }
}

pub mod charting;
pub mod helvetica;
pub mod histogram;
pub mod pdf;

use crate::config::FigureConfig;
use crate::frequency::FrequencyTable;
use crate::summary::Summary;
use crate::util::group_thousands;

pub use histogram::draw_histogram;
pub use pdf::PdfBackend;

/// Everything drawn in the histogram figure, resolved to concrete strings.
#[derive(Debug, Clone)]
pub struct Figure {
    pub table: FrequencyTable,
    pub summary: Summary,
    pub title: [String; 2],
    pub x_label: String,
    pub y_label: String,
    pub mean_label: String,
    pub expected_label: String,
    pub annotation: [String; 3],
    pub x_window: (f64, f64),
}

impl Figure {
    pub fn new(table: FrequencyTable, summary: Summary, config: &FigureConfig) -> Self {
        Self {
            title: [
                "Tweak Avalanche Effect: Hamming Distance Distribution".to_string(),
                format!(
                    "({} measurements, mean = {:.1} bits)",
                    group_thousands(config.nominal_measurements),
                    summary.mean
                ),
            ],
            x_label: "Hamming Distance (bits changed)".to_string(),
            y_label: "Frequency (count)".to_string(),
            mean_label: format!("Mean = {:.1} bits", summary.mean),
            expected_label: format!("Expected (random) = {} bits", summary.expected),
            annotation: summary.annotation_lines(),
            x_window: config.x_window,
            table,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_for_embedded_table() {
        let table = FrequencyTable::embedded();
        let summary = Summary::from_table(&table, 64.0, 0.5).unwrap();
        let fig = Figure::new(table, summary, &FigureConfig::default());
        assert_eq!(
            fig.title[1],
            "(2,550,000 measurements, mean = 64.0 bits)"
        );
        assert_eq!(fig.mean_label, "Mean = 64.0 bits");
        assert_eq!(fig.expected_label, "Expected (random) = 64 bits");
        assert_eq!(fig.annotation[0], "Total measurements: 2,550,000");
        assert_eq!(fig.x_window, (30.0, 95.0));
    }

    #[test]
    fn title_keeps_nominal_count() {
        let table = FrequencyTable::from_pairs([(34, 1), (91, 2)]).unwrap();
        let summary = Summary::from_table(&table, 64.0, 0.5).unwrap();
        let fig = Figure::new(table, summary, &FigureConfig::default());
        assert_eq!(fig.title[1], "(2,550,000 measurements, mean = 72.0 bits)");
        assert_eq!(fig.annotation[0], "Total measurements: 3");
    }
}

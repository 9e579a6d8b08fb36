use crate::error::{FigureError, Result};
use crate::frequency::FrequencyTable;
use crate::util::group_thousands;
use std::fmt;

/// Statistics derived once from a frequency table and shared by the chart
/// and the console report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub expected: f64,
    pub tolerance: f64,
}

impl Summary {
    pub fn from_table(table: &FrequencyTable, expected: f64, tolerance: f64) -> Result<Self> {
        let (mean, std_dev) = table
            .mean()
            .zip(table.std_dev())
            .ok_or(FigureError::EmptyTable)?;
        Ok(Self {
            total: table.total(),
            mean,
            std_dev,
            expected,
            tolerance,
        })
    }

    pub fn difference(&self) -> f64 {
        (self.mean - self.expected).abs()
    }

    pub fn within_tolerance(&self) -> bool {
        self.difference() <= self.tolerance
    }

    /// Lines of the in-figure annotation box.
    pub fn annotation_lines(&self) -> [String; 3] {
        [
            format!("Total measurements: {}", group_thousands(self.total)),
            format!("Mean: {:.2} bits", self.mean),
            format!("Std Dev: {:.2} bits", self.std_dev),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Total measurements: {}", group_thousands(self.total))?;
        writeln!(f, "  Mean: {:.2} bits", self.mean)?;
        writeln!(f, "  Std Dev: {:.2} bits", self.std_dev)?;
        writeln!(f, "  Expected: {:.1} bits", self.expected)?;
        writeln!(f, "  Difference: {:.4} bits", self.difference())?;
        writeln!(f)?;
        if self.within_tolerance() {
            write!(f, "✓ Perfect avalanche effect demonstrated!")
        } else {
            write!(
                f,
                "⚠ Mean is {:.4} bits away from the expected {:.1} bits",
                self.difference(),
                self.expected
            )
        }
    }
}

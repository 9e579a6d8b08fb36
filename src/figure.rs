use crate::chart::{draw_histogram, Figure, PdfBackend};
use crate::config::FigureConfig;
use crate::error::{FigureError, Result};
use crate::frequency::FrequencyTable;
use crate::summary::Summary;
use clap::ValueEnum;
use log::{info, warn};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Png,
    Both,
}

impl OutputFormat {
    pub fn wants_pdf(&self) -> bool {
        matches!(self, OutputFormat::Pdf | OutputFormat::Both)
    }

    pub fn wants_png(&self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub summary: Summary,
    pub files: Vec<RenderedFile>,
}

/// Renders the hamming-distance histogram to the configured files.
#[derive(Debug, Clone)]
pub struct FigureGenerator {
    config: FigureConfig,
    output_dir: PathBuf,
}

impl FigureGenerator {
    pub fn new<P: AsRef<Path>>(config: FigureConfig, output_dir: P) -> Self {
        Self {
            config,
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_path(&self, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.config.output_stem, extension))
    }

    pub fn render(&self, table: &FrequencyTable, format: OutputFormat) -> Result<Report> {
        let summary = Summary::from_table(
            table,
            self.config.expected_mean,
            self.config.avalanche_tolerance,
        )?;
        if summary.total != self.config.nominal_measurements {
            warn!(
                "title quotes {} measurements but the table holds {}",
                self.config.nominal_measurements, summary.total
            );
        }
        info!(
            "rendering {} distances in {}..={} (total {}, mean {:.4})",
            table.len(),
            table.min_distance().unwrap_or_default(),
            table.max_distance().unwrap_or_default(),
            summary.total,
            summary.mean
        );

        let figure = Figure::new(table.clone(), summary, &self.config);
        let mut files = Vec::new();
        if format.wants_pdf() {
            files.push(self.write_pdf(&figure)?);
        }
        if format.wants_png() {
            files.push(self.write_png(&figure)?);
        }
        Ok(Report { summary, files })
    }

    fn write_pdf(&self, figure: &Figure) -> Result<RenderedFile> {
        let path = self.output_path("pdf");
        let dpi = self.config.pdf_dpi;
        let root = PdfBackend::new(&path, self.config.pixel_size(dpi), dpi).into_drawing_area();
        draw_histogram(&root, figure, dpi).map_err(|e| render_error(&path, e))?;
        finish(path)
    }

    fn write_png(&self, figure: &Figure) -> Result<RenderedFile> {
        let path = self.output_path("png");
        let dpi = self.config.png_dpi;
        {
            let root = BitMapBackend::new(&path, self.config.pixel_size(dpi)).into_drawing_area();
            draw_histogram(&root, figure, dpi).map_err(|e| render_error(&path, e))?;
        }
        finish(path)
    }
}

fn render_error<E: std::fmt::Display>(path: &Path, e: E) -> FigureError {
    FigureError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn finish(path: PathBuf) -> Result<RenderedFile> {
    let bytes = std::fs::metadata(&path)?.len();
    info!("saved {} ({} bytes)", path.display(), bytes);
    Ok(RenderedFile { path, bytes })
}

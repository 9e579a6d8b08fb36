use avalanche_plot::{
    config::{ConfigStore, FigureConfig, FileConfigStore},
    FigureGenerator, FrequencyTable, OutputFormat,
};
use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use env_logger::Env;
use std::path::PathBuf;

/// render the tweak avalanche hamming-distance histogram for the report
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Renders the hamming-distance histogram of a tweak avalanche measurement as stat_histogram.pdf and stat_histogram.png, with the observed mean and the 64-bit expectation marked, and prints summary statistics."
)]
pub struct Cli {
    /// read `hamming_distance,count` CSV instead of the embedded measurement
    #[clap(short = 'i', long)]
    input: Option<PathBuf>,

    /// directory to write the figures into
    #[clap(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// file name stem for the figures (overrides config)
    #[clap(long)]
    stem: Option<String>,

    /// which figures to write
    #[clap(short = 'f', long, value_enum, default_value_t = OutputFormat::Both)]
    format: OutputFormat,

    /// also write the frequency table as CSV to this path
    #[clap(long)]
    export_csv: Option<PathBuf>,

    /// JSON config file (defaults to the per-user config location)
    #[clap(long)]
    config: Option<PathBuf>,

    /// more log output; repeat for debug
    #[clap(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn load_config(&self) -> FigureConfig {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        let mut config = store.load();
        if let Some(stem) = &self.stem {
            config.output_stem = stem.clone();
        }
        config
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();

    if let Err(e) = run(&cli) {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, e).exit();
    }
}

fn run(cli: &Cli) -> avalanche_plot::Result<()> {
    let table = match &cli.input {
        Some(path) => FrequencyTable::load_csv(path)?,
        None => FrequencyTable::embedded(),
    };

    if let Some(path) = &cli.export_csv {
        table.save_csv(path)?;
        println!("✓ Saved: {}", path.display());
    }

    let generator = FigureGenerator::new(cli.load_config(), &cli.output_dir);
    let report = generator.render(&table, cli.format)?;
    for file in &report.files {
        println!("✓ Saved: {}", file.path.display());
    }

    println!("\n{}", report.summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["avalanche-plot"]);
        assert_eq!(cli.format, OutputFormat::Both);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(cli.input.is_none());
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn stem_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("config.json");
        let cli = Cli::parse_from([
            "avalanche-plot",
            "--config",
            cfg.to_str().unwrap(),
            "--stem",
            "fig3",
            "-vv",
        ]);
        let config = cli.load_config();
        assert_eq!(config.output_stem, "fig3");
        assert_eq!(config.png_dpi, 150);
        assert_eq!(cli.log_level(), "debug");
    }
}

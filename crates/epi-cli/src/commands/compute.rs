use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use epi_engine::serde_io::{report_to_json, save_report};
use epi_engine::{compute, ComputeOpts, CsvSink, EpistasisReport, TextSink, UncertaintyMode};
use tracing::debug;

use crate::input::Landscape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Landscape file: JSON `{"fitness": [...], "errors": [...]}` or CSV with a `fitness,error` header.
    #[arg(long)]
    pub input: PathBuf,
    /// Number of species; inferred from the input length when absent.
    #[arg(long)]
    pub species: Option<usize>,
    /// Treat the second column as upper fitness bounds and report intervals.
    #[arg(long)]
    pub interval: bool,
    /// Input rows follow the five-species experimental order.
    #[arg(long)]
    pub experimental_order: bool,
    /// YAML file with computation options. Flags override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Keep only standard calculations.
    #[arg(long)]
    pub standard_only: bool,
    /// Keep circuit results that repeat an earlier calculation.
    #[arg(long)]
    pub no_dedup: bool,
    /// Apply matrices on the rayon pool.
    #[arg(long)]
    pub parallel: bool,
    /// Decimals printed by the text format.
    #[arg(long, default_value_t = 6)]
    pub precision: usize,
    /// Write to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ComputeArgs, stdout: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let mut landscape = Landscape::load(&args.input)?;
    if args.experimental_order {
        landscape = landscape.into_canonical_order()?;
    }
    let species = landscape.species(args.species)?;
    let opts = resolve_opts(args)?;
    debug!(species, ?opts, input = %args.input.display(), "computing epistasis");

    let mut report = compute(&landscape.fitness, &landscape.errors, species, &opts)?;
    if args.standard_only {
        report = report.standard_subset();
    }

    match &args.out {
        Some(path) if args.format == OutputFormat::Json => save_report(path, &report)?,
        Some(path) => {
            let mut file = BufWriter::new(File::create(path)?);
            write_report(&report, args, &mut file)?;
            file.flush()?;
        }
        None => write_report(&report, args, stdout)?,
    }
    Ok(())
}

/// Options from `--config`, then overridden by the command-line flags.
pub fn resolve_opts(args: &ComputeArgs) -> Result<ComputeOpts, Box<dyn Error>> {
    let mut opts = match &args.config {
        Some(path) => serde_yaml::from_str(&fs::read_to_string(path)?)?,
        None => ComputeOpts::default(),
    };
    if args.interval {
        opts.mode = UncertaintyMode::Interval;
    }
    if args.no_dedup {
        opts.deduplicate = false;
    }
    if args.parallel {
        opts.parallel = true;
    }
    Ok(opts)
}

fn write_report(
    report: &EpistasisReport,
    args: &ComputeArgs,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    match args.format {
        OutputFormat::Text => {
            let mut sink = TextSink::new(out, args.precision);
            report.emit(&mut sink)?;
        }
        OutputFormat::Csv => {
            let mut sink = CsvSink::new(out, report.mode)?;
            report.emit(&mut sink)?;
            sink.finish()?;
        }
        OutputFormat::Json => writeln!(out, "{}", report_to_json(report)?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use epi_engine::serde_io::report_from_json;

    fn args_for(input: PathBuf) -> ComputeArgs {
        ComputeArgs {
            input,
            species: None,
            interval: false,
            experimental_order: false,
            config: None,
            format: OutputFormat::Text,
            standard_only: false,
            no_dedup: false,
            parallel: false,
            precision: 2,
            out: None,
        }
    }

    fn squares_input(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("squares.json");
        fs::write(
            &path,
            r#"{"fitness": [0, 1, 4, 9, 16, 25, 36, 49], "errors": [1, 1, 1, 1, 1, 1, 1, 1]}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn flags_override_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("opts.yaml");
        fs::write(&config, "mode: interval\ndeduplicate: false\n").unwrap();

        let mut args = args_for(squares_input(&dir));
        args.config = Some(config);
        let opts = resolve_opts(&args).unwrap();
        assert_eq!(opts.mode, UncertaintyMode::Interval);
        assert!(!opts.deduplicate);
        assert!(!opts.parallel);

        args.parallel = true;
        assert!(resolve_opts(&args).unwrap().parallel);
    }

    #[test]
    fn text_output_lists_every_calculation() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(squares_input(&dir));
        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 24);
        assert_eq!(text.lines().next(), Some("a_ABC 16.00 2.00"));
    }

    #[test]
    fn standard_json_goes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args_for(squares_input(&dir));
        let target = dir.path().join("report.json");
        args.format = OutputFormat::Json;
        args.standard_only = true;
        args.out = Some(target.clone());

        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        assert!(out.is_empty());
        let report = report_from_json(&fs::read_to_string(target).unwrap()).unwrap();
        assert_eq!(report.tags, vec!["a_ABC", "c_ABC", "e_ABC", "u_ABC"]);
    }
}

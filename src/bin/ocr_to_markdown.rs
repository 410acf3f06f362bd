//! Convert scanned pages to column-ordered Markdown
//!
//! Inputs are either one PDF (rasterized with pdftoppm, then OCR'd with
//! tesseract), page images (OCR'd), or previously captured `.tsv` / `.hocr`
//! OCR output.
//!
//! Usage:
//!   ocr_to_markdown menu.pdf
//!   ocr_to_markdown --columns 2 --lang eng page-1.png page-2.png
//!   ocr_to_markdown --preset fixed-geometry --output menu.md page-1.tsv page-2.tsv
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) to see layout decisions.

use ocr_reflow::ocr::{PageRasterizer, PdftoppmRasterizer, RecordFileSource, TesseractSource};
use ocr_reflow::parser::InputFormat;
use ocr_reflow::pipeline::{LayoutConfig, LayoutPreset, PagePipeline};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

const USAGE: &str = "\
Usage: ocr_to_markdown [OPTIONS] <INPUT>...

Inputs:
  one PDF, page images, or captured .tsv/.hocr/.html OCR output

Options:
  --config <FILE>    JSON layout configuration
  --preset <NAME>    menu, fixed-geometry, lenient or strict
  --columns <N>      number of columns (default: 3)
  --format <FMT>     tesseract output to request: tsv or hocr (default: tsv)
  --lang <CODE>      tesseract language (default: nld)
  --psm <N>          tesseract page segmentation mode (default: 3)
  --output <FILE>    write Markdown here instead of stdout
  --verbose, -v      debug logging
  --help, -h         show this help";

struct CliConfig {
    inputs: Vec<PathBuf>,
    config_file: Option<PathBuf>,
    preset: Option<LayoutPreset>,
    columns: Option<usize>,
    format: InputFormat,
    language: String,
    psm: u32,
    output: Option<PathBuf>,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            inputs: Vec::new(),
            config_file: None,
            preset: None,
            columns: None,
            format: InputFormat::Tsv,
            language: "nld".to_string(),
            psm: 3,
            output: None,
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    config.config_file = Some(PathBuf::from(value(&args, &mut i)?));
                },
                "--preset" => {
                    config.preset = Some(value(&args, &mut i)?.parse::<LayoutPreset>().map_err(|e| format!("{}", e))?);
                },
                "--columns" => {
                    let raw = value(&args, &mut i)?;
                    config.columns = Some(raw.parse::<usize>().map_err(|_| format!("invalid column count '{}'", raw))?);
                },
                "--format" => {
                    config.format = value(&args, &mut i)?.parse::<InputFormat>().map_err(|e| format!("{}", e))?;
                },
                "--lang" => {
                    config.language = value(&args, &mut i)?.to_string();
                },
                "--psm" => {
                    let raw = value(&args, &mut i)?;
                    config.psm = raw.parse::<u32>().map_err(|_| format!("invalid page segmentation mode '{}'", raw))?;
                },
                "--output" | "-o" => {
                    config.output = Some(PathBuf::from(value(&args, &mut i)?));
                },
                "--verbose" | "-v" => {
                    config.verbose = true;
                },
                "--help" | "-h" => {
                    println!("{}", USAGE);
                    std::process::exit(0);
                },
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown option '{}'", flag));
                },
                input => {
                    config.inputs.push(PathBuf::from(input));
                },
            }
            i += 1;
        }

        if config.inputs.is_empty() {
            return Err("no input given".to_string());
        }
        Ok(config)
    }

    fn layout_config(&self) -> ocr_reflow::Result<LayoutConfig> {
        let mut layout = match (&self.config_file, self.preset) {
            (Some(path), _) => LayoutConfig::from_file(path)?,
            (None, Some(preset)) => preset.create_config(),
            (None, None) => LayoutConfig::default(),
        };
        if let Some(columns) = self.columns {
            layout = layout.with_columns(columns);
        }
        layout.validate()?;
        Ok(layout)
    }
}

/// Value following the option at `args[*i]`.
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let option = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", option))
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn run(cli: &CliConfig) -> ocr_reflow::Result<String> {
    let layout = cli.layout_config()?;
    let filter = layout.filter.clone();
    let pipeline = PagePipeline::with_config(layout);

    if cli.inputs.iter().all(|p| InputFormat::from_extension(p).is_some()) {
        let source = RecordFileSource::new(filter);
        return Ok(pipeline.process_document(&source, &cli.inputs));
    }

    let source = TesseractSource::new()
        .with_language(cli.language.clone())
        .with_psm(cli.psm)
        .with_format(cli.format)
        .with_filter(filter);

    match cli.inputs.as_slice() {
        [document] if is_pdf(document) => {
            let pages = PdftoppmRasterizer::new().rasterize(document)?;
            Ok(pipeline.process_document(&source, pages.pages()))
        },
        inputs if inputs.iter().any(|p| is_pdf(p)) => Err(ocr_reflow::Error::Config(
            "a PDF must be the only input".to_string(),
        )),
        inputs => Ok(pipeline.process_document(&source, inputs)),
    }
}

fn main() {
    let cli = match CliConfig::from_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        },
    };

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let start_time = Instant::now();
    let markdown = match run(&cli) {
        Ok(markdown) => markdown,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    };
    log::info!("Converted {} input(s) in {:.2}s", cli.inputs.len(), start_time.elapsed().as_secs_f64());

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, format!("{}\n", markdown)) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
            eprintln!("Wrote {}", path.display());
        },
        None => println!("{}", markdown),
    }
}

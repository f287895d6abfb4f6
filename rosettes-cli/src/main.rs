//! rosettes CLI - highlight files from the command line.
//!
//! Reads a file (or stdin), tokenizes it as the requested language and
//! prints the rendered output. ANSI terminal output is the default;
//! `--formatter html` produces an embeddable fragment instead.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rosettes::{ClassStyle, Options};

/// Highlight source code to ANSI or HTML.
#[derive(Parser, Debug)]
#[command(name = "rosettes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Highlight source code to ANSI or HTML", long_about = None)]
struct Cli {
    /// File to highlight; reads stdin when omitted
    file: Option<PathBuf>,

    /// Language name or alias
    #[arg(short, long, default_value = "plaintext")]
    language: String,

    /// Output formatter (terminal, html, null)
    #[arg(short, long, default_value = "terminal")]
    formatter: String,

    /// HTML class naming scheme
    #[arg(long, value_enum, default_value_t = ClassStyleArg::Semantic)]
    class_style: ClassStyleArg,

    /// Container class override for HTML output
    #[arg(long)]
    container_class: Option<String>,

    /// Prefix each line with its number
    #[arg(short = 'n', long)]
    line_numbers: bool,

    /// Mark a 1-based line as highlighted; may be repeated
    #[arg(long = "highlight-line", value_name = "N")]
    highlight_lines: Vec<u32>,

    /// List supported languages and exit
    #[arg(long)]
    list_languages: bool,

    /// List supported formatters and exit
    #[arg(long)]
    list_formatters: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ClassStyleArg {
    /// Readable class names (`syntax-keyword`)
    Semantic,
    /// Short class names matching existing themes (`k`, `nf`)
    Compat,
}

impl From<ClassStyleArg> for ClassStyle {
    fn from(arg: ClassStyleArg) -> Self {
        match arg {
            ClassStyleArg::Semantic => ClassStyle::Semantic,
            ClassStyleArg::Compat => ClassStyle::Compat,
        }
    }
}

fn read_source(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            Ok(buffer)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .context("initializing logger")?;

    if cli.list_languages {
        for name in rosettes::list_languages() {
            println!("{name}");
        }
        return Ok(());
    }
    if cli.list_formatters {
        for name in rosettes::list_formatters() {
            println!("{name}");
        }
        return Ok(());
    }

    let source = read_source(cli.file.as_ref())?;

    let mut options = Options {
        formatter: cli.formatter.as_str(),
        class_style: cli.class_style.into(),
        container_class: cli.container_class.as_deref(),
        show_line_numbers: cli.line_numbers,
        ..Options::default()
    };
    options.highlighted_lines.extend(cli.highlight_lines.iter().copied());

    log::debug!(
        "highlighting {} bytes as {} via {}",
        source.len(),
        cli.language,
        cli.formatter
    );

    let output = rosettes::highlight_with(&source, &cli.language, &options)?;
    print!("{output}");
    Ok(())
}

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use pith_core::{LayoutConfig, Method, extract_content, parse_document_with};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for extracted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: html, text", s)),
        }
    }
}

/// Extract the main content region from HTML pages by text density
#[derive(Parser, Debug)]
#[command(name = "pith")]
#[command(author = "Pith Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Extract main content from HTML pages", long_about = None)]
struct Args {
    /// Local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (html, text)
    #[arg(short, long, default_value = "html", value_name = "FORMAT")]
    format: OutputFormat,

    /// Density method (standard, composite, hybrid)
    #[arg(short, long, default_value = "composite", value_name = "METHOD")]
    method: Method,

    /// Assumed page width in pixels for the hybrid method
    #[arg(long, default_value = "1024", value_name = "PX")]
    page_width: f64,

    /// Print extraction statistics as JSON to stderr
    #[arg(long)]
    stats: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Print a styled banner for verbose mode
fn print_banner() {
    eprintln!("\n{} {} {}", "Pith".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Extract main content from HTML pages".dimmed());
    eprintln!();
}

/// Print a styled step message
fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Format file size for display
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let (html, size) = if args.input == "-" {
        if args.verbose {
            print_step(1, 4, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        let len = buffer.len();
        (buffer, len)
    } else {
        if args.verbose {
            print_step(1, 4, &format!("Reading from file {}", args.input.bright_white()));
        }
        let content =
            fs::read_to_string(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
        let len = content.len();
        (content, len)
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), format_size(size).bright_white());
        eprintln!();
    }

    if args.verbose {
        print_step(2, 4, "Parsing HTML document");
    }

    let layout = LayoutConfig { page_width: args.page_width };
    let mut tree = parse_document_with(&html, &layout).context("Failed to parse HTML")?;
    let nodes_before = tree.node_count();

    if args.verbose {
        eprintln!("  {} {}", "Nodes:".dimmed(), nodes_before.to_string().bright_white());
        eprintln!();
    }

    if args.verbose {
        print_step(3, 4, &format!("Extracting content ({})", args.method));
    }

    let elapsed = extract_content(&mut tree, args.method);
    let nodes_after = tree.node_count();

    if args.verbose {
        eprintln!(
            "  {} {}",
            "Elapsed:".dimmed(),
            format!("{:.3} ms", elapsed.as_secs_f64() * 1000.0).bright_white()
        );
        eprintln!(
            "  {} {}",
            "Kept:".dimmed(),
            format!("{}/{}", nodes_after, nodes_before).bright_white()
        );
        eprintln!();
    }

    let output = match args.format {
        OutputFormat::Html => tree.to_html(),
        OutputFormat::Text => tree.text_content(),
    };

    if args.stats {
        let stats = serde_json::json!({
            "method": args.method.as_str(),
            "elapsed_ms": elapsed.as_secs_f64() * 1000.0,
            "nodes_before": nodes_before,
            "nodes_after": nodes_after,
            "output_chars": output.chars().count(),
        });
        eprintln!("{}", stats);
    }

    if args.verbose {
        print_step(4, 4, "Writing output");
        eprintln!(
            "  {} {}",
            "Format:".dimmed(),
            format!("{:?}", args.format).bright_white()
        );
        eprintln!();
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}

use std::fmt::{self, Write as _};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use kxml::{Config, Content, Element};

#[derive(Debug, Parser)]
#[command(name = "kxml", version, about = "Parse markup into an element tree")]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Reject end tags that do not match the open element
    #[arg(long)]
    strict: bool,
    /// Keep empty text runs between adjacent tags
    #[arg(long)]
    keep_empty_text: bool,
    /// Maximum nesting depth (0 means unlimited)
    #[arg(long, default_value_t = Config::default().max_depth)]
    max_depth: u16,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Outline,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &Args) -> Result<()> {
    let input = read_input(&args.input)?;
    info!(bytes = input.len(), "read input");

    let config = Config {
        max_depth: args.max_depth,
        ..Config::default()
    }
    .with_strict_end_tags(args.strict)
    .with_keep_empty_text(args.keep_empty_text);
    debug!(?config, "parsing");

    let content = kxml::parse_with_config(&input, config).with_context(|| match &args.input {
        Some(path) => format!("failed to parse {}", path.display()),
        None => "failed to parse stdin".to_string(),
    })?;

    let rendered = match args.format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&content).context("failed to serialize tree")?;
            json.push('\n');
            json
        }
        OutputFormat::Outline => render_outline(&content).context("failed to render outline")?,
    };

    write_output(&args.output, rendered.as_bytes())
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}

/// Indented one-node-per-line view of the tree
fn render_outline(content: &[Content]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for node in content {
        outline_node(&mut out, node, 0)?;
    }
    Ok(out)
}

fn outline_node(out: &mut String, node: &Content, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match node {
        Content::Text(text) => writeln!(out, "{indent}{text:?}"),
        Content::Child(element) => {
            writeln!(out, "{indent}{}", describe(element))?;
            for child in &element.content {
                outline_node(out, child, depth + 1)?;
            }
            Ok(())
        }
    }
}

fn describe(element: &Element) -> String {
    let mut line = element.qualified_name();
    for attr in &element.attributes {
        let name = match &attr.namespace {
            Some(ns) => format!("{ns}:{}", attr.name),
            None => attr.name.clone(),
        };
        line.push_str(&format!(" @{name}={:?}", attr.value));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline() -> Result<()> {
        let content = kxml::parse(r#"<a x="1"><ns:b/>hi</a>"#)?;
        assert_eq!(
            render_outline(&content)?,
            "a @x=\"1\"\n  ns:b\n  \"hi\"\n"
        );
        Ok(())
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["kxml", "in.xml", "--format", "outline", "--strict", "-vv"]);
        assert_eq!(args.format, OutputFormat::Outline);
        assert!(args.strict);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.max_depth, 0);
    }
}

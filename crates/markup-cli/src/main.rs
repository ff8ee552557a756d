//! Markup CLI
//!
//! Parses markup from a file, an inline string or stdin and prints the
//! resulting forest.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use markup_parser::{CloseMatching, Forest, MarkupParser, ParserConfig, dump_forest};
use tracing_subscriber::EnvFilter;

/// Parse HTML-like markup and print the node tree
#[derive(Parser, Debug)]
#[command(name = "markup")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree listing of a file
    markup page.xml

    # Parse an inline string as JSON
    markup --markup '<a id="x">hi</a>' --format json

    # Read from stdin
    cat page.xml | markup
"#)]
struct Cli {
    /// Markup file to parse (reads stdin when omitted)
    #[arg(value_name = "FILE", conflicts_with = "markup")]
    path: Option<PathBuf>,

    /// Parse this string instead of a file
    #[arg(long, value_name = "MARKUP")]
    markup: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Fail when elements nest deeper than this
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// How closing tags are matched to opening tags
    #[arg(long, value_enum, default_value_t = Matching::Naive)]
    close_matching: Matching,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented debug listing
    Tree,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Matching {
    /// First literal closing tag
    Naive,
    /// Balance nested tags of the same name
    DepthAware,
}

impl From<Matching> for CloseMatching {
    fn from(matching: Matching) -> Self {
        match matching {
            Matching::Naive => CloseMatching::Naive,
            Matching::DepthAware => CloseMatching::DepthAware,
        }
    }
}

impl Cli {
    fn parser_config(&self) -> ParserConfig {
        let config = ParserConfig::new().with_close_matching(self.close_matching.into());
        match self.max_depth {
            Some(depth) => config.with_max_depth(depth),
            None => config,
        }
    }

    fn read_input(&self) -> Result<String> {
        if let Some(ref markup) = self.markup {
            return Ok(markup.clone());
        }

        match self.path {
            Some(ref path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            None => {
                let mut input = String::new();
                std::io::stdin()
                    .read_to_string(&mut input)
                    .context("Failed to read stdin")?;
                Ok(input)
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render(forest: &Forest, format: Format) -> Result<String> {
    match format {
        Format::Tree => Ok(dump_forest(forest)),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(forest).context("Failed to encode JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = cli.read_input()?;
    let parser = MarkupParser::with_config(cli.parser_config());
    tracing::debug!(config = ?parser.config(), "Parser configured");

    let forest = parser.parse(&input).context("Failed to parse markup")?;
    tracing::info!(roots = forest.len(), "Parsed input");

    print!("{}", render(&forest, cli.format)?);
    Ok(())
}

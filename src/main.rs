use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser as _;
use linemark::{ParseOptions, Parser};
use tracing_subscriber::EnvFilter;

/// Convert Markdown read from stdin to HTML on stdout.
#[derive(clap::Parser)]
#[command(name = "linemark", version, about)]
struct Cli {
    /// JSON object of option overrides, e.g. '{"parseImage": false}'.
    #[arg(long)]
    options: Option<String>,

    /// Print the assembled fragment without the formatting pass.
    #[arg(long)]
    no_format: bool,

    /// Render numbered list items as `<ol>`.
    #[arg(long)]
    ordered_lists: bool,
}

impl Cli {
    fn parse_options(&self) -> Result<ParseOptions, serde_json::Error> {
        let mut options = match &self.options {
            Some(json) => ParseOptions::from_json(json)?,
            None => ParseOptions::default(),
        };
        if self.no_format {
            options.format_html = false;
        }
        if self.ordered_lists {
            options.ordered_lists = true;
        }
        Ok(options)
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.parse_options()?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let html = Parser::new(options).parse(&input)?;
    io::stdout().write_all(html.as_bytes())?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

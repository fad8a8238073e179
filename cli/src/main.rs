//! mdpdf CLI - styled PDF report generation tool

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;

use mdpdf::{generate_report_file, parse_input, BuildOptions};

#[derive(Parser)]
#[command(name = "mdpdf")]
#[command(version)]
#[command(about = "Generate styled PDF reports from chat message payloads", long_about = None)]
struct Cli {
    /// JSON payload (reads stdin if not specified)
    #[arg(value_name = "JSON")]
    payload: Option<String>,

    /// Output PDF file
    #[arg(short, long, value_name = "FILE", default_value = "output.pdf")]
    output: PathBuf,

    /// Pin the generation date (YYYY-MM-DD) for reproducible output
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let payload = match &cli.payload {
        Some(json) => json.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let input = parse_input(&payload)?;

    let mut options = BuildOptions::new();
    if let Some(date) = cli.date {
        options = options.with_generated_date(date);
    }

    generate_report_file(&input, &options, &cli.output)?;

    print_summary(&input, &cli.output);
    Ok(())
}

fn print_summary(input: &mdpdf::ReportInput, output: &Path) {
    let assistant = input.messages.iter().filter(|m| m.is_assistant()).count();
    println!(
        "{} {}",
        "PDF generated:".green().bold(),
        output.display()
    );
    println!(
        "  {} message(s), {} used ({})",
        input.messages.len(),
        assistant,
        input.report_type
    );
}

use canvas_extract::{ContentBlock, OutputFormat, extract_blocks};
use clap::{ArgAction, Parser};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "canvas-cli")]
#[command(about = "Artifact extraction host for captured Canvas step output")]
struct Cli {
    /// File holding captured pipeline-step output.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Literal step output (reads stdin when neither source is given).
    #[arg(long)]
    text: Option<String>,
    /// Output format the producing step declared for its result.
    #[arg(long)]
    format: Option<String>,
    /// Emit the block sequence as a JSON array instead of summary lines.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, String> {
    let text = load_step_output(cli.input.as_deref(), cli.text.as_deref())?;
    let format = cli
        .format
        .as_deref()
        .map(|raw| raw.parse::<OutputFormat>())
        .transpose()
        .map_err(|error| error.to_string())?;

    let blocks = extract_blocks(&text, format);
    if cli.json {
        let json = serde_json::to_string_pretty(&blocks).map_err(|error| error.to_string())?;
        println!("{json}");
    } else {
        print_block_summary(&blocks);
    }
    Ok(ExitCode::SUCCESS)
}

fn load_step_output(input: Option<&Path>, text: Option<&str>) -> Result<String, String> {
    match (input, text) {
        (Some(_), Some(_)) => Err("provide only one of --input or --text".to_string()),
        (Some(path), None) => std::fs::read_to_string(path)
            .map_err(|error| format!("failed reading step output '{}': {error}", path.display())),
        (None, Some(text)) => Ok(text.to_string()),
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|error| format!("failed reading step output from stdin: {error}"))?;
            Ok(buffer)
        }
    }
}

fn print_block_summary(blocks: &[ContentBlock]) {
    println!("blocks: {}", blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        match block {
            ContentBlock::Text { value } => {
                println!("[{index}] text ({} chars)", value.chars().count());
            }
            ContentBlock::Image { name, data }
            | ContentBlock::GeoJson { name, data }
            | ContentBlock::Html { name, data } => {
                println!(
                    "[{index}] {} name={name} ({} bytes)",
                    block.kind_label(),
                    data.len()
                );
            }
        }
    }
}

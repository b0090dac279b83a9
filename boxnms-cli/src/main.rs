use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use boxnms::{nms, select_backend, validate_detections, Backend, Detection};

#[derive(Parser, Debug)]
#[command(author, version, about = "Greedy NMS over a JSON file of detection rows")]
struct Cli {
    /// JSON file holding an array of [x1, y1, x2, y2, score] rows.
    #[arg(value_name = "FILE")]
    input: PathBuf,
    /// IoU threshold above which two boxes count as redundant.
    #[arg(short, long, default_value_t = 0.5)]
    threshold: f32,
    /// Run the sequential suppressor even when the parallel backend is built in.
    #[arg(long)]
    force_cpu: bool,
    /// Write the result here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct Output {
    backend: &'static str,
    threshold: f32,
    kept: Vec<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("boxnms=info".parse()?))
            .with_target(false)
            .init();
    }

    if !(0.0..=1.0).contains(&cli.threshold) {
        return Err(format!("threshold must lie in [0, 1], got {}", cli.threshold).into());
    }

    let input_text = fs::read_to_string(&cli.input)?;
    let rows: Vec<[f32; 5]> = serde_json::from_str(&input_text)?;
    let detections: Vec<Detection> = rows.into_iter().map(Detection::from_row).collect();
    validate_detections(&detections)?;

    let backend = match select_backend(cli.force_cpu) {
        Backend::Sequential => "sequential",
        Backend::Parallel => "parallel",
    };
    let kept = nms(&detections, cli.threshold, cli.force_cpu);

    let output = Output {
        backend,
        threshold: cli.threshold,
        kept,
    };
    let json = serde_json::to_string_pretty(&output)?;
    match cli.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

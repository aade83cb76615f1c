use ansigif::{AnsiConverter, AppConfig};
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

fn load_config() -> Result<AppConfig> {
    // Look for ansigif.json in app support, current dir fallback, then built-in default
    let mut tried: Vec<PathBuf> = Vec::new();
    if let Some(mut d) = dirs::data_dir() {
        d.push("ansigif");
        d.push("ansigif.json");
        tried.push(d);
    }
    tried.push(PathBuf::from("ansigif.json"));

    for p in &tried {
        if p.exists() {
            let text =
                fs::read_to_string(p).with_context(|| format!("reading config {}", p.display()))?;
            let cfg: AppConfig = serde_json::from_str(&text).context("parsing config json")?;
            return Ok(cfg);
        }
    }

    Ok(AppConfig::default())
}

#[derive(Parser, Debug)]
#[command(version, about = "Animated GIF to ANSI truecolor terminal animation.")]
struct Args {
    /// Input GIF file
    input: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let Some(input) = args.input else {
        println!("Usage: ansigif <gif-path>");
        return;
    };

    // Errors go to stdout and the exit code stays 0; machine-readable
    // failure is the library API's job.
    if let Err(err) = run(&input) {
        println!("Error: {:#}", err);
    }
}

fn run(input: &Path) -> Result<()> {
    let cfg = load_config()?;
    let converter = AnsiConverter::with_config(cfg)?;
    let options = converter.options_from_config();
    let output = PathBuf::from(&converter.config().output);

    // Create progress bar (will be initialized once we know total frames)
    let progress_bar: Arc<Mutex<Option<ProgressBar>>> = Arc::new(Mutex::new(None));
    let pb_clone = Arc::clone(&progress_bar);

    let frames = converter.convert_gif_with_progress(
        input,
        &output,
        &options,
        Some(move |completed: usize, total: usize| {
            let mut pb_guard = pb_clone.lock().unwrap();
            if pb_guard.is_none() {
                // Initialize progress bar on first callback
                let pb = ProgressBar::new(total as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
                        .unwrap()
                        .progress_chars("#>-"),
                );
                pb.set_message("Rendering frames");
                *pb_guard = Some(pb);
            }
            if let Some(ref pb) = *pb_guard {
                pb.set_position(completed as u64);
            }
        }),
    )?;

    // Finish the progress bar
    let pb_opt = progress_bar.lock().unwrap().take();
    if let Some(pb) = pb_opt {
        pb.finish_with_message("Done");
    }

    println!("Output written to {} ({} frames)", output.display(), frames);
    Ok(())
}

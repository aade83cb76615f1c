//! Example: Convert a GIF to an ANSI terminal animation using ansigif as a library
//! Run with: cargo run --example simple_gif

use ansigif::{AnsiConverter, RenderOptions};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create a converter with default configuration
    let converter = AnsiConverter::new();

    // Configure the target grid
    let options = RenderOptions::default().with_columns(80).with_rows(24);

    let input = Path::new("resources/source.gif");
    let output = Path::new("evo.txt");

    // Example 1: Convert a GIF to an animation file
    if input.exists() {
        println!("Converting {} to an ANSI animation...", input.display());
        converter.convert_gif(input, output, &options)?;
        println!("✓ Animation saved to {}", output.display());
        println!("Play it back with: cat {}", output.display());
    } else {
        println!(
            "Note: {} not found, skipping file conversion example",
            input.display()
        );
    }

    // Example 2: Convert to a string (no file)
    if input.exists() {
        println!("\nConverting GIF to string...");
        let animation = converter.gif_to_string(input, &options)?;
        println!("✓ Generated animation text ({} bytes)", animation.len());
    }

    Ok(())
}

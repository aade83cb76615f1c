//! # ansigif - ANSI terminal animation generator
//!
//! `ansigif` converts an animated GIF into a single text file of ANSI
//! truecolor escape sequences. Streaming that file to a terminal (for
//! example with `cat`) replays the animation in place: every frame repaints
//! from row 1, column 1 instead of scrolling.
//!
//! ## Features
//!
//! - Decodes the whole GIF up front and fails before writing any output
//! - Resamples every frame to a fixed character grid (80x24 by default)
//! - Renders each cell as a truecolor block, so color carries the image
//! - Progress reporting for integration with UI applications
//!
//! ## Example
//!
//! ```no_run
//! use ansigif::{AnsiConverter, RenderOptions};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = AnsiConverter::new();
//! let options = RenderOptions::default();
//! converter.convert_gif(Path::new("input.gif"), Path::new("evo.txt"), &options)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Progress Reporting
//!
//! ```no_run
//! use ansigif::{AnsiConverter, RenderOptions};
//! use std::path::Path;
//!
//! let converter = AnsiConverter::new();
//! let options = RenderOptions::default();
//! converter
//!     .convert_gif_with_progress(
//!         Path::new("input.gif"),
//!         Path::new("evo.txt"),
//!         &options,
//!         Some(|completed: usize, total: usize| {
//!             println!("Rendered frame {} of {}", completed, total);
//!         }),
//!     )
//!     .unwrap();
//! ```

use anyhow::{anyhow, Context, Result};
use image::{Rgba, RgbaImage};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub mod decode;
pub mod escape;

pub use decode::{decode_animation, resample_frame, AnimatedImage, DecodedFrame};
pub use escape::{rgb_escape, CURSOR_HOME, HIDE_CURSOR, PAUSE_MARKER, RESET_DISPLAY};

/// Display glyphs ordered from darkest to brightest.
///
/// Two entries: an invisible left-to-right mark and a space. Either way the
/// cell shows as a solid block of its background color; brightness picks
/// which of the two inert symbols fills it.
pub const GLYPHS: &[char] = &['\u{200E}', ' '];

fn default_columns() -> u32 {
    80
}
fn default_rows() -> u32 {
    24
}
fn default_output_name() -> String {
    "evo.txt".to_string()
}

/// Application configuration: target grid and output file name.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_output_name")]
    pub output: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let default_json = r#"{
            "columns": 80,
            "rows": 24,
            "output": "evo.txt"
        }"#;
        serde_json::from_str(default_json).unwrap()
    }
}

/// Options for rendering an animation to text.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Target width in terminal columns
    pub columns: u32,
    /// Target height in terminal rows
    pub rows: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
        }
    }
}

impl RenderOptions {
    /// Create options with a specific column count
    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = columns;
        self
    }

    /// Create options with a specific row count
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Create options from an application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            columns: config.columns,
            rows: config.rows,
        }
    }
}

/// Main converter struct for ANSI animation generation
pub struct AnsiConverter {
    config: AppConfig,
}

impl AnsiConverter {
    /// Create a new converter with default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Create a converter with custom configuration
    pub fn with_config(config: AppConfig) -> Result<Self> {
        if config.columns == 0 || config.rows == 0 {
            return Err(anyhow!(
                "Target grid must be at least 1x1 (configured {}x{})",
                config.columns,
                config.rows
            ));
        }
        Ok(Self { config })
    }

    /// Load configuration from a JSON file
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text).context("parsing config json")?;
        Self::with_config(config)
    }

    /// Get the current configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get render options matching the converter's configuration
    pub fn options_from_config(&self) -> RenderOptions {
        RenderOptions::from_config(&self.config)
    }

    /// Convert a GIF to an ANSI animation file
    ///
    /// # Arguments
    ///
    /// * `input` - Path to the animated GIF
    /// * `output` - Path of the text file to write
    /// * `options` - Render options
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ansigif::{AnsiConverter, RenderOptions};
    /// use std::path::Path;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let converter = AnsiConverter::new();
    /// let options = RenderOptions::default().with_columns(120).with_rows(40);
    /// converter.convert_gif(Path::new("input.gif"), Path::new("evo.txt"), &options)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_gif(&self, input: &Path, output: &Path, options: &RenderOptions) -> Result<()> {
        self.convert_gif_with_progress(input, output, options, None::<fn(usize, usize)>)?;
        Ok(())
    }

    /// Convert a GIF to an ANSI animation string (without writing to file)
    pub fn gif_to_string(&self, input: &Path, options: &RenderOptions) -> Result<String> {
        let animation = decode_animation(input)?;
        Ok(animation_to_text(
            &animation,
            options,
            None::<fn(usize, usize)>,
        ))
    }

    /// Convert a GIF to an ANSI animation file with a progress callback
    ///
    /// The callback receives `(completed, total)` after each rendered frame.
    /// Returns the number of frames rendered.
    pub fn convert_gif_with_progress<F>(
        &self,
        input: &Path,
        output: &Path,
        options: &RenderOptions,
        progress_callback: Option<F>,
    ) -> Result<usize>
    where
        F: Fn(usize, usize),
    {
        let animation = decode_animation(input)?;
        let text = animation_to_text(&animation, options, progress_callback);
        fs::write(output, text).with_context(|| format!("writing {}", output.display()))?;
        Ok(animation.frame_count())
    }
}

impl Default for AnsiConverter {
    fn default() -> Self {
        Self::new()
    }
}

// Internal implementation functions

/// Upper bound on the byte length of one rendered cell (two truecolor
/// escapes plus a glyph of up to three UTF-8 bytes).
const CELL_CAPACITY: usize = 42;

fn frame_capacity(columns: u32, rows: u32) -> usize {
    rows as usize * (columns as usize * CELL_CAPACITY + 1 + PAUSE_MARKER.len())
}

fn animation_to_text<F>(
    animation: &AnimatedImage,
    options: &RenderOptions,
    progress_callback: Option<F>,
) -> String
where
    F: Fn(usize, usize),
{
    let total = animation.frame_count();
    let per_frame = CURSOR_HOME.len() + frame_capacity(options.columns, options.rows);
    let mut text =
        String::with_capacity(HIDE_CURSOR.len() + total * per_frame + RESET_DISPLAY.len());

    text.push_str(HIDE_CURSOR);
    for (idx, frame) in animation.frames.iter().enumerate() {
        let resampled = resample_frame(&frame.image, options.columns, options.rows);
        text.push_str(CURSOR_HOME);
        text.push_str(&render_frame(&resampled));
        if let Some(ref callback) = progress_callback {
            callback(idx + 1, total);
        }
    }
    text.push_str(RESET_DISPLAY);
    text
}

/// Render one frame as rows of colored cells.
///
/// Rows are separated by a newline plus [`PAUSE_MARKER`]; the final row ends
/// bare so the next escape in the stream follows it directly.
pub fn render_frame(frame: &RgbaImage) -> String {
    let (width, height) = frame.dimensions();
    let mut out = String::with_capacity(frame_capacity(width, height));
    for y in 0..height {
        for x in 0..width {
            let Rgba([r, g, b, _]) = *frame.get_pixel(x, y);
            out.push_str(&rgb_escape(r, g, b));
            out.push(glyph_for(luminance(r, g, b)));
        }
        if y + 1 < height {
            out.push('\n');
            out.push_str(PAUSE_MARKER);
        }
    }
    out
}

/// ITU-R BT.709 luma of an 8-bit RGB triple, normalized to [0, 1].
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    // Integer weights (2126 + 7152 + 722 == 10_000) keep both endpoints
    // exact: pure black is 0.0 and pure white is 1.0.
    let weighted = 2126 * r as u32 + 7152 * g as u32 + 722 * b as u32;
    weighted as f64 / (10_000.0 * 255.0)
}

/// Select the display glyph for a brightness value.
///
/// Total over all inputs; brightness outside [0, 1] is clamped.
pub fn glyph_for(brightness: f64) -> char {
    let clamped = brightness.clamp(0.0, 1.0);
    let idx = (clamped * (GLYPHS.len() - 1) as f64) as usize;
    GLYPHS[idx.min(GLYPHS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
    }

    #[test]
    fn glyph_covers_brightness_endpoints() {
        assert_eq!(glyph_for(0.0), GLYPHS[0]);
        assert_eq!(glyph_for(1.0), GLYPHS[GLYPHS.len() - 1]);
        // floor semantics: anything short of full brightness stays dark
        assert_eq!(glyph_for(0.999), GLYPHS[0]);
    }

    #[test]
    fn glyph_index_is_monotonic() {
        let index_of = |b: f64| GLYPHS.iter().position(|&g| g == glyph_for(b)).unwrap();
        let mut last = 0;
        for step in 0..=100 {
            let idx = index_of(step as f64 / 100.0);
            assert!(idx >= last);
            last = idx;
        }
    }

    #[test]
    fn glyph_clamps_out_of_range_brightness() {
        assert_eq!(glyph_for(-0.5), GLYPHS[0]);
        assert_eq!(glyph_for(1.5), GLYPHS[GLYPHS.len() - 1]);
    }

    #[test]
    fn luminance_endpoints_are_exact() {
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert_eq!(luminance(255, 255, 255), 1.0);
    }

    #[test]
    fn luminance_weights_green_heaviest() {
        assert!(luminance(0, 255, 0) > luminance(255, 0, 0));
        assert!(luminance(255, 0, 0) > luminance(0, 0, 255));
    }

    #[test]
    fn rendered_frame_has_one_row_group_per_row() {
        let frame = solid_frame(5, 3, [10, 20, 30]);
        let text = render_frame(&frame);
        let rows: Vec<&str> = text.split(PAUSE_MARKER).collect();
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.matches("\x1b[48;2;10;20;30m").count(), 5);
        }
        assert!(!text.ends_with(PAUSE_MARKER));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn single_row_frame_has_no_separator() {
        let frame = solid_frame(4, 1, [50, 60, 70]);
        let text = render_frame(&frame);
        assert!(!text.contains(PAUSE_MARKER));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn white_frame_renders_bright_glyph_everywhere() {
        let frame = solid_frame(80, 24, [255, 255, 255]);
        let text = render_frame(&frame);
        let cell = "\x1b[48;2;255;255;255m\x1b[38;2;255;255;255m ";
        assert_eq!(text.matches(cell).count(), 80 * 24);
    }

    #[test]
    fn black_frame_renders_dark_glyph_everywhere() {
        let frame = solid_frame(80, 24, [0, 0, 0]);
        let text = render_frame(&frame);
        let cell = format!("\x1b[48;2;0;0;0m\x1b[38;2;0;0;0m{}", GLYPHS[0]);
        assert_eq!(text.matches(cell.as_str()).count(), 80 * 24);
    }

    #[test]
    fn assembled_animation_brackets_every_frame() {
        let animation = AnimatedImage {
            frames: (0..3u8)
                .map(|i| DecodedFrame {
                    image: solid_frame(6, 4, [i * 40, 0, 0]),
                    delay_ms: 100,
                })
                .collect(),
        };
        let options = RenderOptions::default().with_columns(6).with_rows(4);
        let text = animation_to_text(&animation, &options, None::<fn(usize, usize)>);

        assert!(text.starts_with(HIDE_CURSOR));
        assert!(text.ends_with(RESET_DISPLAY));
        assert_eq!(text.matches(HIDE_CURSOR).count(), 1);
        assert_eq!(text.matches(CURSOR_HOME).count(), 3);
        assert_eq!(text.matches(RESET_DISPLAY).count(), 1);
        assert_eq!(text.matches(PAUSE_MARKER).count(), 3 * (4 - 1));

        let body = &text[..text.len() - RESET_DISPLAY.len()];
        assert!(!body.ends_with(PAUSE_MARKER));
    }

    #[test]
    fn progress_reports_every_frame() {
        use std::cell::RefCell;

        let animation = AnimatedImage {
            frames: (0..2u8)
                .map(|_| DecodedFrame {
                    image: solid_frame(2, 2, [9, 9, 9]),
                    delay_ms: 50,
                })
                .collect(),
        };
        let options = RenderOptions::default().with_columns(2).with_rows(2);
        let seen = RefCell::new(Vec::new());
        animation_to_text(
            &animation,
            &options,
            Some(|completed, total| seen.borrow_mut().push((completed, total))),
        );
        assert_eq!(*seen.borrow(), vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn converter_rejects_degenerate_grid() {
        let config = AppConfig {
            columns: 0,
            rows: 24,
            output: "evo.txt".to_string(),
        };
        assert!(AnsiConverter::with_config(config).is_err());
    }

    #[test]
    fn default_config_matches_reference_behavior() {
        let config = AppConfig::default();
        assert_eq!((config.columns, config.rows), (80, 24));
        assert_eq!(config.output, "evo.txt");
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"columns": 40}"#).unwrap();
        assert_eq!(config.columns, 40);
        assert_eq!(config.rows, 24);
        assert_eq!(config.output, "evo.txt");
    }
}

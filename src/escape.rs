//! ANSI escape sequences for truecolor terminal output.

/// Hides the cursor for the duration of the animation.
pub const HIDE_CURSOR: &str = "\x1b[?25l";

/// Moves the cursor to row 1, column 1 so the next frame paints in place.
pub const CURSOR_HOME: &str = "\x1b[1;1H";

/// Clears SGR attributes and erases from the cursor to the end of the screen.
pub const RESET_DISPLAY: &str = "\x1b[0m\x1b[2J";

/// Placeholder pause token emitted between rendered rows. Terminals print
/// nothing useful for it; it reserves a seam for a real inter-frame delay
/// mechanism.
pub const PAUSE_MARKER: &str = "<<sleep(3)>>";

/// Truecolor SGR pair setting background and foreground to the same triple.
///
/// Foreground equals background: the rendered glyph is a filled block, so
/// color alone carries the image.
pub fn rgb_escape(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m", r, g, b, r, g, b)
}

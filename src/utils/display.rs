//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::world::{Census, World};

/// Format worlds for display
pub struct WorldFormatter;

impl WorldFormatter {
    /// Render a world in the requested output format
    pub fn format_world(world: &World, format: OutputFormat) -> String {
        match format {
            OutputFormat::Terse => world.to_terse_string(),
            OutputFormat::Pretty => world.to_pretty_string(),
            OutputFormat::Both => {
                let mut output = world.to_terse_string();
                output.push('\n');
                output.push_str(&world.to_pretty_string());
                output
            }
        }
    }

    /// Pretty renderings of two worlds next to each other
    pub fn format_side_by_side(left: &World, right: &World) -> String {
        let left_text = left.to_pretty_string();
        let right_text = right.to_pretty_string();
        let left_lines: Vec<&str> = left_text.lines().collect();
        let right_lines: Vec<&str> = right_text.lines().collect();
        let left_width = left.cols().max(0) as usize + 2;

        let mut output = String::new();
        for row in 0..left_lines.len().max(right_lines.len()) {
            let l = left_lines.get(row).copied().unwrap_or("");
            let r = right_lines.get(row).copied().unwrap_or("");
            output.push_str(&format!("{:width$}   {}\n", l, r, width = left_width));
        }
        output
    }

    /// One-line population summary
    pub fn format_census_line(census: &Census) -> String {
        format!(
            "rocks={} rabbits={} foxes={} empty={}",
            census.obstacles, census.prey, census.predators, census.empty
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

//! Ayu color theme and styling functions for stencil CLI output.
//!
//! Only findings and headings get color; template text is printed as-is so
//! it can be copied into an issue without escape codes.

use owo_colors::OwoColorize;
use stencil_core::validation::{Finding, Severity};

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

pub const ICON_PASS: &str = "\u{2713}";
pub const ICON_WARN: &str = "\u{26A0}";
pub const ICON_FAIL: &str = "\u{2716}";

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

/// Renders a category header in uppercase with accent color and bold.
pub fn render_category(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

/// Renders one lint finding as `<icon> <severity>[<rule>]: <message>`.
pub fn render_finding(finding: &Finding) -> String {
    let label = format!("{}[{}]", finding.severity, finding.rule);
    match finding.severity {
        Severity::Warning => format!(
            "{} {}: {}",
            color_str(ICON_WARN, WARN),
            render_warn(&label),
            finding.message
        ),
        Severity::Error => format!(
            "{} {}: {}",
            color_str(ICON_FAIL, FAIL),
            color_bold_str(&label, FAIL),
            finding.message
        ),
    }
}

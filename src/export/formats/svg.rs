//! SVG export - one text element per line on a black canvas.

use std::fmt::Write;

use crate::config::is_pictographic_char;
use crate::error::ExportError;
use crate::export::format::{Artifact, ExportFormat, FormatDescriptor};
use crate::export::platform::PlatformGate;

const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    id: "svg",
    name: "SVG Vector",
    extension: "svg",
    description: "SVG vector format with emoji support",
    binary: false,
    content_type: Some("image/svg+xml"),
    requires_engine: false,
};

const FONT_SIZE: f64 = 16.0;
const LINE_HEIGHT: f64 = FONT_SIZE + 7.0;
const PADDING: f64 = 10.0;
const SAFETY_MARGIN: f64 = 20.0;
const FONT_STACK: &str = "'Apple Color Emoji', 'Segoe UI Emoji', 'Noto Color Emoji', \
                          'SF Mono', 'Monaco', 'Consolas', monospace";

/// A laid-out SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    pub width: u32,
    pub height: u32,
    /// Complete document including the XML declaration.
    pub markup: String,
}

impl SvgDocument {
    /// Lay out the non-blank lines of `tree`.
    pub fn layout(tree: &str) -> Self {
        let lines: Vec<&str> = tree.lines().filter(|l| !l.trim().is_empty()).collect();
        let max_width = lines
            .iter()
            .map(|l| estimate_text_width(l, FONT_SIZE))
            .fold(0.0_f64, f64::max);

        let width = (max_width + PADDING * 2.0 + SAFETY_MARGIN).ceil() as u32;
        let height = (lines.len() as f64 * LINE_HEIGHT + PADDING * 2.0).ceil() as u32;

        let mut markup = String::new();
        markup.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            markup,
            "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">",
            w = width,
            h = height
        );
        let _ = writeln!(
            markup,
            "  <defs>\n    <style>\n      .tree-text {{\n        font: {}px {};\n        \
             fill: #ffffff;\n        dominant-baseline: hanging;\n        white-space: pre;\n      \
             }}\n    </style>\n  </defs>",
            FONT_SIZE, FONT_STACK
        );
        markup.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#000000\"/>\n");
        for (i, line) in lines.iter().enumerate() {
            let y = PADDING + i as f64 * LINE_HEIGHT;
            let _ = writeln!(
                markup,
                "  <text x=\"{}\" y=\"{}\" class=\"tree-text\">{}</text>",
                PADDING,
                y,
                escape_xml(line)
            );
        }
        markup.push_str("</svg>\n");

        Self {
            width,
            height,
            markup,
        }
    }

    /// The `<svg>` element without the XML declaration, for embedding in HTML.
    pub fn element(&self) -> &str {
        match self.markup.find("<svg") {
            Some(start) => &self.markup[start..],
            None => &self.markup,
        }
    }
}

/// Estimated rendered width of `text` in pixels.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars()
        .map(|c| match c {
            '\u{FE0F}' | '\u{200D}' => 0.0,
            c if is_pictographic_char(c) => font_size * 1.2,
            'W' | 'M' | 'm' => font_size * 0.7,
            'i' | 'l' => font_size * 0.5,
            _ => font_size * 0.65,
        })
        .sum()
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub struct SvgFormat {
    descriptor: FormatDescriptor,
    gate: PlatformGate,
}

impl SvgFormat {
    pub fn new(gate: PlatformGate) -> Self {
        Self {
            descriptor: DESCRIPTOR,
            gate,
        }
    }
}

impl ExportFormat for SvgFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &self.descriptor
    }

    fn convert(&self, tree: &str) -> Result<Artifact, ExportError> {
        self.gate.check()?;
        Ok(Artifact::Text(SvgDocument::layout(tree).markup))
    }
}

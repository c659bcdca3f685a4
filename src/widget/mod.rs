// src/widget/mod.rs

//! Presentation of a [`Snapshot`] as a home-screen widget.
//!
//! The widget size is always passed in explicitly. [`build_view`] turns a
//! snapshot into a list of text lines, and [`render_svg`] paints them.

mod layout;
mod svg;

use std::fmt;
use std::str::FromStr;

use crate::error::ParamsError;
use crate::models::Snapshot;

pub use svg::render_svg;

/// Host widget family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetSize {
    Small,
    Medium,
    Large,
}

/// Layout variant. Every variant shows the same data at a different
/// density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Compact,
    Table,
    Extended,
}

impl WidgetSize {
    pub fn layout(self) -> Layout {
        match self {
            WidgetSize::Small => Layout::Compact,
            WidgetSize::Medium => Layout::Table,
            WidgetSize::Large => Layout::Extended,
        }
    }

    /// Canvas size in points.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            WidgetSize::Small => (170, 170),
            WidgetSize::Medium => (364, 170),
            WidgetSize::Large => (364, 382),
        }
    }
}

impl FromStr for WidgetSize {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(WidgetSize::Small),
            "medium" => Ok(WidgetSize::Medium),
            "large" => Ok(WidgetSize::Large),
            _ => Err(ParamsError::UnknownSize(s.to_string())),
        }
    }
}

impl fmt::Display for WidgetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WidgetSize::Small => "small",
            WidgetSize::Medium => "medium",
            WidgetSize::Large => "large",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Background,
    ErrorBackground,
    Error,
    Gold,
    White,
    CyanGreen,
    Alpha,
    Tao,
    Gray,
    EvenRow,
    OddRow,
}

impl Palette {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Palette::Background => (0x0e, 0x0e, 0x0e),
            Palette::ErrorBackground => (0x4e, 0x00, 0x00),
            Palette::Error => (0xad, 0x49, 0x04),
            Palette::Gold => (0xfd, 0xe0, 0x47),
            Palette::White => (0xff, 0xff, 0xff),
            Palette::CyanGreen => (0x00, 0xc2, 0xa6),
            Palette::Alpha => (0x00, 0xc2, 0xb6),
            Palette::Tao => (0xe8, 0x81, 0x48),
            Palette::Gray => (0x80, 0x80, 0x80),
            Palette::EvenRow => (0x74, 0xb9, 0xff),
            Palette::OddRow => (0xa2, 0x9b, 0xfe),
        }
    }
}

/// A run of text drawn in one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub size: u32,
    pub semibold: bool,
    pub color: Palette,
}

impl Span {
    pub fn regular(text: impl Into<String>, size: u32, color: Palette) -> Self {
        Self {
            text: text.into(),
            size,
            semibold: false,
            color,
        }
    }

    pub fn semibold(text: impl Into<String>, size: u32, color: Palette) -> Self {
        Self {
            semibold: true,
            ..Self::regular(text, size, color)
        }
    }

    /// Rough rendered width, good enough to lay out flowing text.
    pub fn estimated_width(&self) -> u32 {
        (self.text.chars().count() as f32 * self.size as f32 * 0.58).ceil() as u32
    }
}

/// How the spans of a line share the horizontal space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// One equal-width column per span.
    Spread,
    /// Left to right, separated by a gap.
    Flow,
    /// Like `Flow`, centred as a group.
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
    pub align: Align,
    pub background: Option<Palette>,
}

pub const PADDING: u32 = 10;
const SPAN_GAP: u32 = 4;
const LINE_SPACING: u32 = 4;

impl Line {
    pub fn new(align: Align, spans: Vec<Span>) -> Self {
        Self {
            spans,
            align,
            background: None,
        }
    }

    pub fn with_background(mut self, background: Palette) -> Self {
        self.background = Some(background);
        self
    }

    pub fn height(&self) -> u32 {
        let tallest = self.spans.iter().map(|s| s.size).max().unwrap_or(0);
        tallest + tallest / 3 + LINE_SPACING
    }

    /// Left edge of each span on a canvas `width` points wide.
    pub fn positions(&self, width: u32) -> Vec<u32> {
        let inner = width.saturating_sub(2 * PADDING);
        match self.align {
            Align::Spread => {
                let n = self.spans.len().max(1) as u32;
                (0..self.spans.len() as u32)
                    .map(|i| PADDING + i * inner / n)
                    .collect()
            }
            Align::Flow | Align::Center => {
                let total: u32 = self
                    .spans
                    .iter()
                    .map(|s| s.estimated_width() + SPAN_GAP)
                    .sum::<u32>()
                    .saturating_sub(SPAN_GAP);
                let mut x = if self.align == Align::Center {
                    PADDING + inner.saturating_sub(total) / 2
                } else {
                    PADDING
                };
                self.spans
                    .iter()
                    .map(|s| {
                        let at = x;
                        x += s.estimated_width() + SPAN_GAP;
                        at
                    })
                    .collect()
            }
        }
    }
}

/// Render-ready widget content.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub size: WidgetSize,
    pub layout: Layout,
    pub background: Palette,
    pub lines: Vec<Line>,
}

impl WidgetView {
    /// All text of the view, line by line. Handy for logs and tests.
    pub fn text(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

/// Picks the layout for `size` and fills it from `snapshot`.
///
/// Without a snapshot a placeholder is produced; the view is never empty.
pub fn build_view(snapshot: Option<&Snapshot>, size: WidgetSize) -> WidgetView {
    let layout = size.layout();
    let lines = match snapshot {
        None => layout::placeholder(),
        Some(snapshot) => match layout {
            Layout::Compact => layout::compact(snapshot),
            Layout::Table => layout::table(snapshot, false),
            Layout::Extended => layout::table(snapshot, true),
        },
    };

    WidgetView {
        size,
        layout,
        background: Palette::Background,
        lines,
    }
}

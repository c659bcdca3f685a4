// src/widget/svg.rs

use plotters::prelude::*;

use super::{Palette, WidgetView, PADDING};
use crate::error::RenderError;

const FONT_FAMILY: &str = "sans-serif";

fn color(p: Palette) -> RGBColor {
    let (r, g, b) = p.rgb();
    RGBColor(r, g, b)
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Paints the view onto an SVG canvas sized for its widget family.
pub fn render_svg(view: &WidgetView) -> Result<String, RenderError> {
    let (width, height) = view.size.dimensions();
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        root.fill(&color(view.background)).map_err(draw_err)?;

        let mut y = PADDING as i32;
        for line in &view.lines {
            let line_height = line.height() as i32;
            if let Some(bg) = line.background {
                root.draw(&Rectangle::new(
                    [
                        (PADDING as i32 / 2, y - 2),
                        ((width - PADDING / 2) as i32, y + line_height - 2),
                    ],
                    color(bg).filled(),
                ))
                .map_err(draw_err)?;
            }

            for (span, x) in line.spans.iter().zip(line.positions(width)) {
                let weight = if span.semibold {
                    FontStyle::Bold
                } else {
                    FontStyle::Normal
                };
                let style = FontDesc::from((FONT_FAMILY, span.size as f64, weight))
                    .color(&color(span.color));
                root.draw(&Text::new(span.text.as_str(), (x as i32, y), style))
                    .map_err(draw_err)?;
            }
            y += line_height;
        }

        root.present().map_err(draw_err)?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::super::{build_view, WidgetSize};
    use super::*;

    #[test]
    fn placeholder_renders_to_svg_of_widget_size() {
        let view = build_view(None, WidgetSize::Medium);
        let svg = render_svg(&view).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("width=\"364\""));
        assert!(svg.contains("height=\"170\""));
        assert!(svg.contains("Waiting for first sync"));
    }
}

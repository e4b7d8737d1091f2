// Copyright 2025 the Civichart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small SVG output container.
//!
//! Renderers append marks in paint order; hover detail rides along as a
//! `<title>` child on the mark, which browsers surface as a native tooltip.

use kurbo::{BezPath, Point, Rect};
use peniko::{Brush, Color};

use crate::layout::Size;

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Anchor text at its start (left for LTR).
    Start,
    /// Anchor text at its center.
    Middle,
    /// Anchor text at its end.
    End,
}

/// An SVG document under construction.
#[derive(Clone, Debug)]
pub struct SvgDocument {
    size: Size,
    body: String,
}

impl SvgDocument {
    /// Creates an empty document of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
        }
    }

    /// Creates a document holding only a centered message.
    ///
    /// Renderers fall back to this for empty datasets, missing roles, and
    /// unknown chart kinds.
    pub fn message(size: Size, text: &str) -> Self {
        let mut doc = Self::new(size);
        doc.push_text(
            Point::new(size.width / 2.0, size.height / 2.0),
            text,
            14.0,
            TextAnchor::Middle,
            Color::from_rgb8(0x66, 0x66, 0x66),
        );
        doc
    }

    /// The document size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Appends a filled rectangle, optionally carrying hover detail.
    pub fn push_rect(&mut self, rect: Rect, fill: &Brush, title: Option<&str>) {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            fmt(rect.x0),
            fmt(rect.y0),
            fmt(rect.width()),
            fmt(rect.height()),
        ));
        write_paint_attr(&mut self.body, "fill", fill);
        self.close_with_title("rect", title);
    }

    /// Appends a stroked line.
    pub fn push_line(&mut self, from: Point, to: Point, stroke: Color, width: f64) {
        self.body.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
            fmt(from.x),
            fmt(from.y),
            fmt(to.x),
            fmt(to.y),
        ));
        write_paint_attr(&mut self.body, "stroke", &Brush::Solid(stroke));
        self.body.push_str(&format!(r#" stroke-width="{}""#, fmt(width)));
        self.body.push_str("/>\n");
    }

    /// Appends a filled circle, optionally carrying hover detail.
    pub fn push_circle(&mut self, center: Point, radius: f64, fill: &Brush, title: Option<&str>) {
        self.body.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}""#,
            fmt(center.x),
            fmt(center.y),
            fmt(radius),
        ));
        write_paint_attr(&mut self.body, "fill", fill);
        self.close_with_title("circle", title);
    }

    /// Appends a path with optional fill and stroke.
    pub fn push_path(
        &mut self,
        path: &BezPath,
        fill: Option<&Brush>,
        stroke: Option<(Color, f64)>,
        title: Option<&str>,
    ) {
        let d = path.to_svg();
        self.body.push_str(&format!(r#"<path d="{d}""#));
        match fill {
            Some(brush) => write_paint_attr(&mut self.body, "fill", brush),
            None => self.body.push_str(r#" fill="none""#),
        }
        if let Some((color, width)) = stroke {
            write_paint_attr(&mut self.body, "stroke", &Brush::Solid(color));
            self.body.push_str(&format!(r#" stroke-width="{}""#, fmt(width)));
        }
        self.close_with_title("path", title);
    }

    /// Appends a text label.
    pub fn push_text(
        &mut self,
        pos: Point,
        text: &str,
        font_size: f64,
        anchor: TextAnchor,
        fill: Color,
    ) {
        self.body.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif""#,
            fmt(pos.x),
            fmt(pos.y),
            fmt(font_size),
        ));
        self.body.push_str(match anchor {
            TextAnchor::Start => r#" text-anchor="start""#,
            TextAnchor::Middle => r#" text-anchor="middle""#,
            TextAnchor::End => r#" text-anchor="end""#,
        });
        write_paint_attr(&mut self.body, "fill", &Brush::Solid(fill));
        self.body.push('>');
        self.body.push_str(&escape_xml(text));
        self.body.push_str("</text>\n");
    }

    /// Serializes the document.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str(&format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
                r#"viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
                "\n",
            ),
            w = fmt(self.size.width),
            h = fmt(self.size.height),
        ));
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    fn close_with_title(&mut self, tag: &str, title: Option<&str>) {
        match title {
            Some(text) => {
                self.body.push('>');
                self.body.push_str("<title>");
                self.body.push_str(&escape_xml(text));
                self.body.push_str("</title>");
                self.body.push_str(&format!("</{tag}>\n"));
            }
            None => self.body.push_str("/>\n"),
        }
    }
}

fn fmt(value: f64) -> String {
    // Two decimals is plenty for pixel coordinates and avoids noisy floats.
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => (String::from("none"), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{}""#, fmt(o)));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

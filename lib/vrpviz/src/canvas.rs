//! Drawing context shared by the node loader and the route renderer.
//!
//! [`Figure`] records what is drawn on it and is only turned into an image by
//! [`Figure::render`], so everything in between can be checked without a graphics backend.

use std::ops::Range;
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use plotters::coord::Shift;
use tracing::*;

pub type Point = (f64, f64);

pub trait Canvas {
    /// Draws a marker at every point.
    fn scatter(&mut self, points: &[Point]);

    /// Draws a line through `points`, in order.
    fn plot(&mut self, points: &[Point]);

    /// Writes `text` at `text_pos` as the label of `anchor`.
    fn annotate(&mut self, text: &str, anchor: Point, text_pos: Point);
}

/// Categorical colour cycle. Marker series and line series each walk it on their own.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const LINE_WIDTH: u32 = 2;

/// A recorded drawing call. `color` indexes into [`PALETTE`].
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Scatter { points: Vec<Point>, color: usize },
    Line { points: Vec<Point>, color: usize },
    Annotation { text: String, anchor: Point, pos: Point },
}

#[derive(Debug, Clone, Default)]
pub struct Figure {
    title: Option<String>,
    elements: Vec<Element>,
    n_scatter: usize,
    n_lines: usize,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ImageFormat {
    Svg,
    /// Any format the bitmap backend infers from the file extension (png, jpg, bmp, ...).
    Bitmap,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> ImageFormat {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Bitmap,
        }
    }
}

fn plot_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow!("drawing failed: {}", e)
}

fn padded(range: Range<f64>) -> Range<f64> {
    let span = range.end - range.start;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (range.start - pad)..(range.end + pad)
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Smallest box holding every recorded point, label positions included.
    pub fn bounds(&self) -> Option<(Range<f64>, Range<f64>)> {
        let mut points = self.elements.iter().flat_map(|e| match e {
            Element::Scatter { points, .. } | Element::Line { points, .. } => points.as_slice(),
            Element::Annotation { pos, .. } => std::slice::from_ref(pos),
        });
        let &(x, y) = points.next()?;
        let (mut x_range, mut y_range) = (x..x, y..y);
        for &(x, y) in points {
            x_range.start = x_range.start.min(x);
            x_range.end = x_range.end.max(x);
            y_range.start = y_range.start.min(y);
            y_range.end = y_range.end.max(y);
        }
        Some((x_range, y_range))
    }

    /// Writes the figure to `path`; `.svg` files are vector images, anything else a bitmap.
    pub fn render(&self, path: impl AsRef<Path>, size: (u32, u32)) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path);
        info!(?path, ?format, ?size, elements = self.elements.len(), "render figure");
        match format {
            ImageFormat::Svg => self.draw(SVGBackend::new(path, size).into_drawing_area()),
            ImageFormat::Bitmap => self.draw(BitMapBackend::new(path, size).into_drawing_area()),
        }.with_context(|| format!("failed to render {:?}", path))
    }

    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(plot_err)?;

        let (x_range, y_range) = self.bounds().unwrap_or((0.0..1.0, 0.0..1.0));
        let mut builder = ChartBuilder::on(&root);
        builder.margin(10).x_label_area_size(40).y_label_area_size(50);
        if let Some(title) = &self.title {
            builder.caption(title, ("sans-serif", 28));
        }
        let mut chart = builder
            .build_cartesian_2d(padded(x_range), padded(y_range))
            .map_err(plot_err)?;
        chart.configure_mesh().draw().map_err(plot_err)?;

        for element in &self.elements {
            match element {
                Element::Scatter { points, color } => {
                    let style = PALETTE[*color].filled();
                    chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, style)))
                        .map_err(plot_err)?;
                }
                Element::Line { points, color } => {
                    let style = PALETTE[*color].stroke_width(LINE_WIDTH);
                    chart.draw_series(LineSeries::new(points.iter().copied(), style))
                        .map_err(plot_err)?;
                }
                Element::Annotation { text, pos, .. } => {
                    let label = Text::new(text.clone(), *pos, ("sans-serif", 14).into_font());
                    chart.draw_series(std::iter::once(label))
                        .map_err(plot_err)?;
                }
            }
        }

        root.present().map_err(plot_err)?;
        Ok(())
    }
}

impl Canvas for Figure {
    fn scatter(&mut self, points: &[Point]) {
        let color = self.n_scatter % PALETTE.len();
        self.n_scatter += 1;
        self.elements.push(Element::Scatter { points: points.to_vec(), color });
    }

    fn plot(&mut self, points: &[Point]) {
        let color = self.n_lines % PALETTE.len();
        self.n_lines += 1;
        self.elements.push(Element::Line { points: points.to_vec(), color });
    }

    fn annotate(&mut self, text: &str, anchor: Point, text_pos: Point) {
        self.elements.push(Element::Annotation { text: text.to_string(), anchor, pos: text_pos });
    }
}

use crate::{
    assets::svg_raster::MAX_DIM,
    foundation::core::{PersonId, Point, Rect},
    foundation::error::{FamtreeError, FamtreeResult},
    plan::builder::{DrawingPlan, PlanNode},
    render::backend::RenderSettings,
};

/// Text and box metrics derived from the font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    /// Font size, in pixels.
    pub font_size: f64,
    /// Distance between label baselines.
    pub line_height: f64,
    /// Estimated advance of one character.
    pub char_width: f64,
    /// Inner box padding.
    pub padding: f64,
    /// Side of the photo slot.
    pub photo_size: f64,
    /// Box corner radius.
    pub corner_radius: f64,
    /// Narrowest allowed box.
    pub min_box_width: f64,
}

impl Metrics {
    /// Metrics scaled from a font size.
    pub fn for_font_size(font_size: f64) -> Self {
        Self {
            font_size,
            line_height: font_size * 1.3,
            char_width: font_size * 0.6,
            padding: font_size * 0.6,
            photo_size: font_size * 3.0,
            corner_radius: font_size * 0.5,
            min_box_width: font_size * 4.0,
        }
    }
}

/// Pixel geometry of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
    /// Person drawn in this box.
    pub id: PersonId,
    /// Box center, in pixels.
    pub center: Point,
    /// Box outline, in pixels.
    pub rect: Rect,
    /// Square reserved for a portrait, above the label.
    pub photo_slot: Option<Rect>,
    /// Baseline y of each label line, centered on `center.x`.
    pub baselines: Vec<f64>,
}

/// Maps a [`DrawingPlan`] onto a pixel canvas.
///
/// Layout y grows away from the root; on the canvas the root row is at the bottom and ancestors
/// stack upward.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Canvas width, in pixels.
    pub width: u32,
    /// Canvas height, in pixels.
    pub height: u32,
    /// Text metrics in use.
    pub metrics: Metrics,
    px_per_unit: f64,
    origin: Point,
    bounds: Rect,
    boxes: Vec<NodeBox>,
}

impl Viewport {
    /// Size the canvas for `plan` and place every node box.
    pub fn fit(plan: &DrawingPlan, settings: &RenderSettings) -> FamtreeResult<Self> {
        let metrics = Metrics::for_font_size(settings.font_size_px);
        let ppu = settings.px_per_unit;
        let margin = settings.margin_px.max(0.0);

        let sizes: Vec<(f64, f64)> = plan.nodes.iter().map(|n| box_size(n, &metrics)).collect();
        let half_w = sizes.iter().map(|s| s.0 / 2.0).fold(0.0, f64::max);
        let half_h = sizes.iter().map(|s| s.1 / 2.0).fold(0.0, f64::max);

        let bounds = plan.bounds;
        let width = (2.0 * (margin + half_w) + bounds.width() * ppu).ceil().max(1.0);
        let height = (2.0 * (margin + half_h) + bounds.height() * ppu).ceil().max(1.0);
        if width > f64::from(MAX_DIM) || height > f64::from(MAX_DIM) {
            return Err(FamtreeError::render(format!(
                "canvas too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM}); lower px_per_unit"
            )));
        }

        let mut vp = Self {
            width: width as u32,
            height: height as u32,
            metrics,
            px_per_unit: ppu,
            origin: Point::new(margin + half_w, margin + half_h),
            bounds,
            boxes: Vec::with_capacity(plan.nodes.len()),
        };
        for (node, &(w, h)) in plan.nodes.iter().zip(&sizes) {
            let center = vp.to_px(node.x, node.y);
            let node_box = vp.node_box(node, center, w, h);
            vp.boxes.push(node_box);
        }
        Ok(vp)
    }

    /// Layout coordinates to canvas pixels.
    pub fn to_px(&self, x: f64, y: f64) -> Point {
        Point::new(
            self.origin.x + (x - self.bounds.x0) * self.px_per_unit,
            self.origin.y + (self.bounds.y1 - y) * self.px_per_unit,
        )
    }

    /// Node boxes, in plan order.
    pub fn boxes(&self) -> &[NodeBox] {
        &self.boxes
    }

    /// Box for `node` centered at `center` with the given size.
    pub fn node_box(&self, node: &PlanNode, center: Point, w: f64, h: f64) -> NodeBox {
        let m = &self.metrics;
        let rect = Rect::from_center_size(center, (w, h));
        let mut text_top = rect.y0 + m.padding;
        let photo_slot = has_photo_slot(node).then(|| {
            let slot = Rect::new(
                center.x - m.photo_size / 2.0,
                text_top,
                center.x + m.photo_size / 2.0,
                text_top + m.photo_size,
            );
            text_top = slot.y1 + m.padding;
            slot
        });
        let baselines = (0..node.lines.len())
            .map(|i| text_top + i as f64 * m.line_height + m.font_size)
            .collect();
        NodeBox {
            id: node.id,
            center,
            rect,
            photo_slot,
            baselines,
        }
    }

    /// Box of a person.
    pub fn find(&self, id: PersonId) -> Option<&NodeBox> {
        self.boxes.iter().find(|b| b.id == id)
    }
}

fn has_photo_slot(node: &PlanNode) -> bool {
    node.photo.is_some() || node.stock
}

fn box_size(node: &PlanNode, m: &Metrics) -> (f64, f64) {
    let chars = node
        .lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let mut content_w = chars as f64 * m.char_width;
    let mut h = 2.0 * m.padding + node.lines.len().max(1) as f64 * m.line_height;
    if has_photo_slot(node) {
        content_w = content_w.max(m.photo_size);
        h += m.photo_size + m.padding;
    }
    ((content_w + 2.0 * m.padding).max(m.min_box_width), h)
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewport.rs"]
mod tests;

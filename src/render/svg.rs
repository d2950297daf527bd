use std::fmt::Write as _;

use crate::{
    assets::{
        decode::PreparedImage,
        photo::PhotoStore,
        svg_raster::{parse_svg, xml_escape},
    },
    foundation::core::{Rect, Rgba8},
    foundation::error::{FamtreeError, FamtreeResult},
    plan::builder::{DrawingPlan, PlanNode},
    render::{
        backend::{FrameRGBA, RenderBackend, RenderSettings},
        theme::Theme,
        viewport::{NodeBox, Viewport},
    },
};

/// Renders by emitting an SVG document and rasterizing it with resvg.
pub struct SvgBackend {
    settings: RenderSettings,
}

impl SvgBackend {
    /// Backend with the given settings.
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Settings in use.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Standalone SVG for the plan, with data-url photos embedded as `<image>` elements.
    pub fn document(&self, plan: &DrawingPlan) -> FamtreeResult<String> {
        let vp = Viewport::fit(plan, &self.settings)?;
        Ok(self.build_document(plan, &vp, true))
    }

    fn build_document(&self, plan: &DrawingPlan, vp: &Viewport, embed_photos: bool) -> String {
        let theme = self.settings.theme();
        let (w, h) = (vp.width, vp.height);
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );

        let [r, g, b, a] = self.settings.page_rgba();
        if a > 0 {
            let _ = write!(
                svg,
                r#"<rect width="{w}" height="{h}" fill="{}" fill-opacity="{}"/>"#,
                Rgba8::rgb(r, g, b).to_hex(),
                opacity(a)
            );
        }

        for edge in &plan.edges {
            let (Some(from), Some(to)) = (vp.find(edge.from_id), vp.find(edge.to_id)) else {
                continue;
            };
            let _ = write!(
                svg,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}" stroke-opacity="{}" stroke-linecap="round"/>"#,
                from.center.x,
                from.center.y,
                to.center.x,
                to.center.y,
                theme.edge.color.to_hex(),
                theme.edge.width,
                theme.edge.opacity,
            );
        }

        let m = vp.metrics;
        for (node, nb) in plan.nodes.iter().zip(vp.boxes()) {
            let style = theme.node(node.style_tag);
            let _ = write!(
                svg,
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{r}" ry="{r}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                nb.rect.x0,
                nb.rect.y0,
                nb.rect.width(),
                nb.rect.height(),
                style.fill.to_hex(),
                style.border.to_hex(),
                style.border_width,
                r = m.corner_radius,
            );

            if let Some(slot) = nb.photo_slot {
                let data_url = node
                    .photo
                    .as_deref()
                    .map(str::trim)
                    .filter(|p| embed_photos && p.starts_with("data:image/"));
                if let Some(href) = data_url {
                    let _ = write!(
                        svg,
                        r#"<image x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" preserveAspectRatio="xMidYMid meet" xlink:href="{}"/>"#,
                        slot.x0,
                        slot.y0,
                        slot.width(),
                        slot.height(),
                        xml_escape(href),
                    );
                } else if node.photo.is_none() || node.stock {
                    silhouette(&mut svg, slot, &theme);
                }
            }

            write_label(&mut svg, node, nb, &theme, m.font_size);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Transparent canvas-sized SVG holding only the node labels.
pub(crate) fn labels_document(plan: &DrawingPlan, vp: &Viewport, theme: &Theme) -> String {
    let (w, h) = (vp.width, vp.height);
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    for (node, nb) in plan.nodes.iter().zip(vp.boxes()) {
        write_label(&mut svg, node, nb, theme, vp.metrics.font_size);
    }
    svg.push_str("</svg>");
    svg
}

fn write_label(svg: &mut String, node: &PlanNode, nb: &NodeBox, theme: &Theme, font_size: f64) {
    let weight = if theme.node(node.style_tag).bold {
        "bold"
    } else {
        "normal"
    };
    for (line, baseline) in node.lines.iter().zip(&nb.baselines) {
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="{}" font-size="{font_size}" font-weight="{weight}" fill="{}">{}</text>"#,
            nb.center.x,
            baseline,
            theme.font.css_name(),
            theme.text.to_hex(),
            xml_escape(line),
        );
    }
}

impl RenderBackend for SvgBackend {
    fn name(&self) -> &'static str {
        "svg"
    }

    #[tracing::instrument(skip_all, fields(nodes = plan.nodes.len(), edges = plan.edges.len()))]
    fn render(&mut self, plan: &DrawingPlan, photos: &PhotoStore) -> FamtreeResult<FrameRGBA> {
        let vp = Viewport::fit(plan, &self.settings)?;
        let tree = parse_svg(&self.build_document(plan, &vp, false))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(vp.width, vp.height)
            .ok_or_else(|| FamtreeError::render("failed to allocate svg pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        for (node, nb) in plan.nodes.iter().zip(vp.boxes()) {
            let Some(img) = node.photo.as_deref().and_then(|p| photos.get(p)) else {
                continue;
            };
            paint_photo(&mut pixmap, nb, img);
        }

        Ok(FrameRGBA {
            width: vp.width,
            height: vp.height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

fn opacity(a: u8) -> f64 {
    f64::from(a) / 255.0
}

/// Head-and-shoulders placeholder for stock portraits.
fn silhouette(svg: &mut String, slot: Rect, theme: &Theme) {
    let (cx, w, h) = (slot.center().x, slot.width(), slot.height());
    let fill = theme.silhouette.to_hex();
    let _ = write!(
        svg,
        r#"<circle cx="{cx:.2}" cy="{:.2}" r="{:.2}" fill="{fill}"/>"#,
        slot.y0 + h * 0.35,
        h * 0.2,
    );
    let _ = write!(
        svg,
        r#"<path d="M{:.2},{:.2} Q{cx:.2},{:.2} {:.2},{:.2} Z" fill="{fill}"/>"#,
        slot.x0 + w * 0.15,
        slot.y1,
        slot.y0 + h * 0.45,
        slot.x1 - w * 0.15,
        slot.y1,
    );
}

fn paint_photo(pixmap: &mut resvg::tiny_skia::Pixmap, nb: &NodeBox, img: &PreparedImage) {
    let Some(slot) = nb.photo_slot else {
        return;
    };
    let Some(src) =
        resvg::tiny_skia::PixmapRef::from_bytes(img.rgba8_premul.as_slice(), img.width, img.height)
    else {
        tracing::warn!(id = %nb.id, "photo buffer does not match its size, skipping");
        return;
    };

    let (dx, dy, scale) = contain(slot, img);
    let paint = resvg::tiny_skia::PixmapPaint {
        quality: resvg::tiny_skia::FilterQuality::Bicubic,
        ..Default::default()
    };
    let transform =
        resvg::tiny_skia::Transform::from_row(scale as f32, 0.0, 0.0, scale as f32, dx as f32, dy as f32);
    pixmap.draw_pixmap(0, 0, src, &paint, transform, None);
}

/// Offset and uniform scale that fit `img` inside `slot`, centered.
pub(crate) fn contain(slot: Rect, img: &PreparedImage) -> (f64, f64, f64) {
    let (iw, ih) = (f64::from(img.width.max(1)), f64::from(img.height.max(1)));
    let scale = (slot.width() / iw).min(slot.height() / ih);
    let dx = slot.x0 + (slot.width() - iw * scale) / 2.0;
    let dy = slot.y0 + (slot.height() - ih * scale) / 2.0;
    (dx, dy, scale)
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;

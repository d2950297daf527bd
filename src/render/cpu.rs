use std::{collections::HashMap, sync::Arc};

use vello_cpu::kurbo::{self as cpu_kurbo, Shape as _};

use crate::{
    assets::{decode::PreparedImage, photo::PhotoStore, svg_raster::rasterize_svg},
    foundation::core::{Rect, Rgba8},
    foundation::error::{FamtreeError, FamtreeResult},
    plan::builder::DrawingPlan,
    render::{
        backend::{FrameRGBA, RenderBackend, RenderSettings},
        composite::over_in_place,
        svg::{contain, labels_document},
        theme::Theme,
        viewport::{NodeBox, Viewport},
    },
};

/// Renders shapes with `vello_cpu`; labels are rasterized through usvg and composited on top.
pub struct CpuBackend {
    settings: RenderSettings,
    image_cache: HashMap<String, vello_cpu::Image>,
}

impl CpuBackend {
    /// Backend with the given settings.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            image_cache: HashMap::new(),
        }
    }

    /// Settings in use.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn image_paint_for(
        &mut self,
        reference: &str,
        img: &PreparedImage,
    ) -> FamtreeResult<vello_cpu::Image> {
        if let Some(paint) = self.image_cache.get(reference) {
            return Ok(paint.clone());
        }
        let pixmap = image_premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(reference.to_string(), paint.clone());
        Ok(paint)
    }
}

impl RenderBackend for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    #[tracing::instrument(skip_all, fields(nodes = plan.nodes.len(), edges = plan.edges.len()))]
    fn render(&mut self, plan: &DrawingPlan, photos: &PhotoStore) -> FamtreeResult<FrameRGBA> {
        let vp = Viewport::fit(plan, &self.settings)?;
        let theme = self.settings.theme();
        let width: u16 = vp
            .width
            .try_into()
            .map_err(|_| FamtreeError::render("canvas width exceeds u16"))?;
        let height: u16 = vp
            .height
            .try_into()
            .map_err(|_| FamtreeError::render("canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(cpu_kurbo::Affine::IDENTITY);

        let [r, g, b, a] = self.settings.page_rgba();
        if a > 0 {
            ctx.set_paint(color(Rgba8 { r, g, b, a }));
            ctx.fill_rect(&cpu_kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }

        draw_edges(&mut ctx, plan, &vp, &theme);
        for (node, nb) in plan.nodes.iter().zip(vp.boxes()) {
            draw_box(&mut ctx, nb, &theme, node.style_tag, vp.metrics.corner_radius);
            let Some(slot) = nb.photo_slot else {
                continue;
            };
            let decoded = node
                .photo
                .as_deref()
                .and_then(|p| photos.get(p).map(|img| (p, img)));
            match decoded {
                Some((reference, img)) => {
                    let paint = self.image_paint_for(reference, img)?;
                    draw_photo(&mut ctx, slot, img, paint);
                }
                None if node.photo.is_none() || node.stock => {
                    draw_silhouette(&mut ctx, slot, &theme);
                }
                None => {}
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        if !plan.nodes.is_empty() {
            let labels = rasterize_svg(&labels_document(plan, &vp, &theme), vp.width, vp.height)?;
            over_in_place(&mut data, labels.rgba8_premul.as_slice(), 1.0)?;
        }

        Ok(FrameRGBA {
            width: vp.width,
            height: vp.height,
            data,
            premultiplied: true,
        })
    }
}

fn draw_edges(ctx: &mut vello_cpu::RenderContext, plan: &DrawingPlan, vp: &Viewport, theme: &Theme) {
    let edge = theme.edge;
    let mut path = cpu_kurbo::BezPath::new();
    for e in &plan.edges {
        let (Some(from), Some(to)) = (vp.find(e.from_id), vp.find(e.to_id)) else {
            continue;
        };
        path.move_to(cpu_kurbo::Point::new(from.center.x, from.center.y));
        path.line_to(cpu_kurbo::Point::new(to.center.x, to.center.y));
    }
    if path.elements().is_empty() {
        return;
    }

    ctx.set_paint(color(edge.color));
    ctx.set_stroke(cpu_kurbo::Stroke::new(edge.width).with_caps(cpu_kurbo::Cap::Round));
    let layered = edge.opacity < 1.0;
    if layered {
        ctx.push_opacity_layer(edge.opacity as f32);
    }
    ctx.stroke_path(&path);
    if layered {
        ctx.pop_layer();
    }
}

fn draw_box(
    ctx: &mut vello_cpu::RenderContext,
    nb: &NodeBox,
    theme: &Theme,
    tag: crate::plan::builder::StyleTag,
    radius: f64,
) {
    let style = theme.node(tag);
    let shape = cpu_kurbo::RoundedRect::from_rect(rect_to_cpu(nb.rect), radius).to_path(0.1);
    ctx.set_paint(color(style.fill));
    ctx.fill_path(&shape);
    ctx.set_paint(color(style.border));
    ctx.set_stroke(cpu_kurbo::Stroke::new(style.border_width));
    ctx.stroke_path(&shape);
}

fn draw_silhouette(ctx: &mut vello_cpu::RenderContext, slot: Rect, theme: &Theme) {
    let (cx, w, h) = (slot.center().x, slot.width(), slot.height());
    ctx.set_paint(color(theme.silhouette));

    let head = cpu_kurbo::Circle::new(cpu_kurbo::Point::new(cx, slot.y0 + h * 0.35), h * 0.2);
    ctx.fill_path(&head.to_path(0.1));

    let mut shoulders = cpu_kurbo::BezPath::new();
    shoulders.move_to((slot.x0 + w * 0.15, slot.y1));
    shoulders.quad_to((cx, slot.y0 + h * 0.45), (slot.x1 - w * 0.15, slot.y1));
    shoulders.close_path();
    ctx.fill_path(&shoulders);
}

fn draw_photo(
    ctx: &mut vello_cpu::RenderContext,
    slot: Rect,
    img: &PreparedImage,
    paint: vello_cpu::Image,
) {
    let (dx, dy, scale) = contain(slot, img);
    ctx.set_transform(
        cpu_kurbo::Affine::translate((dx, dy)) * cpu_kurbo::Affine::scale(scale),
    );
    ctx.set_paint(paint);
    ctx.fill_rect(&cpu_kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(img.width),
        f64::from(img.height),
    ));
    ctx.set_transform(cpu_kurbo::Affine::IDENTITY);
}

fn color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> cpu_kurbo::Rect {
    cpu_kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> FamtreeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FamtreeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FamtreeError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(FamtreeError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

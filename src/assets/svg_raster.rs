use std::sync::{Arc, OnceLock};

use crate::{
    assets::decode::PreparedImage,
    foundation::error::{FamtreeError, FamtreeResult},
};

/// Largest raster edge we are willing to allocate.
pub const MAX_DIM: u32 = 16_384;

/// System font database, loaded once per process.
pub fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Arc::new(db)
    })
    .clone()
}

/// Parse an SVG document, resolving text against the system fonts.
pub fn parse_svg(svg: &str) -> FamtreeResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb: system_fontdb(),
        ..Default::default()
    };
    usvg::Tree::from_str(svg, &opts).map_err(|e| FamtreeError::render(format!("parse svg: {e}")))
}

/// Rasterize a parsed tree into a `width` x `height` premultiplied RGBA8 image, stretching the
/// document's own size onto it.
pub fn rasterize_tree(tree: &usvg::Tree, width: u32, height: u32) -> FamtreeResult<PreparedImage> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(FamtreeError::render(format!(
            "svg raster size out of range: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FamtreeError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(PreparedImage::from_premul(width, height, pixmap.take()))
}

/// Parse and rasterize an SVG document into a premultiplied image of the given size.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> FamtreeResult<PreparedImage> {
    rasterize_tree(&parse_svg(svg)?, width, height)
}

/// Escape text for use in SVG character data and attribute values.
pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;

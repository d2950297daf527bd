use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;

use crate::{
    assets::{
        decode::{PreparedImage, load_image_file},
        svg_raster::rasterize_svg,
    },
    foundation::error::{FamtreeError, FamtreeResult},
    foundation::math::SeededRng,
};

/// Default width of generated backgrounds, in pixels.
pub const DEFAULT_WIDTH: u32 = 2000;
/// Default height of generated backgrounds, in pixels.
pub const DEFAULT_HEIGHT: u32 = 1500;

const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "tiff"];

const PARCHMENT: &str = "#f4f1e8";
const PAPER: &str = "#faf8f3";
const SADDLE_BROWN: &str = "#8B4513";

/// Backgrounds that can be generated without any source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackgroundKind {
    /// Aged parchment with spots, a vignette, borders and corner diamonds.
    VintageScroll,
    /// Flat off-white paper.
    ClassicPaper,
}

impl BackgroundKind {
    /// Every kind, in listing order.
    pub const ALL: [Self; 2] = [Self::VintageScroll, Self::ClassicPaper];

    /// Kebab-case name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VintageScroll => "vintage-scroll",
            Self::ClassicPaper => "classic-paper",
        }
    }

    /// File name used inside the backgrounds directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::VintageScroll => "vintage_scroll.png",
            Self::ClassicPaper => "classic_paper.png",
        }
    }
}

impl std::fmt::Display for BackgroundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackgroundKind {
    type Err = FamtreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "vintage-scroll" => Ok(Self::VintageScroll),
            "classic-paper" => Ok(Self::ClassicPaper),
            other => Err(FamtreeError::asset(format!(
                "unknown background kind '{other}' (expected vintage-scroll or classic-paper)"
            ))),
        }
    }
}

/// A directory of background images, laid out as `<root>/backgrounds/*`.
#[derive(Clone, Debug)]
pub struct BackgroundLibrary {
    root: PathBuf,
}

impl BackgroundLibrary {
    /// Library rooted at an assets directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The assets directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/backgrounds`, where library files live.
    pub fn backgrounds_dir(&self) -> PathBuf {
        self.root.join("backgrounds")
    }

    /// File names of supported images in the backgrounds directory, sorted. A missing directory
    /// is an empty library.
    pub fn list(&self) -> FamtreeResult<Vec<String>> {
        let dir = self.backgrounds_dir();
        let rd = match std::fs::read_dir(&dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("list backgrounds in '{}'", dir.display()))
                    .into());
            }
        };

        let mut names = Vec::new();
        for entry in rd.flatten() {
            let path = entry.path();
            if !path.is_file() || !is_supported(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Find a background by library file name, falling back to `name` as a direct path.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let in_library = self.backgrounds_dir().join(name);
        if in_library.is_file() {
            return Some(in_library);
        }
        let direct = PathBuf::from(name);
        direct.is_file().then_some(direct)
    }

    /// Synthesize `kind` and write it into the library as PNG. Returns the written path.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn create(
        &self,
        kind: BackgroundKind,
        width: u32,
        height: u32,
        seed: u64,
    ) -> FamtreeResult<PathBuf> {
        let dir = self.backgrounds_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create backgrounds dir '{}'", dir.display()))?;

        let img = synthesize(kind, width, height, seed)?.to_rgba_image()?;
        let path = dir.join(kind.file_name());
        image::DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .save(&path)
            .with_context(|| format!("write background '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "created background");
        Ok(path)
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode a background image of any supported format.
pub fn load_background(path: &Path) -> FamtreeResult<PreparedImage> {
    load_image_file(path)
}

/// Render a generated background. Output is fully opaque and depends only on the arguments.
pub fn synthesize(
    kind: BackgroundKind,
    width: u32,
    height: u32,
    seed: u64,
) -> FamtreeResult<PreparedImage> {
    rasterize_svg(&background_svg(kind, width, height, seed), width, height)
}

/// SVG source for a generated background.
pub fn background_svg(kind: BackgroundKind, width: u32, height: u32, seed: u64) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    match kind {
        BackgroundKind::ClassicPaper => {
            let _ = write!(
                svg,
                r#"<rect width="{width}" height="{height}" fill="{PAPER}"/>"#
            );
        }
        BackgroundKind::VintageScroll => vintage_scroll(&mut svg, width, height, seed),
    }
    svg.push_str("</svg>");
    svg
}

fn vintage_scroll(svg: &mut String, width: u32, height: u32, seed: u64) {
    let (w, h) = (f64::from(width), f64::from(height));
    let _ = write!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{PARCHMENT}"/>"#
    );

    // Aging spots.
    let mut rng = SeededRng::new(seed);
    for _ in 0..200 {
        let x = rng.range_inclusive(0, width);
        let y = rng.range_inclusive(0, height);
        let size = f64::from(rng.range_inclusive(2, 8));
        let r = rng.range_inclusive(200, 240);
        let g = rng.range_inclusive(190, 220);
        let b = rng.range_inclusive(170, 200);
        let half = size / 2.0;
        let _ = write!(
            svg,
            r#"<circle cx="{}" cy="{}" r="{half}" fill="rgb({r},{g},{b})"/>"#,
            f64::from(x) + half,
            f64::from(y) + half,
        );
    }

    // Vignette: one-pixel brown outlines, more opaque toward the center.
    for i in 0..50u32 {
        let inset = f64::from(i) + 0.5;
        let rw = w - 2.0 * inset;
        let rh = h - 2.0 * inset;
        if rw <= 0.0 || rh <= 0.0 {
            break;
        }
        let opacity = f64::from(i * 2) / 255.0;
        let _ = write!(
            svg,
            r#"<rect x="{inset}" y="{inset}" width="{rw}" height="{rh}" fill="none" stroke="rgb(139,69,19)" stroke-opacity="{opacity:.4}" stroke-width="1"/>"#
        );
    }

    // Outer and inner borders.
    let border = 20.0;
    let half = border / 2.0;
    let _ = write!(
        svg,
        r#"<rect x="{half}" y="{half}" width="{}" height="{}" fill="none" stroke="{SADDLE_BROWN}" stroke-width="{border}"/>"#,
        (w - border).max(0.0),
        (h - border).max(0.0),
    );
    let inner = border + 10.0 + 1.5;
    let _ = write!(
        svg,
        r#"<rect x="{inner}" y="{inner}" width="{}" height="{}" fill="none" stroke="{SADDLE_BROWN}" stroke-width="3"/>"#,
        (w - 2.0 * inner).max(0.0),
        (h - 2.0 * inner).max(0.0),
    );

    // Corner diamonds.
    let d = 15.0;
    let near = border + 20.0;
    let (far_x, far_y) = (w - border - 50.0, h - border - 50.0);
    for (cx, cy) in [(near, near), (far_x, near), (near, far_y), (far_x, far_y)] {
        let _ = write!(
            svg,
            r#"<polygon points="{cx},{} {},{cy} {cx},{} {},{cy}" fill="none" stroke="{SADDLE_BROWN}" stroke-width="2"/>"#,
            cy - d,
            cx + d,
            cy + d,
            cx - d,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/background.rs"]
mod tests;

use std::str::FromStr;

use crate::{
    assets::{decode::unpremultiply_rgba8_in_place, photo::PhotoStore},
    foundation::error::{FamtreeError, FamtreeResult},
    plan::builder::DrawingPlan,
    render::theme::Theme,
};

/// Rendered canvas, row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha image for encoding.
    pub fn to_rgba_image(&self) -> FamtreeResult<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| FamtreeError::render("frame byte length does not match its size"))
    }
}

/// A renderer consumes a [`DrawingPlan`] and nothing else.
pub trait RenderBackend {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Draw `plan`, taking decoded photos from `photos`.
    fn render(&mut self, plan: &DrawingPlan, photos: &PhotoStore) -> FamtreeResult<FrameRGBA>;
}

/// Built-in backends, for [`create_backend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// [`SvgBackend`](crate::SvgBackend).
    Svg,
    /// [`CpuBackend`](crate::CpuBackend).
    Cpu,
}

impl BackendKind {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Cpu => "cpu",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = FamtreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "cpu" => Ok(Self::Cpu),
            other => Err(FamtreeError::render(format!(
                "unknown backend '{other}' (expected svg or cpu)"
            ))),
        }
    }
}

/// Visual style of a rendered tree.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Serif text on warm colors.
    #[default]
    Classic,
    /// Sans-serif text, white boxes, thin gray edges.
    Modern,
}

impl RenderStyle {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
        }
    }
}

impl FromStr for RenderStyle {
    type Err = FamtreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "modern" => Ok(Self::Modern),
            other => Err(FamtreeError::render(format!(
                "unknown style '{other}' (expected classic or modern)"
            ))),
        }
    }
}

/// Canvas and style knobs shared by all backends.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    /// Visual style.
    pub style: RenderStyle,
    /// Pixels per layout unit.
    pub px_per_unit: f64,
    /// Blank space around the drawing, in pixels.
    pub margin_px: f64,
    /// Label font size, in pixels.
    pub font_size_px: f64,
    /// Page color as straight RGBA; `None` uses the theme's page color.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            style: RenderStyle::Classic,
            px_per_unit: 60.0,
            margin_px: 40.0,
            font_size_px: 14.0,
            clear_rgba: None,
        }
    }
}

impl RenderSettings {
    /// Set the style.
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Apply `FAMTREE_PX_PER_UNIT` and `FAMTREE_FONT_SIZE_PX` from the environment.
    pub fn from_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Unparseable or non-positive values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
        };
        if let Some(v) = positive("FAMTREE_PX_PER_UNIT") {
            self.px_per_unit = v;
        }
        if let Some(v) = positive("FAMTREE_FONT_SIZE_PX") {
            self.font_size_px = v;
        }
        self
    }

    /// Theme for the selected style.
    pub fn theme(&self) -> Theme {
        Theme::for_style(self.style)
    }

    /// Straight RGBA the canvas is cleared to.
    pub fn page_rgba(&self) -> [u8; 4] {
        self.clear_rgba.unwrap_or_else(|| {
            let p = self.theme().page;
            [p.r, p.g, p.b, p.a]
        })
    }
}

/// Instantiate a built-in backend.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> FamtreeResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Svg => Ok(Box::new(crate::render::svg::SvgBackend::new(
            settings.clone(),
        ))),
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;

use crate::{foundation::core::Rgba8, plan::builder::StyleTag, render::backend::RenderStyle};

/// Generic font family for labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontFamily {
    /// Serif faces.
    Serif,
    /// Sans-serif faces.
    SansSerif,
}

impl FontFamily {
    /// CSS generic family name.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
        }
    }
}

/// Box style for one [`StyleTag`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    /// Box fill.
    pub fill: Rgba8,
    /// Border color.
    pub border: Rgba8,
    /// Border width, in pixels.
    pub border_width: f64,
    /// Bold label text.
    pub bold: bool,
}

/// Stroke for parent-to-child edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width, in pixels.
    pub width: f64,
    /// Stroke opacity, 0 to 1.
    pub opacity: f64,
}

/// Colors, strokes and fonts for one [`RenderStyle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Style this theme was built for.
    pub style: RenderStyle,
    /// Page color.
    pub page: Rgba8,
    /// Label color.
    pub text: Rgba8,
    /// Edge stroke.
    pub edge: EdgeStyle,
    /// Label font.
    pub font: FontFamily,
    /// Silhouette color for stock portraits.
    pub silhouette: Rgba8,
}

const SADDLE_BROWN: Rgba8 = Rgba8::rgb(0x8b, 0x45, 0x13);

impl Theme {
    /// Theme for a style.
    pub fn for_style(style: RenderStyle) -> Self {
        match style {
            RenderStyle::Classic => Self {
                style,
                page: Rgba8::rgb(0xf9, 0xf9, 0xf9),
                text: Rgba8::rgb(0x22, 0x1a, 0x10),
                edge: EdgeStyle {
                    color: SADDLE_BROWN,
                    width: 2.0,
                    opacity: 0.7,
                },
                font: FontFamily::Serif,
                silhouette: Rgba8::rgb(0xa0, 0x82, 0x64),
            },
            RenderStyle::Modern => Self {
                style,
                page: Rgba8::rgb(0xff, 0xff, 0xff),
                text: Rgba8::rgb(0x11, 0x11, 0x11),
                edge: EdgeStyle {
                    color: Rgba8::rgb(0x66, 0x66, 0x66),
                    width: 1.0,
                    opacity: 0.7,
                },
                font: FontFamily::SansSerif,
                silhouette: Rgba8::rgb(0x99, 0x99, 0x99),
            },
        }
    }

    /// Box style for a node tag.
    pub fn node(&self, tag: StyleTag) -> NodeStyle {
        let bold = tag == StyleTag::Root;
        match self.style {
            RenderStyle::Modern => NodeStyle {
                fill: Rgba8::rgb(0xff, 0xff, 0xff),
                border: Rgba8::rgb(0x33, 0x33, 0x33),
                border_width: 1.0,
                bold,
            },
            RenderStyle::Classic => match tag {
                StyleTag::Root => NodeStyle {
                    fill: Rgba8::rgb(0xe6, 0xf2, 0xff),
                    border: Rgba8::rgb(0x41, 0x69, 0xe1),
                    border_width: 3.0,
                    bold,
                },
                StyleTag::Parent => NodeStyle {
                    fill: Rgba8::rgb(0xff, 0xf0, 0xe6),
                    border: Rgba8::rgb(0xd2, 0x69, 0x1e),
                    border_width: 2.0,
                    bold,
                },
                StyleTag::Person => NodeStyle {
                    fill: Rgba8::rgb(0xf9, 0xf9, 0xf9),
                    border: SADDLE_BROWN,
                    border_width: 1.0,
                    bold,
                },
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/theme.rs"]
mod tests;

//! famtree renders genealogical trees.
//!
//! Ancestry data arrives as nested person records (each person embeds full records of their
//! parents), is loaded into a de-duplicated graph keyed by id, grouped into generations, laid out,
//! and handed to a renderer as a backend-agnostic drawing plan.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `PersonRecord -> FamilyTree` ([`TreeLoader`]); shared ancestors become one entry
//! 2. **Assign**: `FamilyTree -> GenerationMap` ([`GenerationAssigner`]); first visit wins
//! 3. **Layout**: `GenerationMap -> LayoutPlan` ([`LayoutEngine`])
//! 4. **Plan**: `FamilyTree + LayoutPlan -> DrawingPlan` ([`DrawingPlanBuilder`])
//! 5. **Render**: `DrawingPlan -> FrameRGBA` (any [`RenderBackend`])
//!
//! Steps 2 to 4 are wrapped by [`plan_tree`]; [`render_tree`] adds photo decoding and step 5.
//!
//! Cyclic input never hangs: the loader and the assigner both report
//! [`FamtreeError::CyclicAncestry`] instead.
//!
//! For a longer walkthrough see [`crate::guide`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod diagnostics;
mod foundation;
mod generation;
mod graph;
mod layout;
mod loader;
mod pipeline;
mod plan;
mod render;

/// Standalone walkthrough of the data model and pipeline.
pub mod guide;

pub use assets::background::{
    BackgroundKind, BackgroundLibrary, DEFAULT_HEIGHT, DEFAULT_WIDTH, background_svg,
    load_background, synthesize,
};
pub use assets::decode::{PreparedImage, decode_image, load_image_file};
pub use assets::photo::{PhotoStore, decode_photo};
pub use assets::svg_raster::{MAX_DIM, rasterize_svg};
pub use diagnostics::stats::TreeStats;
pub use diagnostics::validate::{Diagnostic, validate};
pub use foundation::core::{Affine, BezPath, PersonId, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{FamtreeError, FamtreeResult};
pub use generation::assigner::{GenerationAssigner, GenerationMap};
pub use graph::person::{Person, PersonKind};
pub use graph::tree::{FamilyTree, PersonGraph};
pub use layout::engine::{LayoutEngine, LayoutPlan, LayoutSettings};
pub use loader::parse::{LoadedTree, TreeLoader, parse_record_json};
pub use loader::record::PersonRecord;
pub use pipeline::{plan_tree, render_tree};
pub use plan::builder::{DrawingPlan, DrawingPlanBuilder, PlanEdge, PlanNode, StyleTag, label_lines};
pub use render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, RenderStyle, create_backend,
};
pub use render::composite::{apply_background, over, over_in_place};
pub use render::cpu::CpuBackend;
pub use render::pipeline::render_with_fallback;
pub use render::svg::SvgBackend;
pub use render::theme::{EdgeStyle, FontFamily, NodeStyle, Theme};
pub use render::viewport::{Metrics, NodeBox, Viewport};

//! # famtree guide
//!
//! A walkthrough of the data model and the render pipeline. For command-line usage, start with
//! the repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`PersonRecord`](crate::PersonRecord): one record of the nested input format
//! - [`FamilyTree`](crate::FamilyTree): the root person plus everyone reachable through parent
//!   links, each id stored once
//! - [`GenerationMap`](crate::GenerationMap): people grouped by distance from the root
//! - [`LayoutPlan`](crate::LayoutPlan): a 2D position per person, in layout units
//! - [`DrawingPlan`](crate::DrawingPlan): labeled nodes and parent-to-child edges; the only thing
//!   renderers see
//! - [`RenderBackend`](crate::RenderBackend): turns a plan into [`FrameRGBA`](crate::FrameRGBA)
//!
//! ---
//!
//! ## The input format
//!
//! ```json
//! {
//!   "id": 1, "name": "Ada Lovelace", "birthyear": "1815", "type": "root", "lastId": 3,
//!   "parents": [
//!     { "id": 2, "name": "Byron" },
//!     { "id": 3, "name": "Anne Isabella Milbanke" }
//!   ]
//! }
//! ```
//!
//! Every record needs an `id`. `type` is one of `root`, `parent`, `person` (unknown tags load as
//! `person`). A shared ancestor may be written out again under every child that reaches it; the
//! loader keeps the first copy and reports a
//! [`Diagnostic::ConflictingRecord`](crate::Diagnostic::ConflictingRecord) if a later copy
//! disagrees with it.
//!
//! ---
//!
//! ## Generations: first visit wins
//!
//! [`GenerationAssigner`](crate::GenerationAssigner) walks depth-first from the root, parents in
//! stored order. Each person keeps the level of the first path that reaches them, even if a later
//! path is shorter or longer. Layout depends on that order, so it is part of the contract.
//!
//! ---
//!
//! ## Rendering
//!
//! ```rust,no_run
//! use famtree::{
//!     BackendKind, LayoutSettings, RenderSettings, RenderStyle, TreeLoader, create_backend,
//!     render_tree,
//! };
//!
//! # fn main() -> famtree::FamtreeResult<()> {
//! let loaded = TreeLoader::load_path(std::path::Path::new("tree.json"))?;
//! for issue in &loaded.diagnostics {
//!     eprintln!("warning: {issue}");
//! }
//!
//! let settings = RenderSettings::default().with_style(RenderStyle::Modern);
//! let mut backend = create_backend(BackendKind::Svg, &settings)?;
//! let frame = render_tree(&loaded.tree, &LayoutSettings::default(), backend.as_mut())?;
//! frame.to_rgba_image()?.save("tree.png").map_err(anyhow::Error::from)?;
//! # Ok(())
//! # }
//! ```
//!
//! Two backends ship with the crate:
//!
//! - [`SvgBackend`](crate::SvgBackend) writes an SVG document and rasterizes it with resvg. Its
//!   [`document`](crate::SvgBackend::document) is also the `.svg` output.
//! - [`CpuBackend`](crate::CpuBackend) draws shapes with `vello_cpu` and composites text rendered
//!   through usvg.
//!
//! [`render_with_fallback`](crate::render_with_fallback) retries with a second backend that the
//! caller picks. Nothing falls back implicitly.
//!
//! ---
//!
//! ## Pixel contract
//!
//! Frames and prepared images are **premultiplied RGBA8**. Call
//! [`FrameRGBA::to_rgba_image`](crate::FrameRGBA::to_rgba_image) before encoding.
//! [`apply_background`](crate::apply_background) expects a premultiplied background such as the
//! ones returned by [`load_background`](crate::load_background) and
//! [`synthesize`](crate::synthesize).

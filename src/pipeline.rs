use crate::{
    assets::photo::PhotoStore,
    foundation::error::FamtreeResult,
    generation::assigner::GenerationAssigner,
    graph::tree::FamilyTree,
    layout::engine::{LayoutEngine, LayoutSettings},
    plan::builder::{DrawingPlan, DrawingPlanBuilder},
    render::backend::{FrameRGBA, RenderBackend},
};

/// Assign generations, lay them out and build the drawing plan for a tree.
///
/// Pipeline:
/// 1. [`GenerationAssigner::assign`](crate::GenerationAssigner::assign)
/// 2. [`LayoutEngine::layout`](crate::LayoutEngine::layout)
/// 3. [`DrawingPlanBuilder::build`](crate::DrawingPlanBuilder::build)
pub fn plan_tree(tree: &FamilyTree, settings: &LayoutSettings) -> FamtreeResult<DrawingPlan> {
    let generations = GenerationAssigner::assign(tree)?;
    let layout = LayoutEngine::new(*settings).layout(&generations);
    Ok(DrawingPlanBuilder::build(tree, &layout))
}

/// Plan a tree and render it with `backend`. Photos are decoded from the plan first.
pub fn render_tree(
    tree: &FamilyTree,
    settings: &LayoutSettings,
    backend: &mut dyn RenderBackend,
) -> FamtreeResult<FrameRGBA> {
    let plan = plan_tree(tree, settings)?;
    let photos = PhotoStore::prepare(&plan);
    backend.render(&plan, &photos)
}

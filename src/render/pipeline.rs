use crate::{
    assets::photo::PhotoStore,
    foundation::error::FamtreeResult,
    plan::builder::DrawingPlan,
    render::backend::{FrameRGBA, RenderBackend},
};

/// Render with `primary`; if it fails and a fallback was supplied, log and retry with it.
///
/// The fallback is always chosen by the caller. When both fail the fallback's error is returned.
pub fn render_with_fallback(
    plan: &DrawingPlan,
    photos: &PhotoStore,
    primary: &mut dyn RenderBackend,
    fallback: Option<&mut dyn RenderBackend>,
) -> FamtreeResult<FrameRGBA> {
    match primary.render(plan, photos) {
        Ok(frame) => Ok(frame),
        Err(err) => {
            let Some(fallback) = fallback else {
                return Err(err);
            };
            tracing::warn!(
                primary = primary.name(),
                fallback = fallback.name(),
                %err,
                "primary backend failed, using fallback"
            );
            fallback.render(plan, photos)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

use std::collections::HashMap;

use crate::{
    foundation::core::{PersonId, Point, Rect},
    generation::assigner::GenerationMap,
};

/// Spacing knobs for [`LayoutEngine`], in abstract layout units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Vertical distance between consecutive generations.
    pub generation_spacing: f64,
    /// Lower bound on horizontal spacing within a crowded generation.
    pub min_spacing: f64,
    /// Width shared out between the people of one generation.
    pub width_budget: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            generation_spacing: 2.0,
            min_spacing: 3.0,
            width_budget: 8.0,
        }
    }
}

/// Position of every person, keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutPlan {
    positions: HashMap<PersonId, Point>,
    max_level: u32,
    bounds: Rect,
}

impl LayoutPlan {
    /// Position of a person, in layout units.
    pub fn position(&self, id: PersonId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Number of positioned people.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `true` when nothing was laid out.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Deepest generation present; 0 for a root-only or empty plan.
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Smallest rectangle containing every position.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Generation-based layout: root at the bottom, each generation one row higher.
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    settings: LayoutSettings,
}

impl LayoutEngine {
    /// Engine with the given spacing.
    pub fn new(settings: LayoutSettings) -> Self {
        Self { settings }
    }

    /// Spacing in use.
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Position every person in `generations`.
    #[tracing::instrument(skip(self, generations), fields(levels = generations.len()))]
    pub fn layout(&self, generations: &GenerationMap) -> LayoutPlan {
        let mut positions = HashMap::with_capacity(generations.person_count());
        let mut bounds: Option<Rect> = None;

        for (level, people) in generations.levels() {
            let y = f64::from(level) * self.settings.generation_spacing;
            for (x, id) in self.row_offsets(people.len()).into_iter().zip(people) {
                let p = Point::new(x, y);
                positions.insert(*id, p);
                bounds = Some(match bounds {
                    Some(b) => b.union_pt(p),
                    None => Rect::from_points(p, p),
                });
            }
        }

        LayoutPlan {
            positions,
            max_level: generations.max_level().unwrap_or(0),
            bounds: bounds.unwrap_or(Rect::ZERO),
        }
    }

    /// Horizontal offsets for `count` people in one generation, centered on x = 0.
    pub fn row_offsets(&self, count: usize) -> Vec<f64> {
        if count <= 1 {
            return vec![0.0; count];
        }
        let n = count as f64;
        let spacing = self.settings.min_spacing.max(self.settings.width_budget / n);
        let center = (n - 1.0) / 2.0;
        (0..count).map(|i| (i as f64 - center) * spacing).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;

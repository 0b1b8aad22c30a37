//! Planar region bounded by one or more loops

use super::Polyline2d;
use crate::types::{BoundingBox2D, Transform};

/// Closed loops in OCS; the first is the outer boundary, the rest are
/// islands or holes depending on fill rules
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Area2d {
    pub loops: Vec<Polyline2d>,
}

impl Area2d {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_loop(&mut self, mut boundary: Polyline2d) {
        boundary.closed = true;
        self.loops.push(boundary);
    }

    pub fn is_empty(&self) -> bool {
        self.loops.iter().all(|l| l.num_vertices() == 0)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox2D> {
        let mut result: Option<BoundingBox2D> = None;
        for bbox in self.loops.iter().filter_map(Polyline2d::bounding_box) {
            match result.as_mut() {
                Some(r) => {
                    r.expand_to_include(bbox.min);
                    r.expand_to_include(bbox.max);
                }
                None => result = Some(bbox),
            }
        }
        result
    }

    pub fn transform(&mut self, transform: &Transform, elevation: f64) {
        for boundary in &mut self.loops {
            boundary.transform(transform, elevation);
        }
    }
}

//! Headless renderer that keeps a display list

use super::{
    ImageSource, ImageStyle, MTextData, PointStyle, Primitive, PrimitiveKind, RenderedObject,
    Renderer, SubEntityTraits, TextStyleTraits,
};
use crate::geometry::{Area2d, CircularArc3d, EllipticalArc3d};
use crate::types::Vector3;

/// Renderer that records every request
///
/// Useful for tests, previews and for measuring what a drawing would
/// emit without a graphics backend.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    traits: SubEntityTraits,
    calls: Vec<PrimitiveKind>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kinds of every primitive requested so far, in order
    pub fn calls(&self) -> &[PrimitiveKind] {
        &self.calls
    }

    /// Current trait context
    pub fn traits(&self) -> &SubEntityTraits {
        &self.traits
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.traits = SubEntityTraits::default();
    }

    fn record(&mut self, primitive: Primitive) -> RenderedObject {
        self.calls.push(primitive.kind());
        RenderedObject::new(primitive, self.traits.clone())
    }
}

impl Renderer for RecordingRenderer {
    fn sub_entity_traits(&mut self) -> &mut SubEntityTraits {
        &mut self.traits
    }

    fn lines(&mut self, points: &[Vector3]) -> RenderedObject {
        self.record(Primitive::Lines(points.to_vec()))
    }

    fn area(&mut self, area: &Area2d) -> RenderedObject {
        self.record(Primitive::Area(area.clone()))
    }

    fn mtext(&mut self, data: &MTextData, style: &TextStyleTraits, delay: bool) -> RenderedObject {
        self.record(Primitive::MText {
            data: data.clone(),
            style: style.clone(),
            delayed: delay,
        })
    }

    fn point(&mut self, position: Vector3, style: &PointStyle) -> RenderedObject {
        self.record(Primitive::Point {
            position,
            style: *style,
        })
    }

    fn image(&mut self, source: &ImageSource, style: &ImageStyle) -> RenderedObject {
        self.record(Primitive::Image {
            source: source.clone(),
            style: style.clone(),
        })
    }

    fn line_segments(&mut self, buffer: &[f64], stride: usize, indices: &[u32]) -> RenderedObject {
        self.record(Primitive::LineSegments {
            buffer: buffer.to_vec(),
            stride,
            indices: indices.to_vec(),
        })
    }

    fn circular_arc(&mut self, arc: &CircularArc3d) -> RenderedObject {
        self.record(Primitive::CircularArc(*arc))
    }

    fn elliptical_arc(&mut self, arc: &EllipticalArc3d) -> RenderedObject {
        self.record(Primitive::EllipticalArc(*arc))
    }

    fn group(&mut self, children: Vec<RenderedObject>) -> RenderedObject {
        self.record(Primitive::Group(children))
    }
}

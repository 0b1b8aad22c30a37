//! Rendering hand-off
//!
//! Entities never rasterize anything. They write their resolved style into
//! the renderer's [`SubEntityTraits`] and then request exactly one
//! primitive per draw. The renderer hands back a [`RenderedObject`] which
//! the entity tags with its identity before returning it.

mod recording;

pub use recording::RecordingRenderer;

use crate::geometry::{Area2d, CircularArc3d, EllipticalArc3d};
use crate::style::LineStyle;
use crate::types::{Color, Handle, LineWeight, Transparency, Vector2, Vector3};

/// One line family of a hatch pattern
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatternLine {
    /// Line direction in radians
    pub angle: f64,
    pub base_point: Vector2,
    /// Offset between successive lines of the family
    pub offset: Vector2,
    /// Dash lengths, empty for solid lines
    pub dash_lengths: Vec<f64>,
}

/// How a filled primitive is painted
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FillType {
    pub solid_fill: bool,
    pub pattern_angle: f64,
    pub pattern_lines: Vec<PatternLine>,
}

/// Per-entity trait state the renderer applies to the next primitive
#[derive(Debug, Clone, PartialEq)]
pub struct SubEntityTraits {
    /// Resolved color, `0xRRGGBB`
    pub rgb_color: u32,
    /// Stored (possibly indirect) color
    pub color: Color,
    pub line_type: LineStyle,
    pub line_type_scale: f64,
    pub line_weight: LineWeight,
    pub transparency: Transparency,
    pub layer: String,
    pub fill_type: FillType,
}

impl Default for SubEntityTraits {
    fn default() -> Self {
        SubEntityTraits {
            rgb_color: crate::style::FALLBACK_RGB,
            color: Color::ByLayer,
            line_type: LineStyle::default(),
            line_type_scale: 1.0,
            line_weight: LineWeight::ByLayer,
            transparency: Transparency::default(),
            layer: "0".to_string(),
            fill_type: FillType::default(),
        }
    }
}

/// MText attachment point, numbered as in DXF group 71
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachmentPoint {
    #[default]
    TopLeft = 1,
    TopCenter = 2,
    TopRight = 3,
    MiddleLeft = 4,
    MiddleCenter = 5,
    MiddleRight = 6,
    BottomLeft = 7,
    BottomCenter = 8,
    BottomRight = 9,
}

impl AttachmentPoint {
    pub fn from_value(value: i64) -> Option<Self> {
        use AttachmentPoint::*;
        Some(match value {
            1 => TopLeft,
            2 => TopCenter,
            3 => TopRight,
            4 => MiddleLeft,
            5 => MiddleCenter,
            6 => MiddleRight,
            7 => BottomLeft,
            8 => BottomCenter,
            9 => BottomRight,
            _ => return None,
        })
    }
}

/// Text layout request shared by TEXT and MTEXT
#[derive(Debug, Clone, PartialEq)]
pub struct MTextData {
    pub contents: String,
    pub height: f64,
    /// Reference rectangle width, 0 for no wrapping
    pub width: f64,
    pub position: Vector3,
    pub rotation: f64,
    /// Text direction in WCS
    pub direction: Vector3,
    pub attachment_point: AttachmentPoint,
    pub line_spacing_factor: f64,
    pub width_factor: f64,
}

/// Font parameters taken from the text style record
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyleTraits {
    pub name: String,
    pub font: String,
    pub big_font: String,
    pub width_factor: f64,
    pub oblique_angle: f64,
    pub fixed_height: f64,
    pub backward: bool,
    pub upside_down: bool,
}

impl From<&crate::tables::TextStyle> for TextStyleTraits {
    fn from(style: &crate::tables::TextStyle) -> Self {
        TextStyleTraits {
            name: style.name.clone(),
            font: style.font_file.clone(),
            big_font: style.big_font_file.clone(),
            width_factor: style.width_factor,
            oblique_angle: style.oblique_angle,
            fixed_height: style.height,
            backward: style.flags.backward,
            upside_down: style.flags.upside_down,
        }
    }
}

/// PDMODE / PDSIZE pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointStyle {
    pub display_mode: i32,
    pub display_size: f64,
}

/// Where an image's pixels come from
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub definition: Handle,
    pub file_name: String,
    /// Size in pixels
    pub size: Vector2,
}

/// Placement of an image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageStyle {
    /// Closed WCS boundary
    pub boundary: Vec<Vector3>,
    pub rotation: f64,
}

/// Primitive captured in a rendered object
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Lines(Vec<Vector3>),
    Area(Area2d),
    MText {
        data: MTextData,
        style: TextStyleTraits,
        delayed: bool,
    },
    Point {
        position: Vector3,
        style: PointStyle,
    },
    Image {
        source: ImageSource,
        style: ImageStyle,
    },
    LineSegments {
        buffer: Vec<f64>,
        stride: usize,
        indices: Vec<u32>,
    },
    CircularArc(CircularArc3d),
    EllipticalArc(EllipticalArc3d),
    Group(Vec<RenderedObject>),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Lines(_) => PrimitiveKind::Lines,
            Primitive::Area(_) => PrimitiveKind::Area,
            Primitive::MText { .. } => PrimitiveKind::MText,
            Primitive::Point { .. } => PrimitiveKind::Point,
            Primitive::Image { .. } => PrimitiveKind::Image,
            Primitive::LineSegments { .. } => PrimitiveKind::LineSegments,
            Primitive::CircularArc(_) => PrimitiveKind::CircularArc,
            Primitive::EllipticalArc(_) => PrimitiveKind::EllipticalArc,
            Primitive::Group(_) => PrimitiveKind::Group,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Lines,
    Area,
    MText,
    Point,
    Image,
    LineSegments,
    CircularArc,
    EllipticalArc,
    Group,
}

/// Handle returned from a draw request
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedObject {
    pub primitive: Primitive,
    /// Trait state in effect when the primitive was requested
    pub traits: SubEntityTraits,
    pub object_id: Handle,
    pub owner_id: Handle,
    pub layer_name: String,
    pub visible: bool,
}

impl RenderedObject {
    pub fn new(primitive: Primitive, traits: SubEntityTraits) -> Self {
        let layer_name = traits.layer.clone();
        RenderedObject {
            primitive,
            traits,
            object_id: Handle::NULL,
            owner_id: Handle::NULL,
            layer_name,
            visible: true,
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.primitive.kind()
    }
}

/// Graphic interface consumed by entities
pub trait Renderer {
    /// Trait context applied to the next primitive
    fn sub_entity_traits(&mut self) -> &mut SubEntityTraits;

    /// Polyline through `points`
    fn lines(&mut self, points: &[Vector3]) -> RenderedObject;

    /// Filled region painted per the current fill type
    fn area(&mut self, area: &Area2d) -> RenderedObject;

    /// Text layout; with `delay` the renderer may return a placeholder
    /// and lay the text out later
    fn mtext(&mut self, data: &MTextData, style: &TextStyleTraits, delay: bool) -> RenderedObject;

    fn point(&mut self, position: Vector3, style: &PointStyle) -> RenderedObject;

    fn image(&mut self, source: &ImageSource, style: &ImageStyle) -> RenderedObject;

    /// Indexed segments over a flat coordinate buffer
    ///
    /// Every `stride` floats in `buffer` form one vertex; each consecutive
    /// pair of `indices` is one segment.
    fn line_segments(&mut self, buffer: &[f64], stride: usize, indices: &[u32]) -> RenderedObject;

    fn circular_arc(&mut self, arc: &CircularArc3d) -> RenderedObject;

    fn elliptical_arc(&mut self, arc: &EllipticalArc3d) -> RenderedObject;

    fn group(&mut self, children: Vec<RenderedObject>) -> RenderedObject;
}

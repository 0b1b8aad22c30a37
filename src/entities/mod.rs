//! CAD entity types and traits
//!
//! Every entity implements [`Entity`], which carries identity and style
//! state and the two contracts every entity must fill: [`Extents`] and
//! [`Renderable`]. Editing behavior is opt-in through the capability
//! traits [`GripPointSource`], [`SnapPointSource`] and [`Transformable`];
//! [`EntityType`] dispatches to them and answers with the documented
//! default when a variant lacks one.

use crate::database::{Database, DrawingContext};
use crate::properties::{PropertySource, PropertyValue};
use crate::render::{FillType, RenderedObject, Renderer};
use crate::style::{self, BlockStyleContext, LineStyle};
use crate::types::{
    BoundingBox3D, Color, Handle, LineTypeRef, LineWeight, Transform, Transparency, Vector3,
};
use crate::{EntityError, Result};
use ahash::RandomState;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod arc;
pub mod circle;
pub mod curve;
pub mod ellipse;
pub mod face;
pub mod hatch;
pub mod leader;
pub mod line;
pub mod memoized;
pub mod mtext;
pub mod point;
pub mod polyline;
pub mod polyline2d;
pub mod polyline3d;
pub mod raster_image;
pub mod ray;
pub mod spline;
pub mod text;
pub mod trace;
pub mod viewport;
pub mod wipeout;
pub mod xline;

pub use arc::Arc;
pub use circle::Circle;
pub use curve::{curve_osnap_points, Curve, OsnapMode};
pub use ellipse::Ellipse;
pub use face::{Face, InvisibleEdgeFlags};
pub use hatch::{Hatch, HatchPatternType};
pub use leader::Leader;
pub use line::Line;
pub use memoized::Memoized;
pub use mtext::MText;
pub use point::Point;
pub use polyline::Polyline;
pub use polyline2d::{Polyline2d, PolylineCurveType};
pub use polyline3d::{Polyline3d, Polyline3dType};
pub use raster_image::{ImageDisplayFlags, RasterImage};
pub use ray::Ray;
pub use spline::Spline;
pub use text::{Text, TextHorizontalMode, TextVerticalMode};
pub use trace::Trace;
pub use viewport::Viewport;
pub use wipeout::Wipeout;
pub use xline::Xline;

/// Multiplier applied to the unit direction when drawing rays and xlines
pub const INFINITE_DRAW_LENGTH: f64 = 1_000_000.0;

/// Multiplier applied to the unit direction for ray and xline extents
///
/// Deliberately much smaller than [`INFINITE_DRAW_LENGTH`] so the extents
/// stay practical for zoom-to-fit.
pub const INFINITE_EXTENTS_LENGTH: f64 = 10.0;

/// World-space axis-aligned extents
pub trait Extents {
    /// Bounding box in WCS
    ///
    /// Entities whose geometry support is incomplete return a degenerate
    /// box rather than failing.
    fn geometric_extents(&self) -> BoundingBox3D;
}

/// Entity-specific primitive emission
pub trait Renderable {
    /// Request exactly one primitive from `renderer`
    ///
    /// Style traits have already been written by [`Entity::draw`].
    /// Returning `None` means the entity chose not to render.
    fn world_draw(
        &self,
        renderer: &mut dyn Renderer,
        ctx: &dyn DrawingContext,
        delay: bool,
    ) -> Option<RenderedObject>;

    /// Fill applied to filled primitives
    fn fill_type(&self) -> FillType {
        FillType::default()
    }
}

/// Editable control points
pub trait GripPointSource {
    fn grip_points(&self) -> Vec<Vector3>;
}

/// Object snap candidates
pub trait SnapPointSource {
    /// Append zero or more candidates for `mode` to `out`
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, last_point: Vector3, out: &mut Vec<Vector3>);
}

/// In-place geometric transformation
pub trait Transformable {
    fn apply_transform(&mut self, transform: &Transform);

    /// Fluent form of [`apply_transform`](Self::apply_transform)
    fn transform_by(&mut self, transform: &Transform) -> &mut Self
    where
        Self: Sized,
    {
        self.apply_transform(transform);
        self
    }
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Unique handle, assigned by the database
    pub handle: Handle,
    /// Owning block record; a back-reference only
    pub owner_id: Handle,
    /// Layer name
    pub layer: String,
    pub color: Color,
    pub line_type: LineTypeRef,
    pub line_weight: LineWeight,
    /// Linetype scale, negative while unset
    pub linetype_scale: f64,
    pub visible: bool,
    pub transparency: Transparency,
}

impl EntityCommon {
    /// Linetype scale value meaning "adopt CELTSCALE when appended"
    pub const UNSET_LINETYPE_SCALE: f64 = -1.0;

    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            owner_id: Handle::NULL,
            layer: "0".to_string(),
            color: Color::ByLayer,
            line_type: LineTypeRef::ByLayer,
            line_weight: LineWeight::ByLayer,
            linetype_scale: Self::UNSET_LINETYPE_SCALE,
            visible: true,
            transparency: Transparency::OPAQUE,
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Base trait for all CAD entities
pub trait Entity: Extents + Renderable {
    fn common(&self) -> &EntityCommon;

    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Static type tag, e.g. `"LINE"`
    fn type_name(&self) -> &'static str;

    fn handle(&self) -> Handle {
        self.common().handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.common_mut().handle = handle;
    }

    fn owner_id(&self) -> Handle {
        self.common().owner_id
    }

    fn set_owner_id(&mut self, owner: Handle) {
        self.common_mut().owner_id = owner;
    }

    fn layer(&self) -> &str {
        &self.common().layer
    }

    fn set_layer(&mut self, layer: String) {
        self.common_mut().layer = layer;
    }

    fn color(&self) -> Color {
        self.common().color
    }

    fn set_color(&mut self, color: Color) {
        self.common_mut().color = color;
    }

    fn line_type(&self) -> &LineTypeRef {
        &self.common().line_type
    }

    fn set_line_type(&mut self, line_type: LineTypeRef) {
        self.common_mut().line_type = line_type;
    }

    fn line_weight(&self) -> LineWeight {
        self.common().line_weight
    }

    fn set_line_weight(&mut self, weight: LineWeight) {
        self.common_mut().line_weight = weight;
    }

    fn linetype_scale(&self) -> f64 {
        self.common().linetype_scale
    }

    fn set_linetype_scale(&mut self, scale: f64) {
        self.common_mut().linetype_scale = scale;
    }

    fn is_visible(&self) -> bool {
        self.common().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.common_mut().visible = visible;
    }

    fn transparency(&self) -> Transparency {
        self.common().transparency
    }

    fn set_transparency(&mut self, transparency: Transparency) {
        self.common_mut().transparency = transparency;
    }

    /// Resolved color, `0xRRGGBB`
    fn rgb_color(&self, ctx: &dyn DrawingContext) -> u32 {
        style::resolve_color(self.color(), self.layer(), ctx, None)
    }

    /// Resolved color when drawn through a block reference
    fn rgb_color_in_block(&self, ctx: &dyn DrawingContext, block: &dyn BlockStyleContext) -> u32 {
        style::resolve_color(self.color(), self.layer(), ctx, Some(block))
    }

    /// Resolved linetype
    fn line_style(&self, ctx: &dyn DrawingContext) -> LineStyle {
        style::resolve_line_style(self.line_type(), self.layer(), ctx, None)
    }

    fn line_style_in_block(&self, ctx: &dyn DrawingContext, block: &dyn BlockStyleContext) -> LineStyle {
        style::resolve_line_style(self.line_type(), self.layer(), ctx, Some(block))
    }

    /// Linetype scale with the unset sentinel replaced by CELTSCALE
    fn effective_linetype_scale(&self, ctx: &dyn DrawingContext) -> f64 {
        let scale = self.linetype_scale();
        if scale < 0.0 {
            ctx.defaults().current_linetype_scale
        } else {
            scale
        }
    }

    /// Write resolved style into the renderer's trait context
    fn apply_sub_entity_traits(&self, renderer: &mut dyn Renderer, ctx: &dyn DrawingContext) {
        let rgb_color = self.rgb_color(ctx);
        let line_type = self.line_style(ctx);
        let line_type_scale = self.effective_linetype_scale(ctx);
        let fill_type = self.fill_type();

        let traits = renderer.sub_entity_traits();
        traits.rgb_color = rgb_color;
        traits.color = self.color();
        traits.line_type = line_type;
        traits.line_type_scale = line_type_scale;
        traits.line_weight = self.line_weight();
        traits.transparency = self.transparency();
        traits.layer = self.layer().to_string();
        traits.fill_type = fill_type;
    }

    /// Draw with resolved style and tag the result with this entity's
    /// identity
    fn draw(
        &self,
        renderer: &mut dyn Renderer,
        ctx: &dyn DrawingContext,
        delay: bool,
    ) -> Option<RenderedObject> {
        self.apply_sub_entity_traits(renderer, ctx);
        let mut rendered = self.world_draw(renderer, ctx, delay)?;
        rendered.object_id = self.handle();
        rendered.owner_id = self.owner_id();
        rendered.layer_name = self.layer().to_string();
        rendered.visible = self.is_visible();
        Some(rendered)
    }

    /// Tell the database's listeners that this entity changed
    fn trigger_modified_event(&self, db: &Database)
    where
        Self: Sized,
    {
        db.notify_entity_modified(self);
    }
}

/// Implements [`Entity`] for a struct with a `common` field and an
/// inherent `TYPE_NAME` constant
macro_rules! impl_entity {
    ($ty:ty) => {
        impl $crate::entities::Entity for $ty {
            fn common(&self) -> &$crate::entities::EntityCommon {
                &self.common
            }

            fn common_mut(&mut self) -> &mut $crate::entities::EntityCommon {
                &mut self.common
            }

            fn type_name(&self) -> &'static str {
                Self::TYPE_NAME
            }
        }
    };
}
pub(crate) use impl_entity;

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone)]
pub enum EntityType {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Ellipse(Ellipse),
    Spline(Spline),
    /// Lightweight polyline
    Polyline(Polyline),
    /// Heavy 2D polyline
    Polyline2d(Polyline2d),
    Polyline3d(Polyline3d),
    Trace(Trace),
    Face(Face),
    Text(Text),
    MText(MText),
    Hatch(Hatch),
    Ray(Ray),
    Xline(Xline),
    Leader(Leader),
    RasterImage(RasterImage),
    Wipeout(Wipeout),
    Viewport(Viewport),
}

/// Run `$body` with `$e` bound to the inner entity of any variant
macro_rules! with_variant {
    ($value:expr, $e:ident => $body:expr) => {
        match $value {
            EntityType::Point($e) => $body,
            EntityType::Line($e) => $body,
            EntityType::Circle($e) => $body,
            EntityType::Arc($e) => $body,
            EntityType::Ellipse($e) => $body,
            EntityType::Spline($e) => $body,
            EntityType::Polyline($e) => $body,
            EntityType::Polyline2d($e) => $body,
            EntityType::Polyline3d($e) => $body,
            EntityType::Trace($e) => $body,
            EntityType::Face($e) => $body,
            EntityType::Text($e) => $body,
            EntityType::MText($e) => $body,
            EntityType::Hatch($e) => $body,
            EntityType::Ray($e) => $body,
            EntityType::Xline($e) => $body,
            EntityType::Leader($e) => $body,
            EntityType::RasterImage($e) => $body,
            EntityType::Wipeout($e) => $body,
            EntityType::Viewport($e) => $body,
        }
    };
}

type Constructor = fn() -> EntityType;

static REGISTRY: Lazy<HashMap<&'static str, Constructor, RandomState>> = Lazy::new(|| {
    let entries: [(&'static str, Constructor); 20] = [
        (Point::TYPE_NAME, || EntityType::Point(Point::default())),
        (Line::TYPE_NAME, || EntityType::Line(Line::default())),
        (Circle::TYPE_NAME, || EntityType::Circle(Circle::default())),
        (Arc::TYPE_NAME, || EntityType::Arc(Arc::default())),
        (Ellipse::TYPE_NAME, || EntityType::Ellipse(Ellipse::default())),
        (Spline::TYPE_NAME, || EntityType::Spline(Spline::default())),
        (Polyline::TYPE_NAME, || EntityType::Polyline(Polyline::default())),
        (Polyline2d::TYPE_NAME, || EntityType::Polyline2d(Polyline2d::default())),
        (Polyline3d::TYPE_NAME, || EntityType::Polyline3d(Polyline3d::default())),
        (Trace::TYPE_NAME, || EntityType::Trace(Trace::default())),
        (Face::TYPE_NAME, || EntityType::Face(Face::default())),
        (Text::TYPE_NAME, || EntityType::Text(Text::default())),
        (MText::TYPE_NAME, || EntityType::MText(MText::default())),
        (Hatch::TYPE_NAME, || EntityType::Hatch(Hatch::default())),
        (Ray::TYPE_NAME, || EntityType::Ray(Ray::default())),
        (Xline::TYPE_NAME, || EntityType::Xline(Xline::default())),
        (Leader::TYPE_NAME, || EntityType::Leader(Leader::default())),
        (RasterImage::TYPE_NAME, || EntityType::RasterImage(RasterImage::default())),
        (Wipeout::TYPE_NAME, || EntityType::Wipeout(Wipeout::default())),
        (Viewport::TYPE_NAME, || EntityType::Viewport(Viewport::default())),
    ];
    entries.into_iter().collect()
});

impl EntityType {
    /// Default-constructed entity for a type name (case-insensitive)
    pub fn create(type_name: &str) -> Result<EntityType> {
        REGISTRY
            .get(type_name.to_ascii_uppercase().as_str())
            .map(|constructor| constructor())
            .ok_or_else(|| EntityError::UnknownEntityType(type_name.to_string()))
    }

    /// Every registered type name, sorted
    pub fn type_names() -> Vec<&'static str> {
        let mut names: Vec<_> = REGISTRY.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        with_variant!(self, e => e)
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        with_variant!(self, e => e)
    }

    pub fn type_name(&self) -> &'static str {
        self.as_entity().type_name()
    }

    pub fn geometric_extents(&self) -> BoundingBox3D {
        self.as_entity().geometric_extents()
    }

    pub fn draw(
        &self,
        renderer: &mut dyn Renderer,
        ctx: &dyn DrawingContext,
        delay: bool,
    ) -> Option<RenderedObject> {
        self.as_entity().draw(renderer, ctx, delay)
    }

    /// Grip points; empty for entities without editable control points
    pub fn grip_points(&self) -> Vec<Vector3> {
        match self {
            EntityType::Point(e) => e.grip_points(),
            EntityType::Line(e) => e.grip_points(),
            EntityType::Circle(e) => e.grip_points(),
            EntityType::Arc(e) => e.grip_points(),
            EntityType::Ellipse(e) => e.grip_points(),
            EntityType::Spline(e) => e.grip_points(),
            EntityType::Polyline(e) => e.grip_points(),
            EntityType::Polyline2d(e) => e.grip_points(),
            EntityType::Polyline3d(e) => e.grip_points(),
            EntityType::Trace(e) => e.grip_points(),
            EntityType::Face(e) => e.grip_points(),
            EntityType::Text(e) => e.grip_points(),
            EntityType::MText(e) => e.grip_points(),
            EntityType::Ray(e) => e.grip_points(),
            EntityType::Xline(e) => e.grip_points(),
            EntityType::Leader(e) => e.grip_points(),
            EntityType::Viewport(e) => e.grip_points(),
            EntityType::Hatch(_) | EntityType::RasterImage(_) | EntityType::Wipeout(_) => Vec::new(),
        }
    }

    /// Snap candidates; a no-op for entities without snap support
    pub fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, last_point: Vector3, out: &mut Vec<Vector3>) {
        match self {
            EntityType::Point(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Line(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Circle(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Arc(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Ellipse(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Spline(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Polyline(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Polyline2d(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Polyline3d(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Trace(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Text(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::MText(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Ray(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Xline(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Leader(e) => e.osnap_points(mode, pick_point, last_point, out),
            EntityType::Face(_)
            | EntityType::Hatch(_)
            | EntityType::RasterImage(_)
            | EntityType::Wipeout(_)
            | EntityType::Viewport(_) => {}
        }
    }

    /// Transform in place; a no-op for viewports
    pub fn transform_by(&mut self, transform: &Transform) -> &mut Self {
        match self {
            EntityType::Point(e) => e.apply_transform(transform),
            EntityType::Line(e) => e.apply_transform(transform),
            EntityType::Circle(e) => e.apply_transform(transform),
            EntityType::Arc(e) => e.apply_transform(transform),
            EntityType::Ellipse(e) => e.apply_transform(transform),
            EntityType::Spline(e) => e.apply_transform(transform),
            EntityType::Polyline(e) => e.apply_transform(transform),
            EntityType::Polyline2d(e) => e.apply_transform(transform),
            EntityType::Polyline3d(e) => e.apply_transform(transform),
            EntityType::Trace(e) => e.apply_transform(transform),
            EntityType::Face(e) => e.apply_transform(transform),
            EntityType::Text(e) => e.apply_transform(transform),
            EntityType::MText(e) => e.apply_transform(transform),
            EntityType::Hatch(e) => e.apply_transform(transform),
            EntityType::Ray(e) => e.apply_transform(transform),
            EntityType::Xline(e) => e.apply_transform(transform),
            EntityType::Leader(e) => e.apply_transform(transform),
            EntityType::RasterImage(e) => e.apply_transform(transform),
            EntityType::Wipeout(e) => e.apply_transform(transform),
            EntityType::Viewport(_) => {}
        }
        self
    }

    /// Read a property by group and name
    pub fn property(&self, group: &str, name: &str) -> Result<PropertyValue> {
        with_variant!(self, e => e.properties().get(e, group, name))
    }

    /// Write a property by group and name through its setter
    pub fn set_property(&mut self, group: &str, name: &str, value: PropertyValue) -> Result<()> {
        with_variant!(self, e => {
            let properties = e.properties();
            properties.set(e, group, name, value)
        })
    }

    /// `(group, property)` names in display order
    pub fn property_names(&self) -> Vec<(&'static str, &'static str)> {
        with_variant!(self, e => e.properties().names())
    }
}

macro_rules! impl_from_entity {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EntityType {
                fn from(entity: $variant) -> Self {
                    EntityType::$variant(entity)
                }
            }
        )*
    };
}

impl_from_entity!(
    Point, Line, Circle, Arc, Ellipse, Spline, Polyline, Polyline2d, Polyline3d, Trace, Face, Text,
    MText, Hatch, Ray, Xline, Leader, RasterImage, Wipeout, Viewport,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_defaults() {
        let common = EntityCommon::new();
        assert_eq!(common.layer, "0");
        assert_eq!(common.color, Color::ByLayer);
        assert_eq!(common.line_type, LineTypeRef::ByLayer);
        assert_eq!(common.line_weight, LineWeight::ByLayer);
        assert_eq!(common.linetype_scale, -1.0);
        assert!(common.visible);
        assert_eq!(common.transparency, Transparency::OPAQUE);
    }

    #[test]
    fn test_registry_type_names_round_trip() {
        let names = EntityType::type_names();
        assert_eq!(names.len(), 20);
        for name in names {
            let entity = EntityType::create(name).unwrap();
            assert_eq!(entity.type_name(), name);
        }
    }

    #[test]
    fn test_registry_is_case_insensitive() {
        assert!(matches!(EntityType::create("line"), Ok(EntityType::Line(_))));
        assert!(matches!(EntityType::create("3dface"), Ok(EntityType::Face(_))));
    }

    #[test]
    fn test_registry_unknown_type() {
        assert_eq!(
            EntityType::create("DIMENSION").unwrap_err(),
            EntityError::UnknownEntityType("DIMENSION".into())
        );
    }

    #[test]
    fn test_viewport_transform_is_noop() {
        let mut entity: EntityType = Viewport::default().into();
        let before = entity.geometric_extents();
        entity.transform_by(&Transform::from_translation(Vector3::new(5.0, 5.0, 0.0)));
        assert_eq!(entity.geometric_extents(), before);
    }
}

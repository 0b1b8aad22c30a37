//! Raster image entity and the placement frame it shares with wipeouts

use super::{impl_entity, EntityCommon, Extents, Renderable, Transformable};
use crate::database::DrawingContext;
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{ImageSource, ImageStyle, RenderedObject, Renderer};
use crate::types::{BoundingBox2D, BoundingBox3D, Handle, Transform, Vector2, Vector3};
use bitflags::bitflags;
use tracing::warn;

bitflags! {
    /// Image display flags (DXF group 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ImageDisplayFlags: i16 {
        const SHOW_IMAGE = 1;
        /// Show image when not aligned with screen
        const SHOW_NOT_ALIGNED = 2;
        const USE_CLIPPING_BOUNDARY = 4;
        const TRANSPARENCY_ON = 8;
    }
}

/// Minimum clip vertex count for the clip boundary to be used
const MIN_CLIP_VERTICES: usize = 4;

/// Placement of an image-like rectangle, with an optional clip polygon
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFrame {
    /// Insertion point in WCS
    pub position: Vector3,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians
    pub rotation: f64,
    /// Clip polygon, normalized to `0..1` per image dimension
    pub clip_boundary: Vec<Vector2>,
    pub is_clipped: bool,
}

impl ImageFrame {
    pub fn new(position: Vector3, width: f64, height: f64) -> Self {
        ImageFrame {
            position,
            width,
            height,
            rotation: 0.0,
            clip_boundary: Vec::new(),
            is_clipped: false,
        }
    }

    /// True when the clip polygon drives the boundary
    pub fn uses_clip_boundary(&self) -> bool {
        self.is_clipped && self.clip_boundary.len() >= MIN_CLIP_VERTICES
    }

    /// Boundary of the visible image in WCS
    ///
    /// A usable clip polygon is scaled by the image size and translated so
    /// its minimum corner lands on the insertion point. Otherwise the four
    /// corners of the rectangle are produced; a rotation turns corners 1 to
    /// 3 about corner 1 (not corner 0), and the loop is closed by repeating
    /// the first corner.
    pub fn boundary_path(&self) -> Vec<Vector3> {
        let z = self.position.z;
        if self.uses_clip_boundary() {
            if let Some(bbox) = BoundingBox2D::from_points(&self.clip_boundary) {
                let tx = self.position.x - bbox.min.x * self.width;
                let ty = self.position.y - bbox.min.y * self.height;
                return self
                    .clip_boundary
                    .iter()
                    .map(|p| Vector3::new(p.x * self.width + tx, p.y * self.height + ty, z))
                    .collect();
            }
        }

        let origin = self.position.to_vec2();
        let mut corners = [
            origin,
            origin + Vector2::new(self.width, 0.0),
            origin + Vector2::new(self.width, self.height),
            origin + Vector2::new(0.0, self.height),
        ];
        if self.rotation != 0.0 {
            let pivot = corners[1];
            for corner in &mut corners[1..] {
                *corner = corner.rotate_about(pivot, self.rotation);
            }
        }
        let mut path: Vec<_> = corners.iter().map(|c| c.with_z(z)).collect();
        path.push(path[0]);
        path
    }

    pub fn extents(&self) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.boundary_path()).unwrap_or_default()
    }

    pub fn transform(&mut self, transform: &Transform) {
        let x_axis = transform.apply_rotation(Vector3::UNIT_X);
        let scale = transform.scale_factor();
        self.position = transform.apply(self.position);
        self.rotation += x_axis.y.atan2(x_axis.x);
        self.width *= scale;
        self.height *= scale;
    }
}

impl Default for ImageFrame {
    fn default() -> Self {
        Self::new(Vector3::ZERO, 1.0, 1.0)
    }
}

/// IMAGE entity referencing an image definition
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub common: EntityCommon,
    pub frame: ImageFrame,
    /// IMAGEDEF this image displays
    pub image_definition: Handle,
    pub flags: ImageDisplayFlags,
    /// 0..=100
    pub brightness: u8,
    /// 0..=100
    pub contrast: u8,
    /// 0..=100
    pub fade: u8,
}

impl RasterImage {
    pub const TYPE_NAME: &'static str = "IMAGE";

    pub fn new() -> Self {
        RasterImage {
            common: EntityCommon::new(),
            frame: ImageFrame::default(),
            image_definition: Handle::NULL,
            flags: ImageDisplayFlags::SHOW_IMAGE | ImageDisplayFlags::SHOW_NOT_ALIGNED,
            brightness: 50,
            contrast: 50,
            fade: 0,
        }
    }

    /// Image of `width` x `height` drawing units at `position`
    pub fn with_size(image_definition: Handle, position: Vector3, width: f64, height: f64) -> Self {
        RasterImage {
            frame: ImageFrame::new(position, width, height),
            image_definition,
            ..Self::new()
        }
    }

    pub fn boundary_path(&self) -> Vec<Vector3> {
        self.frame.boundary_path()
    }

    /// Set the normalized clip polygon and turn clipping on
    pub fn set_clip_boundary(&mut self, boundary: Vec<Vector2>) {
        self.frame.clip_boundary = boundary;
        self.set_clipped(true);
    }

    pub fn set_clipped(&mut self, clipped: bool) {
        self.frame.is_clipped = clipped;
        self.flags.set(ImageDisplayFlags::USE_CLIPPING_BOUNDARY, clipped);
    }

    pub fn is_clipped(&self) -> bool {
        self.frame.is_clipped
    }
}

impl Default for RasterImage {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(RasterImage);

impl Extents for RasterImage {
    fn geometric_extents(&self) -> BoundingBox3D {
        self.frame.extents()
    }
}

impl Renderable for RasterImage {
    /// Draws the image, or only its boundary when the definition is missing
    fn world_draw(&self, renderer: &mut dyn Renderer, ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        let boundary = self.boundary_path();
        let Some(definition) = ctx.image_definition(self.image_definition) else {
            warn!(image_definition = %self.image_definition, "image definition not found, drawing frame only");
            return Some(renderer.lines(&boundary));
        };
        let source = ImageSource {
            definition: definition.handle,
            file_name: definition.source_file_name.clone(),
            size: definition.size,
        };
        let style = ImageStyle {
            boundary,
            rotation: self.frame.rotation,
        };
        Some(renderer.image(&source, &style))
    }
}

impl Transformable for RasterImage {
    fn apply_transform(&mut self, transform: &Transform) {
        self.frame.transform(transform);
    }
}

macro_rules! percent_property {
    ($name:literal, $field:ident) => {
        Property::editable(
            $name,
            PropertyType::Int,
            |e: &RasterImage| PropertyValue::Int(e.$field as i64),
            |e: &mut RasterImage, v| {
                e.$field = v.into_int($name)?.clamp(0, 100) as u8;
                Ok(())
            },
        )
    };
}

impl PropertySource for RasterImage {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("positionX", RasterImage, |e| e.frame.position.x, |e, v| e.frame.position.x = v))
            .add("geometry", float_property!("positionY", RasterImage, |e| e.frame.position.y, |e, v| e.frame.position.y = v))
            .add("geometry", float_property!("positionZ", RasterImage, |e| e.frame.position.z, |e, v| e.frame.position.z = v))
            .add("geometry", float_property!("width", RasterImage, |e| e.frame.width, |e, v| e.frame.width = v))
            .add("geometry", float_property!("height", RasterImage, |e| e.frame.height, |e, v| e.frame.height = v))
            .add("geometry", float_property!("rotation", RasterImage, |e| e.frame.rotation, |e, v| e.frame.rotation = v))
            .add("image", percent_property!("brightness", brightness))
            .add("image", percent_property!("contrast", contrast))
            .add("image", percent_property!("fade", fade))
            .add(
                "image",
                Property::editable(
                    "clipped",
                    PropertyType::Boolean,
                    |e: &RasterImage| PropertyValue::Boolean(e.is_clipped()),
                    |e: &mut RasterImage, v| {
                        e.set_clipped(v.into_bool("clipped")?);
                        Ok(())
                    },
                ),
            );
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Database, ImageDefinition};
    use crate::entities::Entity;
    use crate::render::{Primitive, PrimitiveKind, RecordingRenderer};
    use std::f64::consts::FRAC_PI_2;

    fn assert_path(actual: &[Vector3], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (a, (x, y)) in actual.iter().zip(expected) {
            assert!(a.is_equal_to(&Vector3::new(*x, *y, 0.0), 1e-9), "{} != ({}, {})", a, x, y);
        }
    }

    #[test]
    fn test_unclipped_rectangle() {
        let image = RasterImage::with_size(Handle::NULL, Vector3::ZERO, 100.0, 50.0);
        assert_path(
            &image.boundary_path(),
            &[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0), (0.0, 0.0)],
        );
    }

    #[test]
    fn test_rotation_pivots_on_second_corner() {
        let mut image = RasterImage::with_size(Handle::NULL, Vector3::ZERO, 100.0, 50.0);
        image.frame.rotation = FRAC_PI_2;
        assert_path(
            &image.boundary_path(),
            &[(0.0, 0.0), (100.0, 0.0), (50.0, 0.0), (50.0, -100.0), (0.0, 0.0)],
        );
    }

    #[test]
    fn test_clip_boundary_lands_on_insertion_point() {
        let mut image = RasterImage::with_size(Handle::NULL, Vector3::new(10.0, 20.0, 0.0), 100.0, 50.0);
        image.set_clip_boundary(vec![
            Vector2::new(0.5, 0.5),
            Vector2::new(1.0, 0.5),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.5, 1.0),
        ]);
        assert!(image.flags.contains(ImageDisplayFlags::USE_CLIPPING_BOUNDARY));
        assert_path(
            &image.boundary_path(),
            &[(10.0, 20.0), (60.0, 20.0), (60.0, 45.0), (10.0, 45.0)],
        );
    }

    #[test]
    fn test_short_clip_boundary_is_ignored() {
        let mut image = RasterImage::with_size(Handle::NULL, Vector3::ZERO, 2.0, 1.0);
        image.set_clip_boundary(vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0)]);
        assert_eq!(image.boundary_path().len(), 5);
    }

    #[test]
    fn test_draw_with_definition() {
        let mut db = Database::new();
        let def = db.add_image_definition(ImageDefinition::new("site.png", Vector2::new(640.0, 480.0)));
        let image = RasterImage::with_size(def, Vector3::ZERO, 6.4, 4.8);
        let mut renderer = RecordingRenderer::new();
        match image.draw(&mut renderer, &db, false).unwrap().primitive {
            Primitive::Image { source, style } => {
                assert_eq!(source.file_name, "site.png");
                assert_eq!(style.boundary.len(), 5);
            }
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_missing_definition_draws_frame() {
        let db = Database::new();
        let image = RasterImage::with_size(Handle::new(0xDEAD), Vector3::ZERO, 1.0, 1.0);
        let mut renderer = RecordingRenderer::new();
        image.draw(&mut renderer, &db, false).unwrap();
        assert_eq!(renderer.calls(), &[PrimitiveKind::Lines]);
    }

    #[test]
    fn test_percent_properties_clamp() {
        let mut image = RasterImage::new();
        let props = image.properties();
        props.set(&mut image, "image", "brightness", PropertyValue::Int(250)).unwrap();
        assert_eq!(image.brightness, 100);
    }
}

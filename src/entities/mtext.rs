//! Multiline text entity

use super::curve::OsnapMode;
use super::text::resolve_text_style;
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{AttachmentPoint, MTextData, RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};

const ATTACHMENT_NAMES: &[&str] = &[
    "TopLeft",
    "TopCenter",
    "TopRight",
    "MiddleLeft",
    "MiddleCenter",
    "MiddleRight",
    "BottomLeft",
    "BottomCenter",
    "BottomRight",
];

fn attachment_name(point: AttachmentPoint) -> &'static str {
    ATTACHMENT_NAMES[point as usize - 1]
}

fn attachment_from_name(name: &str) -> Option<AttachmentPoint> {
    let index = ATTACHMENT_NAMES.iter().position(|n| *n == name)?;
    AttachmentPoint::from_value(index as i64 + 1)
}

/// MTEXT entity
#[derive(Debug, Clone)]
pub struct MText {
    pub common: EntityCommon,
    /// Raw contents including inline format codes
    pub contents: String,
    pub location: Vector3,
    height: f64,
    /// Reference rectangle width, 0 for no wrapping
    pub rectangle_width: f64,
    pub rotation: f64,
    pub attachment_point: AttachmentPoint,
    line_spacing_factor: f64,
    pub style: String,
    pub normal: Vector3,
}

impl MText {
    pub const TYPE_NAME: &'static str = "MTEXT";

    pub fn new() -> Self {
        MText {
            common: EntityCommon::new(),
            contents: String::new(),
            location: Vector3::ZERO,
            height: 1.0,
            rectangle_width: 0.0,
            rotation: 0.0,
            attachment_point: AttachmentPoint::TopLeft,
            line_spacing_factor: 1.0,
            style: "Standard".to_string(),
            normal: Vector3::UNIT_Z,
        }
    }

    pub fn with_contents(contents: impl Into<String>, location: Vector3, height: f64) -> Result<Self> {
        let mut mtext = MText {
            contents: contents.into(),
            location,
            ..Self::new()
        };
        mtext.set_height(height)?;
        Ok(mtext)
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) -> Result<()> {
        if height.is_nan() || height <= 0.0 {
            return Err(EntityError::InvalidArgument(format!("text height must be positive, got {}", height)));
        }
        self.height = height;
        Ok(())
    }

    pub fn line_spacing_factor(&self) -> f64 {
        self.line_spacing_factor
    }

    /// Clamped to the 0.25..=4.0 range the format allows
    pub fn set_line_spacing_factor(&mut self, factor: f64) {
        self.line_spacing_factor = factor.clamp(0.25, 4.0);
    }

    /// Contents split at paragraph breaks (`\P` or newline)
    pub fn lines(&self) -> Vec<&str> {
        self.contents
            .split("\\P")
            .flat_map(|paragraph| paragraph.split('\n'))
            .collect()
    }

    fn direction(&self) -> Vector3 {
        Vector3::new(self.rotation.cos(), self.rotation.sin(), 0.0)
    }

    /// Approximate size of the text block as `(width, height)`
    pub fn approximate_size(&self) -> (f64, f64) {
        let lines = self.lines();
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = if self.rectangle_width > 0.0 {
            self.rectangle_width
        } else {
            longest as f64 * self.height * 0.6
        };
        let rows = lines.len().max(1) as f64;
        let height = self.height + (rows - 1.0) * self.height * 1.667 * self.line_spacing_factor;
        (width, height)
    }
}

impl Default for MText {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(MText);

impl Extents for MText {
    /// Box of the approximate text block placed by its attachment point
    fn geometric_extents(&self) -> BoundingBox3D {
        let (width, height) = self.approximate_size();
        let index = self.attachment_point as i32 - 1;
        let dx = match index % 3 {
            0 => 0.0,
            1 => -width / 2.0,
            _ => -width,
        };
        let dy = match index / 3 {
            0 => -height,
            1 => -height / 2.0,
            _ => 0.0,
        };
        let along = self.direction();
        let up = Vector3::new(-self.rotation.sin(), self.rotation.cos(), 0.0);
        let origin = self.location + along * dx + up * dy;
        let corners = [
            origin,
            origin + along * width,
            origin + up * height,
            origin + along * width + up * height,
        ];
        BoundingBox3D::from_points(&corners).unwrap_or_default()
    }
}

impl Renderable for MText {
    fn world_draw(&self, renderer: &mut dyn Renderer, ctx: &dyn DrawingContext, delay: bool) -> Option<RenderedObject> {
        let style = resolve_text_style(ctx, &self.style);
        let data = MTextData {
            contents: self.contents.clone(),
            height: self.height,
            width: self.rectangle_width,
            position: self.location,
            rotation: self.rotation,
            direction: self.direction(),
            attachment_point: self.attachment_point,
            line_spacing_factor: self.line_spacing_factor,
            width_factor: style.width_factor,
        };
        Some(renderer.mtext(&data, &style, delay))
    }
}

impl GripPointSource for MText {
    fn grip_points(&self) -> Vec<Vector3> {
        vec![self.location]
    }
}

impl SnapPointSource for MText {
    fn osnap_points(&self, mode: OsnapMode, _pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        if mode == OsnapMode::Insertion {
            out.push(self.location);
        }
    }
}

impl Transformable for MText {
    fn apply_transform(&mut self, transform: &Transform) {
        let direction = transform.apply_rotation(self.direction());
        let scale = transform.scale_factor();
        self.location = transform.apply(self.location);
        self.rotation = direction.y.atan2(direction.x);
        self.height *= scale;
        self.rectangle_width *= scale;
        self.normal = transform.apply_rotation(self.normal).normalize();
    }
}

impl PropertySource for MText {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add(
                "text",
                Property::editable(
                    "contents",
                    PropertyType::String,
                    |e: &MText| PropertyValue::String(e.contents.clone()),
                    |e: &mut MText, v| {
                        e.contents = v.into_string("contents")?;
                        Ok(())
                    },
                ),
            )
            .add(
                "text",
                Property::editable(
                    "styleName",
                    PropertyType::String,
                    |e: &MText| PropertyValue::String(e.style.clone()),
                    |e: &mut MText, v| {
                        e.style = v.into_string("styleName")?;
                        Ok(())
                    },
                ),
            )
            .add(
                "text",
                Property::editable(
                    "textHeight",
                    PropertyType::Float,
                    |e: &MText| PropertyValue::Float(e.height()),
                    |e: &mut MText, v| e.set_height(v.into_float("textHeight")?),
                ),
            )
            .add("text", float_property!("width", MText, |e| e.rectangle_width, |e, v| e.rectangle_width = v))
            .add("text", float_property!("rotation", MText, |e| e.rotation, |e, v| e.rotation = v))
            .add(
                "text",
                float_property!(
                    "lineSpacingFactor",
                    MText,
                    |e| e.line_spacing_factor(),
                    |e, v| e.set_line_spacing_factor(v)
                ),
            )
            .add(
                "text",
                Property::editable(
                    "attachmentPoint",
                    PropertyType::Enum,
                    |e: &MText| PropertyValue::Enum(attachment_name(e.attachment_point).to_string()),
                    |e: &mut MText, v| {
                        let name = v.into_enum("attachmentPoint")?;
                        e.attachment_point = attachment_from_name(&name)
                            .ok_or_else(|| EntityError::InvalidArgument(format!("unknown attachment point '{}'", name)))?;
                        Ok(())
                    },
                )
                .with_options(ATTACHMENT_NAMES),
            )
            .add("geometry", float_property!("locationX", MText, |e| e.location.x, |e, v| e.location.x = v))
            .add("geometry", float_property!("locationY", MText, |e| e.location.y, |e, v| e.location.y = v))
            .add("geometry", float_property!("locationZ", MText, |e| e.location.z, |e, v| e.location.z = v));
        props
    }
}

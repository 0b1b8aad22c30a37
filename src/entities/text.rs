//! Single-line text entity

use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use super::curve::OsnapMode;
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{AttachmentPoint, MTextData, RenderedObject, Renderer, TextStyleTraits};
use crate::tables::TextStyle;
use crate::types::{BoundingBox3D, Transform, Vector3};
use tracing::warn;

/// Average glyph advance relative to the text height
const GLYPH_ADVANCE: f64 = 0.6;

/// Look up a text style, falling back to `STANDARD`, then `Standard`, then
/// built-in defaults
pub(crate) fn resolve_text_style(ctx: &dyn DrawingContext, name: &str) -> TextStyleTraits {
    if let Some(style) = ctx
        .text_style(name)
        .or_else(|| ctx.text_style("STANDARD"))
        .or_else(|| ctx.text_style("Standard"))
    {
        return TextStyleTraits::from(style);
    }
    warn!(text_style = name, "text style not found, using built-in Standard");
    TextStyleTraits::from(&TextStyle::standard())
}

/// Horizontal justification (DXF group 72)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextHorizontalMode {
    #[default]
    Left,
    Center,
    Right,
    Aligned,
    Middle,
    Fit,
}

impl TextHorizontalMode {
    pub const NAMES: &'static [&'static str] = &["Left", "Center", "Right", "Aligned", "Middle", "Fit"];
    const ALL: [TextHorizontalMode; 6] = [
        TextHorizontalMode::Left,
        TextHorizontalMode::Center,
        TextHorizontalMode::Right,
        TextHorizontalMode::Aligned,
        TextHorizontalMode::Middle,
        TextHorizontalMode::Fit,
    ];

    pub fn as_str(&self) -> &'static str {
        Self::NAMES[*self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES.iter().position(|n| *n == name).map(|i| Self::ALL[i])
    }
}

/// Vertical justification (DXF group 73)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVerticalMode {
    #[default]
    Baseline,
    Bottom,
    Middle,
    Top,
}

impl TextVerticalMode {
    pub const NAMES: &'static [&'static str] = &["Baseline", "Bottom", "Middle", "Top"];
    const ALL: [TextVerticalMode; 4] = [
        TextVerticalMode::Baseline,
        TextVerticalMode::Bottom,
        TextVerticalMode::Middle,
        TextVerticalMode::Top,
    ];

    pub fn as_str(&self) -> &'static str {
        Self::NAMES[*self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES.iter().position(|n| *n == name).map(|i| Self::ALL[i])
    }
}

/// TEXT entity
#[derive(Debug, Clone)]
pub struct Text {
    pub common: EntityCommon,
    pub value: String,
    pub insertion_point: Vector3,
    /// Second alignment point, used by every justification but Left
    pub alignment_point: Vector3,
    height: f64,
    /// Rotation in radians
    pub rotation: f64,
    pub width_factor: f64,
    pub oblique_angle: f64,
    pub style: String,
    pub horizontal_mode: TextHorizontalMode,
    pub vertical_mode: TextVerticalMode,
    pub normal: Vector3,
}

impl Text {
    pub const TYPE_NAME: &'static str = "TEXT";

    pub fn new() -> Self {
        Text {
            common: EntityCommon::new(),
            value: String::new(),
            insertion_point: Vector3::ZERO,
            alignment_point: Vector3::ZERO,
            height: 1.0,
            rotation: 0.0,
            width_factor: 1.0,
            oblique_angle: 0.0,
            style: "Standard".to_string(),
            horizontal_mode: TextHorizontalMode::Left,
            vertical_mode: TextVerticalMode::Baseline,
            normal: Vector3::UNIT_Z,
        }
    }

    pub fn with_value(value: impl Into<String>, insertion_point: Vector3, height: f64) -> Result<Self> {
        let mut text = Text {
            value: value.into(),
            insertion_point,
            ..Self::new()
        };
        text.set_height(height)?;
        Ok(text)
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Text height, must be positive
    pub fn set_height(&mut self, height: f64) -> Result<()> {
        if height.is_nan() || height <= 0.0 {
            return Err(EntityError::InvalidArgument(format!("text height must be positive, got {}", height)));
        }
        self.height = height;
        Ok(())
    }

    /// Attachment used for the layout request
    pub fn attachment_point(&self) -> AttachmentPoint {
        use AttachmentPoint::*;
        use TextHorizontalMode as H;
        use TextVerticalMode as V;
        match (self.horizontal_mode, self.vertical_mode) {
            (H::Middle, _) => MiddleCenter,
            (H::Left | H::Aligned | H::Fit, V::Top) => TopLeft,
            (H::Left | H::Aligned | H::Fit, V::Middle) => MiddleLeft,
            (H::Left | H::Aligned | H::Fit, _) => BottomLeft,
            (H::Center, V::Top) => TopCenter,
            (H::Center, V::Middle) => MiddleCenter,
            (H::Center, _) => BottomCenter,
            (H::Right, V::Top) => TopRight,
            (H::Right, V::Middle) => MiddleRight,
            (H::Right, _) => BottomRight,
        }
    }

    /// Point the layout is anchored at
    pub fn anchor_point(&self) -> Vector3 {
        if self.horizontal_mode == TextHorizontalMode::Left && self.vertical_mode == TextVerticalMode::Baseline {
            self.insertion_point
        } else {
            self.alignment_point
        }
    }

    fn direction(&self) -> Vector3 {
        Vector3::new(self.rotation.cos(), self.rotation.sin(), 0.0)
    }

    /// Approximate advance width of the string
    pub fn approximate_width(&self) -> f64 {
        self.value.chars().count() as f64 * self.height * self.width_factor * GLYPH_ADVANCE
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Text);

impl Extents for Text {
    /// Box of the rotated glyph cell run starting at the insertion point
    fn geometric_extents(&self) -> BoundingBox3D {
        let along = self.direction() * self.approximate_width();
        let up = Vector3::new(-self.rotation.sin(), self.rotation.cos(), 0.0) * self.height;
        let p = self.insertion_point;
        BoundingBox3D::from_points(&[p, p + along, p + up, p + along + up]).unwrap_or_default()
    }
}

impl Renderable for Text {
    fn world_draw(&self, renderer: &mut dyn Renderer, ctx: &dyn DrawingContext, delay: bool) -> Option<RenderedObject> {
        let style = resolve_text_style(ctx, &self.style);
        let data = MTextData {
            contents: self.value.clone(),
            height: self.height,
            width: 0.0,
            position: self.anchor_point(),
            rotation: self.rotation,
            direction: self.direction(),
            attachment_point: self.attachment_point(),
            line_spacing_factor: 1.0,
            width_factor: self.width_factor,
        };
        Some(renderer.mtext(&data, &style, delay))
    }
}

impl GripPointSource for Text {
    fn grip_points(&self) -> Vec<Vector3> {
        vec![self.insertion_point]
    }
}

impl SnapPointSource for Text {
    fn osnap_points(&self, mode: OsnapMode, _pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        if mode == OsnapMode::Insertion {
            out.push(self.insertion_point);
        }
    }
}

impl Transformable for Text {
    fn apply_transform(&mut self, transform: &Transform) {
        let direction = transform.apply_rotation(self.direction());
        self.insertion_point = transform.apply(self.insertion_point);
        self.alignment_point = transform.apply(self.alignment_point);
        self.rotation = direction.y.atan2(direction.x);
        self.height *= transform.scale_factor();
        self.normal = transform.apply_rotation(self.normal).normalize();
    }
}

impl PropertySource for Text {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add(
                "text",
                Property::editable(
                    "contents",
                    PropertyType::String,
                    |e: &Text| PropertyValue::String(e.value.clone()),
                    |e: &mut Text, v| {
                        e.value = v.into_string("contents")?;
                        Ok(())
                    },
                ),
            )
            .add(
                "text",
                Property::editable(
                    "styleName",
                    PropertyType::String,
                    |e: &Text| PropertyValue::String(e.style.clone()),
                    |e: &mut Text, v| {
                        e.style = v.into_string("styleName")?;
                        Ok(())
                    },
                ),
            )
            .add(
                "text",
                Property::editable(
                    "height",
                    PropertyType::Float,
                    |e: &Text| PropertyValue::Float(e.height()),
                    |e: &mut Text, v| e.set_height(v.into_float("height")?),
                ),
            )
            .add("text", float_property!("rotation", Text, |e| e.rotation, |e, v| e.rotation = v))
            .add("text", float_property!("widthFactor", Text, |e| e.width_factor, |e, v| e.width_factor = v))
            .add("text", float_property!("obliqueAngle", Text, |e| e.oblique_angle, |e, v| e.oblique_angle = v))
            .add(
                "text",
                Property::editable(
                    "horizontalMode",
                    PropertyType::Enum,
                    |e: &Text| PropertyValue::Enum(e.horizontal_mode.as_str().to_string()),
                    |e: &mut Text, v| {
                        let name = v.into_enum("horizontalMode")?;
                        e.horizontal_mode = TextHorizontalMode::from_name(&name)
                            .ok_or_else(|| EntityError::InvalidArgument(format!("unknown horizontal mode '{}'", name)))?;
                        Ok(())
                    },
                )
                .with_options(TextHorizontalMode::NAMES),
            )
            .add(
                "text",
                Property::editable(
                    "verticalMode",
                    PropertyType::Enum,
                    |e: &Text| PropertyValue::Enum(e.vertical_mode.as_str().to_string()),
                    |e: &mut Text, v| {
                        let name = v.into_enum("verticalMode")?;
                        e.vertical_mode = TextVerticalMode::from_name(&name)
                            .ok_or_else(|| EntityError::InvalidArgument(format!("unknown vertical mode '{}'", name)))?;
                        Ok(())
                    },
                )
                .with_options(TextVerticalMode::NAMES),
            )
            .add("geometry", float_property!("positionX", Text, |e| e.insertion_point.x, |e, v| e.insertion_point.x = v))
            .add("geometry", float_property!("positionY", Text, |e| e.insertion_point.y, |e, v| e.insertion_point.y = v))
            .add("geometry", float_property!("positionZ", Text, |e| e.insertion_point.z, |e, v| e.insertion_point.z = v));
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::entities::Entity;
    use crate::render::{Primitive, RecordingRenderer};
    use crate::tables::TextStyle;

    #[test]
    fn test_height_must_be_positive() {
        assert!(Text::with_value("A", Vector3::ZERO, 0.0).is_err());
        let mut text = Text::with_value("A", Vector3::ZERO, 2.5).unwrap();
        assert!(text.set_height(-1.0).is_err());
        assert_eq!(text.height(), 2.5);
    }

    #[test]
    fn test_draw_uses_named_style() {
        let mut db = Database::new();
        let mut style = TextStyle::new("Romans");
        style.font_file = "romans.shx".to_string();
        db.text_styles.add(style).unwrap();

        let mut text = Text::with_value("Hello", Vector3::new(1.0, 2.0, 0.0), 2.0).unwrap();
        text.style = "Romans".to_string();
        let mut renderer = RecordingRenderer::new();
        match text.draw(&mut renderer, &db, true).unwrap().primitive {
            Primitive::MText { data, style, delayed } => {
                assert_eq!(data.contents, "Hello");
                assert_eq!(data.position, Vector3::new(1.0, 2.0, 0.0));
                assert_eq!(data.attachment_point, AttachmentPoint::BottomLeft);
                assert_eq!(style.font, "romans.shx");
                assert!(delayed);
            }
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_missing_style_falls_back_to_standard() {
        let db = Database::new();
        let mut text = Text::with_value("X", Vector3::ZERO, 1.0).unwrap();
        text.style = "Missing".to_string();
        let style = resolve_text_style(&db, &text.style);
        assert_eq!(style.name, "Standard");
    }

    #[test]
    fn test_attachment_from_modes() {
        let mut text = Text::new();
        text.horizontal_mode = TextHorizontalMode::Right;
        text.vertical_mode = TextVerticalMode::Top;
        assert_eq!(text.attachment_point(), AttachmentPoint::TopRight);
        text.horizontal_mode = TextHorizontalMode::Middle;
        assert_eq!(text.attachment_point(), AttachmentPoint::MiddleCenter);
    }

    #[test]
    fn test_insertion_snap_only() {
        let text = Text::with_value("X", Vector3::new(3.0, 4.0, 0.0), 1.0).unwrap();
        let mut out = Vec::new();
        text.osnap_points(OsnapMode::EndPoint, Vector3::ZERO, Vector3::ZERO, &mut out);
        assert!(out.is_empty());
        text.osnap_points(OsnapMode::Insertion, Vector3::ZERO, Vector3::ZERO, &mut out);
        assert_eq!(out, vec![Vector3::new(3.0, 4.0, 0.0)]);
    }

    #[test]
    fn test_rotation_follows_transform() {
        let mut text = Text::with_value("X", Vector3::UNIT_X, 1.0).unwrap();
        text.transform_by(&Transform::from_rotation(Vector3::UNIT_Z, std::f64::consts::FRAC_PI_2));
        assert!((text.rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(text.insertion_point.is_equal_to(&Vector3::UNIT_Y, 1e-12));
    }

    #[test]
    fn test_mode_names_round_trip() {
        for name in TextHorizontalMode::NAMES {
            assert_eq!(TextHorizontalMode::from_name(name).unwrap().as_str(), *name);
        }
        for name in TextVerticalMode::NAMES {
            assert_eq!(TextVerticalMode::from_name(name).unwrap().as_str(), *name);
        }
    }
}

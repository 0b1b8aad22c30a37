//! Hatch entity

use super::polyline::{ocs_to_wcs, transform_planar};
use super::{impl_entity, EntityCommon, Extents, Renderable, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::geometry::{Area2d, Polyline2d};
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{FillType, PatternLine, RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector2, Vector3};

/// Name of the solid fill pattern
pub const SOLID_PATTERN: &str = "SOLID";

/// Where the hatch pattern definition comes from (DXF group 76)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HatchPatternType {
    UserDefined,
    #[default]
    Predefined,
    Custom,
}

impl HatchPatternType {
    pub const NAMES: &'static [&'static str] = &["UserDefined", "Predefined", "Custom"];

    pub fn as_str(&self) -> &'static str {
        match self {
            HatchPatternType::UserDefined => "UserDefined",
            HatchPatternType::Predefined => "Predefined",
            HatchPatternType::Custom => "Custom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "UserDefined" => Some(HatchPatternType::UserDefined),
            "Predefined" => Some(HatchPatternType::Predefined),
            "Custom" => Some(HatchPatternType::Custom),
            _ => None,
        }
    }
}

/// Region filled with a solid color or a line pattern
///
/// The boundary is an [`Area2d`] in the hatch's OCS: the first loop is the
/// outer boundary, later loops are holes.
#[derive(Debug, Clone)]
pub struct Hatch {
    pub common: EntityCommon,
    area: Area2d,
    pub elevation: f64,
    pub normal: Vector3,
    pattern_name: String,
    pub pattern_type: HatchPatternType,
    pub pattern_angle: f64,
    pub pattern_scale: f64,
    pub pattern_lines: Vec<PatternLine>,
}

impl Hatch {
    pub const TYPE_NAME: &'static str = "HATCH";

    /// Empty solid hatch
    pub fn new() -> Self {
        Hatch {
            common: EntityCommon::new(),
            area: Area2d::new(),
            elevation: 0.0,
            normal: Vector3::UNIT_Z,
            pattern_name: SOLID_PATTERN.to_string(),
            pattern_type: HatchPatternType::Predefined,
            pattern_angle: 0.0,
            pattern_scale: 1.0,
            pattern_lines: Vec::new(),
        }
    }

    /// Solid hatch bounded by a single loop through `points`
    pub fn solid(points: &[Vector2]) -> Self {
        let mut hatch = Hatch::new();
        hatch.add_loop(Polyline2d::from_points(points, true));
        hatch
    }

    pub fn add_loop(&mut self, boundary: Polyline2d) {
        self.area.add_loop(boundary);
    }

    /// Replace a loop; fails when `index` is out of range
    pub fn set_loop_at(&mut self, index: usize, mut boundary: Polyline2d) -> Result<()> {
        let len = self.area.loops.len();
        let slot = self
            .area
            .loops
            .get_mut(index)
            .ok_or(EntityError::InvalidIndex { index, len })?;
        boundary.closed = true;
        *slot = boundary;
        Ok(())
    }

    pub fn area(&self) -> &Area2d {
        &self.area
    }

    pub fn num_loops(&self) -> usize {
        self.area.loops.len()
    }

    pub fn pattern_name(&self) -> &str {
        &self.pattern_name
    }

    /// Set the pattern; `SOLID` clears any pattern lines
    pub fn set_pattern(&mut self, name: impl Into<String>, lines: Vec<PatternLine>) {
        self.pattern_name = name.into();
        self.pattern_lines = if self.is_solid_fill() { Vec::new() } else { lines };
    }

    pub fn is_solid_fill(&self) -> bool {
        self.pattern_name.eq_ignore_ascii_case(SOLID_PATTERN)
    }

    /// Enclosed area: the outer loop less every hole
    pub fn enclosed_area(&self) -> f64 {
        let mut loops = self.area.loops.iter().map(|l| shoelace(&l.tessellate()).abs());
        let outer = loops.next().unwrap_or(0.0);
        (outer - loops.sum::<f64>()).max(0.0)
    }
}

fn shoelace(points: &[Vector2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n).map(|i| points[i].cross(&points[(i + 1) % n])).sum::<f64>() / 2.0
}

impl Default for Hatch {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Hatch);

impl Extents for Hatch {
    fn geometric_extents(&self) -> BoundingBox3D {
        let Some(bbox) = self.area.bounding_box() else {
            return BoundingBox3D::default();
        };
        let corners: Vec<_> = [
            bbox.min,
            Vector2::new(bbox.max.x, bbox.min.y),
            bbox.max,
            Vector2::new(bbox.min.x, bbox.max.y),
        ]
        .into_iter()
        .map(|p| ocs_to_wcs(p, self.elevation, self.normal))
        .collect();
        BoundingBox3D::from_points(&corners).unwrap_or_default()
    }
}

impl Renderable for Hatch {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.area(&self.area))
    }

    fn fill_type(&self) -> FillType {
        FillType {
            solid_fill: self.is_solid_fill(),
            pattern_angle: self.pattern_angle,
            pattern_lines: self.pattern_lines.clone(),
        }
    }
}

impl Transformable for Hatch {
    fn apply_transform(&mut self, transform: &Transform) {
        let x_axis = transform.apply_rotation(Vector3::UNIT_X);
        let scale = transform.scale_factor();

        let new_normal = transform.apply_rotation(self.normal).normalize();
        if self.normal == Vector3::UNIT_Z && new_normal.is_equal_to(&Vector3::UNIT_Z, 1e-12) {
            self.area.transform(transform, self.elevation);
            self.elevation = transform.apply(Vector3::new(0.0, 0.0, self.elevation)).z;
        } else {
            for boundary in &mut self.area.loops {
                let (mut elevation, mut normal) = (self.elevation, self.normal);
                transform_planar(boundary, &mut elevation, &mut normal, transform);
            }
            transform_planar(&mut Polyline2d::default(), &mut self.elevation, &mut self.normal, transform);
        }

        self.pattern_angle += x_axis.y.atan2(x_axis.x);
        self.pattern_scale *= scale;
        for line in &mut self.pattern_lines {
            line.angle += x_axis.y.atan2(x_axis.x);
            line.offset = line.offset * scale;
            line.dash_lengths.iter_mut().for_each(|d| *d *= scale);
        }
    }
}

impl PropertySource for Hatch {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("elevation", Hatch, |e| e.elevation, |e, v| e.elevation = v))
            .add(
                "geometry",
                Property::read_only("area", PropertyType::Float, |e: &Hatch| PropertyValue::Float(e.enclosed_area())),
            )
            .add(
                "geometry",
                Property::read_only("numberOfLoops", PropertyType::Int, |e: &Hatch| {
                    PropertyValue::Int(e.num_loops() as i64)
                }),
            )
            .add(
                "pattern",
                Property::editable(
                    "patternName",
                    PropertyType::String,
                    |e: &Hatch| PropertyValue::String(e.pattern_name.clone()),
                    |e: &mut Hatch, v| {
                        let lines = std::mem::take(&mut e.pattern_lines);
                        e.set_pattern(v.into_string("patternName")?, lines);
                        Ok(())
                    },
                ),
            )
            .add(
                "pattern",
                Property::editable(
                    "patternType",
                    PropertyType::Enum,
                    |e: &Hatch| PropertyValue::Enum(e.pattern_type.as_str().to_string()),
                    |e: &mut Hatch, v| {
                        let name = v.into_enum("patternType")?;
                        e.pattern_type = HatchPatternType::from_name(&name)
                            .ok_or_else(|| EntityError::InvalidArgument(format!("unknown pattern type '{}'", name)))?;
                        Ok(())
                    },
                )
                .with_options(HatchPatternType::NAMES),
            )
            .add("pattern", float_property!("patternAngle", Hatch, |e| e.pattern_angle, |e, v| e.pattern_angle = v))
            .add("pattern", float_property!("patternScale", Hatch, |e| e.pattern_scale, |e, v| e.pattern_scale = v))
            .add(
                "pattern",
                Property::read_only("solidFill", PropertyType::Boolean, |e: &Hatch| {
                    PropertyValue::Boolean(e.is_solid_fill())
                }),
            );
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::entities::Entity;
    use crate::render::{Primitive, RecordingRenderer};
    use crate::geometry::PolylineVertex2d;

    fn square(size: f64) -> Vec<Vector2> {
        vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(size, 0.0),
            Vector2::new(size, size),
            Vector2::new(0.0, size),
        ]
    }

    #[test]
    fn test_solid_hatch_fill_type() {
        let db = Database::new();
        let hatch = Hatch::solid(&square(2.0));
        let mut renderer = RecordingRenderer::new();
        let rendered = hatch.draw(&mut renderer, &db, false).unwrap();
        assert!(rendered.traits.fill_type.solid_fill);
        assert!(matches!(rendered.primitive, Primitive::Area(_)));
    }

    #[test]
    fn test_pattern_fill_type_carries_lines() {
        let mut hatch = Hatch::solid(&square(2.0));
        let line = PatternLine {
            angle: 0.785,
            offset: Vector2::new(0.0, 0.125),
            ..PatternLine::default()
        };
        hatch.set_pattern("ANSI31", vec![line.clone()]);
        hatch.pattern_angle = 0.5;
        let fill = hatch.fill_type();
        assert!(!fill.solid_fill);
        assert_eq!(fill.pattern_angle, 0.5);
        assert_eq!(fill.pattern_lines, vec![line]);

        hatch.set_pattern("solid", vec![PatternLine::default()]);
        assert!(hatch.fill_type().pattern_lines.is_empty());
    }

    #[test]
    fn test_enclosed_area_subtracts_holes() {
        let mut hatch = Hatch::solid(&square(4.0));
        let hole: Vec<_> = square(1.0).into_iter().map(|p| p + Vector2::new(1.0, 1.0)).collect();
        hatch.add_loop(Polyline2d::from_points(&hole, true));
        assert!((hatch.enclosed_area() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_extents_at_elevation() {
        let mut hatch = Hatch::solid(&square(3.0));
        hatch.elevation = 2.0;
        let bbox = hatch.geometric_extents();
        assert_eq!(bbox.min, Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(bbox.max, Vector3::new(3.0, 3.0, 2.0));
        assert!(Hatch::new().geometric_extents().is_degenerate());
    }

    #[test]
    fn test_transform_moves_loops_and_flips_bulges() {
        let mut hatch = Hatch::new();
        hatch.add_loop(Polyline2d::new(
            vec![
                PolylineVertex2d::with_bulge(Vector2::new(0.0, 0.0), 1.0),
                PolylineVertex2d::new(Vector2::new(2.0, 0.0)),
            ],
            true,
        ));
        hatch.transform_by(&Transform::from_translation(Vector3::new(5.0, 0.0, 0.0)));
        assert_eq!(hatch.area().loops[0].vertices[1].point, Vector2::new(7.0, 0.0));

        hatch.transform_by(&Transform::from_mirror(Vector3::UNIT_Y));
        assert_eq!(hatch.area().loops[0].vertices[0].bulge, -1.0);
    }

    #[test]
    fn test_set_loop_index_error() {
        let mut hatch = Hatch::solid(&square(1.0));
        assert!(hatch.set_loop_at(1, Polyline2d::default()).is_err());
        assert!(hatch.set_loop_at(0, Polyline2d::from_points(&square(2.0), false)).is_ok());
        assert!(hatch.area().loops[0].closed);
    }
}

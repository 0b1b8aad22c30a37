//! Property reflection across the registry

mod common;

use acad_entities::entities::*;
use acad_entities::{Color, EntityError, PropertySource, PropertyType, PropertyValue, Vector3};
use common::{sample_entities, ALL_TYPE_NAMES};
use proptest::prelude::*;

#[test]
fn test_every_type_starts_with_general_group() {
    for name in ALL_TYPE_NAMES {
        let entity = EntityType::create(name).unwrap();
        let names = entity.property_names();
        let general: Vec<_> = names.iter().filter(|(g, _)| *g == "general").map(|(_, p)| *p).collect();
        assert_eq!(
            general,
            vec!["handle", "color", "layer", "linetype", "linetypeScale", "lineWeight", "transparency"],
            "{}",
            name
        );
        assert_eq!(names[0], ("general", "handle"), "{}", name);
    }
}

#[test]
fn test_writing_back_read_values_is_accepted() {
    for mut entity in sample_entities(acad_entities::Handle::NULL) {
        let type_name = entity.type_name();
        for (group, name) in entity.property_names() {
            let value = entity.property(group, name).unwrap();
            match entity.set_property(group, name, value.clone()) {
                Ok(()) => assert_eq!(entity.property(group, name).unwrap(), value, "{}.{}", type_name, name),
                Err(EntityError::ReadOnlyProperty(prop)) => assert_eq!(prop, name),
                Err(err) => panic!("{}.{}.{}: {}", type_name, group, name, err),
            }
        }
    }
}

#[test]
fn test_unknown_property_is_reported() {
    let entity = EntityType::create("CIRCLE").unwrap();
    let err = entity.property("geometry", "noSuchThing").unwrap_err();
    assert_eq!(
        err,
        EntityError::PropertyNotFound {
            group: "geometry".into(),
            name: "noSuchThing".into()
        }
    );
}

#[test]
fn test_setter_validation_surfaces_as_error() {
    let mut circle = EntityType::create("CIRCLE").unwrap();
    assert!(circle.set_property("geometry", "radius", PropertyValue::Float(-2.0)).is_err());

    let mut text = EntityType::create("TEXT").unwrap();
    assert!(text.set_property("text", "height", PropertyValue::Float(0.0)).is_err());
}

#[test]
fn test_general_color_edit() {
    let mut line = EntityType::create("LINE").unwrap();
    line.set_property("general", "color", PropertyValue::Color(Color::CYAN)).unwrap();
    assert_eq!(line.as_entity().color(), Color::CYAN);
}

#[test]
fn test_enum_properties_list_their_options() {
    let polyline = Polyline2d::default();
    let props = polyline.properties();
    let curve_type = props.find("geometry", "curveType").unwrap();
    assert_eq!(curve_type.kind, PropertyType::Enum);
    assert!(!curve_type.options.is_empty());
}

proptest! {
    #[test]
    fn prop_line_endpoint_edits_round_trip(
        x in -1.0e6f64..1.0e6,
        y in -1.0e6f64..1.0e6,
        z in -1.0e3f64..1.0e3,
    ) {
        let mut line = EntityType::create("LINE").unwrap();
        line.set_property("geometry", "endX", PropertyValue::Float(x)).unwrap();
        line.set_property("geometry", "endY", PropertyValue::Float(y)).unwrap();
        line.set_property("geometry", "endZ", PropertyValue::Float(z)).unwrap();
        match &line {
            EntityType::Line(l) => prop_assert_eq!(l.end, Vector3::new(x, y, z)),
            _ => unreachable!(),
        }
        let length = line.property("geometry", "length").unwrap().into_float("length").unwrap();
        prop_assert!((length - Vector3::new(x, y, z).length()).abs() < 1e-6);
    }

    #[test]
    fn prop_circle_radius_accepts_positive(radius in 1.0e-6f64..1.0e6) {
        let mut circle = EntityType::create("CIRCLE").unwrap();
        circle.set_property("geometry", "radius", PropertyValue::Float(radius)).unwrap();
        prop_assert_eq!(
            circle.property("geometry", "radius").unwrap(),
            PropertyValue::Float(radius)
        );
    }

    #[test]
    fn prop_face_edge_flags_follow_properties(mask in 0u8..16) {
        let mut face = EntityType::create("3DFACE").unwrap();
        let names = ["edge1Visible", "edge2Visible", "edge3Visible", "edge4Visible"];
        for (i, name) in names.iter().enumerate() {
            let visible = mask & (1 << i) == 0;
            face.set_property("geometry", name, PropertyValue::Boolean(visible)).unwrap();
        }
        match &face {
            EntityType::Face(f) => prop_assert_eq!(f.invisible_edges.bits(), mask),
            _ => unreachable!(),
        }
    }
}

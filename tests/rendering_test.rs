//! Drawing behavior of individual entity types through the database

mod common;

use acad_entities::entities::*;
use acad_entities::render::{Primitive, PrimitiveKind};
use acad_entities::{Database, PropertyValue, RecordingRenderer, Transform, Vector2, Vector3};
use common::populated_database;
use std::f64::consts::FRAC_PI_2;

fn draw(entity: &EntityType, db: &Database) -> Primitive {
    let mut renderer = RecordingRenderer::new();
    entity.draw(&mut renderer, db, false).unwrap().primitive
}

fn find(db: &Database, type_name: &str) -> acad_entities::Handle {
    db.entities()
        .find(|e| e.type_name() == type_name)
        .map(|e| e.as_entity().handle())
        .unwrap()
}

#[test]
fn test_rotated_image_boundary() {
    let (mut db, _) = populated_database();
    let handle = find(&db, "IMAGE");
    let image = db.entity_mut(handle).unwrap();
    image.set_property("geometry", "positionX", PropertyValue::Float(0.0)).unwrap();
    image.set_property("geometry", "width", PropertyValue::Float(100.0)).unwrap();
    image.set_property("geometry", "height", PropertyValue::Float(50.0)).unwrap();
    image.set_property("geometry", "rotation", PropertyValue::Float(FRAC_PI_2)).unwrap();

    let expected = [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(100.0, 0.0, 0.0),
        Vector3::new(50.0, 0.0, 0.0),
        Vector3::new(50.0, -100.0, 0.0),
        Vector3::new(0.0, 0.0, 0.0),
    ];
    match draw(db.entity(handle).unwrap(), &db) {
        Primitive::Image { source, style } => {
            assert_eq!(source.file_name, "plan.png");
            assert_eq!(source.size, Vector2::new(1200.0, 900.0));
            assert_eq!(style.boundary.len(), expected.len());
            for (actual, expected) in style.boundary.iter().zip(&expected) {
                assert!(actual.is_equal_to(expected, 1e-9), "{} != {}", actual, expected);
            }
        }
        other => panic!("unexpected primitive {:?}", other),
    }
}

#[test]
fn test_image_without_definition_draws_outline() {
    let db = Database::new();
    let image: EntityType =
        RasterImage::with_size(acad_entities::Handle::new(0x4242), Vector3::ZERO, 4.0, 3.0).into();
    match draw(&image, &db) {
        Primitive::Lines(points) => assert_eq!(points.len(), 5),
        other => panic!("unexpected primitive {:?}", other),
    }
}

#[test]
fn test_face_edge_mask_through_properties() {
    let (mut db, _) = populated_database();
    let handle = find(&db, "3DFACE");

    // second edge starts hidden in the sample
    match draw(db.entity(handle).unwrap(), &db) {
        Primitive::LineSegments { indices, .. } => assert_eq!(indices, vec![0, 1, 2, 3, 3, 0]),
        other => panic!("unexpected primitive {:?}", other),
    }

    let face = db.entity_mut(handle).unwrap();
    face.set_property("geometry", "edge2Visible", PropertyValue::Boolean(true)).unwrap();
    face.set_property("geometry", "edge4Visible", PropertyValue::Boolean(false)).unwrap();
    match draw(db.entity(handle).unwrap(), &db) {
        Primitive::LineSegments { buffer, stride, indices } => {
            assert_eq!(stride, 3);
            assert_eq!(buffer.len(), 12);
            assert_eq!(indices, vec![0, 1, 1, 2, 2, 3]);
        }
        other => panic!("unexpected primitive {:?}", other),
    }
}

#[test]
fn test_face_edge_index_out_of_range() {
    let mut face = Face::new();
    assert!(face.make_edge_invisible_at(4).is_err());
    assert!(face.is_edge_visible_at(7).is_err());
    assert!(face.is_edge_visible_at(3).unwrap());
}

#[test]
fn test_infinite_lines_draw_long_but_measure_short() {
    let db = Database::new();
    let ray: EntityType = Ray::from_point_direction(Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0)).into();
    let xline: EntityType = Xline::from_point_direction(Vector3::ZERO, Vector3::UNIT_X).into();

    match draw(&ray, &db) {
        Primitive::Lines(points) => assert_eq!(points[1], Vector3::new(1e6, 0.0, 0.0)),
        other => panic!("unexpected primitive {:?}", other),
    }
    let bbox = ray.geometric_extents();
    assert_eq!(bbox.min, Vector3::ZERO);
    assert_eq!(bbox.max, Vector3::new(10.0, 0.0, 0.0));

    match draw(&xline, &db) {
        Primitive::Lines(points) => {
            assert_eq!(points[0], Vector3::new(-1e6, 0.0, 0.0));
            assert_eq!(points[1], Vector3::new(1e6, 0.0, 0.0));
        }
        other => panic!("unexpected primitive {:?}", other),
    }
    let bbox = xline.geometric_extents();
    assert_eq!(bbox.min, Vector3::new(-10.0, 0.0, 0.0));
    assert_eq!(bbox.max, Vector3::new(10.0, 0.0, 0.0));
}

#[test]
fn test_text_falls_back_to_builtin_style() {
    let mut db = Database::new();
    db.text_styles.remove("Standard");
    let text: EntityType = Text::with_value("A", Vector3::ZERO, 1.0).unwrap().into();
    match draw(&text, &db) {
        Primitive::MText { style, data, .. } => {
            assert_eq!(style.name, "Standard");
            assert_eq!(style.font, "txt");
            assert_eq!(data.contents, "A");
        }
        other => panic!("unexpected primitive {:?}", other),
    }
}

#[test]
fn test_delay_flag_reaches_text_renderer() {
    let db = Database::new();
    let mtext: EntityType = MText::with_contents("Note", Vector3::ZERO, 2.0).unwrap().into();
    let mut renderer = RecordingRenderer::new();
    match mtext.draw(&mut renderer, &db, true).unwrap().primitive {
        Primitive::MText { delayed, .. } => assert!(delayed),
        other => panic!("unexpected primitive {:?}", other),
    }
}

#[test]
fn test_leader_path_cached_across_draws() {
    let (mut db, _) = populated_database();
    let handle = find(&db, "LEADER");

    let rebuilds_before = match db.entity(handle).unwrap() {
        EntityType::Leader(leader) => {
            leader.geometric_extents();
            let mut renderer = RecordingRenderer::new();
            leader.draw(&mut renderer, &db, false);
            leader.draw(&mut renderer, &db, false);
            assert!(leader.is_path_current());
            leader.rebuild_count()
        }
        other => panic!("unexpected entity {}", other.type_name()),
    };

    match db.entity_mut(handle).unwrap() {
        EntityType::Leader(leader) => {
            leader.set_splined(true);
            assert!(!leader.is_path_current());
            leader.geometric_extents();
            leader.geometric_extents();
            assert_eq!(leader.rebuild_count(), rebuilds_before + 1);
        }
        other => panic!("unexpected entity {}", other.type_name()),
    }
}

#[test]
fn test_hatch_fill_reaches_renderer() {
    let (db, _) = populated_database();
    let handle = find(&db, "HATCH");
    let mut renderer = RecordingRenderer::new();
    let rendered = db.entity(handle).unwrap().draw(&mut renderer, &db, false).unwrap();
    assert!(rendered.traits.fill_type.solid_fill);
    assert!(renderer.traits().fill_type.solid_fill);

    let line = db.entities().find(|e| e.type_name() == "LINE").unwrap();
    line.draw(&mut renderer, &db, false);
    assert!(!renderer.traits().fill_type.solid_fill);
    assert_eq!(renderer.calls(), &[PrimitiveKind::Area, PrimitiveKind::Lines]);
}

#[test]
fn test_mirrored_polyline_keeps_arc_extents() {
    let mut polyline = Polyline::new();
    polyline.add_vertex(acad_entities::geometry::PolylineVertex2d::with_bulge(Vector2::new(0.0, 0.0), 1.0));
    polyline.add_point(Vector2::new(2.0, 0.0));
    let before = polyline.geometric_extents();

    polyline.transform_by(&Transform::from_mirror(Vector3::UNIT_Y));
    let after = polyline.geometric_extents();
    assert!((after.min.y + before.max.y).abs() < 1e-6);
    assert!((after.max.y + before.min.y).abs() < 1e-6);
}

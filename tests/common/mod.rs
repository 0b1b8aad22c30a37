//! Shared test utilities for acad-entities integration tests.
//!
//! Builders for a drawing with a few styled layers and one instance of
//! every registered entity type, laid out on a grid.

#![allow(dead_code)]

use acad_entities::entities::*;
use acad_entities::geometry::PolylineVertex2d;
use acad_entities::tables::{Layer, LineType, LineTypeElement};
use acad_entities::{Color, Database, Handle, ImageDefinition, Vector2, Vector3};

/// Registry names in the order [`sample_entities`] returns them
pub const ALL_TYPE_NAMES: [&str; 20] = [
    "POINT",
    "LINE",
    "CIRCLE",
    "ARC",
    "ELLIPSE",
    "SPLINE",
    "LWPOLYLINE",
    "POLYLINE2D",
    "POLYLINE3D",
    "TRACE",
    "3DFACE",
    "TEXT",
    "MTEXT",
    "HATCH",
    "RAY",
    "XLINE",
    "LEADER",
    "IMAGE",
    "WIPEOUT",
    "VIEWPORT",
];

/// Database with extra layers:
///
/// - `Walls`: red, `Dashed`
/// - `Hidden`: default color, linetype name missing from the table
pub fn styled_database() -> Database {
    let mut db = Database::new();

    let mut dashed = LineType::new("Dashed");
    dashed.description = "__ __ __".to_string();
    dashed.elements = vec![LineTypeElement::dash(0.5), LineTypeElement::space(0.25)];
    db.line_types.upsert(dashed);

    let mut walls = Layer::with_color("Walls", Color::RED);
    walls.line_type = "Dashed".to_string();
    db.layers.upsert(walls);

    let mut hidden = Layer::new("Hidden");
    hidden.line_type = "HIDDEN2".to_string();
    db.layers.upsert(hidden);

    db
}

/// One instance of every entity type, spaced 25 units apart along X
pub fn sample_entities(image_definition: Handle) -> Vec<EntityType> {
    let sp = 25.0;
    let at = |i: usize| Vector3::new(i as f64 * sp, 0.0, 0.0);
    let at2 = |i: usize, dx: f64, dy: f64| Vector2::new(i as f64 * sp + dx, dy);

    let mut polyline = Polyline::new();
    polyline.add_point(at2(6, 0.0, 0.0));
    polyline.add_vertex(PolylineVertex2d::with_bulge(at2(6, 5.0, 0.0), 0.5));
    polyline.add_point(at2(6, 10.0, 5.0));

    let mut polyline2d = Polyline2d::from_points(
        &[at2(7, 0.0, 0.0), at2(7, 5.0, 5.0), at2(7, 10.0, 0.0), at2(7, 15.0, 5.0)],
        false,
    );
    polyline2d.curve_type = PolylineCurveType::CubicBSpline;

    let origin = at(10);
    let mut face = Face::from_corners([
        origin,
        origin + Vector3::new(5.0, 0.0, 0.0),
        origin + Vector3::new(5.0, 5.0, 0.0),
        origin + Vector3::new(0.0, 5.0, 0.0),
    ]);
    face.invisible_edges = InvisibleEdgeFlags::SECOND;

    let mut leader = Leader::from_vertices(vec![at(16), at(16) + Vector3::new(5.0, 5.0, 0.0)]);
    leader.append_vertex(at(16) + Vector3::new(10.0, 5.0, 0.0));

    let mut viewport = Viewport::with_frame(2, at(19), 10.0, 8.0);
    viewport.common.owner_id = Handle::new(0xFFFF);

    vec![
        Point::from_position(at(0)).into(),
        Line::from_points(at(1), at(1) + Vector3::new(10.0, 10.0, 0.0)).into(),
        Circle::from_center_radius(at(2), 5.0).into(),
        Arc::from_center_radius_angles(at(3), 5.0, 0.0, std::f64::consts::PI).into(),
        Ellipse::from_center_axes(at(4), Vector3::new(8.0, 0.0, 0.0), 0.5)
            .unwrap()
            .into(),
        Spline::from_fit_points(
            vec![at(5), at(5) + Vector3::new(3.0, 5.0, 0.0), at(5) + Vector3::new(10.0, 0.0, 0.0)],
            false,
        )
        .unwrap()
        .into(),
        polyline.into(),
        polyline2d.into(),
        Polyline3d::from_points(vec![at(8), at(8) + Vector3::new(5.0, 5.0, 5.0)], false).into(),
        Trace::from_corners([
            at(9),
            at(9) + Vector3::new(10.0, 0.0, 0.0),
            at(9) + Vector3::new(0.0, 2.0, 0.0),
            at(9) + Vector3::new(10.0, 2.0, 0.0),
        ])
        .into(),
        face.into(),
        Text::with_value("Sample", at(11), 2.5).unwrap().into(),
        MText::with_contents("First\\PSecond", at(12), 2.5).unwrap().into(),
        Hatch::solid(&[at2(13, 0.0, 0.0), at2(13, 10.0, 0.0), at2(13, 10.0, 10.0), at2(13, 0.0, 10.0)])
            .into(),
        Ray::from_point_direction(at(14), Vector3::UNIT_X).into(),
        Xline::from_point_direction(at(15), Vector3::UNIT_Y).into(),
        leader.into(),
        RasterImage::with_size(image_definition, at(17), 12.0, 9.0).into(),
        Wipeout::from_rectangle(at(18), 10.0, 5.0).into(),
        viewport.into(),
    ]
}

/// [`styled_database`] holding every sample entity
pub fn populated_database() -> (Database, Vec<Handle>) {
    let mut db = styled_database();
    let image = db.add_image_definition(ImageDefinition::new("plan.png", Vector2::new(1200.0, 900.0)));
    let handles = sample_entities(image)
        .into_iter()
        .map(|entity| db.append_entity(entity))
        .collect();
    (db, handles)
}

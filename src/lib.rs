//! # acad-entities
//!
//! Drawing-entity data model for CAD engines.
//!
//! Every entity (lines, arcs, polylines, text, hatches, images and so on)
//! answers the same questions: what are my extents, how do I hand myself
//! to a renderer, where are my grips and snap points, how do I transform,
//! and which properties can an inspector read and write. Style values
//! stored as `ByLayer` or `ByBlock` are resolved against the drawing's
//! tables at draw time.
//!
//! ## Quick Start
//!
//! ```rust
//! use acad_entities::{Database, Entity, EntityType, Line, RecordingRenderer, Vector3};
//!
//! let mut db = Database::new();
//! let handle = db.append_entity(EntityType::from(Line::from_points(
//!     Vector3::ZERO,
//!     Vector3::new(10.0, 0.0, 0.0),
//! )));
//!
//! let entity = db.entity(handle).unwrap();
//! let mut renderer = RecordingRenderer::new();
//! let rendered = entity.draw(&mut renderer, &db, false).unwrap();
//! assert_eq!(rendered.object_id, handle);
//! assert_eq!(entity.as_entity().rgb_color(&db), 0xFFFFFF);
//! ```
//!
//! ## Architecture
//!
//! - [`Entity`] - identity, stored style and the draw/extents contract
//! - [`Extents`], [`Renderable`] - implemented by every entity
//! - [`GripPointSource`], [`SnapPointSource`], [`Transformable`] -
//!   optional capabilities, dispatched by [`EntityType`]
//! - [`DrawingContext`] - read-only view of the drawing's tables
//! - [`Renderer`] - primitive sink owned by the host

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod database;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod properties;
pub mod render;
pub mod style;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use database::{Database, DrawingContext, DrawingDefaults, ImageDefinition};
pub use error::{EntityError, Result};
pub use geometry::TESSELLATION_SAMPLES;
pub use properties::{EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
pub use render::{RecordingRenderer, RenderedObject, Renderer};
pub use style::{BlockStyleContext, LineStyle, LineStyleKind};
pub use types::{
    BoundingBox2D, BoundingBox3D, Color, Handle, LineTypeRef, LineWeight, Transform, Transparency,
    Vector2, Vector3,
};

// Re-export entity types
pub use entities::{
    Arc, Circle, Curve, Ellipse, Entity, EntityCommon, EntityType, Extents, Face, GripPointSource,
    Hatch, Leader, Line, MText, OsnapMode, Point, Polyline, Polyline2d, Polyline3d, RasterImage,
    Ray, Renderable, SnapPointSource, Spline, Text, Trace, Transformable, Viewport, Wipeout, Xline,
    INFINITE_DRAW_LENGTH, INFINITE_EXTENTS_LENGTH,
};

//! Drawing database
//!
//! Owns the symbol tables, the image definition dictionary, the
//! drawing-wide defaults and the model space entity store. Entities see it
//! only through the read-only [`DrawingContext`] trait, plus the
//! modification event bus.

use crate::entities::{Entity, EntityType};
use crate::tables::{BlockRecord, Layer, LineType, Table, TableEntry, TextStyle};
use crate::types::{Color, Handle, HandleSeed, Vector2};
use indexmap::IndexMap;
use std::fmt;
use tracing::trace;

/// Drawing-wide header variables consumed by entities
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingDefaults {
    /// CECOLOR - Color for new entities
    pub current_color: Color,
    /// CELTSCALE - Linetype scale for new entities
    pub current_linetype_scale: f64,
    /// LTSCALE - Global linetype scale
    pub global_linetype_scale: f64,
    /// PDMODE - Point display mode
    pub point_display_mode: i32,
    /// PDSIZE - Point display size
    pub point_display_size: f64,
    /// TEXTSTYLE - Current text style name
    pub current_text_style: String,
}

impl Default for DrawingDefaults {
    fn default() -> Self {
        DrawingDefaults {
            current_color: Color::ByLayer,
            current_linetype_scale: 1.0,
            global_linetype_scale: 1.0,
            point_display_mode: 0,
            point_display_size: 0.0,
            current_text_style: "Standard".to_string(),
        }
    }
}

/// IMAGEDEF object: the external file behind raster images
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDefinition {
    pub handle: Handle,
    pub source_file_name: String,
    /// Image size in pixels
    pub size: Vector2,
    /// Default size of one pixel in drawing units
    pub pixel_size: Vector2,
}

impl ImageDefinition {
    pub fn new(source_file_name: impl Into<String>, size: Vector2) -> Self {
        ImageDefinition {
            handle: Handle::NULL,
            source_file_name: source_file_name.into(),
            size,
            pixel_size: Vector2::new(1.0, 1.0),
        }
    }
}

/// Read-only lookups entities make while resolving style and drawing
pub trait DrawingContext {
    fn layer(&self, name: &str) -> Option<&Layer>;

    fn line_type(&self, name: &str) -> Option<&LineType>;

    fn text_style(&self, name: &str) -> Option<&TextStyle>;

    fn image_definition(&self, handle: Handle) -> Option<&ImageDefinition>;

    /// Handle of the `*Model_Space` block record
    fn model_space_id(&self) -> Handle;

    fn defaults(&self) -> &DrawingDefaults;
}

/// Payload of [`EntityModifiedEvent`]
pub struct EntityModifiedArgs<'a> {
    pub database: &'a Database,
    pub entity: &'a dyn Entity,
}

type EntityModifiedListener = Box<dyn Fn(&EntityModifiedArgs<'_>)>;

/// Fire-and-forget notification that an entity changed
#[derive(Default)]
pub struct EntityModifiedEvent {
    listeners: Vec<EntityModifiedListener>,
}

impl EntityModifiedEvent {
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&EntityModifiedArgs<'_>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Call every listener in registration order
    pub fn dispatch(&self, args: &EntityModifiedArgs<'_>) {
        for listener in &self.listeners {
            listener(args);
        }
    }
}

impl fmt::Debug for EntityModifiedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityModifiedEvent")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct DatabaseEvents {
    pub entity_modified: EntityModifiedEvent,
}

/// A drawing database
#[derive(Debug)]
pub struct Database {
    /// Layer table
    pub layers: Table<Layer>,
    /// Line type table
    pub line_types: Table<LineType>,
    /// Text style table
    pub text_styles: Table<TextStyle>,
    /// Block record table
    pub block_records: Table<BlockRecord>,
    /// IMAGEDEF dictionary
    pub image_definitions: IndexMap<Handle, ImageDefinition>,
    pub defaults: DrawingDefaults,
    pub events: DatabaseEvents,
    /// Model space entities by handle, in insertion order
    entities: IndexMap<Handle, EntityType>,
    handles: HandleSeed,
}

impl Database {
    /// Database holding the standard entries: layer "0", the
    /// "Continuous" linetype, the "Standard" text style and the model and
    /// paper space block records
    pub fn new() -> Self {
        let mut db = Database {
            layers: Table::new(),
            line_types: Table::new(),
            text_styles: Table::new(),
            block_records: Table::new(),
            image_definitions: IndexMap::new(),
            defaults: DrawingDefaults::default(),
            events: DatabaseEvents::default(),
            entities: IndexMap::new(),
            // low handles are reserved for table controls
            handles: HandleSeed::starting_at(0x10),
        };

        let mut layer0 = Layer::layer_0();
        layer0.set_handle(db.allocate_handle());
        db.layers.upsert(layer0);

        let mut continuous = LineType::continuous();
        continuous.set_handle(db.allocate_handle());
        db.line_types.upsert(continuous);

        let mut standard = TextStyle::standard();
        standard.set_handle(db.allocate_handle());
        db.text_styles.upsert(standard);

        let mut model_space = BlockRecord::model_space();
        model_space.set_handle(db.allocate_handle());
        db.block_records.upsert(model_space);

        let mut paper_space = BlockRecord::paper_space();
        paper_space.set_handle(db.allocate_handle());
        db.block_records.upsert(paper_space);

        db
    }

    pub fn allocate_handle(&mut self) -> Handle {
        self.handles.next_handle()
    }

    /// Handle of the `*Paper_Space` block record
    pub fn paper_space_id(&self) -> Handle {
        self.block_records
            .iter()
            .find(|b| b.is_paper_space())
            .map(|b| b.handle)
            .unwrap_or(Handle::NULL)
    }

    /// Register an image definition and return its handle
    pub fn add_image_definition(&mut self, mut definition: ImageDefinition) -> Handle {
        if definition.handle.is_null() {
            definition.handle = self.allocate_handle();
        }
        let handle = definition.handle;
        self.image_definitions.insert(handle, definition);
        handle
    }

    /// Add an entity to model space
    ///
    /// Assigns a handle when the entity has none, makes model space its
    /// owner when it has no owner, and replaces an unset linetype scale
    /// with CELTSCALE.
    pub fn append_entity(&mut self, mut entity: EntityType) -> Handle {
        let model_space = self.model_space_id();
        let common = entity.as_entity_mut().common_mut();
        if common.handle.is_null() {
            common.handle = self.handles.next_handle();
        }
        if common.owner_id.is_null() {
            common.owner_id = model_space;
        }
        if common.linetype_scale < 0.0 {
            common.linetype_scale = self.defaults.current_linetype_scale;
        }
        let handle = common.handle;
        trace!(handle = %handle, entity_type = entity.type_name(), "entity appended");
        self.entities.insert(handle, entity);
        handle
    }

    pub fn entity(&self, handle: Handle) -> Option<&EntityType> {
        self.entities.get(&handle)
    }

    pub fn entity_mut(&mut self, handle: Handle) -> Option<&mut EntityType> {
        self.entities.get_mut(&handle)
    }

    pub fn remove_entity(&mut self, handle: Handle) -> Option<EntityType> {
        self.entities.shift_remove(&handle)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.values()
    }

    /// Publish a modification of `entity` on the event bus
    pub fn notify_entity_modified(&self, entity: &dyn Entity) {
        self.events.entity_modified.dispatch(&EntityModifiedArgs {
            database: self,
            entity,
        });
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingContext for Database {
    fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    fn line_type(&self, name: &str) -> Option<&LineType> {
        self.line_types.get(name)
    }

    fn text_style(&self, name: &str) -> Option<&TextStyle> {
        self.text_styles.get(name)
    }

    fn image_definition(&self, handle: Handle) -> Option<&ImageDefinition> {
        self.image_definitions.get(&handle)
    }

    fn model_space_id(&self) -> Handle {
        self.block_records
            .iter()
            .find(|b| b.is_model_space())
            .map(|b| b.handle)
            .unwrap_or(Handle::NULL)
    }

    fn defaults(&self) -> &DrawingDefaults {
        &self.defaults
    }
}

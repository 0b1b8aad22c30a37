//! Symbol tables consulted during style resolution
//!
//! Entities only ever read these tables; the [`Database`](crate::Database)
//! owns them and keeps them consistent.

use crate::error::{EntityError, Result};
use crate::types::Handle;
use indexmap::IndexMap;

pub mod block_record;
pub mod layer;
pub mod linetype;
pub mod textstyle;

pub use block_record::BlockRecord;
pub use layer::{Layer, LayerFlags};
pub use linetype::{LineType, LineTypeElement};
pub use textstyle::{TextGenerationFlags, TextStyle};

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's unique handle
    fn handle(&self) -> Handle;

    /// Set the entry's handle
    fn set_handle(&mut self, handle: Handle);

    /// Get the entry's name
    fn name(&self) -> &str;

    /// Check if this is a standard/default entry
    fn is_standard(&self) -> bool {
        false
    }
}

/// Named entries with case-insensitive lookup, in insertion order
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add an entry; names are unique regardless of case
    pub fn add(&mut self, entry: T) -> Result<()> {
        let key = entry.name().to_uppercase();
        if self.entries.contains_key(&key) {
            return Err(EntityError::DuplicateTableEntry(entry.name().to_string()));
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Insert or replace the entry with the same name
    pub fn upsert(&mut self, entry: T) {
        self.entries.insert(entry.name().to_uppercase(), entry);
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&name.to_uppercase())
    }

    /// Find an entry by handle
    pub fn get_by_handle(&self, handle: Handle) -> Option<&T> {
        self.entries.values().find(|e| e.handle() == handle)
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(&name.to_uppercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_add_and_get() {
        let mut table = Table::new();
        table.add(Layer::new("Walls")).unwrap();

        assert!(table.contains("Walls"));
        assert!(table.contains("WALLS")); // case-insensitive
        assert_eq!(table.get("walls").map(|l| l.name.as_str()), Some("Walls"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_duplicate_entry() {
        let mut table = Table::new();
        table.add(Layer::new("Walls")).unwrap();

        let err = table.add(Layer::new("walls")).unwrap_err();
        assert_eq!(err, EntityError::DuplicateTableEntry("walls".into()));
    }

    #[test]
    fn test_table_upsert_replaces() {
        let mut table = Table::new();
        table.add(Layer::new("A")).unwrap();
        table.upsert(Layer::with_color("a", crate::types::Color::RED));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("A").map(|l| l.color), Some(crate::types::Color::RED));
    }

    #[test]
    fn test_table_lookup_by_handle() {
        let mut table = Table::new();
        let mut layer = Layer::new("Hidden");
        layer.handle = Handle::new(0x10);
        table.add(layer).unwrap();

        assert!(table.get_by_handle(Handle::new(0x10)).is_some());
        assert!(table.get_by_handle(Handle::new(0x11)).is_none());
    }

    #[test]
    fn test_table_remove_keeps_order() {
        let mut table = Table::new();
        for name in ["0", "A", "B"] {
            table.add(Layer::new(name)).unwrap();
        }
        assert!(table.remove("a").is_some());
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["0", "B"]);
    }
}

//! Object identity
//!
//! Every database-resident object (entities, table records, image
//! definitions) is identified by a 64-bit handle. Handle 0 means
//! "not attached to a database yet".

use std::fmt;

/// Opaque object identity owned by the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(u64);

impl Handle {
    /// The unassigned handle
    pub const NULL: Handle = Handle(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Upper-case hex form used by inspectors, e.g. `"1F"`
    pub fn to_hex(&self) -> String {
        format!("{:X}", self.0)
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}

/// Monotonic handle allocator
#[derive(Debug, Clone)]
pub struct HandleSeed {
    next: u64,
}

impl HandleSeed {
    /// Start allocating at `first` (0 is bumped to 1)
    pub fn starting_at(first: u64) -> Self {
        HandleSeed { next: first.max(1) }
    }

    /// Hand out the next unused handle
    pub fn next_handle(&mut self) -> Handle {
        let handle = Handle(self.next);
        self.next += 1;
        handle
    }
}

impl Default for HandleSeed {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

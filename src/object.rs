use std::fmt::{Display, Formatter};

/// The raw id of an object within a client connection. Ids below
/// [`MIN_SERVER_ID`] are allocated by the client, the rest by the server.
#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct ObjectId(u32);

pub const MIN_SERVER_ID: u32 = 0xff00_0000;

impl ObjectId {
    pub const NONE: Self = ObjectId(0);

    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

pub trait Object: 'static {
    fn id(&self) -> ObjectId;
    fn interface(&self) -> Interface;

    /// Severs all references between this object and the rest of the object
    /// graph. Called exactly once when the owning client is removed.
    fn break_loops(&self) {}
}

#[derive(Copy, Clone, Debug)]
pub struct Interface(pub &'static str);

impl Interface {
    pub fn name(self) -> &'static str {
        self.0
    }
}

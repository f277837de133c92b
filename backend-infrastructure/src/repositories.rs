pub mod sqlite_contributions;
pub mod sqlite_events;
pub mod sqlite_participants;
pub mod sqlite_resources;
pub mod sqlite_store;

pub use sqlite_store::*;

// Domain entities
pub mod config;
pub mod contribution;
pub mod event;
pub mod participant;
pub mod resource;

pub use config::*;
pub use contribution::*;
pub use event::*;
pub use participant::*;
pub use resource::*;

pub mod contribution_handlers;
pub mod event_handlers;
pub mod ops_handlers;
pub mod participant_handlers;
pub mod resource_handlers;

pub use contribution_handlers::*;
pub use event_handlers::*;
pub use ops_handlers::*;
pub use participant_handlers::*;
pub use resource_handlers::*;

pub mod contribution_queries;
pub mod event_queries;
pub mod participant_queries;
pub mod resource_queries;

pub use contribution_queries::*;
pub use event_queries::*;
pub use participant_queries::*;
pub use resource_queries::*;

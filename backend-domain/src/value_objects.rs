// Domain value objects
pub mod event_type;
pub mod participant_status;
pub mod resource_category;

pub use event_type::*;
pub use participant_status::*;
pub use resource_category::*;

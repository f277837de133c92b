pub mod contribution_commands;
pub mod event_commands;
pub mod participant_commands;
pub mod resource_commands;

pub use contribution_commands::*;
pub use event_commands::*;
pub use participant_commands::*;
pub use resource_commands::*;

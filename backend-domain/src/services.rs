pub mod contribution_engine;

pub use contribution_engine::*;

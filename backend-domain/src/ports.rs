// Store and Service Port Traits (Interfaces)
// Define what the domain needs from infrastructure

pub mod services;
pub mod stores;

pub use services::*;
pub use stores::*;

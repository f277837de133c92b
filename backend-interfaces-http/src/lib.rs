pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use error::*;
pub use extract::*;
pub use handlers::*;
pub use middleware::*;
pub use routes::*;

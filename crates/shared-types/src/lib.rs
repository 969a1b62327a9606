pub mod error;
pub mod config;

pub mod models;
pub mod requests;

// Workforce domain
pub mod attendance;
pub mod bill;
pub mod campaign;
pub mod nav;
pub mod shift;
pub mod snapshot;

pub use error::*;
pub use config::*;
pub use models::*;
pub use requests::*;

pub use attendance::*;
pub use bill::*;
pub use campaign::*;
pub use nav::*;
pub use shift::*;
pub use snapshot::*;

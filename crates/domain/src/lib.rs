pub mod entities;
pub mod errors;
pub mod hasher;
pub mod repositories;
pub mod services;

pub use entities::*;
pub use errors::*;
pub use hasher::*;
pub use repositories::*;
pub use services::*;

pub mod models;
pub mod ports;
pub mod services;

mod draft;
mod error;
mod user;
mod visibility;

pub use draft::*;
pub use error::*;
pub use user::*;
pub use visibility::*;

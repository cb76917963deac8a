pub(crate) mod calculate;
pub(crate) mod draft;
pub(crate) mod error;
pub(crate) mod project;

pub(crate) use error::ApiError;

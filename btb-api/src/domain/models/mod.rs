mod ids;
mod project;

pub use ids::*;
pub use project::*;

#[cfg(test)]
pub(crate) use project::fixtures;

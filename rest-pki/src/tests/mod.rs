
pub mod fixtures;

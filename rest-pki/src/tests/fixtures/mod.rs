mod client;
mod responses;

pub use client::*;
pub use responses::*;

//! lawg API model types.
//!
//! `*Info` structs are the validated payloads the API returns. The other
//! types are call parameters that the resource functions turn into request
//! bodies.

mod feed;
mod insight;
mod log;
mod project;

pub use feed::*;
pub use insight::*;
pub use log::*;
pub use project::*;

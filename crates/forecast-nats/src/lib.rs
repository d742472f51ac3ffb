mod client;
mod observation_created_producer;
mod traits;

pub use client::*;
pub use observation_created_producer::*;
pub use traits::*;

pub mod observation_handler;
pub mod server;

pub use server::{router, serve, AppState};

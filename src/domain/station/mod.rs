pub mod dto;
pub mod handler;
pub mod service;
mod view;

pub use handler::{get_state, index, submit};
pub use service::StationService;

pub mod config;
mod http_layers;
mod recommend_routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
use recommend_routes::make_recommend_routes;
pub use server::{make_app, run_server};

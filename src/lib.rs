use std::sync::Arc;

use config::Config;
use db::db::DBClient;

pub mod config;
pub mod db;
pub mod dtos;
pub mod error;
pub mod handler;
pub mod models;
pub mod routes;
pub mod service;
pub mod utils;

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
}

impl AppState {
    pub fn new(env: Config, db_client: DBClient) -> Self {
        AppState {
            env,
            db_client: Arc::new(db_client),
        }
    }
}

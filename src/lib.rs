pub mod api;
pub mod catalog;
pub mod config;
pub mod db;

pub use db::DbPool;

use catalog::CatalogService;
use config::Config;

pub struct AppState {
    pub config: Config,
    pub db: DbPool,
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(config: Config, db: DbPool, catalog: CatalogService) -> Self {
        Self {
            config,
            db,
            catalog,
        }
    }
}

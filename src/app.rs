use sea_orm::DatabaseConnection;

use crate::{config::Config, environment::Environment};

/// Shared application state handed to every request handler.
#[derive(Clone, Debug)]
pub struct App {
    pub config: Config,
    pub environment: Environment,
    pub db: DatabaseConnection,
}

pub use sea_orm_migration::prelude::*;

mod m20250901_100000_create_directory;
mod m20250901_110000_create_job;
mod m20250901_120000_create_order;
mod m20251006_090000_create_report;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_100000_create_directory::Migration),
            Box::new(m20250901_110000_create_job::Migration),
            Box::new(m20250901_120000_create_order::Migration),
            Box::new(m20251006_090000_create_report::Migration),
        ]
    }
}

pub struct Migrator;

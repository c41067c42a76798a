use sea_orm_migration::prelude::*;

mod initial_001;

/// Schema for restaurants, users and visits. Run once at start-up.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(initial_001::Migration)]
    }
}

//! ZFood: restaurants, visits and users.
//!
//! Layout follows a DDD-light split:
//! - `domain`: models, repository ports, validators, validation decorators and services
//! - `infra`: SeaORM entities, migrations and repository implementations
//! - `api`: REST DTOs, handlers, routes and problem mapping

pub mod config;
pub mod module;

pub use config::ZFoodConfig;
pub use module::ZFood;

pub mod api;
pub mod domain;
pub mod infra;

//! SeaORM-backed repository implementations for the domain ports.
//!
//! Each repository is generic over `C: ConnectionTrait`, so it can be built
//! with a `DatabaseConnection` or a transactional connection.

use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, DbErr, SqlErr};

use crate::domain::repo::UniqueViolation;

mod restaurant;
mod user;
mod visit;

pub use restaurant::SeaOrmRestaurantRepository;
pub use user::SeaOrmUserRepository;
pub use visit::SeaOrmVisitRepository;

/// `column LIKE '<prefix>%'` with `\`, `%` and `_` in the prefix matched literally.
pub(crate) fn starts_with<T: ColumnTrait>(column: T, prefix: &str) -> SimpleExpr {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Expr::col((column.entity_name(), column)).like(LikeExpr::new(pattern).escape('\\'))
}

/// Context for a failed write; unique-index violations become [`UniqueViolation`].
pub(crate) fn write_error(err: DbErr, what: &'static str) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            anyhow::Error::new(UniqueViolation(detail)).context(what)
        }
        _ => anyhow::Error::new(err).context(what),
    }
}


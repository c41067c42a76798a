//! Validation decorators.
//!
//! Each decorator implements the same service trait as the service it wraps,
//! obtains the operation's validator from a factory, runs it and only then
//! delegates. `find_by_id` is a pass-through.

mod restaurant;
mod user;
mod visit;

pub use restaurant::RestaurantValidatorDecorator;
pub use user::UserValidatorDecorator;
pub use visit::VisitValidatorDecorator;

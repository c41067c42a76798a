pub mod restaurant;
pub mod user;
pub mod visit;

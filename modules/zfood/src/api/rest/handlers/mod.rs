pub mod restaurants;
pub mod users;
pub mod visits;

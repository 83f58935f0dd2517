pub mod health;
pub mod station;

pub mod health;
pub mod titles;

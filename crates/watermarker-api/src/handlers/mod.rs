pub mod apply;
pub mod health;

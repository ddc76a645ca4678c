pub mod designs;
pub mod health;

pub use designs::{delete_design, generate_design, get_design, list_designs, save_design};
pub use health::{health_check, readiness_check};

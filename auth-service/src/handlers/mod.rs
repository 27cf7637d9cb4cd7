mod auth;

pub use auth::{health_check, login, logout, register, user_role};

// handlers/generator - password generator app
//
// GET/POST /           registration
// GET/POST /login      login
// GET/POST /generator  generator (session required)
// GET      /logout     end session

pub mod account;
pub mod generate;

pub use account::{login, login_page, logout, register, register_page};
pub use generate::{generate, generator_page};

/// Where anonymous visitors are sent
pub const LOGIN_PATH: &str = "/";
/// Where freshly authenticated users land
pub const LANDING_PATH: &str = "/generator";

// handlers/studio - drawing studio app
//
// Public:  GET /, GET/POST /register, GET/POST /login, GET /logout
// Pages:   GET /studio, GET /studio/:id, GET /profile   (redirect when anonymous)
// API:     POST /api/save_drawing, GET /api/drawings,
//          PUT/DELETE /api/drawings/:id                (401 when anonymous)

pub mod account;
pub mod drawings;
pub mod pages;

pub use account::{login, login_page, logout, register, register_page};
pub use drawings::{delete_drawing, list_drawings, save_drawing, update_drawing};
pub use pages::{edit_page, landing, profile, studio_page};

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/studio";

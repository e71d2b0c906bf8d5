pub mod accounts;
pub mod drawings;
pub mod history;
pub mod manager;
pub mod models;

pub use accounts::AccountStore;
pub use drawings::DrawingRepository;
pub use history::PasswordHistory;
pub use manager::{DatabaseError, DatabaseManager};
pub use models::{Drawing, User};

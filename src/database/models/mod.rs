pub mod drawing;
pub mod user;

pub use drawing::Drawing;
pub use user::User;

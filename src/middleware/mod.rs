pub mod session;

pub use session::{require_api_session, require_session, SessionGuard, SessionUser};

pub mod envelope;
pub mod site;
pub mod user;

pub use envelope::{Envelope, PaginatedResponse};
pub use site::SiteConfig;
pub use user::{ChangePasswordRequest, LoginRequest, LoginResponse, SessionUser};

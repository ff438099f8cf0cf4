pub mod auth;
pub mod rbac;
pub mod response;

pub use auth::AuthUser;
pub use rbac::{authorize, RequireAdmin, RequireArtist, RequireRole, RequireVenue};
pub use response::{ApiResponse, ApiResult};

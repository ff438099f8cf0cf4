// handlers/protected/mod.rs - Handlers behind a session token
//
// Role checks are declared in each handler's signature through the
// `RequireRole` extractors (admin, artist, venue). The media handler is the
// exception: it applies the gate only to non-video requests.

pub mod artists;
pub mod auth;
pub mod media;
pub mod profile;
pub mod utils;
pub mod venues;

pub use artists::{artist_contact, artist_delete, artist_edit};
pub use auth::auth_whoami;
pub use media::media_signed_url;
pub use profile::{profile_identity, profile_technical};
pub use venues::{venue_delete, venue_edit};

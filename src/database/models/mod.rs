pub mod artist;
pub mod profile;
pub mod venue;

pub use artist::{Artist, ArtistUpdate};
pub use profile::{Profile, ProfileDataColumn, ProfileDataPatch, Role};
pub use venue::{Venue, VenueUpdate};

pub mod identity;
pub mod technical;

pub use identity::put as profile_identity;
pub use technical::put as profile_technical;

pub mod contact;
pub mod delete;
pub mod edit;

pub use contact::post as artist_contact;
pub use delete::delete as artist_delete;
pub use edit::put as artist_edit;

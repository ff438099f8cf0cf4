pub mod delete;
pub mod edit;

pub use delete::delete as venue_delete;
pub use edit::put as venue_edit;

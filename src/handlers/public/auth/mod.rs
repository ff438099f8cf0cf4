pub mod callback;

pub use callback::get as auth_callback;

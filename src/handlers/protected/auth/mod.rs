pub mod whoami;

pub use whoami::get as auth_whoami;

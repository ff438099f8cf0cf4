pub mod signed_url;

pub use signed_url::post as media_signed_url;

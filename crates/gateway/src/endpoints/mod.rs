//! # Gatewayエンドポイント

pub mod images;
pub mod info;
pub mod upload_url;

pub use images::{handle_get_image, handle_list_images};
pub use info::{handle_health, handle_root, handle_upload_page};
pub use upload_url::handle_upload_url;

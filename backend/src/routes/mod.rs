pub mod landing;
pub mod layout;
pub mod map;
pub mod search;
pub mod timeline;

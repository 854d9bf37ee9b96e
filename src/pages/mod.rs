//! Page components for Agora.

mod landing;

pub use landing::Landing;

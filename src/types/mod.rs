pub mod blocks;
pub mod bookmark;
pub mod credentials;
pub mod errors;

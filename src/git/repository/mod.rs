pub mod core;
pub mod info;

// HTTP request handlers module

pub mod index;
pub mod upload;

pub mod errors;
pub mod upload;

pub mod did;
pub mod public_key;

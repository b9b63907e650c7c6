pub mod cli;
pub mod encoder;
pub mod image_loader;
pub mod processing;
pub mod storage;

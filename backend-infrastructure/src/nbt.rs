pub mod gzip_decoder;

pub use gzip_decoder::*;

pub mod png_io;

pub use png_io::{decode_png, encode_indexed_png, encode_rgb_png, read_png};

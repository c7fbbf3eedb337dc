pub mod converter;
pub mod decode;

pub use converter::{ConvertService, GridSize};
pub use decode::{decode_png, decode_png_file};

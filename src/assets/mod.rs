pub mod background;
pub mod decode;
pub mod photo;
pub mod svg_raster;

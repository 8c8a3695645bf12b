pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod store;
pub(crate) mod svg_raster;

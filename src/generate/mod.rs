pub(crate) mod bitmap;
pub(crate) mod config;
pub(crate) mod framing;
pub(crate) mod quantize;
pub(crate) mod raster;
pub(crate) mod sign_correction;

pub mod composite;
pub mod distort;
pub mod particles;
pub mod raster;
pub mod tone;

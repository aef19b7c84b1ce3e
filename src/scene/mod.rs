pub(crate) mod memory;
pub(crate) mod model;
pub(crate) mod node;
pub(crate) mod raster;
pub(crate) mod svg;

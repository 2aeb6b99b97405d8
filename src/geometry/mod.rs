pub(crate) mod contour;
pub(crate) mod deconverge;
pub(crate) mod scanline;
pub(crate) mod segment;
pub(crate) mod shape;

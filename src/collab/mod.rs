pub(crate) mod font;
pub(crate) mod overlap;
pub(crate) mod path;

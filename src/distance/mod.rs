pub(crate) mod finder;
pub(crate) mod selectors;
pub(crate) mod signed;

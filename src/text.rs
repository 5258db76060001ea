pub(crate) mod caption;
pub(crate) mod font;
pub(crate) mod shaper;
pub(crate) mod wrap;

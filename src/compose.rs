pub(crate) mod params;
pub(crate) mod placement;
pub(crate) mod text;
pub(crate) mod tint;
pub(crate) mod tone;

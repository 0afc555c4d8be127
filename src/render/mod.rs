pub(crate) mod cpu;
pub(crate) mod line;
pub(crate) mod surface;

pub(crate) mod foreground;
pub(crate) mod sampler;

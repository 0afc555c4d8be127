pub(crate) mod animator;
pub(crate) mod hover;
pub(crate) mod spring;

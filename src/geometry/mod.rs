pub(crate) mod transform;
pub(crate) mod viewport;

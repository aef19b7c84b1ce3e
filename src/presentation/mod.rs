pub mod dsl;
pub(crate) mod model;
pub(crate) mod script;
pub(crate) mod sequencer;

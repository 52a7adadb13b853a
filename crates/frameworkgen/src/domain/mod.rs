//! Core data types shared by the parser, the generator and the renderers.

pub mod errors;
pub mod model;

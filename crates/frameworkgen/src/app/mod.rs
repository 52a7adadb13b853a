//! Application layer: parsing, tree assembly and rendering.

pub mod catalog;
pub mod generator;
pub mod outline;
pub mod parser;
pub mod site;

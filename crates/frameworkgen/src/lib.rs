pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

/// Install logging for the given CLI verbosity.
pub fn init(verbose: u8, quiet: bool) {
    infra::logging::init(verbose, quiet);
}

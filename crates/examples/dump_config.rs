//! Prints the effective controller configuration as TOML.
//!
//! Usage:
//!   dump_config [config.toml]

use stride::prelude::*;

fn main() -> Result<(), StrideError> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ControllerConfig::load(path)?,
        None => ControllerConfig::default(),
    };
    print!("{}", config.to_toml_string()?);
    Ok(())
}

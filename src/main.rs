// src/main.rs
// Builds a VolParams store from defaults plus an optional YAML override file
// and logs the resulting parameter groups.

use log::{error, info};
use std::error::Error;
use volparams::{load_overrides, ParamMap, VolParams};

/// Usage: volparams [overrides.yaml]
fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging (RUST_LOG controls verbosity)
    env_logger::init();

    let overrides = match std::env::args().nth(1) {
        Some(path) => load_overrides(&path).map_err(|e| {
            error!("Failed to load overrides from {}: {}", path, e);
            e
        })?,
        None => ParamMap::new(),
    };

    let params = VolParams::with_overrides(&overrides);

    for name in params.group_names() {
        info!("[{}]", name);
        for (key, value) in params.get_group(name)? {
            info!("  {} = {}", key, value);
        }
    }

    Ok(())
}

//=========================================================================
// Logging
//=========================================================================
//
// Installs `env_logger` behind the `log` facade. `RUST_LOG` overrides
// the level chosen by the config. Installing twice is harmless; the
// first logger stays.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs::File;

use env_logger::{Builder, Env, Target};
use log::{warn, LevelFilter};

//=== Internal Dependencies ===============================================

use super::EngineConfig;

//=== init() ==============================================================

/// Returns `false` if logging is disabled or a logger was already set.
pub fn init(config: &EngineConfig) -> bool {
    if !config.enable_logging {
        return false;
    }

    let level = level_for(config);
    let mut builder = Builder::from_env(Env::default().default_filter_or(level.as_str()));
    builder.filter_module("winit", LevelFilter::Warn);

    let mut file_error = None;
    if let Some(path) = &config.log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => file_error = Some((path.clone(), e)),
        }
    }

    let installed = builder.try_init().is_ok();
    if let Some((path, e)) = file_error {
        warn!("Could not open log file {}: {}", path.display(), e);
    }
    installed
}

fn level_for(config: &EngineConfig) -> LevelFilter {
    if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_selects_debug() {
        let mut config = EngineConfig::default();
        assert_eq!(level_for(&config), LevelFilter::Info);
        config.verbose = true;
        assert_eq!(level_for(&config), LevelFilter::Debug);
    }

    #[test]
    fn disabled_logging_installs_nothing() {
        let config = EngineConfig {
            enable_logging: false,
            ..EngineConfig::default()
        };
        assert!(!init(&config));
    }
}

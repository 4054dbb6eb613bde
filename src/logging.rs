// src/logging.rs
// =============================================================================
// Logger setup.
//
// We log through the `log` facade and print with simplelog's TermLogger.
// TerminalMode::Stderr keeps every log line off stdout, so `--json` output
// can be piped straight into another tool.
// =============================================================================

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

// Installs the global logger. Warnings only, unless --verbose was passed.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    // Ignore the error: a logger may already be set (e.g. by a test)
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

// Logger for unit tests; safe to call from every test
#[cfg(test)]
pub fn initialize_for_tests() {
    init(true);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        initialize_for_tests();
        initialize_for_tests();
        log::debug!("logger ready");
    }
}

use std::sync::OnceLock;

use crate::utils::logger;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// True when `ONTOCTL_DEBUG=1`. Checked once, cached for the process.
pub fn is_debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| {
        std::env::var("ONTOCTL_DEBUG")
            .map(|v| v == "1")
            .unwrap_or(false)
    })
}

/// Prints to stderr when debugging is enabled; always mirrored to the log file.
pub fn debug_print(message: &str) {
    if is_debug_enabled() {
        eprintln!("DEBUG: {}", message);
    }
    logger::debug(message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_gate_is_cached() {
        // Whatever the first read said, later env flips must not change it.
        let first = is_debug_enabled();
        std::env::set_var("ONTOCTL_DEBUG", if first { "0" } else { "1" });
        assert_eq!(is_debug_enabled(), first);
        std::env::remove_var("ONTOCTL_DEBUG");
    }
}

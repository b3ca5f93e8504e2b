use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Tool-specific filter variable; wins over `RUST_LOG`.
const STRESSER_LOG_ENV: &str = "STRESSER_LOG";
const FALLBACK_LOG_ENV: &str = "RUST_LOG";

/// Installs the stderr logger for a stress test run.
///
/// Logs go to stderr so status lines and the summary on stdout stay
/// parseable. `--verbose` only changes the default level; an explicit
/// filter variable always takes precedence.
pub fn init_logging(verbose: bool) {
    let from_env = std::env::var(STRESSER_LOG_ENV)
        .or_else(|_| std::env::var(FALLBACK_LOG_ENV))
        .ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(build_filter(from_env.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

// An unparsable directive falls back to the default level instead of
// silencing the run.
fn build_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    directive
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level(verbose)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false);
        init_logging(true);
    }

    #[test]
    fn verbose_lowers_default_level() -> Result<(), String> {
        if default_level(false) != "info" || default_level(true) != "debug" {
            return Err("Unexpected default levels".to_owned());
        }
        let quiet = build_filter(None, false).to_string();
        let verbose = build_filter(None, true).to_string();
        if quiet != "info" || verbose != "debug" {
            return Err(format!("Unexpected filters: {} / {}", quiet, verbose));
        }
        Ok(())
    }

    #[test]
    fn explicit_directive_overrides_verbose() -> Result<(), String> {
        let filter = build_filter(Some("stresser=trace"), false).to_string();
        if filter != "stresser=trace" {
            return Err(format!("Directive ignored: {}", filter));
        }
        let fallback = build_filter(Some("stresser=notalevel"), true).to_string();
        if fallback != "debug" {
            return Err(format!("Invalid directive must fall back: {}", fallback));
        }
        Ok(())
    }
}

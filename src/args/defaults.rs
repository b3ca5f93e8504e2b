pub(crate) const DEFAULT_USER_AGENT: &str = concat!("stresser/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_REQUESTS: &str = "100";
pub(crate) const DEFAULT_CONCURRENCY: &str = "10";
pub(crate) const DEFAULT_OUTPUT: &str = "report.txt";

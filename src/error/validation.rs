use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing URL (set --url or provide in config).")]
    MissingUrl,
    #[error("Missing command (try `stresser test --url <URL>`).")]
    MissingCommand,
    #[error("URL must not be empty.")]
    EmptyUrl,
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{scheme}'. Use http or https.")]
    UnsupportedScheme { scheme: String },
    #[error("URL is missing host.")]
    UrlMissingHost,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Run was interrupted after {issued} of {requested} requests.")]
    RunInterrupted { issued: u64, requested: u64 },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

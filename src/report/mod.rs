//! Console summary, encoded report files and the HTML chart report.
mod encode;
mod format;
mod html;
mod model;
mod naming;
mod text;


use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::args::{EncodeFormat, ReportFormat, TestArgs};
use crate::error::{AppError, AppResult, ReportError};
use crate::metrics::Summary;

pub use text::print_summary;

use encode::encode_report;
use html::render_html;
use naming::{encoded_report_path, html_report_path, report_timestamp};

/// Where and how a finished run is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub output: String,
    pub encode: Option<EncodeFormat>,
    pub format: ReportFormat,
    /// Inserted into file names before the extension when set.
    pub stamp: Option<String>,
}

impl ReportOptions {
    #[must_use]
    pub fn from_args(args: &TestArgs) -> Self {
        Self {
            output: args.output.clone(),
            encode: args.encode,
            format: args.format,
            stamp: args.timestamp.then(report_timestamp),
        }
    }
}

/// Renders the requested reports and returns the files that were written.
///
/// With the `stdout` format an explicit encoding is printed to the console
/// instead of a file.
///
/// # Errors
///
/// Returns an error when a report cannot be serialized or written.
pub async fn write_reports(summary: &Summary, options: &ReportOptions) -> AppResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    if options.format == ReportFormat::Stdout
        && let Some(encode) = options.encode
        && encode != EncodeFormat::Text
    {
        println!("{}", encode_report(summary, encode)?);
    }

    if options.format.writes_file() {
        let encode = options.encode.unwrap_or(EncodeFormat::Text);
        let path = encoded_report_path(&options.output, encode.extension(), options.stamp.as_deref());
        let body = encode_report(summary, encode)?;
        write_report_file(&path, body).await?;
        written.push(path);
    }

    if options.format.writes_html() {
        let path = html_report_path(&options.output, options.stamp.as_deref());
        let body = render_html(summary)?;
        write_report_file(&path, body).await?;
        written.push(path);
    }

    Ok(written)
}

async fn write_report_file(path: &Path, body: String) -> AppResult<()> {
    match tokio::fs::write(path, body).await {
        Ok(()) => {
            debug!("Report written to {}", path.display());
            Ok(())
        }
        Err(err) => {
            error!("Failed to write report {}: {}", path.display(), err);
            Err(AppError::report(ReportError::WriteReport {
                path: path.to_path_buf(),
                source: err,
            }))
        }
    }
}

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, Timelike};

/// Local wall-clock stamp used to keep report files of separate runs apart.
pub(crate) fn report_timestamp() -> String {
    let now = Local::now();
    format!(
        "{:04}-{:02}-{:02}_{:02}-{:02}-{:02}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Path of the encoded report. An output without extension takes the
/// encoding's extension; an explicit extension is kept as given.
pub(super) fn encoded_report_path(output: &str, extension: &str, stamp: Option<&str>) -> PathBuf {
    let path = Path::new(output);
    let resolved = if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    };
    with_stamp(&resolved, stamp)
}

/// Path of the HTML report: the output path with its extension replaced.
pub(super) fn html_report_path(output: &str, stamp: Option<&str>) -> PathBuf {
    with_stamp(&Path::new(output).with_extension("html"), stamp)
}

fn with_stamp(path: &Path, stamp: Option<&str>) -> PathBuf {
    let Some(stamp) = stamp else {
        return path.to_path_buf();
    };
    let stem = path
        .file_stem()
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = path.extension().map_or_else(
        || format!("{}-{}", stem, stamp),
        |extension| format!("{}-{}.{}", stem, stamp, extension.to_string_lossy()),
    );
    path.with_file_name(file_name)
}

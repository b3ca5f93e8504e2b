use std::time::Duration;

use crate::error::AppResult;
use crate::metrics::Summary;

use super::format::{millis_x1000, write_line};

const LATENCY_BIN_COUNT: usize = 10;

/// One bar of the latency histogram, covering `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct LatencyBin {
    pub(super) start: Duration,
    pub(super) end: Duration,
    pub(super) count: u64,
}

/// Splits latencies into ten equal-width bins between min and max.
///
/// Empty bins are dropped. An empty input yields no bins; equal min and max
/// yield a single bin holding everything.
pub(super) fn latency_bins(latencies: &[Duration]) -> Vec<LatencyBin> {
    let (Some(min), Some(max)) = (
        latencies.iter().min().copied(),
        latencies.iter().max().copied(),
    ) else {
        return Vec::new();
    };

    let bin_width = max
        .saturating_sub(min)
        .checked_div(u32::try_from(LATENCY_BIN_COUNT).unwrap_or(1))
        .unwrap_or_default();
    if bin_width.is_zero() {
        return vec![LatencyBin {
            start: min,
            end: max,
            count: u64::try_from(latencies.len()).unwrap_or(u64::MAX),
        }];
    }

    let width_nanos = bin_width.as_nanos();
    let mut counts = [0u64; LATENCY_BIN_COUNT];
    for latency in latencies {
        let offset = latency.saturating_sub(min).as_nanos();
        let index = offset
            .checked_div(width_nanos)
            .and_then(|value| usize::try_from(value).ok())
            .unwrap_or(LATENCY_BIN_COUNT)
            .min(LATENCY_BIN_COUNT.saturating_sub(1));
        if let Some(count) = counts.get_mut(index) {
            *count = count.saturating_add(1);
        }
    }

    let mut start = min;
    let mut bins = Vec::new();
    for count in counts {
        let end = start.saturating_add(bin_width);
        if count > 0 {
            bins.push(LatencyBin { start, end, count });
        }
        start = end;
    }
    bins
}

/// Builds the self-contained chart page (Google Charts loader).
pub(crate) fn render_html(summary: &Summary) -> AppResult<String> {
    let mut output = String::new();
    write_line(&mut output, "<!DOCTYPE html>")?;
    write_line(&mut output, "<html><head>")?;
    write_line(&mut output, "<meta charset=\"utf-8\">")?;
    write_line(&mut output, "<title>stresser report</title>")?;
    write_line(
        &mut output,
        "<script type=\"text/javascript\" src=\"https://www.gstatic.com/charts/loader.js\"></script>",
    )?;
    write_line(&mut output, "<script type=\"text/javascript\">")?;
    write_line(
        &mut output,
        "google.charts.load('current', {'packages':['corechart']});",
    )?;
    write_line(&mut output, "google.charts.setOnLoadCallback(drawCharts);")?;
    write_line(&mut output, "function drawCharts() {")?;
    write_line(&mut output, "  drawSuccessErrorChart();")?;
    write_line(&mut output, "  drawErrorDistributionChart();")?;
    write_line(&mut output, "  drawRequestTimesChart();")?;
    write_line(&mut output, "  drawAllRequestTimesChart();")?;
    write_line(&mut output, "}")?;

    write_success_error_chart(&mut output, summary)?;
    write_error_distribution_chart(&mut output, summary)?;
    write_request_times_chart(&mut output, summary)?;
    write_all_request_times_chart(&mut output, summary)?;

    write_line(&mut output, "</script>")?;
    write_line(&mut output, "</head><body>")?;
    for id in [
        "successErrorChart",
        "errorDistributionChart",
        "requestTimesChart",
        "allRequestTimesChart",
    ] {
        write_line(
            &mut output,
            &format!(
                "<div id=\"{}\" style=\"width: 900px; height: 500px;\"></div>",
                id
            ),
        )?;
    }
    write_line(&mut output, "</body></html>")?;
    Ok(output)
}

fn write_success_error_chart(output: &mut String, summary: &Summary) -> AppResult<()> {
    write_line(output, "function drawSuccessErrorChart() {")?;
    write_line(output, "  var data = google.visualization.arrayToDataTable([")?;
    write_line(output, "    ['Type', 'Count'],")?;
    write_line(
        output,
        &format!(
            "    ['Successful requests', {}],",
            summary.successful_requests
        ),
    )?;
    write_line(
        output,
        &format!("    ['Error requests', {}]", summary.failed_requests),
    )?;
    write_line(output, "  ]);")?;
    write_chart_draw(
        output,
        "PieChart",
        "successErrorChart",
        "{ title: 'Successful vs Error requests' }",
    )
}

fn write_error_distribution_chart(output: &mut String, summary: &Summary) -> AppResult<()> {
    write_line(output, "function drawErrorDistributionChart() {")?;
    write_line(output, "  var data = google.visualization.arrayToDataTable([")?;
    write_line(output, "    ['Error', 'Count'],")?;
    for entry in &summary.error_distribution {
        write_line(
            output,
            &format!(
                "    ['{}', {}],",
                js_escape(&entry.code.to_string()),
                entry.count
            ),
        )?;
    }
    write_line(output, "  ]);")?;
    write_chart_draw(
        output,
        "PieChart",
        "errorDistributionChart",
        "{ title: 'Error distribution' }",
    )
}

fn write_request_times_chart(output: &mut String, summary: &Summary) -> AppResult<()> {
    write_line(output, "function drawRequestTimesChart() {")?;
    write_line(output, "  var data = google.visualization.arrayToDataTable([")?;
    write_line(output, "    ['Request Time', 'Count'],")?;
    for bin in latency_bins(&summary.latencies) {
        write_line(
            output,
            &format!(
                "    ['{}ms-{}ms', {}],",
                bin.start.as_millis(),
                bin.end.as_millis(),
                bin.count
            ),
        )?;
    }
    write_line(output, "  ]);")?;
    write_chart_draw(
        output,
        "BarChart",
        "requestTimesChart",
        "{ title: 'Request Times', legend: { position: 'none' } }",
    )
}

fn write_all_request_times_chart(output: &mut String, summary: &Summary) -> AppResult<()> {
    let average = millis_x1000(summary.average_latency);
    write_line(output, "function drawAllRequestTimesChart() {")?;
    write_line(output, "  var data = new google.visualization.DataTable();")?;
    write_line(output, "  data.addColumn('string', 'Request Time');")?;
    write_line(output, "  data.addColumn('number', 'Time (ms)');")?;
    write_line(output, "  data.addColumn('number', 'Average Time (ms)');")?;
    for (idx, latency) in summary.latencies.iter().enumerate() {
        write_line(
            output,
            &format!(
                "  data.addRow(['Request {}', {}, {}]);",
                idx.saturating_add(1),
                millis_x1000(*latency),
                average
            ),
        )?;
    }
    write_chart_draw(
        output,
        "ComboChart",
        "allRequestTimesChart",
        "{ title: 'All Request Times', seriesType: 'bars', series: {1: {type: 'line'}} }",
    )
}

fn write_chart_draw(output: &mut String, kind: &str, element: &str, options: &str) -> AppResult<()> {
    write_line(output, &format!("  var options = {};", options))?;
    write_line(
        output,
        &format!(
            "  var chart = new google.visualization.{}(document.getElementById('{}'));",
            kind, element
        ),
    )?;
    write_line(output, "  chart.draw(data, options);")?;
    write_line(output, "}")
}

fn js_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('<', "\\x3c")
}

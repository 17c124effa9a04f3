//! Skipped replication error report.

use super::html_escape;
use crate::status::{ReplError, ReplErrorReport};
use chrono::{DateTime, NaiveDateTime};

pub fn render_repl_errors(report: &ReplErrorReport, hours: u32) -> String {
    if report.count == 0 {
        return format!(
            r#"<div class="alert alert-success d-flex align-items-center">
    <i class="fa-solid fa-check-circle me-2"></i>
    <div>No skipped replication errors in the last {} hours.</div>
</div>"#,
            hours
        );
    }

    let rows = report
        .errors
        .iter()
        .map(render_row)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<div class="card border-warning">
    <div class="card-header bg-warning text-dark fw-bold">
        <i class="fa-solid fa-triangle-exclamation me-2"></i>
        {count} skipped replication errors detected (last {hours}h)
    </div>
    <div class="table-responsive">
        <table class="table table-sm table-striped mb-0" style="font-size: 0.9rem;">
            <thead>
                <tr>
                    <th>Time</th>
                    <th>Slave IP</th>
                    <th>Error code</th>
                    <th>Binlog position</th>
                    <th>Message</th>
                </tr>
            </thead>
            <tbody>
{rows}
            </tbody>
        </table>
    </div>
</div>"#,
        count = report.count,
        hours = hours,
        rows = rows,
    )
}

fn render_row(err: &ReplError) -> String {
    let msg = html_escape(&err.error_msg);
    format!(
        r#"<tr>
    <td>{time}</td>
    <td class="font-monospace">{slave_ip}</td>
    <td><span class="badge bg-danger">{code}</span></td>
    <td class="font-monospace small">{file}:{pos}</td>
    <td class="text-wrap" style="max-width: 400px;"><div class="text-truncate" title="{msg}">{msg}</div></td>
</tr>"#,
        time = html_escape(&format_error_time(&err.error_time)),
        slave_ip = html_escape(&err.slave_ip),
        code = err.error_code,
        file = html_escape(&err.master_log_file),
        pos = err.master_log_pos,
        msg = msg,
    )
}

/// Normalize the backend's timestamp to `YYYY-MM-DD HH:MM:SS`.
///
/// Accepts RFC 3339, RFC 2822 (the Flask default for datetimes) and naive
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS`. Anything else is shown as sent.
pub fn format_error_time(raw: &str) -> String {
    const OUT: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(OUT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.format(OUT).to_string();
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(OUT).to_string();
        }
    }
    raw.to_string()
}

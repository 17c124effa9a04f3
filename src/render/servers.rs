//! Physical server table body.

use super::html_escape;
use crate::status::Server;
use std::collections::BTreeMap;

/// Placeholder row shown while the server map is empty.
pub const EMPTY_ROW: &str = r#"<tr><td colspan="6" class="text-center text-muted p-5">No data yet (waiting for Zabbix)</td></tr>"#;

/// Utilization band for a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressLevel {
    Normal,
    Medium,
    High,
}

impl ProgressLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            ProgressLevel::Normal => "bg-primary",
            ProgressLevel::Medium => "bg-warning",
            ProgressLevel::High => "bg-danger",
        }
    }
}

/// `> 85` is high, `> 60` is medium, everything else is normal.
pub fn progress_level(value: f64) -> ProgressLevel {
    if value > 85.0 {
        ProgressLevel::High
    } else if value > 60.0 {
        ProgressLevel::Medium
    } else {
        ProgressLevel::Normal
    }
}

/// Rows ordered by server IP key.
pub fn render_server_rows(servers: &BTreeMap<String, Server>) -> String {
    if servers.is_empty() {
        return EMPTY_ROW.to_string();
    }
    servers
        .values()
        .map(render_row)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_row(server: &Server) -> String {
    let status_badge = if server.is_online() {
        r#"<span class="badge bg-success">online</span>"#
    } else {
        r#"<span class="badge bg-danger">offline</span>"#
    };

    format!(
        r#"<tr>
    <td class="font-monospace fw-bold text-primary">{ip}</td>
    <td>{status_badge}</td>
    <td style="width: 25%">{cpu}</td>
    <td style="width: 25%">{mem}</td>
    <td class="font-monospace">{disk}%</td>
    <td class="text-muted small"><i class="fa-regular fa-clock me-1"></i>{uptime}</td>
</tr>"#,
        ip = html_escape(&server.ip),
        status_badge = status_badge,
        cpu = render_progress(server.cpu),
        mem = render_progress(server.mem),
        disk = server.disk,
        uptime = html_escape(&server.uptime),
    )
}

/// Bar width is clamped to `[0, 100]`; the label shows the raw value.
fn render_progress(value: f64) -> String {
    let width = value.clamp(0.0, 100.0);
    format!(
        r#"<div class="d-flex align-items-center" style="gap:10px">
        <div class="progress flex-grow-1" style="height: 6px; background-color: #e9ecef;">
            <div class="progress-bar {class}" role="progressbar" style="width: {width}%"></div>
        </div>
        <span class="small text-muted fw-bold" style="width:35px; text-align:right;">{value}%</span>
    </div>"#,
        class = progress_level(value).css_class(),
        width = width,
        value = value,
    )
}

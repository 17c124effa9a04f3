//! Database master/slave topology cards.

use super::{html_escape, truncate_chars};
use crate::status::{MasterInfo, SlaveInfo};

/// Maximum characters of a slave's last error shown on its card.
pub const ERROR_PREVIEW_CHARS: usize = 50;

/// Placeholder shown when the topology reports no slaves.
pub const NO_SLAVES: &str =
    r#"<div class="col-12 text-center text-muted py-4">No slaves configured</div>"#;

/// Replication delay band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayHealth {
    Healthy,
    Warning,
    Critical,
    Unknown,
}

impl DelayHealth {
    pub fn css_class(self) -> &'static str {
        match self {
            DelayHealth::Healthy => "text-success",
            DelayHealth::Warning => "text-warning",
            DelayHealth::Critical => "text-danger",
            DelayHealth::Unknown => "text-secondary",
        }
    }
}

/// `> 60` critical, `> 0` warning, `0` healthy, negative (the `-1` sentinel) unknown.
pub fn delay_health(delay: i64) -> DelayHealth {
    if delay < 0 {
        DelayHealth::Unknown
    } else if delay > 60 {
        DelayHealth::Critical
    } else if delay > 0 {
        DelayHealth::Warning
    } else {
        DelayHealth::Healthy
    }
}

/// Text for the delay cell; the unknown band never shows a number.
pub fn delay_text(delay: i64) -> String {
    match delay_health(delay) {
        DelayHealth::Unknown => "unknown".to_string(),
        _ => format!("{}s", delay),
    }
}

fn thread_class(state: &str) -> &'static str {
    if state == "Yes" {
        "text-success"
    } else {
        "text-danger"
    }
}

pub fn render_master(master: &MasterInfo) -> String {
    let (conn_class, conn_label) = if master.connected {
        ("bg-success", "connected")
    } else {
        ("bg-danger", "error")
    };
    let file = master
        .file
        .as_deref()
        .filter(|f| !f.is_empty())
        .unwrap_or("N/A");
    let pos = master.pos.unwrap_or(0);
    let ip = html_escape(&master.ip);

    format!(
        r#"<div class="card border-primary border-2 shadow-sm d-inline-block text-start" style="min-width: 320px; max-width: 100%;">
    <div class="card-header bg-primary text-white d-flex justify-content-between align-items-center">
        <span class="fw-bold"><i class="fa-solid fa-database me-2"></i>Master</span>
        <span class="font-monospace bg-white text-primary px-2 rounded small">{ip}</span>
    </div>
    <div class="card-body">
        <div class="d-flex justify-content-between mb-2 border-bottom pb-2">
            <span class="text-muted">Connection</span>
            <span class="badge {conn_class}">{conn_label}</span>
        </div>
        <div class="d-flex justify-content-between mb-2">
            <span class="text-muted">Connections (current / max)</span>
            <span class="fw-bold font-monospace">{conn_curr} / {conn_max}</span>
        </div>
        <div class="d-flex justify-content-between mb-2">
            <span class="text-muted">QPS</span>
            <span class="fw-bold text-success font-monospace">{qps}</span>
        </div>
        <div class="bg-light p-2 rounded border mt-2">
            <div class="small text-muted mb-1">Binlog position</div>
            <div class="font-monospace small text-truncate" title="{file}:{pos}">{file}:{pos}</div>
        </div>
    </div>
    <div class="card-footer bg-white text-end border-0">
        <button class="btn btn-outline-primary btn-sm w-100" data-details="{ip}">View detailed metrics</button>
    </div>
</div>"#,
        ip = ip,
        conn_class = conn_class,
        conn_label = conn_label,
        conn_curr = master.conn_curr,
        conn_max = master.conn_max,
        qps = master.qps,
        file = html_escape(file),
        pos = pos,
    )
}

pub fn render_slaves(slaves: &[SlaveInfo]) -> String {
    if slaves.is_empty() {
        return NO_SLAVES.to_string();
    }
    slaves.iter().map(render_slave).collect::<Vec<_>>().join("\n")
}

fn render_slave(slave: &SlaveInfo) -> String {
    let border = if slave.is_replicating() {
        "border-success"
    } else {
        "border-danger"
    };
    let ip = html_escape(&slave.ip);

    let error_box = match slave.error.as_deref().filter(|e| !e.is_empty()) {
        Some(err) => format!(
            r#"
            <div class="alert alert-danger p-2 small mt-3 mb-0 d-flex align-items-start">
                <i class="fa-solid fa-circle-exclamation mt-1 me-2"></i>
                <div class="text-break">{}</div>
            </div>"#,
            html_escape(&truncate_chars(err, ERROR_PREVIEW_CHARS))
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="col">
    <div class="card h-100 shadow-sm border-top border-4 {border}">
        <div class="card-body">
            <div class="d-flex justify-content-between align-items-center mb-3">
                <span class="fw-bold text-dark"><i class="fa-solid fa-server me-1"></i> Slave</span>
                <span class="text-muted small font-monospace bg-light px-1 rounded">{ip}</span>
            </div>
            <div class="row g-2 mb-3 text-center">
                <div class="col-6">
                    <div class="border rounded p-1">
                        <div class="small text-muted">IO thread</div>
                        <div class="fw-bold {io_class}">{io}</div>
                    </div>
                </div>
                <div class="col-6">
                    <div class="border rounded p-1">
                        <div class="small text-muted">SQL thread</div>
                        <div class="fw-bold {sql_class}">{sql}</div>
                    </div>
                </div>
            </div>
            <div class="d-flex justify-content-between align-items-center px-2">
                <span class="text-muted small">Delay</span>
                <span class="fw-bold font-monospace {delay_class}">{delay}</span>
            </div>{error_box}
        </div>
        <div class="card-footer bg-white text-end border-0">
            <button class="btn btn-outline-secondary btn-sm w-100" data-details="{ip}">Details</button>
        </div>
    </div>
</div>"#,
        border = border,
        ip = ip,
        io_class = thread_class(&slave.io),
        io = html_escape(&slave.io),
        sql_class = thread_class(&slave.sql),
        sql = html_escape(&slave.sql),
        delay_class = delay_health(slave.delay).css_class(),
        delay = delay_text(slave.delay),
        error_box = error_box,
    )
}

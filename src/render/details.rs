//! Drilldown overlay body for a single database host.

use super::{html_escape, truncate_chars};
use crate::status::DbDetails;

/// Maximum characters of SQL text shown per slow query.
pub const SQL_PREVIEW_CHARS: usize = 200;

pub fn render_details_loading() -> String {
    r#"<div class="text-center py-5"><div class="spinner-border text-light" role="status"></div><div class="mt-2">Querying detailed metrics...</div></div>"#
        .to_string()
}

pub fn render_details_error(message: &str) -> String {
    format!(
        r#"<div class="alert alert-danger m-3">{}</div>"#,
        html_escape(message)
    )
}

/// Sections: InnoDB buffer pool (when reported), top slow queries, largest tables (when any).
///
/// A payload carrying `error` renders only the error box.
pub fn render_details(details: &DbDetails) -> String {
    if let Some(err) = details.error.as_deref() {
        return render_details_error(err);
    }

    let mut html = String::from(r#"<div class="p-2">"#);

    if let Some(innodb) = details.innodb.as_ref().filter(|i| !i.is_empty()) {
        let pool = innodb
            .buffer_pool_mb
            .map(|mb| format!("{} MB", mb))
            .unwrap_or_else(|| "N/A".to_string());
        let hit_rate = innodb.hit_rate.as_deref().unwrap_or("N/A");
        html.push_str(&format!(
            r#"
<h6 class="text-info border-bottom border-secondary pb-2 mb-3"><i class="fa-solid fa-memory me-2"></i>InnoDB buffer pool</h6>
<div class="row mb-4 g-3">
    <div class="col-md-6">
        <div class="bg-dark border border-secondary rounded p-3 text-center">
            <div class="text-muted small mb-1">Buffer pool size</div>
            <div class="fs-4 fw-bold">{pool}</div>
        </div>
    </div>
    <div class="col-md-6">
        <div class="bg-dark border border-secondary rounded p-3 text-center">
            <div class="text-muted small mb-1">Hit rate</div>
            <div class="fs-4 fw-bold text-success">{hit_rate}</div>
        </div>
    </div>
</div>"#,
            pool = html_escape(&pool),
            hit_rate = html_escape(hit_rate),
        ));
    }

    html.push_str(
        r#"
<h6 class="text-warning border-bottom border-secondary pb-2 mb-3"><i class="fa-solid fa-hourglass-half me-2"></i>Slow queries (top 5)</h6>"#,
    );
    if details.slow_queries.is_empty() {
        html.push_str(r#"<div class="text-muted fst-italic mb-4">No slow queries recorded</div>"#);
    } else {
        html.push_str(r#"<div class="list-group mb-4">"#);
        for q in &details.slow_queries {
            let sql = q
                .sql_text
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|s| truncate_chars(s, SQL_PREVIEW_CHARS))
                .unwrap_or_else(|| "N/A".to_string());
            html.push_str(&format!(
                r#"
    <div class="list-group-item list-group-item-action bg-dark text-white border-secondary">
        <div class="d-flex w-100 justify-content-between">
            <h6 class="mb-1 text-danger fw-bold">{time:.4}s</h6>
            <small class="text-muted">rows sent: {rows}</small>
        </div>
        <p class="mb-1 font-monospace small text-break" style="color:#d1d5db;">{sql}</p>
    </div>"#,
                time = q.time,
                rows = q.rows_sent,
                sql = html_escape(&sql),
            ));
        }
        html.push_str("</div>");
    }

    if !details.tables.is_empty() {
        html.push_str(
            r#"
<h6 class="text-info border-bottom border-secondary pb-2 mb-3"><i class="fa-solid fa-table me-2"></i>Largest tables (top 5)</h6>
<table class="table table-dark table-sm table-striped small">
    <thead><tr><th>Database</th><th>Table</th><th class="text-end">Size (MB)</th></tr></thead>
    <tbody>"#,
        );
        for t in &details.tables {
            html.push_str(&format!(
                r#"<tr><td>{db}</td><td>{tb}</td><td class="text-end fw-bold">{size:.2}</td></tr>"#,
                db = html_escape(&t.db),
                tb = html_escape(&t.tb),
                size = t.size_mb,
            ));
        }
        html.push_str("</tbody></table>");
    }

    html.push_str("</div>");
    html
}

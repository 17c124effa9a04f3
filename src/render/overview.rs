//! Overview panel: headline counters and the active alert list.

use super::html_escape;
use crate::status::{Alert, StatusSnapshot};

/// Fixed markup shown instead of the alert list when nothing is firing.
pub const HEALTHY_MESSAGE: &str = r#"<div class="alert alert-success d-flex align-items-center shadow-sm" role="alert">
    <i class="fa-solid fa-check-circle me-3 fs-4"></i>
    <div>
        <strong>All systems operational</strong>
        <div class="small">Every monitored metric is within its normal range.</div>
    </div>
</div>"#;

/// Everything the overview panel displays for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub inference_count: usize,
    pub server_count: usize,
    pub alert_count: usize,
    /// Class list for the alert counter element
    pub alert_count_class: &'static str,
    /// Markup for the alert container
    pub alerts_html: String,
}

pub fn render_overview(snapshot: &StatusSnapshot) -> Overview {
    let alert_count = snapshot.alerts.len();
    let alert_count_class = if alert_count > 0 {
        "fs-2 fw-bold text-danger"
    } else {
        "fs-2 fw-bold text-success"
    };

    let alerts_html = if snapshot.alerts.is_empty() {
        HEALTHY_MESSAGE.to_string()
    } else {
        snapshot
            .alerts
            .iter()
            .map(render_alert)
            .collect::<Vec<_>>()
            .join("\n")
    };

    Overview {
        inference_count: snapshot.inference.len(),
        server_count: snapshot.servers.len(),
        alert_count,
        alert_count_class,
        alerts_html,
    }
}

fn render_alert(alert: &Alert) -> String {
    let (variant, heading) = if alert.is_critical() {
        ("danger", "Critical")
    } else {
        ("warning", "Warning")
    };

    format!(
        r#"<div class="alert alert-{variant} d-flex align-items-center shadow-sm mb-3" role="alert">
    <i class="fa-solid fa-triangle-exclamation me-3 fs-4"></i>
    <div>
        <strong>{heading}</strong>
        <div class="small">{msg}</div>
    </div>
</div>"#,
        variant = variant,
        heading = heading,
        msg = html_escape(&alert.msg),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{Node, Server};

    fn alert(kind: &str, msg: &str) -> Alert {
        Alert {
            kind: kind.to_string(),
            msg: msg.to_string(),
        }
    }

    #[test]
    fn test_empty_alerts_render_healthy_message() {
        let overview = render_overview(&StatusSnapshot::default());
        assert_eq!(overview.alerts_html, HEALTHY_MESSAGE);
        assert_eq!(overview.alert_count, 0);
        assert!(overview.alert_count_class.contains("text-success"));
    }

    #[test]
    fn test_counts_follow_snapshot() {
        let mut snapshot = StatusSnapshot::default();
        snapshot.inference = vec![Node::default(), Node::default()];
        snapshot
            .servers
            .insert("10.0.0.1".to_string(), Server::default());
        snapshot.alerts = vec![alert("crit", "db down")];

        let overview = render_overview(&snapshot);
        assert_eq!(overview.inference_count, 2);
        assert_eq!(overview.server_count, 1);
        assert_eq!(overview.alert_count, 1);
        assert!(overview.alert_count_class.contains("text-danger"));
    }

    #[test]
    fn test_alert_severity_mapping() {
        let mut snapshot = StatusSnapshot::default();
        snapshot.alerts = vec![alert("crit", "master unreachable"), alert("warn", "disk 91%")];

        let html = render_overview(&snapshot).alerts_html;
        assert!(html.contains("alert-danger"));
        assert!(html.contains("Critical"));
        assert!(html.contains("alert-warning"));
        assert!(html.contains("disk 91%"));
        assert!(!html.contains("All systems operational"));
    }

    #[test]
    fn test_unrecognized_alert_type_is_warning() {
        let mut snapshot = StatusSnapshot::default();
        snapshot.alerts = vec![alert("", "odd")];

        let html = render_overview(&snapshot).alerts_html;
        assert!(html.contains("alert-warning"));
        assert!(!html.contains("alert-danger"));
    }

    #[test]
    fn test_alert_message_escaped() {
        let mut snapshot = StatusSnapshot::default();
        snapshot.alerts = vec![alert("crit", "<script>alert(1)</script>")];

        let html = render_overview(&snapshot).alerts_html;
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}

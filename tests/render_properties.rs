//! Property-based tests for the fragment renderers and view switching

use opsboard::render::overview::{render_overview, HEALTHY_MESSAGE};
use opsboard::render::{
    delay_health, html_escape, progress_level, render_inference_grid, render_server_rows,
    render_slaves, truncate_chars, DelayHealth, ProgressLevel,
};
use opsboard::status::{Alert, Node, Server, SlaveInfo, StatusSnapshot};
use opsboard::view::{View, ViewController, FALLBACK_TITLE};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn ipv4() -> impl Strategy<Value = String> {
    (1u8..=254, 0u8..=255, 0u8..=255, 1u8..=254)
        .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d))
}

proptest! {
    #[test]
    fn prop_escaped_text_has_no_markup(s in ".*") {
        let escaped = html_escape(&s);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
    }

    #[test]
    fn prop_truncate_keeps_short_text(s in "\\PC{0,50}") {
        prop_assert_eq!(truncate_chars(&s, 50), s);
    }

    #[test]
    fn prop_truncate_marks_cut_text(s in "\\PC{51,120}") {
        let cut = truncate_chars(&s, 50);
        prop_assert!(cut.ends_with("..."));
        prop_assert_eq!(cut.chars().count(), 53);
        prop_assert!(s.starts_with(&cut[..cut.len() - 3]));
    }

    #[test]
    fn prop_progress_level_bands(value in -10.0f64..200.0) {
        let expected = if value > 85.0 {
            ProgressLevel::High
        } else if value > 60.0 {
            ProgressLevel::Medium
        } else {
            ProgressLevel::Normal
        };
        prop_assert_eq!(progress_level(value), expected);
    }

    #[test]
    fn prop_negative_delay_is_unknown(delay in i64::MIN..0) {
        prop_assert_eq!(delay_health(delay), DelayHealth::Unknown);
    }

    #[test]
    fn prop_known_delay_bands(delay in 0i64..100_000) {
        let expected = match delay {
            0 => DelayHealth::Healthy,
            1..=60 => DelayHealth::Warning,
            _ => DelayHealth::Critical,
        };
        prop_assert_eq!(delay_health(delay), expected);
    }

    #[test]
    fn prop_only_ready_nodes_are_healthy(status in "[a-z_0-9]{1,12}") {
        let node = Node {
            name: "node".to_string(),
            url: "http://10.0.0.1:30000".to_string(),
            status: status.clone(),
            latency: 1.0,
        };
        let html = render_inference_grid(&[node]);
        if status == "ready" {
            prop_assert!(html.contains("border-success"));
        } else {
            prop_assert!(html.contains("border-danger"));
            prop_assert!(!html.contains("border-success"));
        }
    }

    #[test]
    fn prop_slave_healthy_only_when_both_threads_yes(
        io in prop_oneof![Just("Yes"), Just("No"), Just("Connecting"), Just("")],
        sql in prop_oneof![Just("Yes"), Just("No"), Just("")],
    ) {
        let slave = SlaveInfo {
            ip: "10.0.0.21".to_string(),
            io: io.to_string(),
            sql: sql.to_string(),
            delay: 0,
            ..SlaveInfo::default()
        };
        let html = render_slaves(&[slave]);
        let healthy = io == "Yes" && sql == "Yes";
        prop_assert_eq!(html.contains("border-4 border-success"), healthy);
        prop_assert_eq!(html.contains("border-4 border-danger"), !healthy);
    }

    #[test]
    fn prop_alert_counter_reflects_alerts(
        kinds in proptest::collection::vec(prop_oneof![Just("crit"), Just("warn")], 0..8)
    ) {
        let snapshot = StatusSnapshot {
            alerts: kinds
                .iter()
                .map(|k| Alert { kind: k.to_string(), msg: "m".to_string() })
                .collect(),
            ..StatusSnapshot::default()
        };

        let overview = render_overview(&snapshot);

        prop_assert_eq!(overview.alert_count, kinds.len());
        if kinds.is_empty() {
            prop_assert_eq!(overview.alerts_html.as_str(), HEALTHY_MESSAGE);
            prop_assert!(overview.alert_count_class.contains("text-success"));
        } else {
            prop_assert!(overview.alert_count_class.contains("text-danger"));
            prop_assert_eq!(
                overview.alerts_html.matches("alert-danger").count(),
                kinds.iter().filter(|k| **k == "crit").count()
            );
        }
    }

    #[test]
    fn prop_server_rows_follow_ip_order(ips in proptest::collection::btree_set(ipv4(), 1..10)) {
        let servers: BTreeMap<String, Server> = ips
            .iter()
            .map(|ip| {
                (
                    ip.clone(),
                    Server {
                        ip: ip.clone(),
                        status: "online".to_string(),
                        ..Server::default()
                    },
                )
            })
            .collect();

        let html = render_server_rows(&servers);

        let positions: Vec<usize> = ips
            .iter()
            .map(|ip| html.find(&format!(">{}<", ip)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_unknown_view_keeps_visible_panel(
        start in prop_oneof![Just("overview"), Just("inference"), Just("database"), Just("servers")],
        name in "[a-z]{1,12}",
    ) {
        let mut views = ViewController::new();
        views.switch(start);
        let before = views.visible();

        let state = views.switch(&name);

        prop_assert_eq!(state.current, name.clone());
        match View::from_name(&name) {
            Some(view) => {
                prop_assert_eq!(state.visible, Some(view));
                prop_assert_eq!(state.title.as_str(), view.title());
            }
            None => {
                prop_assert_eq!(state.visible, before);
                prop_assert_eq!(state.title.as_str(), FALLBACK_TITLE);
            }
        }
    }
}

//! Output formatting helpers for CLI commands

use crate::render::servers::{progress_level, ProgressLevel};
use crate::render::topology::{delay_health, delay_text, DelayHealth};
use crate::render::{repl::format_error_time, truncate_chars};
use crate::render::details::SQL_PREVIEW_CHARS;
use crate::status::{DbDetails, DbTopology, ReplErrorReport, StatusSnapshot};
use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::fmt::Write;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn percent(value: f64) -> ColoredString {
    let text = format!("{:.1}%", value);
    match progress_level(value) {
        ProgressLevel::High => text.red(),
        ProgressLevel::Medium => text.yellow(),
        ProgressLevel::Normal => text.normal(),
    }
}

fn thread_state(state: &str) -> ColoredString {
    if state == "Yes" {
        state.green()
    } else if state.is_empty() {
        "-".red()
    } else {
        state.red()
    }
}

fn delay(delay: i64) -> ColoredString {
    let text = delay_text(delay);
    match delay_health(delay) {
        DelayHealth::Healthy => text.green(),
        DelayHealth::Warning => text.yellow(),
        DelayHealth::Critical => text.red(),
        DelayHealth::Unknown => text.dimmed(),
    }
}

/// Snapshot as summary lines plus inference and server tables.
pub fn format_status_pretty(snapshot: &StatusSnapshot) -> String {
    let mut output = String::new();

    writeln!(output, "Updated: {}", snapshot.time).unwrap();
    writeln!(
        output,
        "Inference nodes: {}  Servers: {}  Alerts: {}",
        snapshot.inference.len(),
        snapshot.servers.len(),
        if snapshot.alerts.is_empty() {
            "0".green()
        } else {
            snapshot.alerts.len().to_string().red()
        }
    )
    .unwrap();

    if snapshot.alerts.is_empty() {
        writeln!(output, "{}", "All systems normal".green()).unwrap();
    } else {
        writeln!(output).unwrap();
        for alert in &snapshot.alerts {
            let label = if alert.is_critical() {
                "CRIT".red().bold()
            } else {
                "WARN".yellow().bold()
            };
            writeln!(output, "  {} {}", label, alert.msg).unwrap();
        }
    }

    let mut nodes = table(vec!["Node", "URL", "Status", "Latency"]);
    for node in &snapshot.inference {
        let status = if node.is_ready() {
            node.status.green()
        } else {
            node.status.red()
        };
        nodes.add_row(vec![
            Cell::new(&node.name),
            Cell::new(&node.url),
            Cell::new(status),
            Cell::new(format!("{}ms", node.latency)),
        ]);
    }
    writeln!(output).unwrap();
    writeln!(output, "{}", nodes).unwrap();

    let mut servers = table(vec!["IP", "Status", "CPU", "Memory", "Disk", "Uptime"]);
    for server in snapshot.servers.values() {
        let status = if server.is_online() {
            "online".green()
        } else {
            "offline".red()
        };
        servers.add_row(vec![
            Cell::new(&server.ip),
            Cell::new(status),
            Cell::new(percent(server.cpu)),
            Cell::new(percent(server.mem)),
            Cell::new(format!("{:.1}%", server.disk)),
            Cell::new(&server.uptime),
        ]);
    }
    writeln!(output).unwrap();
    write!(output, "{}", servers).unwrap();

    output
}

/// Skipped replication errors, or a one-line all-clear.
pub fn format_repl_errors_pretty(report: &ReplErrorReport, hours: u32) -> String {
    if report.count == 0 {
        return format!(
            "{}",
            format!("No skipped replication errors in the last {} hours.", hours).green()
        );
    }

    let mut errors = table(vec!["Time", "Slave", "Code", "Position", "Message"]);
    for err in &report.errors {
        errors.add_row(vec![
            Cell::new(format_error_time(&err.error_time)),
            Cell::new(&err.slave_ip),
            Cell::new(err.error_code),
            Cell::new(format!("{}:{}", err.master_log_file, err.master_log_pos)),
            Cell::new(&err.error_msg),
        ]);
    }
    format!(
        "{}\n{}",
        format!(
            "{} skipped replication errors in the last {} hours",
            report.count, hours
        )
        .yellow(),
        errors
    )
}

/// Master summary followed by one row per slave.
pub fn format_topology_pretty(topology: &DbTopology) -> String {
    let mut output = String::new();
    let master = &topology.master;

    let connection = if master.connected {
        "connected".green()
    } else {
        "error".red()
    };
    writeln!(output, "Master {} ({})", master.ip.bold(), connection).unwrap();
    writeln!(
        output,
        "  Connections: {} / {}   QPS: {}",
        master.conn_curr, master.conn_max, master.qps
    )
    .unwrap();
    writeln!(
        output,
        "  Binlog: {}:{}",
        master.file.as_deref().filter(|f| !f.is_empty()).unwrap_or("N/A"),
        master.pos.unwrap_or(0)
    )
    .unwrap();
    if let Some(err) = master.error.as_deref() {
        writeln!(output, "  {}", err.red()).unwrap();
    }
    writeln!(output).unwrap();

    if topology.slaves.is_empty() {
        write!(output, "No slaves configured").unwrap();
        return output;
    }

    let mut slaves = table(vec!["Slave", "IO", "SQL", "Delay", "Error"]);
    for slave in &topology.slaves {
        let ip = if slave.is_replicating() {
            slave.ip.green()
        } else {
            slave.ip.red()
        };
        slaves.add_row(vec![
            Cell::new(ip),
            Cell::new(thread_state(&slave.io)),
            Cell::new(thread_state(&slave.sql)),
            Cell::new(delay(slave.delay)),
            Cell::new(slave.error.as_deref().unwrap_or("")),
        ]);
    }
    write!(output, "{}", slaves).unwrap();
    output
}

/// Drilldown sections in the same order as the overlay.
pub fn format_details_pretty(ip: &str, details: &DbDetails) -> String {
    let mut output = String::new();
    writeln!(output, "Details for {}", ip.bold()).unwrap();

    if let Some(innodb) = details.innodb.as_ref().filter(|i| !i.is_empty()) {
        writeln!(output).unwrap();
        writeln!(output, "{}", "InnoDB buffer pool".cyan()).unwrap();
        let size = innodb
            .buffer_pool_mb
            .map(|mb| format!("{} MB", mb))
            .unwrap_or_else(|| "N/A".to_string());
        writeln!(output, "  Size: {}", size).unwrap();
        writeln!(
            output,
            "  Hit rate: {}",
            innodb.hit_rate.as_deref().unwrap_or("N/A")
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "{}", "Slow queries (top 5)".yellow()).unwrap();
    if details.slow_queries.is_empty() {
        writeln!(output, "  No slow queries recorded").unwrap();
    } else {
        let mut queries = table(vec!["Time", "Rows sent", "SQL"]);
        for q in &details.slow_queries {
            let sql = q
                .sql_text
                .as_deref()
                .map(|s| truncate_chars(s, SQL_PREVIEW_CHARS))
                .unwrap_or_else(|| "N/A".to_string());
            queries.add_row(vec![
                Cell::new(format!("{:.4}s", q.time)),
                Cell::new(q.rows_sent),
                Cell::new(sql),
            ]);
        }
        writeln!(output, "{}", queries).unwrap();
    }

    if !details.tables.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "{}", "Largest tables (top 5)".cyan()).unwrap();
        let mut tables = table(vec!["Database", "Table", "Size (MB)"]);
        for t in &details.tables {
            tables.add_row(vec![
                Cell::new(&t.db),
                Cell::new(&t.tb),
                Cell::new(format!("{:.2}", t.size_mb)),
            ]);
        }
        write!(output, "{}", tables).unwrap();
    }

    output
}

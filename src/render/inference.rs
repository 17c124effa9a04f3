//! Inference node grid.

use super::html_escape;
use crate::status::Node;

/// One card per node. Health is binary: only `status == "ready"` is healthy.
pub fn render_inference_grid(nodes: &[Node]) -> String {
    nodes.iter().map(render_node).collect::<Vec<_>>().join("\n")
}

fn render_node(node: &Node) -> String {
    let (border, badge, icon) = if node.is_ready() {
        ("border-success", "bg-success", "text-success")
    } else {
        ("border-danger", "bg-danger", "text-danger")
    };

    format!(
        r#"<div class="col">
    <div class="card h-100 shadow-sm border-top border-3 {border}">
        <div class="card-body">
            <div class="d-flex justify-content-between align-items-center mb-2">
                <h6 class="card-title fw-bold m-0 text-dark">{name}</h6>
                <i class="fa-solid fa-circle {icon}" style="font-size:10px"></i>
            </div>
            <p class="card-text text-muted small font-monospace mb-3 bg-light p-1 rounded">{url}</p>
            <div class="d-flex justify-content-between align-items-center border-top pt-2 mt-2">
                <span class="badge {badge} rounded-pill">{status}</span>
                <span class="text-muted small"><i class="fa-regular fa-clock"></i> {latency}ms</span>
            </div>
        </div>
    </div>
</div>"#,
        border = border,
        icon = icon,
        badge = badge,
        name = html_escape(&node.name),
        url = html_escape(&node.url),
        status = html_escape(&node.status),
        latency = node.latency,
    )
}

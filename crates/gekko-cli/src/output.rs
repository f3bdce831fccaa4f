//! Plain-text formatting for command output.

use std::fmt::Write as _;

use gekko_api::{FlowRun, WebhookEvent};

/// Truncate to `max` characters with a `...` tail.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Fixed-width table of webhook events, header first.
pub(crate) fn webhook_table(events: &[WebhookEvent]) -> String {
    let mut table = String::new();
    let _ = writeln!(
        table,
        "{:<24} {:<25} {:<15} {}",
        "EVENT ID", "TYPE", "CREATED AT", "DATA"
    );
    let _ = writeln!(table, "{}", "─".repeat(80));
    for event in events {
        let data = serde_json::to_string(&event.data).unwrap_or_default();
        // chrono's DelayedFormat ignores width specs; pad a rendered String.
        let created = event.created_at.format("%b %d %H:%M").to_string();
        let _ = writeln!(
            table,
            "{:<24} {:<25} {created:<15} {}",
            event.id,
            event.event_type,
            truncate(&data, 30),
        );
    }
    table
}

/// One-screen summary of a flow run.
pub(crate) fn flow_summary(flow: &FlowRun) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Flow {} ({}): {}", flow.id, flow.name, flow.status);
    if flow.steps.is_empty() {
        let _ = writeln!(out, "  no steps recorded");
        return out;
    }
    let _ = writeln!(out, "Steps:");
    for step in &flow.steps {
        let _ = writeln!(out, "  {:<20} {:<12} {}", step.id, step.step_type, step.status);
    }
    out
}

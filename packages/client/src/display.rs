//! Rendering of server events for the terminal.

use serde_json::Value;
use verdant_server::infrastructure::dto::websocket::OutboundMessage;
use verdant_shared::time::timestamp_to_local_clock;

/// Render one event as a single line prefixed with its local time.
pub fn format_event(event: &OutboundMessage) -> String {
    let data = &event.data;
    let body = match event.r#type.as_str() {
        "activity.logged" => format!(
            "{} logged {} {} of {} ({} kg CO2e)",
            text(data, "display_name"),
            number(data, "quantity"),
            text(data, "unit"),
            text(data, "category"),
            number(data, "impact"),
        ),
        "recommendation.updated" => {
            let titles: Vec<&str> = data["recommendations"]
                .as_array()
                .map(|items| items.iter().filter_map(|r| r["title"].as_str()).collect())
                .unwrap_or_default();
            format!(
                "tips for {}: {}",
                text(data, "category"),
                titles.join("; ")
            )
        }
        "goal.updated" => format!(
            "goal set: {} {} {}",
            text(data, "category"),
            number(data, "target"),
            text(data, "timeframe"),
        ),
        "webinar_joined" => format!(
            "{} joined webinar {}",
            text(data, "display_name"),
            text(data, "webinar_id")
        ),
        "webinar_left" => format!(
            "{} left webinar {}",
            text(data, "display_name"),
            text(data, "webinar_id")
        ),
        "new_webinar_message" => format!(
            "[webinar {}] {}: {}",
            text(data, "webinar_id"),
            text(data, "sender_name"),
            text(data, "message_text"),
        ),
        "error" => format!("error: {}", text(data, "message")),
        other => format!("{other} {data}"),
    };
    format!("[{}] {}", timestamp_to_local_clock(event.timestamp), body)
}

fn text<'a>(data: &'a Value, key: &str) -> &'a str {
    data[key].as_str().unwrap_or("?")
}

fn number(data: &Value, key: &str) -> String {
    data[key]
        .as_f64()
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string())
}

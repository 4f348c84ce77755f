//! Landing page (`GET /`).
//!
//! Serves HTML for the first `max_requests` visits, then answers one request
//! with 503 `max_requests_reached` and starts over.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use rrdemo_core::record::LogEvent;
use rrdemo_core::{ServiceIdentity, Visit};

use crate::app_state::AppState;
use crate::context::RequestInfo;

pub const HOME_MESSAGE: &str = "HOME endpoint accessed";

#[derive(Debug, Serialize)]
pub struct OverflowBody {
    pub app: String,
    pub container: u32,
    pub container_id: String,
    pub status: &'static str,
    pub message: String,
}

pub async fn home(State(state): State<AppState>, RequestInfo(meta): RequestInfo) -> Response {
    let visit = state.counter().visit();
    let observed = visit.observed();
    let max = state.counter().max();

    state.log_with_counter(
        LogEvent::info(HOME_MESSAGE)
            .request(meta)
            .field("request_number", observed)
            .field(
                "status",
                if visit.is_overflow() { "redirecting" } else { "handling" },
            ),
        observed,
    );

    let id = state.identity();
    match visit {
        Visit::Served { number } => Html(render_page(id, number, max)).into_response(),
        Visit::Overflow { .. } => {
            let container = id.container_number.to_string();
            state
                .metrics()
                .overflows
                .inc(&[("container", container.as_str())]);
            tracing::debug!(observed, max, "max requests reached, counter reset");

            let body = OverflowBody {
                app: id.app_name.clone(),
                container: id.container_number,
                container_id: id.container_id.clone(),
                status: "max_requests_reached",
                message: format!(
                    "Container {} handled {} requests, redirecting to next container",
                    id.container_number, max
                ),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(id: &ServiceIdentity, number: u32, max: u32) -> String {
    let name = escape_html(&id.display_name());
    let color = escape_html(&id.color);
    let container_id = escape_html(&id.container_id);
    let n = id.container_number;
    let next = id.next_container();

    format!(
        r#"<html>
<head>
    <title>{name} - Container {n}</title>
    <style>
        body {{
            background: {color};
            color: white;
            font-family: Arial, sans-serif;
            height: 100vh;
            display: flex;
            justify-content: center;
            align-items: center;
            flex-direction: column;
            margin: 0;
        }}
        .app-name {{
            font-size: 60px;
            font-weight: bold;
            margin-bottom: 20px;
        }}
        .container-info {{
            font-size: 30px;
            margin-bottom: 10px;
        }}
        .request-info {{
            font-size: 24px;
            margin-top: 20px;
            background: rgba(255,255,255,0.2);
            padding: 10px 20px;
            border-radius: 10px;
        }}
    </style>
</head>
<body>
    <div class="app-name">{name}</div>
    <div class="container-info">Container #{n}</div>
    <div class="container-info">ID: {container_id}</div>
    <div class="request-info">Request #{number} of {max} on this container</div>
    <div class="request-info">Next request will go to Container #{next}</div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_shows_counts_and_next_container() {
        let id = ServiceIdentity {
            app_name: "app2".into(),
            color: "#28a745".into(),
            container_number: 2,
            container_id: "<script>".into(),
            cluster_size: 3,
        };
        let page = render_page(&id, 2, 3);
        assert!(page.contains("<title>APP2 - Container 2</title>"));
        assert!(page.contains("Request #2 of 3 on this container"));
        assert!(page.contains("Next request will go to Container #3"));
        assert!(page.contains("ID: &lt;script&gt;"));
        assert!(page.contains("background: #28a745;"));
    }
}

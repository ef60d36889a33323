//! Recent-updates endpoint.
//!
//! GET /api/notifications

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use navstack_core::NotificationEvent;

use crate::state::AppState;

/// Response for GET /api/notifications.
///
/// An empty log answers with an explicit message object, distinct from
/// an empty array, which is what existing clients expect.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum NotificationsResponse {
    Empty { message: String },
    Events(Vec<NotificationEvent>),
}

/// GET /api/notifications - The bounded recent-updates log,
/// most recent first.
async fn list_notifications(State(state): State<AppState>) -> Json<NotificationsResponse> {
    let log = state.log().lock().await;
    if log.is_empty() {
        Json(NotificationsResponse::Empty {
            message: "no updates yet".to_string(),
        })
    } else {
        Json(NotificationsResponse::Events(log.events().to_vec()))
    }
}

/// Build notification routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/notifications", get(list_notifications))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn empty_marker_serializes_as_a_message_object() {
        let response = NotificationsResponse::Empty {
            message: "no updates yet".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "no updates yet");
    }

    #[test]
    fn events_serialize_as_a_plain_array() {
        let response = NotificationsResponse::Events(vec![NotificationEvent {
            title: "E1".to_string(),
            logo: "l".to_string(),
            url: "u".to_string(),
            description: "d".to_string(),
            date: Utc::now(),
        }]);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["title"], "E1");
    }
}

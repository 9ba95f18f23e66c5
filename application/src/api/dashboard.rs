//! Back-office dashboard REST handlers.

use axum::{extract::Query, Extension, Json};
use common::DateTime;
use serde::{Deserialize, Serialize};
use service::{
    query,
    read::activity::{Feed, Item},
    Query as _,
};

use crate::{AsError, Context, Error};

/// Default number of feed entries to return.
const DEFAULT_LIMIT: usize = 10;

/// Query parameters of [`activity`].
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ActivityParams {
    /// Maximum number of feed entries to return.
    limit: Option<usize>,
}

/// `GET /api/dashboard/activity` handler.
///
/// Merges the most recent properties, contacts and users into one feed,
/// newest first.
///
/// # Errors
///
/// - 500 on a storage failure.
pub async fn activity(
    Extension(ctx): Extension<Context>,
    Query(params): Query<ActivityParams>,
) -> Result<Json<ActivityResponse>, Error> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    let Feed { items } = ctx
        .service()
        .execute(query::reports::Activity::by(
            service::read::activity::Limit(limit),
        ))
        .await
        .map_err(AsError::into_error)?;

    let now = DateTime::now();
    let total = items.len();
    let data = items
        .into_iter()
        .take(limit)
        .map(|item| ActivityPayload::of(item, now))
        .collect();

    Ok(Json(ActivityResponse {
        success: true,
        data,
        total,
    }))
}

/// Envelope of the activity feed.
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    /// Always `true`.
    success: bool,

    /// Feed entries, newest first.
    data: Vec<ActivityPayload>,

    /// Size of the merged feed before truncation.
    total: usize,
}

/// JSON shape of a feed entry.
#[derive(Debug, Serialize)]
pub struct ActivityPayload {
    /// Stable identifier of the entry.
    id: String,

    /// Source of the entry: `property`, `contact` or `user`.
    #[serde(rename = "type")]
    source: String,

    /// Headline of the entry.
    title: String,

    /// Human-readable description of the entry.
    description: String,

    /// Humanized moment of the underlying event.
    time: String,

    /// Display hue: `success`, `warning` or `info`.
    status: String,
}

impl ActivityPayload {
    /// Converts the provided feed [`Item`], humanizing its moment relative
    /// to `now`.
    fn of(item: Item, now: DateTime) -> Self {
        Self {
            id: item.id,
            source: item.source.to_string(),
            title: item.title,
            description: item.description,
            time: format_time_ago(item.occurred_at, now),
            status: item.hue.to_string(),
        }
    }
}

/// Humanizes the provided moment relative to `now`, the way the public site
/// phrases it.
fn format_time_ago(moment: DateTime, now: DateTime) -> String {
    if moment >= now {
        return "À l'instant".to_owned();
    }

    let elapsed = now - moment;
    let minutes = elapsed.as_secs() / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "À l'instant".to_owned()
    } else if minutes < 60 {
        format!("Il y a {minutes} minute{}", if minutes > 1 { "s" } else { "" })
    } else if hours < 24 {
        format!("Il y a {hours} heure{}", if hours > 1 { "s" } else { "" })
    } else if days == 1 {
        "Il y a 1 jour".to_owned()
    } else if days < 7 {
        format!("Il y a {days} jours")
    } else {
        let date = moment.day_key();
        // `YYYY-MM-DD` to the french `DD/MM/YYYY`.
        let mut parts = date.split('-');
        let year = parts.next().unwrap_or_default();
        let month = parts.next().unwrap_or_default();
        let day = parts.next().unwrap_or_default();
        format!("{day}/{month}/{year}")
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use super::format_time_ago;

    #[test]
    fn humanizes_recent_moments() {
        let now = DateTime::from_rfc3339("2024-03-07T12:00:00Z").unwrap();

        let ago = |secs| format_time_ago(now - Duration::from_secs(secs), now);

        assert_eq!(ago(30), "À l'instant");
        assert_eq!(ago(60), "Il y a 1 minute");
        assert_eq!(ago(180), "Il y a 3 minutes");
        assert_eq!(ago(3600), "Il y a 1 heure");
        assert_eq!(ago(7200), "Il y a 2 heures");
        assert_eq!(ago(86_400), "Il y a 1 jour");
        assert_eq!(ago(3 * 86_400), "Il y a 3 jours");
    }

    #[test]
    fn falls_back_to_a_date_after_a_week() {
        let now = DateTime::from_rfc3339("2024-03-07T12:00:00Z").unwrap();
        let moment = DateTime::from_rfc3339("2024-02-20T09:00:00Z").unwrap();

        assert_eq!(format_time_ago(moment, now), "20/02/2024");
    }
}

//! Analytics REST handlers.

use std::{collections::BTreeMap, time::Duration};

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
    Extension, Json,
};
use common::DateTime;
use serde::{Deserialize, Serialize};
use service::{
    query,
    read::analytics::{
        Bucket, ContactsReport, Overview, PropertiesReport, TimePoint,
        UsersReport, Window,
    },
    Query as _,
};

use crate::{AsError, Context, Error};

/// Query parameters of [`index`].
#[derive(Debug, Deserialize)]
pub struct Params {
    /// Reporting period: `week`, `month` (default) or `year`.
    period: Option<String>,

    /// Report type: `overview` (default), `properties`, `users` or
    /// `contacts`.
    #[serde(rename = "type")]
    report: Option<String>,
}

/// `GET /api/analytics` handler.
///
/// Unknown `period` or `type` values fall back to the defaults.
///
/// # Errors
///
/// - 500 on a storage failure.
pub async fn index(
    Extension(ctx): Extension<Context>,
    Query(params): Query<Params>,
) -> Result<Response, Error> {
    let window = window(params.period.as_deref());

    match params.report.as_deref() {
        Some("properties") => {
            let report = ctx
                .service()
                .execute(query::reports::Properties::by(window))
                .await
                .map_err(AsError::into_error)?;
            Ok(Json(PropertiesResponse::of(report)).into_response())
        }
        Some("users") => {
            let report = ctx
                .service()
                .execute(query::reports::Users::by(window))
                .await
                .map_err(AsError::into_error)?;
            Ok(Json(UsersResponse::of(report)).into_response())
        }
        Some("contacts") => {
            let report = ctx
                .service()
                .execute(query::reports::Contacts::by(window))
                .await
                .map_err(AsError::into_error)?;
            Ok(Json(ContactsResponse::of(report)).into_response())
        }
        Some(_) | None => {
            let overview = ctx
                .service()
                .execute(query::reports::Overview::by(window))
                .await
                .map_err(AsError::into_error)?;
            Ok(Json(OverviewResponse::of(overview)).into_response())
        }
    }
}

/// Resolves the reporting [`Window`] of the provided period.
fn window(period: Option<&str>) -> Window {
    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    let (length, bucket) = match period {
        Some("week") => (7, Bucket::Day),
        Some("year") => (365, Bucket::Month),
        Some(_) | None => (30, Bucket::Day),
    };
    Window {
        start: DateTime::now() - DAY * length,
        bucket,
    }
}

/// Envelope of the site-wide overview.
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    /// Always `true`.
    success: bool,

    /// The report itself.
    data: OverviewData,
}

/// Body of an [`OverviewResponse`].
#[derive(Debug, Serialize)]
struct OverviewData {
    /// Headline counters.
    overview: OverviewCounters,

    /// Chart series.
    charts: OverviewCharts,
}

/// Headline counters of the overview.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OverviewCounters {
    /// Total number of properties.
    total_properties: usize,

    /// Number of published properties.
    active_properties: usize,

    /// Total number of users.
    total_users: usize,

    /// Total number of contacts.
    total_contacts: usize,

    /// Number of contacts within the period.
    recent_contacts: usize,

    /// Sum of the view counters.
    total_views: u64,
}

/// Chart series of the overview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OverviewCharts {
    /// Properties per kind.
    properties_by_type: BTreeMap<String, usize>,

    /// Users per role.
    users_by_role: BTreeMap<String, usize>,
}

impl OverviewResponse {
    /// Wraps the provided [`Overview`].
    fn of(overview: Overview) -> Self {
        let Overview {
            total_properties,
            active_properties,
            total_users,
            total_contacts,
            recent_contacts,
            total_views,
            properties_by_kind,
            users_by_role,
        } = overview;
        Self {
            success: true,
            data: OverviewData {
                overview: OverviewCounters {
                    total_properties,
                    active_properties,
                    total_users,
                    total_contacts,
                    recent_contacts,
                    total_views,
                },
                charts: OverviewCharts {
                    properties_by_type: properties_by_kind,
                    users_by_role,
                },
            },
        }
    }
}

/// Envelope of the properties report.
#[derive(Debug, Serialize)]
pub struct PropertiesResponse {
    /// Always `true`.
    success: bool,

    /// The report itself.
    data: PropertiesData,
}

/// Body of a [`PropertiesResponse`].
#[derive(Debug, Serialize)]
struct PropertiesData {
    /// Headline counters.
    overview: PropertiesCounters,

    /// Chart series.
    charts: PropertiesCharts,
}

/// Headline counters of the properties report.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertiesCounters {
    /// Number of properties created within the period.
    total_created: usize,

    /// Sum of the view counters of those properties.
    total_views: u64,
}

/// Chart series of the properties report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertiesCharts {
    /// Creations over time.
    properties_over_time: Vec<TimePointPayload>,

    /// Breakdown by kind.
    properties_by_type: BTreeMap<String, usize>,

    /// Breakdown by availability status.
    properties_by_status: BTreeMap<String, usize>,

    /// Average price per kind.
    avg_price_by_type: BTreeMap<String, i64>,
}

impl PropertiesResponse {
    /// Wraps the provided [`PropertiesReport`].
    fn of(report: PropertiesReport) -> Self {
        let PropertiesReport {
            total_created,
            total_views,
            over_time,
            by_kind,
            by_status,
            avg_price_by_kind,
        } = report;
        Self {
            success: true,
            data: PropertiesData {
                overview: PropertiesCounters {
                    total_created,
                    total_views,
                },
                charts: PropertiesCharts {
                    properties_over_time: over_time
                        .into_iter()
                        .map(Into::into)
                        .collect(),
                    properties_by_type: by_kind,
                    properties_by_status: by_status,
                    avg_price_by_type: avg_price_by_kind,
                },
            },
        }
    }
}

/// Envelope of the users report.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    /// Always `true`.
    success: bool,

    /// The report itself.
    data: UsersData,
}

/// Body of a [`UsersResponse`].
#[derive(Debug, Serialize)]
struct UsersData {
    /// Headline counters.
    overview: CreatedCounter,

    /// Chart series.
    charts: UsersCharts,
}

/// Chart series of the users report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UsersCharts {
    /// Sign-ups over time.
    users_over_time: Vec<TimePointPayload>,

    /// Breakdown by role.
    users_by_role: BTreeMap<String, usize>,
}

impl UsersResponse {
    /// Wraps the provided [`UsersReport`].
    fn of(report: UsersReport) -> Self {
        let UsersReport {
            total_created,
            over_time,
            by_role,
        } = report;
        Self {
            success: true,
            data: UsersData {
                overview: CreatedCounter { total_created },
                charts: UsersCharts {
                    users_over_time: over_time
                        .into_iter()
                        .map(Into::into)
                        .collect(),
                    users_by_role: by_role,
                },
            },
        }
    }
}

/// Envelope of the contacts report.
#[derive(Debug, Serialize)]
pub struct ContactsResponse {
    /// Always `true`.
    success: bool,

    /// The report itself.
    data: ContactsData,
}

/// Body of a [`ContactsResponse`].
#[derive(Debug, Serialize)]
struct ContactsData {
    /// Headline counters.
    overview: CreatedCounter,

    /// Chart series.
    charts: ContactsCharts,
}

/// Chart series of the contacts report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactsCharts {
    /// Messages over time.
    contacts_over_time: Vec<TimePointPayload>,

    /// Breakdown by workflow status.
    contacts_by_status: BTreeMap<String, usize>,
}

impl ContactsResponse {
    /// Wraps the provided [`ContactsReport`].
    fn of(report: ContactsReport) -> Self {
        let ContactsReport {
            total_created,
            over_time,
            by_status,
        } = report;
        Self {
            success: true,
            data: ContactsData {
                overview: CreatedCounter { total_created },
                charts: ContactsCharts {
                    contacts_over_time: over_time
                        .into_iter()
                        .map(Into::into)
                        .collect(),
                    contacts_by_status: by_status,
                },
            },
        }
    }
}

/// Headline counter shared by the users and contacts reports.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedCounter {
    /// Number of entities created within the period.
    total_created: usize,
}

/// JSON shape of a time series point.
#[derive(Debug, Serialize)]
struct TimePointPayload {
    /// Bucket key, `YYYY-MM-DD` or `YYYY-MM`.
    date: String,

    /// Number of events within the bucket.
    count: usize,
}

impl From<TimePoint> for TimePointPayload {
    fn from(point: TimePoint) -> Self {
        Self {
            date: point.date,
            count: point.count,
        }
    }
}

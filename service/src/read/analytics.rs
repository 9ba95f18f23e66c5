//! Analytics report definitions.

use std::collections::BTreeMap;

use common::DateTime;

/// Reporting window of an analytics query.
#[derive(Clone, Copy, Debug)]
pub struct Window {
    /// Start of the window; everything created at or after it is counted.
    pub start: DateTime,

    /// Granularity of the time series.
    pub bucket: Bucket,
}

/// Granularity of an analytics time series.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Bucket {
    /// Daily buckets, keyed `YYYY-MM-DD`.
    Day,

    /// Monthly buckets, keyed `YYYY-MM`.
    Month,
}

impl Bucket {
    /// Returns the bucket key of the provided [`DateTime`].
    #[must_use]
    pub fn key(self, dt: DateTime) -> String {
        match self {
            Self::Day => dt.day_key(),
            Self::Month => dt.month_key(),
        }
    }
}

/// Single point of an analytics time series.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimePoint {
    /// Bucket key of this [`TimePoint`].
    pub date: String,

    /// Number of events within the bucket.
    pub count: usize,
}

/// Builds an ascending time series out of event moments.
#[must_use]
pub fn time_series(
    bucket: Bucket,
    moments: impl IntoIterator<Item = DateTime>,
) -> Vec<TimePoint> {
    let mut buckets = BTreeMap::<String, usize>::new();
    for moment in moments {
        *buckets.entry(bucket.key(moment)).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(date, count)| TimePoint { date, count })
        .collect()
}

/// Site-wide analytics overview.
#[derive(Clone, Debug, Default)]
pub struct Overview {
    /// Total number of properties.
    pub total_properties: usize,

    /// Number of published properties.
    pub active_properties: usize,

    /// Total number of users.
    pub total_users: usize,

    /// Total number of contacts.
    pub total_contacts: usize,

    /// Number of contacts created within the [`Window`].
    pub recent_contacts: usize,

    /// Sum of the view counters over every property.
    pub total_views: u64,

    /// Number of properties per kind.
    pub properties_by_kind: BTreeMap<String, usize>,

    /// Number of users per role.
    pub users_by_role: BTreeMap<String, usize>,
}

/// Analytics of the properties created within a [`Window`].
#[derive(Clone, Debug, Default)]
pub struct PropertiesReport {
    /// Number of properties created within the [`Window`].
    pub total_created: usize,

    /// Sum of the view counters of those properties.
    pub total_views: u64,

    /// Creations over time.
    pub over_time: Vec<TimePoint>,

    /// Breakdown by property kind.
    pub by_kind: BTreeMap<String, usize>,

    /// Breakdown by availability status.
    pub by_status: BTreeMap<String, usize>,

    /// Average price per property kind, rounded to a whole amount.
    pub avg_price_by_kind: BTreeMap<String, i64>,
}

/// Analytics of the users created within a [`Window`].
#[derive(Clone, Debug, Default)]
pub struct UsersReport {
    /// Number of users created within the [`Window`].
    pub total_created: usize,

    /// Sign-ups over time.
    pub over_time: Vec<TimePoint>,

    /// Breakdown by role.
    pub by_role: BTreeMap<String, usize>,
}

/// Analytics of the contacts created within a [`Window`].
#[derive(Clone, Debug, Default)]
pub struct ContactsReport {
    /// Number of contacts created within the [`Window`].
    pub total_created: usize,

    /// Messages over time.
    pub over_time: Vec<TimePoint>,

    /// Breakdown by workflow status.
    pub by_status: BTreeMap<String, usize>,
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{time_series, Bucket, TimePoint};

    fn dt(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    #[test]
    fn daily_series_is_sorted_and_grouped() {
        let series = time_series(
            Bucket::Day,
            [
                dt("2024-03-07T10:00:00Z"),
                dt("2024-03-05T08:00:00Z"),
                dt("2024-03-07T23:59:59Z"),
            ],
        );
        assert_eq!(
            series,
            [
                TimePoint {
                    date: "2024-03-05".into(),
                    count: 1,
                },
                TimePoint {
                    date: "2024-03-07".into(),
                    count: 2,
                },
            ],
        );
    }

    #[test]
    fn monthly_series_buckets_by_month() {
        let series = time_series(
            Bucket::Month,
            [
                dt("2024-01-15T00:00:00Z"),
                dt("2024-01-31T00:00:00Z"),
                dt("2024-02-01T00:00:00Z"),
            ],
        );
        assert_eq!(
            series,
            [
                TimePoint {
                    date: "2024-01".into(),
                    count: 2,
                },
                TimePoint {
                    date: "2024-02".into(),
                    count: 1,
                },
            ],
        );
    }
}

//! Activity feed model, filtering, and route fitting.
//!
//! Activities arrive as JSON records from the feed; each may carry an encoded
//! route under `map.summary_polyline`. This module decodes routes per
//! activity, filters by year and recency, and derives the bounds + zoom
//! directive the map widget uses to frame them. A bad route is skipped with a
//! warning, never failing the batch.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::polyline::{self, LngLat, Polyline};
use crate::viewport::{Bounds, ZoomDirective, ZoomPolicy, bounds_of};

/// Fallback map center when no activity has a start location.
pub const DEFAULT_CENTER: LngLat = (121.588016, 31.113161);

/// Months an activity stays "recent" for bounds purposes.
const RECENT_WINDOW_MONTHS: u32 = 6;

/// Activity discipline, from the feed's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sport {
    Run,
    Ride,
    Walk,
    Hike,
    Swim,
    #[serde(other)]
    Other,
}

impl Sport {
    /// Route line color on the map.
    pub fn line_color(&self) -> &'static str {
        match self {
            Sport::Run | Sport::Other => "#ffb700",
            Sport::Ride => "#f59e0b",
            Sport::Walk => "#fbbf24",
            Sport::Hike => "#f97316",
            Sport::Swim => "#06b6d4",
        }
    }
}

/// Route attachment of an activity record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteMap {
    #[serde(default)]
    pub summary_polyline: Option<String>,
}

/// One activity record from the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub sport: Sport,
    /// Distance in meters.
    pub distance: f64,
    /// Moving time in seconds.
    pub moving_time: i64,
    #[serde(default)]
    pub average_heartrate: Option<f64>,
    /// Local wall-clock start time. The feed suffixes these with a vestigial
    /// `Z` even though they are already local.
    #[serde(default, deserialize_with = "deserialize_local_timestamp")]
    pub start_date_local: Option<NaiveDateTime>,
    /// Start point as [latitude, longitude], feed order.
    #[serde(default)]
    pub start_latlng: Option<[f64; 2]>,
    #[serde(default)]
    pub location_city: Option<String>,
    #[serde(default)]
    pub location_country: Option<String>,
    /// Display string like "(GMT+08:00) Asia/Shanghai".
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub map: Option<RouteMap>,
}

fn deserialize_local_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => parse_local_timestamp(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Parse a feed timestamp as local wall-clock time, tolerating the `Z`
/// suffix the feed appends.
pub fn parse_local_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f")
}

impl Activity {
    /// Decode this activity's route, if it has one.
    ///
    /// Absent or empty route data yields `None`. A malformed polyline also
    /// yields `None` after logging a warning: one bad route must cost one
    /// skipped route, not the whole render.
    pub fn route(&self) -> Option<Polyline> {
        let encoded = self.map.as_ref()?.summary_polyline.as_deref()?;
        match polyline::decode5(encoded) {
            Ok(route) if route.is_empty() => None,
            Ok(route) => Some(route),
            Err(err) => {
                warn!(activity_id = self.id, %err, "skipping malformed route");
                None
            }
        }
    }

    /// Calendar year of the local start date.
    pub fn year(&self) -> Option<i32> {
        self.start_date_local.map(|dt| dt.year())
    }

    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }

    /// Moving pace in seconds per kilometer, `None` for zero distance.
    pub fn pace_seconds_per_km(&self) -> Option<f64> {
        let km = self.distance_km();
        (km > 0.0).then(|| self.moving_time as f64 / km)
    }
}

/// Which slice of the feed the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFilter {
    All,
    Year(i32),
}

impl YearFilter {
    pub fn matches(&self, activity: &Activity) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(year) => activity.year() == Some(*year),
        }
    }

    /// Whether this filter counts as recent context for the zoom boost.
    /// The all-time view and the current calendar year both do.
    pub fn is_recent_context(&self, today: NaiveDate) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(year) => *year == today.year(),
        }
    }
}

/// Activities whose local start falls within the trailing six months.
pub fn recent_activities<'a>(activities: &'a [Activity], now: NaiveDateTime) -> Vec<&'a Activity> {
    let Some(cutoff) = now.checked_sub_months(Months::new(RECENT_WINDOW_MONTHS)) else {
        return Vec::new();
    };
    activities
        .iter()
        .filter(|activity| matches!(activity.start_date_local, Some(start) if start >= cutoff))
        .collect()
}

/// Mean start point across activities, as (longitude, latitude).
///
/// Falls back to [`DEFAULT_CENTER`] when no activity carries a start point.
pub fn map_center(activities: &[Activity]) -> LngLat {
    let mut count = 0usize;
    let mut lat_sum = 0.0;
    let mut lng_sum = 0.0;

    for activity in activities {
        if let Some([lat, lng]) = activity.start_latlng {
            lat_sum += lat;
            lng_sum += lng;
            count += 1;
        }
    }

    if count == 0 {
        return DEFAULT_CENTER;
    }
    (lng_sum / count as f64, lat_sum / count as f64)
}

fn routes_bounds<'a, I>(activities: I) -> Option<Bounds>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let routes: Vec<Polyline> = activities
        .into_iter()
        .filter_map(|activity| activity.route())
        .collect();
    bounds_of(&routes)
}

/// Frame the filtered view of the feed.
///
/// Bounds come from the trailing-six-months subset of the whole feed when it
/// has any routes, since the recent area is where the viewer actually is;
/// otherwise from the filtered activities. `None` when neither has route
/// data, in which case the caller falls back to [`map_center`] at a default
/// zoom.
pub fn fit_routes(
    activities: &[Activity],
    filter: YearFilter,
    now: NaiveDateTime,
) -> Option<(Bounds, ZoomDirective)> {
    let bounds = match routes_bounds(recent_activities(activities, now)) {
        Some(bounds) => bounds,
        None => routes_bounds(activities.iter().filter(|a| filter.matches(a)))?,
    };

    let directive = ZoomPolicy::aggregate().fit(&bounds, filter.is_recent_context(now.date()));
    Some((bounds, directive))
}

/// Frame one selected route.
pub fn fit_single(activity: &Activity) -> Option<(Bounds, ZoomDirective)> {
    let route = activity.route()?;
    let bounds = bounds_of(std::slice::from_ref(&route))?;
    let directive = ZoomPolicy::single_route().fit(&bounds, false);
    Some((bounds, directive))
}

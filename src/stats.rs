//! Pre-aggregated yearly statistics for the dashboard sidebar.
//!
//! Mirrors the shape of the generated `stats.json`: per-year totals plus
//! highlight records for the longest and fastest activities of the year.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::activity::Activity;

/// Activities below this distance don't count toward yearly stats.
const MIN_DISTANCE_M: f64 = 1000.0;

/// Activities below this moving time don't count toward yearly stats.
const MIN_MOVING_TIME_S: i64 = 180;

/// Formatted details of one standout activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    /// Distance as "12.3 km".
    pub distance: String,
    /// Local start date as "MM/DD".
    pub date: String,
    /// Moving time as "H:MM:SS" or "MM:SS".
    pub duration: String,
    /// Pace as "M'SS\"".
    pub pace: String,
    pub city: String,
}

/// One year's aggregated statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStats {
    pub total_activities: u32,
    /// Kilometers, rounded to one decimal.
    pub total_distance: f64,
    pub avg_pace: String,
    pub best_pace: String,
    pub avg_heart_rate: Option<u32>,
    pub longest: Highlight,
    pub fastest: Highlight,
}

/// Aggregate qualifying activities into per-year statistics.
///
/// Only activities longer than 1 km with more than three minutes of moving
/// time count. Years with no qualifying activity are absent from the result.
pub fn yearly_stats(activities: &[Activity]) -> BTreeMap<i32, YearStats> {
    let mut by_year: BTreeMap<i32, Vec<&Activity>> = BTreeMap::new();
    for activity in activities {
        let Some(year) = activity.year() else {
            continue;
        };
        if activity.distance > MIN_DISTANCE_M && activity.moving_time > MIN_MOVING_TIME_S {
            by_year.entry(year).or_default().push(activity);
        }
    }

    by_year
        .into_iter()
        .filter_map(|(year, group)| Some((year, stats_for(&group)?)))
        .collect()
}

fn stats_for(group: &[&Activity]) -> Option<YearStats> {
    let total_distance_km: f64 = group.iter().map(|a| a.distance_km()).sum();
    let total_time: i64 = group.iter().map(|a| a.moving_time).sum();

    let avg_pace = if total_distance_km > 0.0 {
        total_time as f64 / total_distance_km
    } else {
        0.0
    };

    let heart_rates: Vec<f64> = group.iter().filter_map(|a| a.average_heartrate).collect();
    let avg_heart_rate = if heart_rates.is_empty() {
        None
    } else {
        Some((heart_rates.iter().sum::<f64>() / heart_rates.len() as f64) as u32)
    };

    // Qualifying activities always have positive distance, so both standouts
    // have a defined pace.
    let longest = group.iter().max_by(|a, b| a.distance.total_cmp(&b.distance))?;
    let fastest = group.iter().min_by(|a, b| {
        let pace_a = a.pace_seconds_per_km().unwrap_or(f64::INFINITY);
        let pace_b = b.pace_seconds_per_km().unwrap_or(f64::INFINITY);
        pace_a.total_cmp(&pace_b)
    })?;

    Some(YearStats {
        total_activities: group.len() as u32,
        total_distance: (total_distance_km * 10.0).round() / 10.0,
        avg_pace: format_pace(avg_pace),
        best_pace: format_pace(fastest.pace_seconds_per_km().unwrap_or(0.0)),
        avg_heart_rate,
        longest: highlight_for(longest),
        fastest: highlight_for(fastest),
    })
}

fn highlight_for(activity: &Activity) -> Highlight {
    Highlight {
        distance: format!("{:.1} km", activity.distance_km()),
        date: activity
            .start_date_local
            .map(|dt| format!("{:02}/{:02}", dt.month(), dt.day()))
            .unwrap_or_else(|| "N/A".to_string()),
        duration: format_duration(activity.moving_time),
        pace: format_pace(activity.pace_seconds_per_km().unwrap_or(0.0)),
        city: city_of(activity),
    }
}

/// Format a pace as minutes'seconds" per kilometer.
pub fn format_pace(seconds_per_km: f64) -> String {
    if seconds_per_km <= 0.0 {
        return "N/A".to_string();
    }
    let minutes = (seconds_per_km / 60.0) as u64;
    let seconds = (seconds_per_km % 60.0) as u64;
    format!("{}'{:02}\"", minutes, seconds)
}

/// Format a duration as H:MM:SS, or MM:SS under an hour.
pub fn format_duration(total_seconds: i64) -> String {
    if total_seconds <= 0 {
        return "N/A".to_string();
    }
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Best-effort city name for an activity.
///
/// Explicit city field first, then the tail of an Olson timezone id
/// ("Asia/Shanghai" -> "Shanghai", "America/New_York" -> "New York"), then
/// the country, then "Unknown".
fn city_of(activity: &Activity) -> String {
    if let Some(city) = activity.location_city.as_deref() {
        if !city.is_empty() {
            return city.to_string();
        }
    }

    if let Some(timezone) = activity.timezone.as_deref() {
        for region in ["Asia/", "Europe/", "America/", "Australia/"] {
            if let Some(position) = timezone.find(region) {
                let tail = &timezone[position + region.len()..];
                let city = tail.trim_end_matches(')').trim();
                if !city.is_empty() {
                    return city.replace('_', " ");
                }
            }
        }
    }

    if let Some(country) = activity.location_country.as_deref() {
        if !country.is_empty() {
            return country.to_string();
        }
    }

    "Unknown".to_string()
}

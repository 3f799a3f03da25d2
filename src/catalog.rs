//! Event catalog queries used by the list and map screens.
//!
//! Every function here is pure: it takes a slice of events and returns a
//! view of it. Nothing is cached and nothing is persisted.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Event, EventCategory, GeoPoint};

/// Smallest latitude/longitude delta of a fitted region, in degrees.
pub const MIN_REGION_DELTA: f64 = 0.05;

/// Factor applied to the bounding box span of several events.
pub const REGION_PADDING: f64 = 1.2;

/// Criteria for narrowing the event list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Keep only events of this category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    /// Case-insensitive substring matched against title and location.
    /// Surrounding whitespace is kept; a blank query matches everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl EventFilter {
    /// Returns `true` if `event` satisfies every criterion set.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        if self.category.is_some_and(|category| event.category != category) {
            return false;
        }
        match self.query.as_deref() {
            None => true,
            Some(query) if query.trim().is_empty() => true,
            Some(query) => {
                let needle = query.to_lowercase();
                event.title.to_lowercase().contains(&needle)
                    || event
                        .location
                        .as_deref()
                        .is_some_and(|location| location.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Returns the events matching `filter`, in input order.
#[must_use]
pub fn filter_events(events: &[Event], filter: &EventFilter) -> Vec<Event> {
    events
        .iter()
        .filter(|event| filter.matches(event))
        .cloned()
        .collect()
}

/// Returns at most `limit` events dated after `now`, in input order.
#[must_use]
pub fn upcoming(events: &[Event], now: DateTime<Utc>, limit: usize) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.date > now)
        .take(limit)
        .cloned()
        .collect()
}

/// Returns at most `limit` events ordered by sell-through, highest first.
///
/// Ties keep their input order.
#[must_use]
pub fn top_selling(events: &[Event], limit: usize) -> Vec<Event> {
    let mut ranked: Vec<&Event> = events.iter().collect();
    ranked.sort_by(|a, b| {
        b.sell_through()
            .partial_cmp(&a.sell_through())
            .unwrap_or(Ordering::Equal)
    });
    ranked.into_iter().take(limit).cloned().collect()
}

/// Visible map area: a centre and the degrees spanned on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRegion {
    /// Centre latitude.
    pub latitude: f64,
    /// Centre longitude.
    pub longitude: f64,
    /// Latitude span in degrees.
    pub latitude_delta: f64,
    /// Longitude span in degrees.
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Returns `true` if `point` lies inside the region.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        (point.lat - self.latitude).abs() <= self.latitude_delta / 2.0
            && (point.lng - self.longitude).abs() <= self.longitude_delta / 2.0
    }
}

/// Fits a map region around every event that has coordinates.
///
/// Returns `None` when no event carries coordinates.
#[must_use]
pub fn fit_region(events: &[Event]) -> Option<MapRegion> {
    let mut points = events.iter().filter_map(|event| event.coordinates);
    let first = points.next()?;

    let (mut min_lat, mut max_lat) = (first.lat, first.lat);
    let (mut min_lng, mut max_lng) = (first.lng, first.lng);
    for point in points {
        min_lat = min_lat.min(point.lat);
        max_lat = max_lat.max(point.lat);
        min_lng = min_lng.min(point.lng);
        max_lng = max_lng.max(point.lng);
    }

    Some(MapRegion {
        latitude: (min_lat + max_lat) / 2.0,
        longitude: (min_lng + max_lng) / 2.0,
        latitude_delta: ((max_lat - min_lat) * REGION_PADDING).max(MIN_REGION_DELTA),
        longitude_delta: ((max_lng - min_lng) * REGION_PADDING).max(MIN_REGION_DELTA),
    })
}

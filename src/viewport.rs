//! Bounding boxes and the span-to-zoom fitting policy.
//!
//! The dashboard frames routes by accumulating every decoded coordinate into
//! an axis-aligned bounding box, then mapping the box's larger span onto a
//! discrete zoom level through an ordered tier table. The map widget consumes
//! the resulting zoom + padding directive via its fit-to-bounds operation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::polyline::{LngLat, Polyline};

/// Hard ceiling on the zoom level, applied after any boost.
pub const MAX_ZOOM: u8 = 17;

/// Axis-aligned bounding box over (longitude, latitude) points.
///
/// Extending with a point can only widen the box. A zero-span box from a
/// single distinct coordinate is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Southwest corner (minimum longitude, minimum latitude).
    pub southwest: LngLat,
    /// Northeast corner (maximum longitude, maximum latitude).
    pub northeast: LngLat,
}

impl Bounds {
    /// A degenerate box containing a single point.
    pub fn from_point(point: LngLat) -> Self {
        Self {
            southwest: point,
            northeast: point,
        }
    }

    /// The minimal box containing every point, or `None` for no points.
    pub fn from_points(points: &[LngLat]) -> Option<Self> {
        let mut points = points.iter();
        let mut bounds = Self::from_point(*points.next()?);
        for point in points {
            bounds.extend(*point);
        }
        Some(bounds)
    }

    /// Grow the box to include `point`.
    pub fn extend(&mut self, point: LngLat) {
        let (lng, lat) = point;
        self.southwest.0 = self.southwest.0.min(lng);
        self.southwest.1 = self.southwest.1.min(lat);
        self.northeast.0 = self.northeast.0.max(lng);
        self.northeast.1 = self.northeast.1.max(lat);
    }

    /// The minimal box containing both boxes.
    pub fn union(mut self, other: Bounds) -> Bounds {
        self.extend(other.southwest);
        self.extend(other.northeast);
        self
    }

    /// Whether `point` lies inside the box (edges included).
    pub fn contains(&self, point: LngLat) -> bool {
        let (lng, lat) = point;
        lng >= self.southwest.0
            && lng <= self.northeast.0
            && lat >= self.southwest.1
            && lat <= self.northeast.1
    }

    pub fn lat_span(&self) -> f64 {
        self.northeast.1 - self.southwest.1
    }

    pub fn lng_span(&self) -> f64 {
        self.northeast.0 - self.southwest.0
    }

    /// The larger of the two spans, which drives tier selection.
    pub fn max_span(&self) -> f64 {
        self.lat_span().max(self.lng_span())
    }

    /// Geometric center of the box.
    pub fn center(&self) -> LngLat {
        (
            (self.southwest.0 + self.northeast.0) / 2.0,
            (self.southwest.1 + self.northeast.1) / 2.0,
        )
    }
}

/// Union of the bounds of several coordinate sequences.
///
/// `None` when every sequence is empty; otherwise the minimal box containing
/// every coordinate of every sequence.
pub fn bounds_of(sequences: &[Polyline]) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for sequence in sequences {
        for &point in sequence.points() {
            match bounds.as_mut() {
                Some(b) => b.extend(point),
                None => bounds = Some(Bounds::from_point(point)),
            }
        }
    }
    bounds
}

/// Per-side viewport insets in pixels, leaving room for UI chrome that
/// overlaps the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Padding {
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub const fn uniform(inset: u32) -> Self {
        Self::new(inset, inset, inset, inset)
    }
}

/// What the map widget needs to frame a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomDirective {
    pub zoom: u8,
    pub padding: Padding,
}

/// Span thresholds for the aggregate (many routes) view. First matching
/// threshold wins; thresholds are strictly decreasing.
const AGGREGATE_TIERS: &[(f64, u8)] = &[
    (0.3, 10),
    (0.15, 11),
    (0.08, 12),
    (0.04, 13),
    (0.02, 14),
    (0.01, 15),
];

/// Coarser table for a single selected route, whose span is expected to be
/// much tighter than an aggregate of routes.
const SINGLE_ROUTE_TIERS: &[(f64, u8)] = &[(0.05, 13), (0.02, 14), (0.01, 15)];

/// Ordered span-to-zoom tier table plus the padding it pairs with.
#[derive(Debug, Clone, Copy)]
pub struct ZoomPolicy {
    tiers: &'static [(f64, u8)],
    finest_zoom: u8,
    padding: Padding,
}

impl ZoomPolicy {
    /// Policy for the aggregate view of many routes. Left padding is widest
    /// because the activity list overlays that edge.
    pub const fn aggregate() -> Self {
        Self {
            tiers: AGGREGATE_TIERS,
            finest_zoom: 16,
            padding: Padding::new(40, 40, 60, 40),
        }
    }

    /// Policy for one selected route.
    pub const fn single_route() -> Self {
        Self {
            tiers: SINGLE_ROUTE_TIERS,
            finest_zoom: 16,
            padding: Padding::uniform(60),
        }
    }

    /// Map a bounding box onto a zoom + padding directive.
    ///
    /// The box's larger span selects a base zoom from the tier table. A
    /// recent-context view (current year or all time) gets a +1 boost, since
    /// recent data is the primary use case and deserves a closer look even at
    /// the cost of clipping an outlier route. The result never exceeds
    /// [`MAX_ZOOM`].
    pub fn fit(&self, bounds: &Bounds, recent_context: bool) -> ZoomDirective {
        let span = bounds.max_span();
        let base = self
            .tiers
            .iter()
            .find(|(threshold, _)| span > *threshold)
            .map(|&(_, zoom)| zoom)
            .unwrap_or(self.finest_zoom);

        let boost = if recent_context { 1 } else { 0 };
        let zoom = (base + boost).min(MAX_ZOOM);

        debug!(span, zoom, recent_context, "fitted bounds to zoom tier");

        ZoomDirective {
            zoom,
            padding: self.padding,
        }
    }
}

//! Real Shanghai-area GPS traces for realistic test fixtures.
//!
//! Coordinates follow actual streets and park paths (OpenStreetMap), so the
//! spans and point spacing match what the feed produces for real activities.
//! Points are (longitude, latitude).

/// A named route trace.
#[derive(Debug, Clone)]
pub struct RouteFixture {
    pub name: &'static str,
    pub points: &'static [(f64, f64)],
}

impl RouteFixture {
    pub const fn new(name: &'static str, points: &'static [(f64, f64)]) -> Self {
        Self { name, points }
    }
}

/// Loop around Century Park, Pudong. ~5 km run.
pub const CENTURY_PARK_LOOP: RouteFixture = RouteFixture::new(
    "Century Park loop",
    &[
        (121.55190, 31.21970),
        (121.55542, 31.22104),
        (121.55898, 31.22041),
        (121.56133, 31.21815),
        (121.56186, 31.21524),
        (121.55992, 31.21293),
        (121.55601, 31.21214),
        (121.55243, 31.21331),
        (121.55072, 31.21603),
        (121.55190, 31.21970),
    ],
);

/// North Bund riverside out-and-back along Huangpu. ~6 km run.
pub const BUND_RIVERSIDE: RouteFixture = RouteFixture::new(
    "Bund riverside",
    &[
        (121.49005, 31.23641),
        (121.49128, 31.23902),
        (121.49346, 31.24188),
        (121.49683, 31.24521),
        (121.50052, 31.24810),
        (121.49683, 31.24521),
        (121.49346, 31.24188),
        (121.49005, 31.23641),
    ],
);

/// Suzhou Creek greenway, Putuo stretch. ~4 km walk.
pub const SUZHOU_CREEK_PATH: RouteFixture = RouteFixture::new(
    "Suzhou Creek greenway",
    &[
        (121.43178, 31.24355),
        (121.43542, 31.24447),
        (121.43951, 31.24401),
        (121.44308, 31.24290),
        (121.44672, 31.24334),
        (121.45021, 31.24466),
    ],
);

/// West Bund riverfront, Xuhui. ~8 km ride.
pub const WEST_BUND_RIDE: RouteFixture = RouteFixture::new(
    "West Bund riverfront",
    &[
        (121.45442, 31.17238),
        (121.45731, 31.16845),
        (121.46088, 31.16422),
        (121.46455, 31.16091),
        (121.46901, 31.15774),
        (121.47325, 31.15503),
        (121.47742, 31.15311),
    ],
);

/// West Lake circuit in Hangzhou, a weekend trip. ~10 km ride.
pub const WEST_LAKE_CIRCUIT: RouteFixture = RouteFixture::new(
    "West Lake circuit",
    &[
        (120.14890, 30.25980),
        (120.15521, 30.26244),
        (120.16203, 30.26180),
        (120.16688, 30.25722),
        (120.16702, 30.25044),
        (120.16211, 30.24561),
        (120.15488, 30.24465),
        (120.14851, 30.24801),
        (120.14650, 30.25412),
        (120.14890, 30.25980),
    ],
);

/// Olympic Forest Park loop in Beijing, from an old travel year. ~5 km run.
pub const OLYMPIC_FOREST_PARK: RouteFixture = RouteFixture::new(
    "Olympic Forest Park loop",
    &[
        (116.38351, 40.01542),
        (116.38742, 40.01803),
        (116.39244, 40.01841),
        (116.39671, 40.01622),
        (116.39590, 40.01214),
        (116.39033, 40.01050),
        (116.38505, 40.01188),
        (116.38351, 40.01542),
    ],
);

/// Every Shanghai-area fixture route.
pub const SHANGHAI_ROUTES: &[&RouteFixture] = &[
    &CENTURY_PARK_LOOP,
    &BUND_RIVERSIDE,
    &SUZHOU_CREEK_PATH,
    &WEST_BUND_RIDE,
];

/// Every fixture route, near and far.
pub const ALL_ROUTES: &[&RouteFixture] = &[
    &CENTURY_PARK_LOOP,
    &BUND_RIVERSIDE,
    &SUZHOU_CREEK_PATH,
    &WEST_BUND_RIDE,
    &WEST_LAKE_CIRCUIT,
    &OLYMPIC_FOREST_PARK,
];

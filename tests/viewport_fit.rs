//! Viewport fitting properties over realistic route sets.

mod fixtures;

use activity_map::polyline::Polyline;
use activity_map::viewport::{Bounds, MAX_ZOOM, ZoomPolicy, bounds_of};

use fixtures::shanghai_routes::{ALL_ROUTES, RouteFixture, SHANGHAI_ROUTES};

fn sequences(routes: &[&RouteFixture]) -> Vec<Polyline> {
    routes
        .iter()
        .map(|route| Polyline::new(route.points.to_vec()))
        .collect()
}

#[test]
fn union_bounds_contain_each_route_bounds() {
    let combined = bounds_of(&sequences(ALL_ROUTES)).unwrap();

    for route in ALL_ROUTES {
        let own = Bounds::from_points(route.points).unwrap();
        assert!(
            combined.contains(own.southwest) && combined.contains(own.northeast),
            "{} escapes the union bounds",
            route.name
        );
    }
}

#[test]
fn adding_routes_never_shrinks_bounds() {
    let mut grown: Option<Bounds> = None;

    for count in 1..=ALL_ROUTES.len() {
        let bounds = bounds_of(&sequences(&ALL_ROUTES[..count])).unwrap();
        if let Some(previous) = grown {
            assert!(bounds.contains(previous.southwest));
            assert!(bounds.contains(previous.northeast));
            assert!(bounds.max_span() >= previous.max_span());
        }
        grown = Some(bounds);
    }
}

#[test]
fn no_routes_means_no_bounds() {
    assert!(bounds_of(&[]).is_none());
    assert!(bounds_of(&[Polyline::new(vec![]), Polyline::new(vec![])]).is_none());
}

#[test]
fn city_wide_set_zooms_out_farther_than_one_park() {
    let policy = ZoomPolicy::aggregate();

    let city = bounds_of(&sequences(SHANGHAI_ROUTES)).unwrap();
    let park = bounds_of(&sequences(&[&fixtures::CENTURY_PARK_LOOP])).unwrap();

    let city_zoom = policy.fit(&city, false).zoom;
    let park_zoom = policy.fit(&park, false).zoom;
    assert!(
        city_zoom < park_zoom,
        "city {} should sit below park {}",
        city_zoom,
        park_zoom
    );
}

#[test]
fn zoom_is_monotonic_in_span() {
    let policy = ZoomPolicy::aggregate();
    let anchor = (121.47, 31.23);

    let mut previous_zoom = u8::MAX;
    let mut span = 0.0005;
    while span < 1.0 {
        let mut bounds = Bounds::from_point(anchor);
        bounds.extend((anchor.0 + span, anchor.1 + span));
        let zoom = policy.fit(&bounds, true).zoom;

        assert!(zoom <= previous_zoom, "zoom rose as span grew to {}", span);
        previous_zoom = zoom;
        span *= 1.5;
    }
}

#[test]
fn vanishing_span_never_exceeds_the_zoom_cap() {
    let policy = ZoomPolicy::aggregate();
    let anchor = (121.4737, 31.2304);

    for exponent in 1..=12 {
        let span = 10f64.powi(-exponent);
        let mut bounds = Bounds::from_point(anchor);
        bounds.extend((anchor.0 + span, anchor.1 + span));

        assert!(policy.fit(&bounds, true).zoom <= MAX_ZOOM);
    }

    // Fully degenerate box, boosted.
    let degenerate = Bounds::from_point(anchor);
    assert_eq!(policy.fit(&degenerate, true).zoom, MAX_ZOOM);
}

#[test]
fn single_route_policy_frames_one_activity_tighter() {
    let park = bounds_of(&sequences(&[&fixtures::CENTURY_PARK_LOOP])).unwrap();

    let aggregate = ZoomPolicy::aggregate().fit(&park, false);
    let single = ZoomPolicy::single_route().fit(&park, false);

    assert!(single.zoom >= aggregate.zoom);
    assert_eq!(single.padding.top, single.padding.right);
    assert!(aggregate.padding.left > aggregate.padding.right);
}

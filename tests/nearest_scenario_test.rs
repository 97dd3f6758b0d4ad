use geo::{HaversineDistance, Point as GeoPoint};
use wifi_locator_service::libraries::distance::haversine_km;
use wifi_locator_service::libraries::proximity::ProximitySearch;
use wifi_locator_service::models::{Category, Coordinate, FallbackReason, Location, Point};
use wifi_locator_service::services::acquisition::{Acquired, UnavailableReason};
use wifi_locator_service::services::catalog::Catalog;

// City reference point
const CENTER: (f64, f64) = (44.6166, 33.5254);

fn center() -> Coordinate {
    Coordinate::new(CENTER.0, CENTER.1).unwrap()
}

fn search() -> ProximitySearch {
    ProximitySearch::new(center())
}

#[test]
fn test_sample_catalog_from_city_center() {
    let catalog = Catalog::embedded().unwrap();
    let location = Location::new(CENTER.0, CENTER.1);

    let result = search().nearest(Some(&location), &catalog, 3);

    assert_eq!(result.ids(), vec![6, 1, 216]);
    assert!(!result.used_fallback_reference);

    let expected = [1.0274, 1.7602, 2.5388];
    for (ranked, expected_km) in result.points.iter().zip(expected) {
        assert!(
            (ranked.distance_km - expected_km).abs() < 0.001,
            "{} is {} km away, expected {}",
            ranked.point.name,
            ranked.distance_km,
            expected_km
        );
    }
}

#[test]
fn test_full_catalog_ranking() {
    let catalog = Catalog::embedded().unwrap();
    let location = Location::new(CENTER.0, CENTER.1);

    let result = search().nearest(Some(&location), &catalog, 100);
    assert_eq!(result.ids(), vec![6, 1, 216, 4, 2, 3]);
}

#[test]
fn test_length_and_order_for_every_k() {
    let catalog = Catalog::embedded().unwrap();
    let locations = [
        Location::new(44.50, 33.60),
        Location::new(44.62, 33.40),
        Location::new(-12.0, 130.0),
    ];

    for location in &locations {
        for k in 1..=8 {
            let result = search().nearest(Some(location), &catalog, k);
            assert_eq!(result.len(), k.min(catalog.len()));

            for pair in result.points.windows(2) {
                assert!(pair[0].distance_km <= pair[1].distance_km);
            }
        }
    }
}

#[test]
fn test_unavailable_matches_reference_ranking() {
    let catalog = Catalog::new(vec![
        Point::new(1, "First", Coordinate::new(44.60, 33.52).unwrap(), Category::Other),
        Point::new(2, "Second", Coordinate::new(44.55, 33.60).unwrap(), Category::Other),
    ])
    .unwrap();

    let unavailable = Acquired::Unavailable(UnavailableReason::Denied);
    let fallback = search().nearest_acquired(&unavailable, &catalog, 1);
    let from_reference = search().nearest(Some(&Location::new(CENTER.0, CENTER.1)), &catalog, 1);

    assert_eq!(fallback.points, from_reference.points);
    assert_eq!(fallback.ids(), vec![1]);
    assert!(fallback.used_fallback_reference);
    assert_eq!(fallback.fallback_reason, Some(FallbackReason::Denied));

    // Same answer every time
    for _ in 0..5 {
        assert_eq!(search().nearest_acquired(&unavailable, &catalog, 1), fallback);
    }
}

#[test]
fn test_empty_catalog_is_not_an_error() {
    let result = search().nearest(Some(&Location::new(10.0, 10.0)), &Catalog::empty(), 5);
    assert!(result.is_empty());
}

#[test]
fn test_matches_geo_haversine() {
    // geo uses a slightly larger mean radius (6371.0088 km)
    let pairs = [
        ((44.6166, 33.5254), (44.514211, 33.598949)),
        ((51.5074, -0.1278), (40.7128, -74.0060)),
        ((-33.8688, 151.2093), (35.6762, 139.6503)),
    ];

    for ((lat1, lon1), (lat2, lon2)) in pairs {
        let ours = haversine_km(lat1, lon1, lat2, lon2).unwrap();
        let theirs =
            GeoPoint::new(lon1, lat1).haversine_distance(&GeoPoint::new(lon2, lat2)) / 1000.0;

        assert!((ours - theirs).abs() / theirs < 1e-5, "{} vs {}", ours, theirs);
    }
}

use tracing::debug;

use crate::models::{Coordinate, FallbackReason, Location, Point, ProximityResult, RankedPoint};
use crate::services::acquisition::Acquired;
use crate::services::catalog::Catalog;

/// Ranks catalog points by distance from a query location.
///
/// When no usable location is available the search falls back to a fixed
/// reference coordinate (the city center) and tags the result accordingly.
/// The search is pure: the same inputs always yield the same ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximitySearch {
    reference: Coordinate,
}

impl ProximitySearch {
    pub fn new(reference: Coordinate) -> Self {
        Self { reference }
    }

    /// Return up to `k` points nearest to `location`.
    ///
    /// An absent or invalid location ranks from the default reference instead.
    pub fn nearest(&self, location: Option<&Location>, catalog: &Catalog, k: usize) -> ProximityResult {
        let (origin, fallback_reason) = match location.map(Location::coordinate) {
            Some(Ok(coordinate)) => (coordinate, None),
            Some(Err(e)) => {
                debug!("{}; ranking from the default reference", e);
                (self.reference, Some(FallbackReason::InvalidCoordinates))
            }
            None => (self.reference, Some(FallbackReason::NotProvided)),
        };

        self.ranked_from(origin, fallback_reason, catalog, k)
    }

    /// Same as [`ProximitySearch::nearest`], keeping the reason a location
    /// source came back empty.
    pub fn nearest_acquired(&self, acquired: &Acquired, catalog: &Catalog, k: usize) -> ProximityResult {
        match acquired {
            Acquired::Located(location) => self.nearest(Some(location), catalog, k),
            Acquired::Unavailable(reason) => {
                self.ranked_from(self.reference, Some((*reason).into()), catalog, k)
            }
        }
    }

    fn ranked_from(
        &self,
        origin: Coordinate,
        fallback_reason: Option<FallbackReason>,
        catalog: &Catalog,
        k: usize,
    ) -> ProximityResult {
        ProximityResult {
            points: rank(&origin, catalog.points(), k),
            used_fallback_reference: fallback_reason.is_some(),
            reference: origin,
            fallback_reason,
        }
    }
}

/// Sort points ascending by distance from `origin` and keep the first `k`.
///
/// Ties keep catalog order.
pub fn rank(origin: &Coordinate, points: &[Point], k: usize) -> Vec<RankedPoint> {
    let mut ranked: Vec<RankedPoint> = points
        .iter()
        .map(|point| RankedPoint {
            distance_km: origin.distance_km(&point.coordinates),
            point: point.clone(),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn reference() -> Coordinate {
        Coordinate::new(44.6166, 33.5254).unwrap()
    }

    fn point(id: u64, lat: f64, lon: f64) -> Point {
        Point::new(
            id,
            format!("Point {}", id),
            Coordinate::new(lat, lon).unwrap(),
            Category::Other,
        )
    }

    fn two_point_catalog() -> Catalog {
        Catalog::new(vec![point(1, 44.60, 33.52), point(2, 44.55, 33.60)]).unwrap()
    }

    fn assert_sorted(result: &ProximityResult) {
        for pair in result.points.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn test_nearest_with_location() {
        let search = ProximitySearch::new(reference());
        let location = Location::new(44.55, 33.60);

        let result = search.nearest(Some(&location), &two_point_catalog(), 1);
        assert_eq!(result.ids(), vec![2]);
        assert!(!result.used_fallback_reference);
        assert_eq!(result.fallback_reason, None);
        assert_eq!(result.points[0].distance_km, 0.0);
    }

    #[test]
    fn test_k_larger_than_catalog_returns_everything() {
        let search = ProximitySearch::new(reference());
        let location = Location::new(44.55, 33.60);

        let result = search.nearest(Some(&location), &two_point_catalog(), 10);
        assert_eq!(result.ids(), vec![2, 1]);
        assert_sorted(&result);
    }

    #[test]
    fn test_k_zero_is_empty() {
        let search = ProximitySearch::new(reference());
        let result = search.nearest(None, &two_point_catalog(), 0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_absent_location_uses_reference() {
        let search = ProximitySearch::new(reference());
        let catalog = two_point_catalog();

        let fallback = search.nearest(None, &catalog, 1);
        let from_reference = search.nearest(Some(&reference().into()), &catalog, 1);

        assert!(fallback.used_fallback_reference);
        assert_eq!(fallback.fallback_reason, Some(FallbackReason::NotProvided));
        assert_eq!(fallback.points, from_reference.points);
        assert_eq!(fallback.ids(), vec![1]);
    }

    #[test]
    fn test_invalid_location_uses_reference() {
        let search = ProximitySearch::new(reference());
        let catalog = two_point_catalog();

        for location in [
            Location::new(f64::NAN, 33.5),
            Location::new(44.6, 540.0),
            Location::new(-91.0, 0.0),
        ] {
            let result = search.nearest(Some(&location), &catalog, 2);
            assert!(result.used_fallback_reference);
            assert_eq!(
                result.fallback_reason,
                Some(FallbackReason::InvalidCoordinates)
            );
            assert_eq!(result.reference, reference());
            assert_eq!(result.ids(), vec![1, 2]);
        }
    }

    #[test]
    fn test_unavailable_source_keeps_reason() {
        use crate::services::acquisition::UnavailableReason;

        let search = ProximitySearch::new(reference());
        let catalog = two_point_catalog();

        let acquired = Acquired::Unavailable(UnavailableReason::TimedOut);
        let result = search.nearest_acquired(&acquired, &catalog, 1);

        assert_eq!(result.fallback_reason, Some(FallbackReason::TimedOut));
        assert_eq!(result.points, search.nearest(None, &catalog, 1).points);
    }

    #[test]
    fn test_empty_catalog() {
        let search = ProximitySearch::new(reference());
        let location = Location::new(44.6, 33.5);

        let result = search.nearest(Some(&location), &Catalog::empty(), 5);
        assert!(result.is_empty());
        assert!(!result.used_fallback_reference);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        // Two points at the same spot plus one mirrored across the origin
        let catalog = Catalog::new(vec![
            point(10, 10.0, 10.0),
            point(11, 10.0, 10.0),
            point(12, 0.0, 0.0),
            point(13, 10.0, 10.0),
        ])
        .unwrap();
        let search = ProximitySearch::new(reference());
        let location = Location::new(10.0, 10.0);

        let result = search.nearest(Some(&location), &catalog, 4);
        assert_eq!(result.ids(), vec![10, 11, 13, 12]);
    }

    #[test]
    fn test_deterministic() {
        let search = ProximitySearch::new(reference());
        let catalog = two_point_catalog();
        let location = Location::new(44.58, 33.55);

        let first = search.nearest(Some(&location), &catalog, 2);
        let _ = search.nearest(Some(&Location::new(f64::NAN, 0.0)), &catalog, 2);
        let _ = search.nearest(None, &catalog, 2);
        let second = search.nearest(Some(&location), &catalog, 2);

        assert_eq!(first, second);
    }
}

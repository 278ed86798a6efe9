// Copyright © 2016, Canal TP and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
//     the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
//     powered by Canal TP (www.canaltp.fr).
// Help us simplify mobility and open public transport:
//     a non ending quest to the responsive locomotion way of traveling!
//
// LICENCE: This program is free software; you can redistribute it
// and/or modify it under the terms of the GNU Affero General Public
// License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
// Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public
// License along with this program. If not, see
// <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// IRC #navitia on freenode
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use crate::coord::Coord;
use crate::poi::PointOfInterest;
use crate::store::LocationStore;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

pub const MAX_RADIUS: f64 = 10_000.;
pub const DEFAULT_RADIUS: f64 = MAX_RADIUS;

/// Search radius in meters, always within `[0, max]`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SearchRadius {
    meters: f64,
    #[serde(skip)]
    max: f64,
}

impl SearchRadius {
    /// Builds a radius bounded by `max`, clamping `meters` into range.
    /// Returns `None` when `meters` is not a number.
    pub fn bounded(meters: f64, max: f64) -> Option<SearchRadius> {
        if meters.is_nan() {
            return None;
        }
        let max = max.max(0.);
        Some(SearchRadius {
            meters: meters.max(0.).min(max),
            max,
        })
    }

    pub fn new(meters: f64) -> Option<SearchRadius> {
        SearchRadius::bounded(meters, MAX_RADIUS)
    }

    pub fn meters(self) -> f64 {
        self.meters
    }

    pub fn max(self) -> f64 {
        self.max
    }

    /// Same bound, new value.
    pub fn with_meters(self, meters: f64) -> Option<SearchRadius> {
        SearchRadius::bounded(meters, self.max)
    }

    pub fn contains(self, distance: f64) -> bool {
        distance <= self.meters
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        SearchRadius {
            meters: DEFAULT_RADIUS,
            max: MAX_RADIUS,
        }
    }
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} meters", self.meters)
    }
}

/// The points of the store within `radius` of `reference`, bound included,
/// in store order. Points without usable coordinates are left out, they are
/// reported once when the store is loaded.
pub fn filter_within(
    store: &LocationStore,
    reference: &Coord,
    radius: SearchRadius,
) -> Vec<Arc<PointOfInterest>> {
    store
        .iter()
        .filter(|poi| {
            poi.coord()
                .map_or(false, |coord| radius.contains(reference.distance_to(&coord)))
        })
        .cloned()
        .collect()
}

/// The points that can be drawn, i.e. with usable coordinates.
pub fn renderable(points: &[Arc<PointOfInterest>]) -> Vec<Arc<PointOfInterest>> {
    points
        .iter()
        .filter(|poi| poi.coord().is_some())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LocationStore {
        LocationStore::new(vec![
            PointOfInterest::new("1.3010", "103.8010", "near"),
            PointOfInterest::new("1.5000", "104.0000", "far"),
            PointOfInterest::new("n/a", "103.8000", "broken"),
        ])
    }

    fn addresses(points: &[Arc<PointOfInterest>]) -> Vec<&str> {
        points.iter().map(|p| p.address.as_str()).collect()
    }

    #[test]
    fn radius_is_clamped() {
        assert_eq!(SearchRadius::new(-5.).unwrap().meters(), 0.);
        assert_eq!(SearchRadius::new(25_000.).unwrap().meters(), MAX_RADIUS);
        assert_eq!(SearchRadius::new(f64::INFINITY).unwrap().meters(), MAX_RADIUS);
        assert_eq!(SearchRadius::new(1234.5).unwrap().meters(), 1234.5);
        assert!(SearchRadius::new(f64::NAN).is_none());
    }

    #[test]
    fn default_radius_is_the_maximum() {
        let radius = SearchRadius::default();
        assert_eq!(radius.meters(), 10_000.);
        assert_eq!(radius.max(), 10_000.);
    }

    #[test]
    fn keeps_only_points_within_radius() {
        let reference = Coord::new(103.8, 1.3);
        let filtered = filter_within(&store(), &reference, SearchRadius::default());
        assert_eq!(addresses(&filtered), vec!["near"]);
    }

    #[test]
    fn bound_is_inclusive() {
        let store = store();
        let reference = Coord::new(103.8, 1.3);
        let near = store.points()[0].coord().unwrap();
        let exact = SearchRadius::new(reference.distance_to(&near)).unwrap();
        assert_eq!(addresses(&filter_within(&store, &reference, exact)), vec!["near"]);

        let below = SearchRadius::new(reference.distance_to(&near) - 0.001).unwrap();
        assert!(filter_within(&store, &reference, below).is_empty());
    }

    #[test]
    fn zero_radius_keeps_points_at_the_reference() {
        let store = LocationStore::new(vec![PointOfInterest::new("1.3", "103.8", "here")]);
        let filtered = filter_within(&store, &Coord::new(103.8, 1.3), SearchRadius::new(0.).unwrap());
        assert_eq!(addresses(&filtered), vec!["here"]);
    }

    #[test]
    fn renderable_skips_invalid_points() {
        assert_eq!(
            addresses(&renderable(store().points())),
            vec!["near", "far"]
        );
    }
}

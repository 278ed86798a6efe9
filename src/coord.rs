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

use geo::algorithm::haversine_distance::HaversineDistance;
use geojson::Geometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord(pub geo_types::Coordinate<f64>);

impl Coord {
    pub fn new(lon: f64, lat: f64) -> Coord {
        Coord(geo_types::Coordinate { x: lon, y: lat })
    }

    /// Builds a coordinate from textual latitude and longitude, as found in
    /// the location files and in the geocoder responses.
    /// Returns `None` if either value is not a finite number.
    pub fn parse(lat: &str, lon: &str) -> Option<Coord> {
        let lat = lat.trim().parse::<f64>().ok()?;
        let lon = lon.trim().parse::<f64>().ok()?;
        if lat.is_finite() && lon.is_finite() {
            Some(Coord::new(lon, lat))
        } else {
            None
        }
    }

    pub fn lon(&self) -> f64 {
        self.x
    }
    pub fn lat(&self) -> f64 {
        self.y
    }

    /// Great-circle distance in meters, shared by the proximity filter and
    /// the renderer.
    pub fn distance_to(&self, other: &Coord) -> f64 {
        geo_types::Point::from(*self).haversine_distance(&geo_types::Point::from(*other))
    }
}

impl ::std::ops::Deref for Coord {
    type Target = geo_types::Coordinate<f64>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Coord> for geo_types::Point<f64> {
    fn from(coord: Coord) -> geo_types::Point<f64> {
        geo_types::Point::new(coord.lon(), coord.lat())
    }
}

impl From<Coord> for Geometry {
    fn from(coord: Coord) -> Geometry {
        Geometry::new(geojson::Value::Point(vec![coord.lon(), coord.lat()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_accepts_padded_numbers() {
        let coord = Coord::parse(" 1.3521", "103.8198 ").unwrap();
        assert_relative_eq!(coord.lat(), 1.3521);
        assert_relative_eq!(coord.lon(), 103.8198);
    }

    #[test]
    fn parse_rejects_non_numeric_values() {
        assert!(Coord::parse("abc", "103.8").is_none());
        assert!(Coord::parse("1.3", "").is_none());
        assert!(Coord::parse("NaN", "103.8").is_none());
        assert!(Coord::parse("1.3", "inf").is_none());
    }

    #[test]
    fn distance_to_itself_is_zero() {
        let coord = Coord::new(103.8, 1.3);
        assert_relative_eq!(coord.distance_to(&coord), 0.);
    }

    #[test]
    fn distance_is_symmetric_and_in_meters() {
        let a = Coord::new(103.8, 1.3);
        let b = Coord::new(103.801, 1.301);
        let d = a.distance_to(&b);
        assert_relative_eq!(d, b.distance_to(&a));
        // about 157 meters between those two points
        assert!(d > 150. && d < 165., "unexpected distance {}", d);
    }

    #[test]
    fn distance_far_points() {
        let a = Coord::new(103.8, 1.3);
        let b = Coord::new(104.0, 1.5);
        let d = a.distance_to(&b);
        assert!(d > 30_000. && d < 32_000., "unexpected distance {}", d);
    }
}

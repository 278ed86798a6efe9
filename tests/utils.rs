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

use proximap::geocoder::{GeocodeError, Geocoder, ReferenceMarker};
use proximap::loader::{self, FileSource, LoadError, TextSource};
use proximap::LocationStore;
use std::cell::RefCell;
use std::collections::HashMap;

pub const LOCATIONS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/locations.csv");

pub fn fixture_store() -> LocationStore {
    loader::load_store(&FileSource, LOCATIONS)
}

/// Always fails, like an unreachable host.
pub struct Unreachable;

impl TextSource for Unreachable {
    fn fetch(&self, location: &str) -> Result<String, LoadError> {
        Err(LoadError::Fetch {
            location: location.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

pub struct InMemory(pub &'static str);

impl TextSource for InMemory {
    fn fetch(&self, _location: &str) -> Result<String, LoadError> {
        Ok(self.0.to_string())
    }
}

pub fn marker(lat: f64, lon: f64, address: &str) -> ReferenceMarker {
    ReferenceMarker {
        latitude: lat,
        longitude: lon,
        address: address.to_string(),
    }
}

pub fn yishun() -> ReferenceMarker {
    marker(
        1.42030716530478,
        103.839558827735,
        "674 YISHUN AVENUE 4 SINGAPORE 760674",
    )
}

/// Answers from a fixed table and remembers the queries it was asked.
/// Unknown queries are not found, `"!fail"` fails.
#[derive(Default)]
pub struct FakeGeocoder {
    places: HashMap<String, ReferenceMarker>,
    pub queries: RefCell<Vec<String>>,
}

impl FakeGeocoder {
    pub fn new() -> FakeGeocoder {
        let mut geocoder = FakeGeocoder::default();
        geocoder.places.insert("760674".to_string(), yishun());
        geocoder.places.insert(
            "018956".to_string(),
            marker(1.28393, 103.85944, "10 BAYFRONT AVENUE SINGAPORE 018956"),
        );
        geocoder
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode(&self, query: &str) -> Result<ReferenceMarker, GeocodeError> {
        self.queries.borrow_mut().push(query.to_string());
        if query == "!fail" {
            return Err(GeocodeError::LookupFailed {
                query: query.to_string(),
                reason: "operation timed out".to_string(),
            });
        }
        self.places
            .get(query)
            .cloned()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))
    }
}

pub fn addresses<P: AsRef<proximap::PointOfInterest>>(points: &[P]) -> Vec<String> {
    points.iter().map(|p| p.as_ref().address.clone()).collect()
}

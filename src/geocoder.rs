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
use failure::Fail;
use serde::{Deserialize, Serialize};
use slog_scope::debug;
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://www.onemap.gov.sg/api/common/elastic/search";

/// The place found for the last successful query, center of the proximity
/// filter.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReferenceMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl ReferenceMarker {
    pub fn coord(&self) -> Coord {
        Coord::new(self.longitude, self.latitude)
    }
}

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum GeocodeError {
    #[fail(display = "no results found for '{}'", _0)]
    NotFound(String),
    #[fail(display = "lookup of '{}' failed: {}", query, reason)]
    LookupFailed { query: String, reason: String },
    #[fail(display = "invalid coordinates for '{}' in response: {}", query, address)]
    InvalidResult { query: String, address: String },
}

/// Response of the search endpoint. Only the fields we use are modeled.
#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    pub found: i64,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub struct SearchResult {
    pub latitude: String,
    pub longitude: String,
    pub address: String,
}

impl From<ReferenceMarker> for SearchResult {
    fn from(marker: ReferenceMarker) -> SearchResult {
        SearchResult {
            latitude: marker.latitude.to_string(),
            longitude: marker.longitude.to_string(),
            address: marker.address,
        }
    }
}

impl SearchResponse {
    fn checked_first(self, query: &str) -> Result<(SearchResult, Coord), GeocodeError> {
        if self.found <= 0 {
            return Err(GeocodeError::NotFound(query.to_string()));
        }
        let first = self
            .results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;
        match Coord::parse(&first.latitude, &first.longitude) {
            Some(coord) => Ok((first, coord)),
            None => Err(GeocodeError::InvalidResult {
                query: query.to_string(),
                address: first.address,
            }),
        }
    }

    /// The first result, as sent by the service, once its coordinates are
    /// known to be usable.
    pub fn into_first(self, query: &str) -> Result<SearchResult, GeocodeError> {
        self.checked_first(query).map(|(first, _)| first)
    }

    /// The marker for the first result, if any.
    pub fn into_marker(self, query: &str) -> Result<ReferenceMarker, GeocodeError> {
        let (first, coord) = self.checked_first(query)?;
        Ok(ReferenceMarker {
            latitude: coord.lat(),
            longitude: coord.lon(),
            address: first.address,
        })
    }
}

pub trait Geocoder {
    /// Looks the query up and returns the first match. The query is sent
    /// as is, even when empty.
    fn geocode(&self, query: &str) -> Result<ReferenceMarker, GeocodeError>;

    /// The first match with its coordinates as the service wrote them.
    /// Without access to the raw response, the marker coordinates are
    /// formatted back to text.
    fn first_result(&self, query: &str) -> Result<SearchResult, GeocodeError> {
        self.geocode(query).map(SearchResult::from)
    }
}

/// Client of the OneMap elastic search api.
pub struct OneMapGeocoder {
    client: reqwest::blocking::Client,
    url: String,
}

impl OneMapGeocoder {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<OneMapGeocoder, crate::Error> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(OneMapGeocoder {
            client: builder.build()?,
            url: url.to_string(),
        })
    }

    fn request(&self, query: &str) -> reqwest::Result<reqwest::blocking::Request> {
        self.client
            .get(&self.url)
            .query(&[
                ("searchVal", query),
                ("returnGeom", "Y"),
                ("getAddrDetails", "Y"),
                ("pageNum", "1"),
            ])
            .build()
    }

    fn search(&self, query: &str) -> Result<SearchResponse, GeocodeError> {
        debug!("geocoding '{}' with {}", query, self.url);
        self.request(query)
            .and_then(|request| self.client.execute(request))
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(|e| GeocodeError::LookupFailed {
                query: query.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Geocoder for OneMapGeocoder {
    fn geocode(&self, query: &str) -> Result<ReferenceMarker, GeocodeError> {
        let res = self.search(query)?.into_marker(query);
        if let Ok(marker) = &res {
            debug!("'{}' found at {}", query, marker.address);
        }
        res
    }

    fn first_result(&self, query: &str) -> Result<SearchResult, GeocodeError> {
        self.search(query)?.into_first(query)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, query: &str) -> Result<ReferenceMarker, GeocodeError> {
        (**self).geocode(query)
    }

    fn first_result(&self, query: &str) -> Result<SearchResult, GeocodeError> {
        (**self).first_result(query)
    }
}

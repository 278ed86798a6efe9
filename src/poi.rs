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
use serde::Serialize;
use std::collections::BTreeMap;

/// A point of interest as read from the location file.
///
/// All fields are kept as the raw text of the file: the coordinates are only
/// interpreted when the point is filtered or rendered, so a row with broken
/// coordinates still belongs to the store.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct PointOfInterest {
    pub latitude: String,
    pub longitude: String,
    pub address: String,
    /// Other columns of the file, by header name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl PointOfInterest {
    pub fn new<S: Into<String>>(latitude: S, longitude: S, address: S) -> PointOfInterest {
        PointOfInterest {
            latitude: latitude.into(),
            longitude: longitude.into(),
            address: address.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn coord(&self) -> Option<Coord> {
        Coord::parse(&self.latitude, &self.longitude)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

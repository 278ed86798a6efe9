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

//! Batch geocoding of postal codes into rows of a location file.

use crate::geocoder::{GeocodeError, Geocoder};
use slog_scope::{info, warn};

pub const HEADER: &str = "postal|address|longitude|latitude";
pub const NOT_FOUND: &str = "No results found";
pub const LOOKUP_FAILED: &str = "Lookup failed";

/// One pipe delimited row for a postal code: its address and coordinates,
/// or a marker text if it could not be located.
pub fn lookup_row<G: Geocoder + ?Sized>(geocoder: &G, postal: &str) -> String {
    match geocoder.first_result(postal) {
        Ok(result) => format!(
            "{}|{}|{}|{}",
            postal,
            result.address.replace('|', " "),
            result.longitude.trim(),
            result.latitude.trim()
        ),
        Err(GeocodeError::NotFound(_)) => {
            info!("no results found for postal code {}", postal);
            format!("{}|{}", postal, NOT_FOUND)
        }
        Err(e) => {
            warn!("{}", e);
            format!("{}|{}", postal, LOOKUP_FAILED)
        }
    }
}

/// The rows for all the postal codes, in order, one request each.
pub fn lookup_rows<'a, G, I>(geocoder: &'a G, postals: I) -> impl Iterator<Item = String> + 'a
where
    G: Geocoder + ?Sized,
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    postals
        .into_iter()
        .map(str::trim)
        .filter(|postal| !postal.is_empty())
        .map(move |postal| lookup_row(geocoder, postal))
}

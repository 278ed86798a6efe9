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

use crate::poi::PointOfInterest;
use crate::store::LocationStore;
use failure::Fail;
use slog_scope::{error, info, warn};
use std::collections::BTreeMap;
use std::io;

const DELIMITER: u8 = b'|';
const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";
const ADDRESS: &str = "address";

#[derive(Debug, Fail)]
pub enum LoadError {
    #[fail(display = "could not fetch '{}': {}", location, reason)]
    Fetch { location: String, reason: String },
    #[fail(display = "could not read '{}': {}", path, reason)]
    Read { path: String, reason: String },
    #[fail(display = "invalid delimited text: {}", _0)]
    Csv(#[cause] csv::Error),
    #[fail(display = "missing column '{}' in header", _0)]
    MissingColumn(&'static str),
}

/// Where the text of the location file comes from.
pub trait TextSource {
    fn fetch(&self, location: &str) -> Result<String, LoadError>;
}

pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(client: reqwest::blocking::Client) -> HttpSource {
        HttpSource { client }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        HttpSource::new(reqwest::blocking::Client::new())
    }
}

impl TextSource for HttpSource {
    fn fetch(&self, location: &str) -> Result<String, LoadError> {
        self.client
            .get(location)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| LoadError::Fetch {
                location: location.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Reads a local file, given either as a plain path or a `file://` url.
#[derive(Debug, Default)]
pub struct FileSource;

impl TextSource for FileSource {
    fn fetch(&self, location: &str) -> Result<String, LoadError> {
        let path = location.trim_start_matches("file://");
        std::fs::read_to_string(path).map_err(|e| LoadError::Read {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Dispatches on the scheme of the location: http(s) urls are downloaded,
/// everything else is read from the file system.
#[derive(Default)]
pub struct DefaultSource {
    http: HttpSource,
    file: FileSource,
}

impl DefaultSource {
    pub fn new(client: reqwest::blocking::Client) -> DefaultSource {
        DefaultSource {
            http: HttpSource::new(client),
            file: FileSource,
        }
    }
}

impl TextSource for DefaultSource {
    fn fetch(&self, location: &str) -> Result<String, LoadError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }
}

struct Columns {
    latitude: usize,
    longitude: usize,
    address: usize,
}

impl Columns {
    fn from_headers(headers: &[String]) -> Result<Columns, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(Columns {
            latitude: find(LATITUDE)?,
            longitude: find(LONGITUDE)?,
            address: find(ADDRESS)?,
        })
    }

    fn is_known(&self, idx: usize) -> bool {
        idx == self.latitude || idx == self.longitude || idx == self.address
    }
}

/// Parses pipe delimited text, the first row being the header.
///
/// Rows that cannot be decoded are skipped with a warning. The coordinates
/// are not checked here: a row with unusable coordinates is still a point of
/// the store.
pub fn parse_locations<R: io::Read>(reader: R) -> Result<Vec<PointOfInterest>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(LoadError::Csv)?
        .iter()
        .map(str::to_string)
        .collect();
    let columns = Columns::from_headers(&headers)?;

    let points = rdr
        .records()
        .filter_map(|rec| rec.map_err(|e| warn!("skip delimited row: {}", e)).ok())
        .filter(|rec| rec.iter().any(|field| !field.is_empty()))
        .map(|rec| {
            let field = |idx: usize| rec.get(idx).unwrap_or("").to_string();
            let fields: BTreeMap<String, String> = headers
                .iter()
                .enumerate()
                .filter(|(idx, _)| !columns.is_known(*idx))
                .map(|(idx, name)| (name.clone(), field(idx)))
                .collect();
            PointOfInterest {
                latitude: field(columns.latitude),
                longitude: field(columns.longitude),
                address: field(columns.address),
                fields,
            }
        })
        .collect();
    Ok(points)
}

pub fn load_locations(
    source: &dyn TextSource,
    location: &str,
) -> Result<Vec<PointOfInterest>, LoadError> {
    let text = source.fetch(location)?;
    parse_locations(text.as_bytes())
}

/// The points whose coordinates cannot be used. They stay in the store but
/// are never drawn nor found near a place.
pub fn unusable(points: &[PointOfInterest]) -> impl Iterator<Item = &PointOfInterest> {
    points.iter().filter(|poi| poi.coord().is_none())
}

/// Loads the store at startup. A single attempt is made; on failure the
/// error is logged and the store is empty.
pub fn load_store(source: &dyn TextSource, location: &str) -> LocationStore {
    match load_locations(source, location) {
        Ok(points) => {
            for poi in unusable(&points) {
                warn!("invalid latitude or longitude for location: {}", poi.address);
            }
            info!("loaded {} locations from {}", points.len(), location);
            LocationStore::new(points)
        }
        Err(e) => {
            error!("could not load locations from {}: {}", location, e);
            LocationStore::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_extra_columns() {
        let text = "postal|address|longitude|latitude\n\
                    760674|674 YISHUN AVENUE 4|103.8396|1.4203\n\
                    762507|507B YISHUN STREET 51|103.8445|1.4156\n";
        let points = parse_locations(text.as_bytes()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].address, "674 YISHUN AVENUE 4");
        assert_eq!(points[0].latitude, "1.4203");
        assert_eq!(points[0].longitude, "103.8396");
        assert_eq!(points[0].field("postal"), Some("760674"));
    }

    #[test]
    fn header_names_are_trimmed_and_case_insensitive() {
        let text = " Latitude | LONGITUDE |Address\n1.3|103.8|somewhere\n";
        let points = parse_locations(text.as_bytes()).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].address, "somewhere");
        assert!(points[0].fields.is_empty());
    }

    #[test]
    fn short_rows_get_empty_fields() {
        let text = "latitude|longitude|address\n1.3\n";
        let points = parse_locations(text.as_bytes()).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].longitude, "");
        assert!(points[0].coord().is_none());
    }

    #[test]
    fn blank_rows_are_skipped() {
        let text = "latitude|longitude|address\n||\n1.3|103.8|here\n\n";
        let points = parse_locations(text.as_bytes()).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].address, "here");
    }

    #[test]
    fn missing_column_is_an_error() {
        let text = "lat|lon|address\n1.3|103.8|here\n";
        match parse_locations(text.as_bytes()) {
            Err(LoadError::MissingColumn(column)) => assert_eq!(column, "latitude"),
            other => panic!("expected a missing column, got {:?}", other),
        }
    }

    #[test]
    fn empty_text_is_an_error() {
        assert!(parse_locations("".as_bytes()).is_err());
    }

    #[test]
    fn unusable_points_are_listed_once_per_row() {
        let text = "latitude|longitude|address\n1.3|103.8|here\nn/a|103.8|broken\n|  |empty\n";
        let points = parse_locations(text.as_bytes()).unwrap();
        let broken: Vec<&str> = unusable(&points).map(|p| p.address.as_str()).collect();
        assert_eq!(broken, vec!["broken", "empty"]);
    }
}

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

//! Drawing of the view: the markers to put on the map and two ways to hand
//! them to a map library, a GeoJSON feature collection and a standalone
//! Leaflet page.

use crate::coord::Coord;
use crate::settings;
use crate::state::ViewState;
use geojson::{Feature, FeatureCollection, Geometry};
use itertools::Itertools;
use serde::Serialize;
use serde_json::{json, Map};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Location,
    Reference,
}

impl MarkerKind {
    pub fn color(self) -> &'static str {
        match self {
            MarkerKind::Location => "red",
            MarkerKind::Reference => "blue",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub coord: Coord,
    /// Text of the popup, the address.
    pub popup: String,
    /// Distance in meters to the reference marker, if any.
    pub distance: Option<f64>,
}

/// The markers of the current view: every visible location, then the
/// reference marker if a search succeeded.
pub fn markers(state: &ViewState) -> Vec<Marker> {
    let reference = state.reference().map(|r| r.coord());
    let mut markers: Vec<Marker> = state
        .visible()
        .iter()
        .filter_map(|poi| {
            poi.coord().map(|coord| Marker {
                kind: MarkerKind::Location,
                coord,
                popup: poi.address.clone(),
                distance: reference.map(|r| r.distance_to(&coord)),
            })
        })
        .collect();
    if let Some(reference) = state.reference() {
        markers.push(Marker {
            kind: MarkerKind::Reference,
            coord: reference.coord(),
            popup: reference.address.clone(),
            distance: None,
        });
    }
    markers
}

/// One line description of the view.
pub fn summary(state: &ViewState) -> String {
    let shown = state.visible().len();
    match state.reference() {
        Some(reference) => format!(
            "{} location(s) within {} of {}",
            shown,
            state.radius(),
            reference.address
        ),
        None => format!("{} location(s), distance: {}", shown, state.radius()),
    }
}

/// The markers as text, one per line.
pub fn listing(markers: &[Marker]) -> String {
    markers
        .iter()
        .map(|marker| match marker.distance {
            Some(distance) => format!(
                "[{}] {} ({:.0} m)",
                marker.kind.color(),
                marker.popup,
                distance
            ),
            None => format!("[{}] {}", marker.kind.color(), marker.popup),
        })
        .join("\n")
}

impl From<&Marker> for Feature {
    fn from(marker: &Marker) -> Feature {
        let mut properties = Map::new();
        properties.insert("kind".to_string(), json!(marker.kind));
        properties.insert("color".to_string(), json!(marker.kind.color()));
        properties.insert("address".to_string(), json!(marker.popup));
        if let Some(distance) = marker.distance {
            properties.insert("distance".to_string(), json!(distance.round() as u64));
        }
        Feature {
            bbox: None,
            geometry: Some(Geometry::from(marker.coord)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

pub fn to_feature_collection(markers: &[Marker]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: markers.iter().map(Feature::from).collect(),
        foreign_members: None,
    }
}

/// How the map is displayed.
#[derive(Debug, Clone)]
pub struct MapView {
    pub tile_url: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub zoom: u8,
    pub center: Coord,
    pub attribution: String,
    pub location_icon: String,
    pub reference_icon: String,
}

impl From<&settings::Map> for MapView {
    fn from(map: &settings::Map) -> MapView {
        MapView {
            tile_url: map.tile_url.clone(),
            min_zoom: map.min_zoom,
            max_zoom: map.max_zoom,
            zoom: map.zoom.max(map.min_zoom).min(map.max_zoom),
            center: map.center(),
            attribution: map.attribution.clone(),
            location_icon: map.location_icon.clone(),
            reference_icon: map.reference_icon.clone(),
        }
    }
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>proximap</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>#map { height: 90vh; width: 100%; }</style>
</head>
<body>
<div>$SUMMARY</div>
<div id="map"></div>
<script>
var map = L.map('map').setView([$LAT, $LON], $ZOOM);
L.tileLayer($TILES, {
  detectRetina: true,
  minZoom: $MIN_ZOOM,
  maxZoom: $MAX_ZOOM,
  attribution: $ATTRIBUTION
}).addTo(map);
function icon(url) {
  return L.icon({ iconUrl: url, iconSize: [25, 41], iconAnchor: [12, 41], popupAnchor: [1, -34] });
}
var icons = { location: icon($LOCATION_ICON), reference: icon($REFERENCE_ICON) };
L.geoJSON($MARKERS, {
  pointToLayer: function (feature, latlng) {
    return L.marker(latlng, { icon: icons[feature.properties.kind] });
  },
  onEachFeature: function (feature, layer) {
    var popup = document.createElement('div');
    popup.textContent = feature.properties.address;
    layer.bindPopup(popup);
  }
}).addTo(map);
</script>
</body>
</html>
"#;

/// A json value that can be pasted in a `<script>` element.
fn script_literal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Replaces every `$NAME` of `template` by `value(NAME)`, in a single pass:
/// substituted text is never scanned again. Unknown names are kept as is.
fn fill_template<F>(template: &str, value: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut page = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('$') {
        page.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let len = after
            .find(|c: char| !(c.is_ascii_uppercase() || c == '_'))
            .unwrap_or_else(|| after.len());
        let name = &after[..len];
        match value(name) {
            Some(text) => page.push_str(&text),
            None => {
                page.push('$');
                page.push_str(name);
            }
        }
        rest = &after[len..];
    }
    page.push_str(rest);
    page
}

/// A standalone html page showing the markers over the tiles, with
/// `summary` as a text header.
pub fn to_html(view: &MapView, markers: &[Marker], summary: &str) -> String {
    fill_template(PAGE_TEMPLATE, |name| {
        let text = match name {
            "SUMMARY" => escape_html(summary),
            "LAT" => view.center.lat().to_string(),
            "LON" => view.center.lon().to_string(),
            "ZOOM" => view.zoom.to_string(),
            "MIN_ZOOM" => view.min_zoom.to_string(),
            "MAX_ZOOM" => view.max_zoom.to_string(),
            "TILES" => script_literal(&view.tile_url),
            "ATTRIBUTION" => script_literal(&view.attribution),
            "LOCATION_ICON" => script_literal(&view.location_icon),
            "REFERENCE_ICON" => script_literal(&view.reference_icon),
            "MARKERS" => script_literal(&to_feature_collection(markers)),
            _ => return None,
        };
        Some(text)
    })
}

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
use crate::proximity::SearchRadius;
use crate::Error;
use config::{Config, Environment, File, FileFormat};
use failure::ResultExt;
use serde::Deserialize;
use slog_scope::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Locations {
    /// Url or path of the pipe delimited location file.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geocoder {
    pub url: String,
    /// No timeout when unset.
    pub timeout_ms: Option<u64>,
}

impl Geocoder {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
    pub default_radius: f64,
    pub max_radius: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Map {
    pub tile_url: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub zoom: u8,
    pub center: Center,
    pub attribution: String,
    pub location_icon: String,
    pub reference_icon: String,
}

impl Map {
    pub fn center(&self) -> Coord {
        Coord::new(self.center.lon, self.center.lat)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub locations: Locations,
    pub geocoder: Geocoder,
    pub search: Search,
    pub map: Map,
}

impl Settings {
    /// Builds the settings from, in increasing priority:
    /// * the default configuration embedded at compile time,
    /// * `default.toml` then `<run_mode>.toml` in `config_dir`, if given,
    /// * `PROXIMAP_` environment variables, `__` separating the sections
    ///   (eg `PROXIMAP_SEARCH__DEFAULT_RADIUS=500`),
    /// * `key=value` overrides, usually from the command line.
    pub fn new(
        config_dir: &Option<PathBuf>,
        run_mode: &Option<String>,
        overrides: &[String],
    ) -> Result<Self, Error> {
        let mut config = Config::new();
        config
            .merge(File::from_str(
                include_str!("../config/default.toml"),
                FileFormat::Toml,
            ))
            .with_context(|e| {
                format!(
                    "Could not merge default configuration from file at compile time: {}",
                    e
                )
            })?;

        match config_dir {
            Some(dir) => {
                let default_path = dir.join("default.toml");
                info!("using configuration from {}", default_path.display());
                config
                    .merge(File::from(default_path.clone()).required(false))
                    .with_context(|e| {
                        format!(
                            "Could not merge configuration from file {}: {}",
                            default_path.display(),
                            e
                        )
                    })?;
                if let Some(run_mode) = run_mode {
                    let mode_path = dir.join(run_mode).with_extension("toml");
                    info!("using configuration from {}", mode_path.display());
                    config
                        .merge(File::from(mode_path.clone()).required(true))
                        .with_context(|e| {
                            format!(
                                "Could not merge {} configuration in file {}: {}",
                                run_mode,
                                mode_path.display(),
                                e
                            )
                        })?;
                }
            }
            None => {
                if run_mode.is_some() {
                    // A run mode names a file of the config directory, without
                    // one there is nothing to read.
                    warn!("run mode used without the 'config_dir' option. Please set the config directory with --config-dir.");
                    return Err(failure::err_msg(String::from(
                        "Could not build program settings",
                    )));
                }
            }
        }

        config
            .merge(Environment::with_prefix("PROXIMAP").separator("__"))
            .with_context(|e| format!("Could not merge environment configuration: {}", e))?;

        for setting in overrides {
            let (key, value) = split_override(setting)?;
            config
                .set(key, value)
                .with_context(|e| format!("Could not override '{}': {}", key, e))?;
        }

        config.try_into().map_err(|e| {
            failure::err_msg(format!(
                "Could not generate settings from configuration: {}",
                e
            ))
        })
    }

    /// The radius the viewer starts with.
    pub fn radius(&self) -> Result<SearchRadius, Error> {
        SearchRadius::bounded(self.search.default_radius, self.search.max_radius).ok_or_else(
            || {
                failure::err_msg(format!(
                    "invalid default radius {}",
                    self.search.default_radius
                ))
            },
        )
    }
}

fn split_override(setting: &str) -> Result<(&str, &str), Error> {
    let mut parts = setting.splitn(2, '=');
    match (parts.next(), parts.next()) {
        (Some(key), Some(value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(failure::err_msg(format!(
            "invalid setting '{}', expected key=value",
            setting
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = Settings::new(&None, &None, &[]).unwrap();
        assert_eq!(settings.search.default_radius, 10_000.);
        assert_eq!(settings.map.min_zoom, 11);
        assert_eq!(settings.map.max_zoom, 19);
        assert_eq!(settings.map.zoom, 13);
        assert_eq!(settings.map.center.lat, 1.3521);
        assert_eq!(settings.map.center.lon, 103.8198);
        assert!(settings.geocoder.timeout().is_none());
        assert!(settings.map.tile_url.ends_with("{z}/{x}/{y}.png"));
    }

    #[test]
    fn command_line_overrides() {
        let overrides = vec![
            "search.default_radius=500".to_string(),
            "geocoder.timeout_ms = 2000".to_string(),
        ];
        let settings = Settings::new(&None, &None, &overrides).unwrap();
        assert_eq!(settings.radius().unwrap().meters(), 500.);
        assert_eq!(settings.geocoder.timeout(), Some(Duration::from_millis(2000)));
    }

    #[test]
    fn default_radius_is_clamped_to_max() {
        let overrides = vec!["search.default_radius=50000".to_string()];
        let settings = Settings::new(&None, &None, &overrides).unwrap();
        assert_eq!(settings.radius().unwrap().meters(), 10_000.);
    }

    #[test]
    fn malformed_override_is_an_error() {
        let overrides = vec!["search.default_radius".to_string()];
        assert!(Settings::new(&None, &None, &overrides).is_err());
    }

    #[test]
    fn run_mode_requires_a_config_dir() {
        assert!(Settings::new(&None, &Some("testing".to_string()), &[]).is_err());
    }
}

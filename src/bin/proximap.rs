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

use failure::ResultExt;
use proximap::loader::{self, DefaultSource};
use proximap::render::{self, MapView};
use proximap::settings::Settings;
use proximap::state::{Key, SearchOutcome, UiEvent, ViewState};
use proximap::{Error, Geocoder, OneMapGeocoder};
use slog_scope::info;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "proximap",
    about = "Geocode a place and show the points of interest around it"
)]
struct Args {
    /// Configuration directory, with a default.toml and one file per run mode.
    #[structopt(short = "c", long = "config-dir", parse(from_os_str))]
    config_dir: Option<PathBuf>,
    /// Run mode, reads <run-mode>.toml from the configuration directory.
    #[structopt(short = "m", long = "run-mode")]
    run_mode: Option<String>,
    /// Override a setting, eg `-s search.default_radius=500`.
    #[structopt(short = "s", long = "setting")]
    settings: Vec<String>,
    /// Location file, url or path. Overrides `locations.url`.
    #[structopt(short = "l", long = "locations")]
    locations: Option<String>,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Look a query up once and show the locations around it.
    Search {
        /// Free text query, eg a postal code.
        #[structopt(short = "q", long = "query")]
        query: String,
        /// Radius in meters.
        #[structopt(short = "r", long = "radius")]
        radius: Option<f64>,
        /// Write the markers as GeoJSON.
        #[structopt(long = "geojson", parse(from_os_str))]
        geojson: Option<PathBuf>,
        /// Write a Leaflet page of the map.
        #[structopt(long = "html", parse(from_os_str))]
        html: Option<PathBuf>,
    },
    /// Read queries from stdin, one per line. `:radius <meters>` changes
    /// the radius, `:quit` leaves.
    Interactive {
        /// Rewrite this Leaflet page after each change.
        #[structopt(long = "html", parse(from_os_str))]
        html: Option<PathBuf>,
    },
}

enum Input {
    Event(UiEvent),
    Search(String),
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let trimmed = line.trim();
    if trimmed == ":quit" || trimmed == ":q" {
        return Ok(Input::Quit);
    }
    if let Some(value) = trimmed.strip_prefix(":radius") {
        return value
            .trim()
            .parse::<f64>()
            .map(|meters| Input::Event(UiEvent::RadiusChanged(meters)))
            .map_err(|e| format!("invalid radius '{}': {}", value.trim(), e));
    }
    Ok(Input::Search(line.to_string()))
}

fn write_output(path: &Path, content: &str) -> Result<(), Error> {
    std::fs::write(path, content)
        .with_context(|_| format!("could not write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn show<W: Write>(out: &mut W, state: &ViewState) -> Result<(), Error> {
    let markers = render::markers(state);
    writeln!(out, "{}", render::summary(state))?;
    if !markers.is_empty() {
        writeln!(out, "{}", render::listing(&markers))?;
    }
    Ok(())
}

fn write_html(path: &Option<PathBuf>, view: &MapView, state: &ViewState) -> Result<(), Error> {
    if let Some(path) = path {
        let page = render::to_html(view, &render::markers(state), &render::summary(state));
        write_output(path, &page)?;
    }
    Ok(())
}

fn interactive<G: Geocoder>(
    state: &mut ViewState,
    geocoder: &G,
    view: &MapView,
    html: &Option<PathBuf>,
) -> Result<(), Error> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    show(&mut out, state)?;
    write_html(html, view, state)?;
    for line in stdin.lock().lines() {
        let line = line.context("could not read stdin")?;
        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Event(event)) => {
                state.handle(event, geocoder);
            }
            Ok(Input::Search(query)) => {
                state.handle(UiEvent::QueryChanged(query), geocoder);
                if let Some(outcome) = state.handle(UiEvent::KeyPressed(Key::Enter), geocoder) {
                    report(&mut out, &outcome)?;
                }
            }
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                continue;
            }
        }
        show(&mut out, state)?;
        write_html(html, view, state)?;
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, outcome: &SearchOutcome) -> Result<(), Error> {
    match outcome {
        SearchOutcome::Updated(_) | SearchOutcome::Superseded => {}
        SearchOutcome::NotFound => writeln!(out, "no results found")?,
        SearchOutcome::Failed(e) => writeln!(out, "{}", e)?,
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Error> {
    let mut settings = Settings::new(&args.config_dir, &args.run_mode, &args.settings)?;
    if let Some(locations) = args.locations {
        settings.locations.url = locations;
    }
    let geocoder = OneMapGeocoder::new(&settings.geocoder.url, settings.geocoder.timeout())?;
    let store = loader::load_store(&DefaultSource::default(), &settings.locations.url);
    let mut state = ViewState::new(store, settings.radius()?);
    let view = MapView::from(&settings.map);

    match args.cmd {
        Command::Search {
            query,
            radius,
            geojson,
            html,
        } => {
            if let Some(radius) = radius {
                state.handle(UiEvent::RadiusChanged(radius), &geocoder);
            }
            state.handle(UiEvent::QueryChanged(query), &geocoder);
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Some(outcome) = state.handle(UiEvent::TriggerClicked, &geocoder) {
                report(&mut out, &outcome)?;
            }
            show(&mut out, &state)?;
            if let Some(path) = geojson {
                let collection = render::to_feature_collection(&render::markers(&state));
                write_output(&path, &serde_json::to_string_pretty(&collection)?)?;
            }
            write_html(&html, &view, &state)
        }
        Command::Interactive { html } => interactive(&mut state, &geocoder, &view, &html),
    }
}

fn main() {
    proximap::utils::launch_run(run);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_radius_and_quit() {
        match parse_input(" :radius 2500 ") {
            Ok(Input::Event(UiEvent::RadiusChanged(meters))) => assert_eq!(meters, 2500.),
            _ => panic!("expected a radius change"),
        }
        assert!(matches!(parse_input(":quit"), Ok(Input::Quit)));
        assert!(parse_input(":radius far").is_err());
    }

    #[test]
    fn anything_else_is_a_query() {
        match parse_input("  ") {
            Ok(Input::Search(query)) => assert_eq!(query, "  "),
            _ => panic!("expected a search"),
        }
    }
}

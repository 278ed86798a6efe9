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

use crate::geocoder::{GeocodeError, Geocoder, ReferenceMarker};
use crate::poi::PointOfInterest;
use crate::proximity::{self, SearchRadius};
use crate::store::LocationStore;
use slog_scope::{error, info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

/// What the user can do on the search surface.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    QueryChanged(String),
    KeyPressed(Key),
    TriggerClicked,
    RadiusChanged(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The reference marker was replaced and the filtered set recomputed.
    Updated(ReferenceMarker),
    NotFound,
    Failed(GeocodeError),
    /// A more recent search was started before this one completed, its
    /// result was dropped.
    Superseded,
}

/// Handed out when a search starts, needed to apply its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// The filtered set for a reference and a radius: the whole store while
/// nothing has been searched, the points within the radius afterwards.
pub fn derive_filtered(
    store: &LocationStore,
    reference: Option<&ReferenceMarker>,
    radius: SearchRadius,
) -> Vec<Arc<PointOfInterest>> {
    match reference {
        Some(reference) => proximity::filter_within(store, &reference.coord(), radius),
        None => store.points().to_vec(),
    }
}

/// State of the viewer: search text, radius, reference marker and the
/// points currently shown.
///
/// The filtered set is only ever written by `refresh`, which is called when
/// the radius or the reference changes.
#[derive(Debug)]
pub struct ViewState {
    store: LocationStore,
    query: String,
    radius: SearchRadius,
    reference: Option<ReferenceMarker>,
    filtered: Vec<Arc<PointOfInterest>>,
    last_seq: u64,
}

impl ViewState {
    pub fn new(store: LocationStore, radius: SearchRadius) -> ViewState {
        let filtered = derive_filtered(&store, None, radius);
        ViewState {
            store,
            query: String::new(),
            radius,
            reference: None,
            filtered,
            last_seq: 0,
        }
    }

    pub fn store(&self) -> &LocationStore {
        &self.store
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn radius(&self) -> SearchRadius {
        self.radius
    }

    pub fn reference(&self) -> Option<&ReferenceMarker> {
        self.reference.as_ref()
    }

    /// The filtered set. It may hold points without usable coordinates
    /// while nothing has been searched, see `visible`.
    pub fn filtered(&self) -> &[Arc<PointOfInterest>] {
        &self.filtered
    }

    /// The filtered points that can be drawn.
    pub fn visible(&self) -> Vec<Arc<PointOfInterest>> {
        proximity::renderable(&self.filtered)
    }

    pub fn set_query<S: Into<String>>(&mut self, query: S) {
        self.query = query.into();
    }

    /// Sets the radius, clamped to its bounds. A value that is not a number
    /// is ignored. Returns whether the radius changed.
    pub fn set_radius(&mut self, meters: f64) -> bool {
        let radius = match self.radius.with_meters(meters) {
            Some(radius) => radius,
            None => {
                warn!("ignoring invalid radius {}", meters);
                return false;
            }
        };
        if radius == self.radius {
            return false;
        }
        self.radius = radius;
        self.refresh();
        true
    }

    /// Starts a search for the current query text. Any search started before
    /// is superseded.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.last_seq += 1;
        SearchTicket {
            seq: self.last_seq,
            query: self.query.clone(),
        }
    }

    /// Applies the result of a search, unless a newer one has been started
    /// since. Only a found place changes the state.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<ReferenceMarker, GeocodeError>,
    ) -> SearchOutcome {
        if ticket.seq != self.last_seq {
            info!("dropping result of superseded search '{}'", ticket.query);
            return SearchOutcome::Superseded;
        }
        match result {
            Ok(marker) => {
                info!("'{}' found at {}", ticket.query, marker.address);
                self.reference = Some(marker.clone());
                self.refresh();
                SearchOutcome::Updated(marker)
            }
            Err(GeocodeError::NotFound(query)) => {
                warn!("no results found for '{}'", query);
                SearchOutcome::NotFound
            }
            Err(e) => {
                error!("error fetching location: {}", e);
                SearchOutcome::Failed(e)
            }
        }
    }

    pub fn search<G: Geocoder + ?Sized>(&mut self, geocoder: &G) -> SearchOutcome {
        let ticket = self.begin_search();
        let result = geocoder.geocode(ticket.query());
        self.complete_search(ticket, result)
    }

    /// Applies a user event. Enter and the trigger both run the search; the
    /// outcome is returned when one ran.
    pub fn handle<G: Geocoder + ?Sized>(
        &mut self,
        event: UiEvent,
        geocoder: &G,
    ) -> Option<SearchOutcome> {
        match event {
            UiEvent::QueryChanged(query) => {
                self.set_query(query);
                None
            }
            UiEvent::KeyPressed(Key::Enter) | UiEvent::TriggerClicked => {
                Some(self.search(geocoder))
            }
            UiEvent::KeyPressed(Key::Char(_)) => None,
            UiEvent::RadiusChanged(meters) => {
                self.set_radius(meters);
                None
            }
        }
    }

    fn refresh(&mut self) {
        self.filtered = derive_filtered(&self.store, self.reference.as_ref(), self.radius);
    }
}

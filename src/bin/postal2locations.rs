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

use proximap::postal;
use proximap::settings::Settings;
use proximap::{Error, OneMapGeocoder};
use slog_scope::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "postal2locations",
    about = "Geocode postal codes into a pipe delimited location file"
)]
struct Args {
    /// Configuration directory, with a default.toml and one file per run mode.
    #[structopt(short = "c", long = "config-dir", parse(from_os_str))]
    config_dir: Option<PathBuf>,
    /// Run mode, reads <run-mode>.toml from the configuration directory.
    #[structopt(short = "m", long = "run-mode")]
    run_mode: Option<String>,
    /// Override a setting, eg `-s geocoder.timeout_ms=2000`.
    #[structopt(short = "s", long = "setting")]
    settings: Vec<String>,
    /// Print the header row first.
    #[structopt(long = "header")]
    header: bool,
    /// Postal codes to look up. Read from stdin, one per line, when none is given.
    postals: Vec<String>,
}

fn run(args: Args) -> Result<(), Error> {
    let settings = Settings::new(&args.config_dir, &args.run_mode, &args.settings)?;
    let geocoder = OneMapGeocoder::new(&settings.geocoder.url, settings.geocoder.timeout())?;

    let postals = if args.postals.is_empty() {
        io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        args.postals
    };
    info!("looking up {} postal codes", postals.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.header {
        writeln!(out, "{}", postal::HEADER)?;
    }
    for row in postal::lookup_rows(&geocoder, postals.iter().map(String::as_str)) {
        writeln!(out, "{}", row)?;
    }
    Ok(())
}

fn main() {
    proximap::utils::launch_run(run);
}

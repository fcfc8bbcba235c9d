#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub mod file_loader;
pub mod filters;
pub mod logger;
pub mod panel;
pub mod viewer;
#[cfg(feature = "wasm")]
pub mod wasm;

use std::num::NonZeroUsize;

use anyhow::Result;
use structopt::StructOpt;

use model::{FilterState, WeatherFilter};

pub use self::file_loader::DataSource;
pub use self::panel::Panel;
pub use self::viewer::{LoadStatus, Viewer};

#[derive(StructOpt)]
#[structopt(
    name = "trip_viewer",
    about = "Prepares GPS trip traces to be drawn on a map"
)]
pub struct Args {
    /// The path to a trip CSV file. The embedded sample is used if omitted.
    #[structopt(long)]
    csv: Option<String>,
    /// Keep 1 in this many rows
    #[structopt(long, default_value = "1")]
    sampling_rate: NonZeroUsize,
    /// Only draw points at or above this speed, in km/h
    #[structopt(long, default_value = "0")]
    speed_min: f64,
    /// Only draw points at or below this speed, in km/h
    #[structopt(long, default_value = "200")]
    speed_max: f64,
    /// Only draw points with exactly this weather condition, or "all"
    #[structopt(long, default_value = "all")]
    weather: String,
    /// Include per-trip statistics
    #[structopt(long)]
    show_stats: bool,
    /// Write the prepared layers as GeoJSON to this path
    #[structopt(long)]
    geojson: Option<String>,
    /// Write the prepared layers, as handed to the map page, to this path
    #[structopt(long)]
    layers_json: Option<String>,
}

impl Args {
    fn viewer(&self) -> Viewer {
        let source = match self.csv {
            Some(ref path) => DataSource::File(path.clone()),
            None => DataSource::Embedded,
        };
        let mut viewer = Viewer::new(source);
        viewer.set_sampling_rate(self.sampling_rate);
        viewer.set_filters(FilterState {
            speed_min: self.speed_min,
            speed_max: self.speed_max,
            weather: WeatherFilter::parse(&self.weather),
        });
        viewer.show_statistics = self.show_stats;
        viewer
    }

    pub fn run(self) -> Result<()> {
        let mut viewer = self.viewer();
        viewer.load();
        if let Some(err) = viewer.error() {
            bail!("{err}");
        }
        let layers = match viewer.layers() {
            Some(layers) => layers,
            None => bail!("Nothing loaded"),
        };

        let panel = viewer.panel();
        println!("{}", panel.title);
        for line in &panel.lines {
            println!("  {line}");
        }
        for trip in &layers.trips {
            println!(
                "Trip {}: {} points on the path, {} markers",
                trip.trip,
                trip.path.len(),
                trip.markers.len()
            );
            if let Some(ref stats) = trip.start.popup.statistics {
                for line in &stats.lines {
                    println!("  {line}");
                }
            }
        }
        info!(
            "Drawing {} of {} trips, {} markers",
            layers.trips.len(),
            layers.trips_loaded,
            layers.num_markers()
        );

        if let Some(ref path) = self.geojson {
            fs_err::write(path, layers.to_geojson_string()?)?;
            info!("Wrote {path}");
        }
        if let Some(ref path) = self.layers_json {
            fs_err::write(path, serde_json::to_string_pretty(&layers)?)?;
            info!("Wrote {path}");
        }
        Ok(())
    }
}

pub fn main() -> Result<()> {
    logger::setup();
    Args::from_args().run()
}

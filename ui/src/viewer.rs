use std::num::NonZeroUsize;

use model::{FilterState, LoadError, MapLayers, Model};

use crate::file_loader::DataSource;
use crate::panel::Panel;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    /// The message shown to the user, with an option to retry
    Error(String),
}

/// Everything the page shows, changed only through the methods below.
pub struct Viewer {
    status: LoadStatus,
    model: Option<Model>,
    source: DataSource,
    pub filters: FilterState,
    pub show_statistics: bool,
    sampling_rate: NonZeroUsize,
    /// Bumped by every `begin_load`; only the latest load may finish
    generation: u64,
}

impl Viewer {
    pub fn new(source: DataSource) -> Self {
        Self {
            status: LoadStatus::Idle,
            model: None,
            source,
            filters: FilterState::default(),
            show_statistics: false,
            sampling_rate: NonZeroUsize::MIN,
            generation: 0,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        match self.status {
            LoadStatus::Error(ref msg) => Some(msg),
            _ => None,
        }
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn sampling_rate(&self) -> NonZeroUsize {
        self.sampling_rate
    }

    /// Takes effect on the next load
    pub fn set_sampling_rate(&mut self, rate: NonZeroUsize) {
        self.sampling_rate = rate;
    }

    /// Takes effect on the next load
    pub fn set_source(&mut self, source: DataSource) {
        self.source = source;
    }

    pub fn toggle_statistics(&mut self) {
        self.show_statistics = !self.show_statistics;
    }

    /// Filters only change what's drawn, so this never reloads anything.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    /// Returns the generation to hand back to `finish_load`. Starting a load supersedes any
    /// that are still in flight.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        info!("Loading trip data from {} (load {})", self.source, self.generation);
        self.status = LoadStatus::Loading;
        self.generation
    }

    /// Handles the raw bytes (or the failure to get them) for the load `begin_load` numbered
    /// `generation`. Results from superseded loads are dropped.
    pub fn finish_load(&mut self, generation: u64, data: Result<Vec<u8>, LoadError>) {
        if generation != self.generation || self.status != LoadStatus::Loading {
            warn!(
                "Ignoring the result of load {} while on load {}, {:?}",
                generation, self.generation, self.status
            );
            return;
        }
        match data.and_then(|data| Model::load(data.as_slice(), self.sampling_rate)) {
            Ok(model) => {
                info!(
                    "{} trips with {} points ready",
                    model.trips.len(),
                    model.num_points()
                );
                self.model = Some(model);
                self.status = LoadStatus::Ready;
            }
            Err(err) => {
                error!("Loading {} failed: {:?}", self.source, err);
                self.model = None;
                self.status = LoadStatus::Error(err.to_string());
            }
        }
    }

    /// Loads synchronously. URLs can't be read this way and end in an error.
    pub fn load(&mut self) {
        let generation = self.begin_load();
        let data = self.source.read();
        self.finish_load(generation, data);
    }

    /// Starts over from scratch. Only meaningful after an error.
    pub fn retry(&mut self) -> bool {
        if self.error().is_none() {
            return false;
        }
        self.load();
        true
    }

    /// A new sampling rate affects which rows are read, so it needs a full load.
    pub fn reload_with_sampling_rate(&mut self, rate: NonZeroUsize) {
        self.set_sampling_rate(rate);
        self.load();
    }

    /// None unless the data is ready
    pub fn layers(&self) -> Option<MapLayers> {
        if self.status != LoadStatus::Ready {
            return None;
        }
        self.model
            .as_ref()
            .map(|model| MapLayers::new(model, &self.filters, self.show_statistics))
    }

    pub fn panel(&self) -> Panel {
        Panel::new(self)
    }
}

use anyhow::Result;
use tracing::{debug, info, warn};

use super::aggregate::TrafficState;
use super::types::MarkerFrame;
use crate::model::TimeFilter;

/// Receives a fresh frame of markers after every filter change.
pub trait MarkerSink {
    fn render(&mut self, frame: &MarkerFrame) -> Result<()>;
}

impl<F> MarkerSink for F
where
    F: FnMut(&MarkerFrame) -> Result<()>,
{
    fn render(&mut self, frame: &MarkerFrame) -> Result<()> {
        self(frame)
    }
}

/// The "on filter changed" handler the slider drives.
///
/// Every call recomputes all station traffic and renders before returning,
/// so events are handled strictly one at a time.
pub struct FilterHandler<S> {
    state: TrafficState,
    sink: S,
}

impl<S: MarkerSink> FilterHandler<S> {
    pub fn new(state: TrafficState, sink: S) -> Self {
        Self { state, sink }
    }

    pub fn state(&self) -> &TrafficState {
        &self.state
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Renders the frame for the current filter without changing it.
    pub fn render_current(&mut self) -> Result<()> {
        let frame = self.frame();
        self.sink.render(&frame)
    }

    pub fn on_filter_changed(&mut self, filter: TimeFilter) -> Result<()> {
        let previous = self.state.filter();
        self.state.set_filter(filter);

        if previous.is_windowed() != filter.is_windowed() {
            info!(
                windowed = filter.is_windowed(),
                label = %filter.label(),
                "Filter mode changed"
            );
        }
        debug!(filter = filter.slider_value(), "Filter changed");

        self.render_current()
    }

    /// Applies one line of slider input.
    ///
    /// Blank lines and values that are not a valid filter are ignored and
    /// leave the current filter in place. Returns whether a frame was rendered.
    pub fn on_slider_input(&mut self, line: &str) -> Result<bool> {
        if line.trim().is_empty() {
            return Ok(false);
        }
        match line.parse::<TimeFilter>() {
            Ok(filter) => {
                self.on_filter_changed(filter)?;
                Ok(true)
            }
            Err(e) => {
                warn!(input = %line, error = %e, "Ignoring slider value");
                Ok(false)
            }
        }
    }

    fn frame(&self) -> MarkerFrame {
        let filter = self.state.filter();
        MarkerFrame {
            time_filter: filter.slider_value(),
            label: filter.label(),
            markers: self.state.markers(),
        }
    }
}

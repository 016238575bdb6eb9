//! Headless model of the route-planning page: city selectors, the route
//! form, the result panels and the map overlay.

mod loader;
pub mod map;
mod renderer;
mod submitter;
pub mod view;

#[cfg(test)]
mod fake;

use crate::api::DynAPI;
use crate::error::Error;

pub use loader::CITY_LOAD_ERROR;
pub use map::MapView;
pub use submitter::ROUTE_FALLBACK;
pub use view::View;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageState {
    /// Waiting for input, possibly showing the last result.
    Idle,
    Submitting,
}

pub struct Page {
    api: DynAPI,
    state: PageState,
    view: View,
    map: MapView,
}

impl Page {
    pub fn new(api: DynAPI) -> Self {
        Self {
            api,
            state: PageState::Idle,
            view: View::default(),
            map: MapView::default(),
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn select_start(&mut self, value: &str) -> Result<(), Error> {
        self.view.start.select(value)
    }

    pub fn select_goal(&mut self, value: &str) -> Result<(), Error> {
        self.view.goal.select(value)
    }

    pub fn set_datetime(&mut self, input: impl Into<String>) {
        self.view.datetime = input.into();
    }
}

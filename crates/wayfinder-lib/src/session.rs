use serde::{Deserialize, Serialize};

use crate::map::LocationId;
use crate::routing::Route;

/// Navigation context shared by the screens of one visitor's session.
///
/// Holds the selected endpoints and the route last computed for them.
/// Changing either endpoint discards the active route so a stale route is
/// never shown for a new selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationSession {
    from: Option<LocationId>,
    to: Option<LocationId>,
    active_route: Option<Route>,
}

impl NavigationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn set_from(&mut self, location: impl Into<LocationId>) {
        let location = location.into();
        if self.from.as_ref() != Some(&location) {
            self.from = Some(location);
            self.active_route = None;
        }
    }

    pub fn set_to(&mut self, location: impl Into<LocationId>) {
        let location = location.into();
        if self.to.as_ref() != Some(&location) {
            self.to = Some(location);
            self.active_route = None;
        }
    }

    /// Exchange start and destination.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
        if self.from != self.to {
            self.active_route = None;
        }
    }

    /// Forget endpoints and route.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Both endpoints, once selected.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        Some((self.from.as_deref()?, self.to.as_deref()?))
    }

    pub fn active_route(&self) -> Option<&Route> {
        self.active_route.as_ref()
    }

    pub(crate) fn set_active_route(&mut self, route: Route) {
        self.active_route = Some(route);
    }

    pub(crate) fn clear_active_route(&mut self) {
        self.active_route = None;
    }
}

//! Current-location provider and active-link matching.

use regex::Regex;
use std::cell::RefCell;

/// Supplies the active navigation path and performs navigation
pub trait LocationProvider {
    fn current_path(&self) -> String;

    /// Navigate to a dataset-provided link
    fn navigate(&self, link: &str, target: Option<&str>);
}

/// Whether a node's link matches the current location. The link, with its
/// `#` markers removed, is searched as a regular expression in the location;
/// a link that is not a valid pattern is matched literally.
pub fn link_matches(link: &str, location: &str) -> bool {
    let pattern = link.replace('#', "");
    if pattern.is_empty() {
        return false;
    }
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(location),
        Err(e) => {
            tracing::debug!("link {:?} is not a pattern ({}), matching literally", link, e);
            location.contains(&pattern)
        }
    }
}

/// Location provider with a fixed starting path that records navigations
/// and follows them
#[derive(Debug, Default)]
pub struct StaticLocation {
    path: RefCell<String>,
    history: RefCell<Vec<String>>,
}

impl StaticLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: RefCell::new(path.into()),
            history: RefCell::new(Vec::new()),
        }
    }

    /// Every link navigated to, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl LocationProvider for StaticLocation {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn navigate(&self, link: &str, _target: Option<&str>) {
        self.history.borrow_mut().push(link.to_string());
        *self.path.borrow_mut() = link.to_string();
    }
}

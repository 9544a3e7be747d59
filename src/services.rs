use log::{debug, warn};

use crate::catalog::GroupedOptions;
use crate::error::{PrefCardError, Result};

/// Multi-select over the services of a container catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSelector {
    services: Vec<String>,
    selected: Vec<bool>,
}

impl ServiceSelector {
    /// Lists every service of `catalog`; those in `preselected` start checked
    pub fn new(catalog: &GroupedOptions, preselected: &[String]) -> Self {
        let services: Vec<String> = catalog.keys().map(String::from).collect();
        let selected = services.iter().map(|s| preselected.contains(s)).collect();
        Self { services, selected }
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    pub fn is_selected(&self, idx: usize) -> bool {
        self.selected.get(idx).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, idx: usize) {
        if let Some(flag) = self.selected.get_mut(idx) {
            *flag = !*flag;
        }
    }

    pub fn set_selected(&mut self, service: &str, selected: bool) {
        match self.services.iter().position(|s| s == service) {
            Some(idx) => self.selected[idx] = selected,
            None => warn!("Service '{service}' is not in the catalog"),
        }
    }

    /// Selected services in list order, or `NoSelection` if none are checked
    pub fn selection(&self) -> Result<Vec<String>> {
        let chosen: Vec<String> = self
            .services
            .iter()
            .zip(&self.selected)
            .filter(|(_, &on)| on)
            .map(|(service, _)| service.clone())
            .collect();
        if chosen.is_empty() {
            return Err(PrefCardError::NoSelection);
        }
        debug!("Selected services: {chosen:?}");
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> GroupedOptions {
        vec![("Ortho", "Tray C"), ("Cardiac", "Tray A"), ("Neuro", "Tray N")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_services_listed_in_catalog_order() {
        let selector = ServiceSelector::new(&catalog(), &[]);
        assert_eq!(selector.services(), &["Cardiac", "Neuro", "Ortho"]);
    }

    #[test]
    fn test_nothing_selected_is_an_error() {
        let selector = ServiceSelector::new(&catalog(), &[]);
        assert!(matches!(selector.selection(), Err(PrefCardError::NoSelection)));
    }

    #[test]
    fn test_preselected_services_start_checked() {
        let selector = ServiceSelector::new(&catalog(), &["Ortho".to_string(), "Gone".to_string()]);

        assert_eq!(selector.selection().unwrap(), vec!["Ortho".to_string()]);
    }

    #[test]
    fn test_toggle_and_selection_order() {
        let mut selector = ServiceSelector::new(&catalog(), &[]);
        selector.toggle(2);
        selector.toggle(0);
        selector.set_selected("Neuro", true);
        selector.toggle(2);

        assert_eq!(
            selector.selection().unwrap(),
            vec!["Cardiac".to_string(), "Neuro".to_string()]
        );
    }
}

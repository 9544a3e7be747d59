//! Quantity/hold entry forms for containers and soft goods.
//!
//! The form is plain data: the UI reads entries, writes edits back through
//! the setters, and asks the form for rows when the card is saved. Search
//! only toggles visibility, so edit state survives any filter.

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

use crate::models::{ContainerOption, PreferenceCardRow, SoftGoodOption};

/// Longest quantity accepted; keeps every accepted entry inside `u32`
pub const MAX_QUANTITY_DIGITS: usize = 9;

/// An option that can appear as a line in an entry form
pub trait SelectableOption: Clone + Eq + Hash {
    fn label(&self) -> String;

    /// The option a saved row refers to, if the row is of this kind
    fn from_row(row: &PreferenceCardRow) -> Option<&Self>;

    fn to_row(&self, quantity: u32, hold: bool) -> PreferenceCardRow;
}

impl SelectableOption for ContainerOption {
    fn label(&self) -> String {
        format!("{}: {}", self.service, self.container_name)
    }

    fn from_row(row: &PreferenceCardRow) -> Option<&Self> {
        row.container()
    }

    fn to_row(&self, quantity: u32, hold: bool) -> PreferenceCardRow {
        PreferenceCardRow::Instrument {
            quantity,
            container: self.clone(),
            hold,
        }
    }
}

impl SelectableOption for SoftGoodOption {
    fn label(&self) -> String {
        format!("{}, Vendor Part #: {}", self.item_description, self.vendor_part_number)
    }

    fn from_row(row: &PreferenceCardRow) -> Option<&Self> {
        row.soft_good_item()
    }

    fn to_row(&self, quantity: u32, hold: bool) -> PreferenceCardRow {
        PreferenceCardRow::SoftGood {
            quantity,
            item: self.clone(),
            hold,
        }
    }
}

/// Digits only; the empty string means "not selected"
pub fn is_valid_quantity_input(value: &str) -> bool {
    value.len() <= MAX_QUANTITY_DIGITS && value.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryState {
    pub quantity: String,
    pub hold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K> {
    pub option: K,
    pub label: String,
    pub state: EntryState,
    visible: bool,
}

impl<K> Entry<K> {
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm<K: SelectableOption> {
    entries: Vec<Entry<K>>,
    index: HashMap<K, usize>,
    filter: String,
}

impl<K: SelectableOption> Default for EntryForm<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            filter: String::new(),
        }
    }
}

impl<K: SelectableOption> EntryForm<K> {
    /// One entry per option, prefilled from `preselected` rows whose
    /// identity key matches exactly.
    pub fn build(options: impl IntoIterator<Item = K>, preselected: &[PreferenceCardRow]) -> Self {
        let saved: HashMap<&K, (u32, bool)> = preselected
            .iter()
            .rev()
            .filter_map(|row| K::from_row(row).map(|key| (key, (row.quantity(), row.hold()))))
            .collect();

        let mut form = Self::default();
        let mut prefilled = 0usize;
        for option in options {
            let state = match saved.get(&option) {
                Some((quantity, hold)) => {
                    prefilled += 1;
                    EntryState {
                        quantity: quantity.to_string(),
                        hold: *hold,
                    }
                }
                None => EntryState::default(),
            };
            form.index.entry(option.clone()).or_insert(form.entries.len());
            form.entries.push(Entry {
                label: option.label(),
                option,
                state,
                visible: true,
            });
        }
        debug!(
            "Built entry form with {} entries ({} prefilled)",
            form.entries.len(),
            prefilled
        );
        form
    }

    /// Builds the form for a new option list. Options already on this form
    /// keep what the user entered; the rest are prefilled from `preselected`.
    pub fn rebuild(&self, options: impl IntoIterator<Item = K>, preselected: &[PreferenceCardRow]) -> Self {
        let mut form = Self::build(options, preselected);
        for entry in &self.entries {
            if let Some(&idx) = form.index.get(&entry.option) {
                form.entries[idx].state = entry.state.clone();
            }
        }
        form
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry<K>] {
        &self.entries
    }

    /// Entries passing the current search, with their positions
    pub fn visible_entries(&self) -> impl Iterator<Item = (usize, &Entry<K>)> {
        self.entries.iter().enumerate().filter(|(_, e)| e.visible)
    }

    pub fn state(&self, option: &K) -> Option<&EntryState> {
        self.index.get(option).map(|&idx| &self.entries[idx].state)
    }

    /// Replaces the quantity text if it is digits only. Returns whether the
    /// edit was accepted; a rejected edit leaves the entry unchanged.
    pub fn set_quantity_at(&mut self, idx: usize, value: &str) -> bool {
        if !is_valid_quantity_input(value) {
            return false;
        }
        match self.entries.get_mut(idx) {
            Some(entry) => {
                entry.state.quantity = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_quantity(&mut self, option: &K, value: &str) -> bool {
        match self.index.get(option) {
            Some(&idx) => self.set_quantity_at(idx, value),
            None => false,
        }
    }

    pub fn set_hold_at(&mut self, idx: usize, hold: bool) {
        if let Some(entry) = self.entries.get_mut(idx) {
            entry.state.hold = hold;
        }
    }

    pub fn set_hold(&mut self, option: &K, hold: bool) {
        if let Some(&idx) = self.index.get(option) {
            self.set_hold_at(idx, hold);
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Shows entries whose label contains `text`, ignoring case
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_string();
        let needle = text.to_lowercase();
        for entry in &mut self.entries {
            entry.visible = entry.label.to_lowercase().contains(&needle);
        }
    }

    /// Rows for every entry with a quantity; blank entries are skipped
    pub fn to_rows(&self) -> Vec<PreferenceCardRow> {
        self.entries
            .iter()
            .filter(|entry| !entry.state.quantity.trim().is_empty())
            .filter_map(|entry| {
                let quantity = entry.state.quantity.trim().parse::<u32>().ok()?;
                Some(entry.option.to_row(quantity, entry.state.hold))
            })
            .collect()
    }
}

pub type ContainerForm = EntryForm<ContainerOption>;
pub type SoftGoodsForm = EntryForm<SoftGoodOption>;

#[cfg(test)]
#[path = "entries_tests.rs"]
mod tests;

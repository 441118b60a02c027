// ABOUTME: Subway line model with an ordered chain of sections
// ABOUTME: Implements section insertion (append, prepend, split) and station removal with merging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// A stretch of track between two adjacent stations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Station towards the start of the line
    pub up_station_id: i64,
    /// Station towards the end of the line
    pub down_station_id: i64,
    /// Positive distance between the two stations
    pub distance: i64,
}

impl Section {
    /// Build a section, rejecting identical endpoints and non-positive distances
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when either rule is violated
    pub fn new(up_station_id: i64, down_station_id: i64, distance: i64) -> AppResult<Self> {
        if up_station_id == down_station_id {
            return Err(AppError::invalid_input(
                "Section endpoints must be different stations",
            ));
        }
        if distance <= 0 {
            return Err(AppError::invalid_input("Section distance must be positive"));
        }
        Ok(Self {
            up_station_id,
            down_station_id,
            distance,
        })
    }
}

/// A named, colored line; `sections` always forms one chain ordered up to down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Display color
    pub color: String,
    sections: Vec<Section>,
}

impl Line {
    /// Create a line made of a single section
    #[must_use]
    pub fn new(id: i64, name: String, color: String, first: Section) -> Self {
        Self {
            id,
            name,
            color,
            sections: vec![first],
        }
    }

    /// Sections in up-to-down order
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Station ids in up-to-down order
    #[must_use]
    pub fn station_ids(&self) -> Vec<i64> {
        let mut ids = Vec::with_capacity(self.sections.len() + 1);
        if let Some(first) = self.sections.first() {
            ids.push(first.up_station_id);
        }
        ids.extend(self.sections.iter().map(|s| s.down_station_id));
        ids
    }

    /// Whether `station_id` is one of this line's stations
    #[must_use]
    pub fn contains_station(&self, station_id: i64) -> bool {
        self.sections
            .iter()
            .any(|s| s.up_station_id == station_id || s.down_station_id == station_id)
    }

    /// Total length of the line
    #[must_use]
    pub fn total_distance(&self) -> i64 {
        self.sections.iter().map(|s| s.distance).sum()
    }

    /// Insert `section` into the chain
    ///
    /// Exactly one of its stations must already be on the line. The section
    /// is prepended or appended at a terminal, or splits the existing section
    /// sharing its known endpoint when it is strictly shorter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when both or neither station are on the line,
    /// or when a split would not leave a positive remainder
    pub fn add_section(&mut self, section: Section) -> AppResult<()> {
        let up_known = self.contains_station(section.up_station_id);
        let down_known = self.contains_station(section.down_station_id);

        match (up_known, down_known) {
            (true, true) => {
                return Err(AppError::invalid_input(
                    "Both stations are already registered on the line",
                ))
            }
            (false, false) => {
                return Err(AppError::invalid_input(
                    "Neither station is registered on the line",
                ))
            }
            _ => {}
        }

        let first_up = self.sections.first().map(|s| s.up_station_id);
        let last_down = self.sections.last().map(|s| s.down_station_id);

        if Some(section.down_station_id) == first_up {
            self.sections.insert(0, section);
        } else if Some(section.up_station_id) == last_down {
            self.sections.push(section);
        } else if up_known {
            self.split_below(section)?;
        } else {
            self.split_above(section)?;
        }
        Ok(())
    }

    /// New section hangs off an existing up station: `A-C` + `A-B` becomes `A-B-C`
    fn split_below(&mut self, section: Section) -> AppResult<()> {
        let index = self
            .sections
            .iter()
            .position(|s| s.up_station_id == section.up_station_id)
            .ok_or_else(|| AppError::internal("Line sections out of order"))?;
        let existing = self.sections[index];
        let remainder = Self::remaining_distance(existing, section)?;

        self.sections.splice(
            index..=index,
            [
                section,
                Section {
                    up_station_id: section.down_station_id,
                    down_station_id: existing.down_station_id,
                    distance: remainder,
                },
            ],
        );
        Ok(())
    }

    /// New section leads into an existing down station: `A-C` + `B-C` becomes `A-B-C`
    fn split_above(&mut self, section: Section) -> AppResult<()> {
        let index = self
            .sections
            .iter()
            .position(|s| s.down_station_id == section.down_station_id)
            .ok_or_else(|| AppError::internal("Line sections out of order"))?;
        let existing = self.sections[index];
        let remainder = Self::remaining_distance(existing, section)?;

        self.sections.splice(
            index..=index,
            [
                Section {
                    up_station_id: existing.up_station_id,
                    down_station_id: section.up_station_id,
                    distance: remainder,
                },
                section,
            ],
        );
        Ok(())
    }

    fn remaining_distance(existing: Section, inserted: Section) -> AppResult<i64> {
        if inserted.distance >= existing.distance {
            return Err(AppError::invalid_input(format!(
                "New section distance {} must be shorter than the existing section ({})",
                inserted.distance, existing.distance
            )));
        }
        Ok(existing.distance - inserted.distance)
    }

    /// Remove a station, joining its neighbours into one section
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the line has a single section or the
    /// station is not on the line
    pub fn remove_station(&mut self, station_id: i64) -> AppResult<()> {
        if self.sections.len() <= 1 {
            return Err(AppError::invalid_input(
                "A line with a single section cannot lose a station",
            ));
        }
        if !self.contains_station(station_id) {
            return Err(AppError::invalid_input(format!(
                "Station {station_id} is not on line {}",
                self.id
            )));
        }

        let first_up = self.sections.first().map(|s| s.up_station_id);
        let last_down = self.sections.last().map(|s| s.down_station_id);

        if first_up == Some(station_id) {
            self.sections.remove(0);
        } else if last_down == Some(station_id) {
            self.sections.pop();
        } else {
            let index = self
                .sections
                .iter()
                .position(|s| s.down_station_id == station_id)
                .ok_or_else(|| AppError::internal("Line sections out of order"))?;
            let above = self.sections[index];
            let below = self.sections[index + 1];
            self.sections.splice(
                index..=index + 1,
                [Section {
                    up_station_id: above.up_station_id,
                    down_station_id: below.down_station_id,
                    distance: above.distance + below.distance,
                }],
            );
        }
        Ok(())
    }
}

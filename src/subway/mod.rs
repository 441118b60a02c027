// ABOUTME: Subway network registry of stations and lines
// ABOUTME: Serves station and line management and answers connectivity for favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! # Subway Network
//!
//! Stations and lines live in one registry behind a single lock so that a
//! line never references a station that has just been deleted. The registry
//! also implements [`RouteOracle`]: two stations are connected when a chain
//! of sections, possibly across several lines, joins them.

/// Lines and their section chains
pub mod line;
/// Stations
pub mod station;

pub use line::{Line, Section};
pub use station::Station;

use crate::errors::{AppError, AppResult};
use crate::favorites::RouteOracle;
use async_trait::async_trait;
use pathfinding::prelude::bfs;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Fields needed to open a new line
#[derive(Debug, Clone)]
pub struct LineDraft {
    /// Display name
    pub name: String,
    /// Display color
    pub color: String,
    /// First terminal
    pub up_station_id: i64,
    /// Last terminal
    pub down_station_id: i64,
    /// Distance between the terminals
    pub distance: i64,
}

/// A line with its stations resolved, in up-to-down order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineView {
    /// Line identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Display color
    pub color: String,
    /// Stations from the up terminal to the down terminal
    pub stations: Vec<Station>,
    /// Sum of section distances between the terminals
    pub distance: i64,
}

#[derive(Debug, Default)]
struct NetworkState {
    next_station_id: i64,
    next_line_id: i64,
    stations: BTreeMap<i64, Station>,
    lines: BTreeMap<i64, Line>,
}

impl NetworkState {
    fn view(&self, line: &Line) -> LineView {
        LineView {
            id: line.id,
            name: line.name.clone(),
            color: line.color.clone(),
            stations: line
                .station_ids()
                .iter()
                .filter_map(|id| self.stations.get(id).cloned())
                .collect(),
            distance: line.total_distance(),
        }
    }

    fn line_mut(&mut self, line_id: i64) -> AppResult<&mut Line> {
        self.lines
            .get_mut(&line_id)
            .ok_or_else(|| line_not_found(line_id))
    }

    fn require_stations(&self, ids: [i64; 2]) -> AppResult<()> {
        match ids.iter().find(|id| !self.stations.contains_key(*id)) {
            Some(missing) => Err(AppError::invalid_input(format!(
                "Station {missing} does not exist"
            ))),
            None => Ok(()),
        }
    }

    /// Undirected adjacency over every section of every line
    fn adjacency(&self) -> HashMap<i64, Vec<i64>> {
        let mut adjacency: HashMap<i64, Vec<i64>> = HashMap::new();
        for section in self.lines.values().flat_map(Line::sections) {
            adjacency
                .entry(section.up_station_id)
                .or_default()
                .push(section.down_station_id);
            adjacency
                .entry(section.down_station_id)
                .or_default()
                .push(section.up_station_id);
        }
        adjacency
    }
}

/// Process-local registry of stations and lines
#[derive(Debug, Default)]
pub struct SubwayNetwork {
    state: RwLock<NetworkState>,
}

impl SubwayNetwork {
    /// Create an empty network
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a station
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the name is blank
    pub async fn create_station(&self, name: &str) -> AppResult<Station> {
        let name = require_text("Station name", name)?;
        let mut state = self.state.write().await;
        state.next_station_id += 1;
        let station = Station {
            id: state.next_station_id,
            name,
        };
        state.stations.insert(station.id, station.clone());
        drop(state);

        info!(station_id = station.id, "Created station");
        Ok(station)
    }

    /// All stations in creation order
    pub async fn list_stations(&self) -> Vec<Station> {
        self.state.read().await.stations.values().cloned().collect()
    }

    /// Look up a station without treating absence as an error
    pub async fn find_station(&self, station_id: i64) -> Option<Station> {
        self.state.read().await.stations.get(&station_id).cloned()
    }

    /// Delete a station that no line uses
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id and `InvalidInput` when a
    /// line still passes through the station
    pub async fn delete_station(&self, station_id: i64) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.stations.contains_key(&station_id) {
            return Err(AppError::not_found(format!("Station {station_id}"))
                .with_resource_id(station_id.to_string()));
        }
        if let Some(line) = state
            .lines
            .values()
            .find(|line| line.contains_station(station_id))
        {
            return Err(AppError::invalid_input(format!(
                "Station {station_id} is still part of line {}",
                line.name
            )));
        }
        state.stations.remove(&station_id);
        drop(state);

        info!(station_id, "Deleted station");
        Ok(())
    }

    /// Open a line between two existing stations
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for blank fields, unknown or identical
    /// terminals, or a non-positive distance
    pub async fn create_line(&self, draft: LineDraft) -> AppResult<LineView> {
        let name = require_text("Line name", &draft.name)?;
        let color = require_text("Line color", &draft.color)?;
        let first = Section::new(draft.up_station_id, draft.down_station_id, draft.distance)?;

        let mut state = self.state.write().await;
        state.require_stations([draft.up_station_id, draft.down_station_id])?;
        state.next_line_id += 1;
        let line = Line::new(state.next_line_id, name, color, first);
        let view = state.view(&line);
        state.lines.insert(line.id, line);
        drop(state);

        info!(line_id = view.id, "Created line");
        Ok(view)
    }

    /// All lines in creation order
    pub async fn list_lines(&self) -> Vec<LineView> {
        let state = self.state.read().await;
        state.lines.values().map(|line| state.view(line)).collect()
    }

    /// One line with its stations
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn get_line(&self, line_id: i64) -> AppResult<LineView> {
        let state = self.state.read().await;
        state
            .lines
            .get(&line_id)
            .map(|line| state.view(line))
            .ok_or_else(|| line_not_found(line_id))
    }

    /// Rename or recolor a line
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id and `InvalidInput` for
    /// blank fields
    pub async fn update_line(&self, line_id: i64, name: &str, color: &str) -> AppResult<LineView> {
        let name = require_text("Line name", name)?;
        let color = require_text("Line color", color)?;

        let mut state = self.state.write().await;
        let line = state.line_mut(line_id)?;
        line.name = name;
        line.color = color;
        let line = line.clone();
        Ok(state.view(&line))
    }

    /// Close a line; its stations remain registered
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn delete_line(&self, line_id: i64) -> AppResult<()> {
        if self.state.write().await.lines.remove(&line_id).is_none() {
            return Err(line_not_found(line_id));
        }
        info!(line_id, "Deleted line");
        Ok(())
    }

    /// Extend or split a line with a new section
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown line and `InvalidInput` when
    /// the section is malformed, references unknown stations, or cannot be
    /// attached to the line
    pub async fn add_section(
        &self,
        line_id: i64,
        up_station_id: i64,
        down_station_id: i64,
        distance: i64,
    ) -> AppResult<LineView> {
        let section = Section::new(up_station_id, down_station_id, distance)?;

        let mut state = self.state.write().await;
        state.require_stations([up_station_id, down_station_id])?;
        let line = state.line_mut(line_id)?;
        line.add_section(section)?;
        let line = line.clone();
        let view = state.view(&line);
        drop(state);

        debug!(line_id, up_station_id, down_station_id, "Added section");
        Ok(view)
    }

    /// Take a station off a line, merging its neighbouring sections
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown line and `InvalidInput` when
    /// the station is not on the line or the line has one section left
    pub async fn remove_section(&self, line_id: i64, station_id: i64) -> AppResult<()> {
        self.state
            .write()
            .await
            .line_mut(line_id)?
            .remove_station(station_id)?;
        debug!(line_id, station_id, "Removed station from line");
        Ok(())
    }
}

#[async_trait]
impl RouteOracle for SubwayNetwork {
    async fn station_exists(&self, station_id: i64) -> AppResult<bool> {
        Ok(self.state.read().await.stations.contains_key(&station_id))
    }

    async fn are_connected(&self, source: i64, target: i64) -> AppResult<bool> {
        let adjacency = self.state.read().await.adjacency();
        let path = bfs(
            &source,
            |station| adjacency.get(station).cloned().unwrap_or_default(),
            |station| *station == target,
        );
        Ok(path.is_some())
    }
}

fn line_not_found(line_id: i64) -> AppError {
    AppError::not_found(format!("Line {line_id}")).with_resource_id(line_id.to_string())
}

fn require_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_owned())
}

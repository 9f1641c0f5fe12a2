//! Project resources and where they are kept.
//!
//! A project is stored as three independent JSON documents: the terrace, the
//! structure and a full layout snapshot. Stores only move opaque JSON values;
//! the typed records live here.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use solar_core::error::Result;
use solar_core::BoundsMargins;
use solar_layout::{Layout, PanelDefaults, TextDefaults, DEFAULT_BEAM_PROFILE};
use solar_structure::{InclinationRequest, StructureConfig};
use tracing::{debug, info};

use crate::catalog::PanelModelRecord;
use crate::record::{export_layout, import_layout, BeamRecord, LayoutRecord, ObstacleRecord, PointRecord};
use crate::summary::LayoutSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Terrace,
    Structure,
    Layout,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Terrace, Resource::Structure, Resource::Layout];

    pub fn file_name(self) -> &'static str {
        match self {
            Resource::Terrace => "terrace.json",
            Resource::Structure => "structure.json",
            Resource::Layout => "layout.json",
        }
    }
}

/// Backend holding one JSON document per resource.
pub trait ProjectStore {
    /// The stored document, or `None` if it was never written.
    fn read(&self, resource: Resource) -> Result<Option<Value>>;

    fn write(&mut self, resource: Resource, value: Value) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<Resource, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn read(&self, resource: Resource) -> Result<Option<Value>> {
        Ok(self.documents.get(&resource).cloned())
    }

    fn write(&mut self, resource: Resource, value: Value) -> Result<()> {
        self.documents.insert(resource, value);
        Ok(())
    }
}

/// One `<resource>.json` file per resource under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open a store, creating the directory if needed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, resource: Resource) -> PathBuf {
        self.root.join(resource.file_name())
    }
}

impl ProjectStore for DirectoryStore {
    fn read(&self, resource: Resource) -> Result<Option<Value>> {
        let file = match File::open(self.path_of(resource)) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(value))
    }

    fn write(&mut self, resource: Resource, value: Value) -> Result<()> {
        let path = self.path_of(resource);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, &value)?;
        writer.flush()?;
        debug!(path = %path.display(), "resource written");
        Ok(())
    }
}

// --- Records ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerraceRecord {
    pub name: String,
    pub vertices: Vec<PointRecord>,
    pub obstacles: Vec<ObstacleRecord>,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Default for TerraceRecord {
    fn default() -> Self {
        Self {
            name: "Terraza principal".into(),
            vertices: Vec::new(),
            obstacles: Vec::new(),
            width_cm: 0.0,
            height_cm: 0.0,
        }
    }
}

impl TerraceRecord {
    pub fn from_layout(layout: &Layout, name: &str) -> Self {
        let size = layout.terrace().aabb().map(|b| b.extents()).unwrap_or_default();
        Self {
            name: name.to_string(),
            vertices: layout.terrace().vertices.iter().map(|&p| p.into()).collect(),
            obstacles: layout.obstacles().map(|(_, o)| o.into()).collect(),
            width_cm: size.x,
            height_cm: size.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureRecord {
    pub name: String,
    pub material: String,
    pub beam_profile: String,
    pub beams: Vec<BeamRecord>,
    pub height_cm: f64,
    pub beam_inclination_deg: f64,
    pub inclination_start_beam: i64,
    /// `-1` runs to the last beam
    pub inclination_end_beam: i64,
    pub show_post_labels: bool,
    /// Panel models used on this structure
    pub panels: Vec<PanelModelRecord>,
}

impl Default for StructureRecord {
    fn default() -> Self {
        Self::from_config(&StructureConfig::default(), Vec::new(), "Estructura principal")
    }
}

impl StructureRecord {
    pub fn from_config(config: &StructureConfig, beams: Vec<BeamRecord>, name: &str) -> Self {
        let request = &config.inclination;
        Self {
            name: name.to_string(),
            material: config.material.clone(),
            beam_profile: config.beam_profile.clone(),
            beams,
            height_cm: config.base_height_cm,
            beam_inclination_deg: request.angle_deg,
            inclination_start_beam: request.start_beam as i64,
            inclination_end_beam: request.end_beam.map_or(-1, |e| e as i64),
            show_post_labels: config.show_post_labels,
            panels: Vec::new(),
        }
    }

    pub fn config(&self) -> StructureConfig {
        let beam_profile = if self.beam_profile.is_empty() {
            DEFAULT_BEAM_PROFILE.to_string()
        } else {
            self.beam_profile.clone()
        };
        StructureConfig {
            base_height_cm: self.height_cm,
            inclination: InclinationRequest::from_signed(
                self.beam_inclination_deg,
                self.inclination_start_beam,
                self.inclination_end_beam,
            ),
            show_post_labels: self.show_post_labels,
            material: self.material.clone(),
            beam_profile,
        }
    }
}

/// Where a panel sits, for consumers that only list panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelPosition {
    pub x: f64,
    pub y: f64,
    /// Degrees about the vertical axis; panels are always axis-aligned
    pub rotation: f64,
    /// Creation index of the panel
    pub panel_id: usize,
}

/// Full layout export plus UI state and a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSnapshot {
    pub name: String,
    pub panel_positions: Vec<PanelPosition>,
    #[serde(rename = "canvas_data")]
    pub layout: LayoutRecord,
    /// Opaque view state (zoom, pan, grid, open dialogs)
    pub ui: Value,
    #[serde(rename = "metadata_info")]
    pub metadata: LayoutSummary,
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self {
            name: "Layout principal".into(),
            panel_positions: Vec::new(),
            layout: LayoutRecord::default(),
            ui: Value::Object(Default::default()),
            metadata: LayoutSummary::default(),
        }
    }
}

impl LayoutSnapshot {
    pub fn capture(layout: &Layout, name: &str, ui: Value) -> Self {
        Self {
            name: name.to_string(),
            panel_positions: layout
                .panels()
                .enumerate()
                .map(|(i, (_, p))| PanelPosition {
                    x: p.x,
                    y: p.y,
                    rotation: 0.0,
                    panel_id: i,
                })
                .collect(),
            layout: export_layout(layout),
            ui,
            metadata: LayoutSummary::of(layout),
        }
    }
}

// --- Project ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSource {
    /// Restored from the layout snapshot
    Snapshot,
    /// Composed from the terrace and structure records
    Records,
    /// Nothing stored yet
    Empty,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub layout: Layout,
    pub structure: StructureConfig,
    pub panel_models: Vec<PanelModelRecord>,
    pub ui: Value,
}

impl Project {
    pub fn new(name: &str, layout: Layout, structure: StructureConfig) -> Self {
        Self {
            name: name.to_string(),
            layout,
            structure,
            panel_models: Vec::new(),
            ui: Value::Object(Default::default()),
        }
    }

    /// Add a model to the catalog and return its index.
    pub fn add_panel_model(&mut self, model: PanelModelRecord) -> usize {
        debug!(model = %model.model_name, quantity = model.quantity, "panel model added");
        self.panel_models.push(model);
        self.panel_models.len() - 1
    }

    pub fn summary(&self) -> LayoutSummary {
        LayoutSummary::with_catalog(&self.layout, &self.panel_models)
    }
}

/// Write all three resources.
pub fn save_project(store: &mut impl ProjectStore, project: &Project) -> Result<()> {
    let layout = &project.layout;
    let terrace = TerraceRecord::from_layout(layout, &project.name);
    let beams = layout.beams().map(|(_, b)| b.into()).collect();
    let structure = StructureRecord {
        panels: project.panel_models.clone(),
        ..StructureRecord::from_config(&project.structure, beams, &project.name)
    };
    let mut snapshot = LayoutSnapshot::capture(layout, &project.name, project.ui.clone());
    snapshot.metadata = project.summary();

    store.write(Resource::Terrace, serde_json::to_value(&terrace)?)?;
    store.write(Resource::Structure, serde_json::to_value(&structure)?)?;
    store.write(Resource::Layout, serde_json::to_value(&snapshot)?)?;
    info!(
        name = %project.name,
        panels = snapshot.metadata.panel_count,
        beams = snapshot.metadata.beam_count,
        "project saved"
    );
    Ok(())
}

/// Load a project, preferring the snapshot. Without one, the layout is
/// composed from the terrace and structure records.
pub fn load_project(store: &impl ProjectStore, margins: &BoundsMargins) -> Result<(Project, ProjectSource)> {
    let structure: Option<StructureRecord> = read_record(store, Resource::Structure)?;
    let config = structure.as_ref().map(StructureRecord::config).unwrap_or_default();
    let panel_models = structure.as_ref().map(|s| s.panels.clone()).unwrap_or_default();

    let snapshot: Option<LayoutSnapshot> = read_record(store, Resource::Layout)?;
    if let Some(snapshot) = snapshot {
        let layout = import_layout(snapshot.layout, margins);
        info!(name = %snapshot.name, "project loaded from snapshot");
        let project = Project {
            name: snapshot.name,
            layout,
            structure: config,
            panel_models,
            ui: snapshot.ui,
        };
        return Ok((project, ProjectSource::Snapshot));
    }

    let terrace: Option<TerraceRecord> = read_record(store, Resource::Terrace)?;
    if terrace.is_none() && structure.is_none() {
        let project = Project::new("", Layout::new(*margins), config);
        return Ok((project, ProjectSource::Empty));
    }

    let terrace = terrace.unwrap_or_default();
    let record = LayoutRecord {
        terrace: terrace.vertices,
        obstacles: terrace.obstacles,
        beams: structure.map(|s| s.beams).unwrap_or_default(),
        panel_defaults: PanelDefaults::default(),
        text_defaults: TextDefaults::default(),
        ..LayoutRecord::default()
    };
    let layout = import_layout(record, margins);
    info!(name = %terrace.name, "project composed from terrace and structure");
    let project = Project {
        panel_models,
        ..Project::new(&terrace.name, layout, config)
    };
    Ok((project, ProjectSource::Records))
}

fn read_record<T: serde::de::DeserializeOwned>(store: &impl ProjectStore, resource: Resource) -> Result<Option<T>> {
    match store.read(resource)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

//! Everything that crosses the planner's boundary as JSON.
//!
//! - [`catalog`]: panel models attached to a structure
//! - [`record`]: tolerant export/import of a whole layout
//! - [`persistence`]: the three project resources and their stores
//! - [`summary`]: aggregate figures stored alongside a snapshot

pub mod catalog;
pub mod persistence;
pub mod record;
pub mod summary;

pub use catalog::{panel_weight, PanelModelRecord};
pub use persistence::{
    load_project, save_project, DirectoryStore, LayoutSnapshot, MemoryStore, PanelPosition, Project,
    ProjectSource, ProjectStore, Resource, StructureRecord, TerraceRecord,
};
pub use record::{
    export_layout, from_json, import_layout, scene_from_record, to_json, BeamRecord, BoundsRecord,
    LayoutRecord, ObstacleRecord, PanelRecord, PointRecord, TextRecord,
};
pub use summary::LayoutSummary;

pub mod auto_structure;
mod bounding;
pub mod bounds;
mod collection;
pub mod edit;
pub mod layout;
pub mod planner;
pub mod selection;
pub mod terrace;
pub mod text_edit;
pub mod types;
mod validate;

pub use auto_structure::{AutoStructureParams, AutoStructureReport};
pub use bounds::PlanBounds;
pub use edit::{Clipboard, ClipboardItem};
pub use layout::{Layout, LayoutParts};
pub use planner::Planner;
pub use selection::Selection;
pub use terrace::{Terrace, TerraceDraft};
pub use text_edit::{EditRequest, TextTarget};
pub use types::*;

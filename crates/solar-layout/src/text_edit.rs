//! Two-phase text entry.
//!
//! [`Planner::begin_text_edit`] describes what the caller should prompt for;
//! the caller answers through [`Planner::complete_text_edit`], synchronously
//! or later. An absent, empty or whitespace-only answer changes nothing.

use solar_core::error::{PlanError, Result};
use solar_math::Point2;
use tracing::debug;

use crate::planner::Planner;
use crate::types::{TextAnnotation, TextId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextTarget {
    /// Create a new annotation with its baseline at this point
    New(Point2),
    Existing(TextId),
}

/// Pending prompt handed to the input surface.
#[derive(Debug, Clone, PartialEq)]
pub struct EditRequest {
    pub target: TextTarget,
    /// Value to pre-fill the prompt with
    pub initial: String,
}

impl Planner {
    pub fn begin_text_edit(&self, target: TextTarget) -> Result<EditRequest> {
        let initial = match target {
            TextTarget::New(_) => String::new(),
            TextTarget::Existing(id) => self
                .layout
                .text(id)
                .map(|t| t.content.clone())
                .ok_or_else(|| PlanError::NotFound(format!("Text {id:?}")))?,
        };
        Ok(EditRequest { target, initial })
    }

    /// Apply the answer to a prompt. Returns the created or edited annotation,
    /// or `None` when the answer was a no-op.
    pub fn complete_text_edit(&mut self, request: EditRequest, value: Option<String>) -> Result<Option<TextId>> {
        let Some(content) = value.filter(|v| !v.trim().is_empty()) else {
            debug!("text edit cancelled");
            return Ok(None);
        };

        match request.target {
            TextTarget::New(at) => {
                let id = self.layout.texts.insert(TextAnnotation {
                    x: at.x,
                    y: at.y,
                    content,
                    font_size: self.layout.text_defaults.font_size,
                });
                debug!(?id, "text created");
                Ok(Some(id))
            }
            TextTarget::Existing(id) => {
                let text = self
                    .layout
                    .texts
                    .get_mut(id)
                    .ok_or_else(|| PlanError::NotFound(format!("Text {id:?}")))?;
                text.content = content;
                debug!(?id, "text edited");
                Ok(Some(id))
            }
        }
    }
}

//! Serializable scene snapshots.
//!
//! A snapshot is a plain-data copy of everything the user can edit: canvas
//! settings plus the ordered mockup list. Snapshots are JSON-compatible, so
//! callers may persist them, and their serialized form doubles as the
//! structural signature history uses for de-duplication.

use crate::scene::{CanvasSettings, MockupTransform, SceneAccessor};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MockupSnapshot {
    pub frame_id: String,
    #[serde(flatten)]
    pub transform: MockupTransform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_src: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSnapshot {
    #[serde(flatten)]
    pub canvas: CanvasSettings,
    pub mockups: Vec<MockupSnapshot>,
}

impl SceneSnapshot {
    /// Deep-copy the current scene. Order follows the accessor's render
    /// order.
    #[must_use]
    pub fn capture<A: SceneAccessor + ?Sized>(scene: &A) -> Self {
        let mockups = scene
            .mockups()
            .into_iter()
            .map(|id| MockupSnapshot {
                // An instance vanishing mid-capture leaves an empty frame
                // id, which restore skips.
                frame_id: scene.frame_of(id).unwrap_or_default(),
                transform: scene.transform(id).unwrap_or_default(),
                screenshot_src: scene.screenshot_source(id),
            })
            .collect();
        Self {
            canvas: scene.canvas_settings(),
            mockups,
        }
    }

    /// Canonical serialized form. Two snapshots are structurally equal
    /// exactly when their signatures match; history pushes compare these.
    #[must_use]
    pub fn signature(&self) -> String {
        // Serialization of plain finite data cannot fail; a scene that
        // somehow holds non-finite floats degrades to an empty signature.
        serde_json::to_string(self).unwrap_or_default()
    }
}

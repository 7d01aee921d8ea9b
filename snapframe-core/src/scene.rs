//! The seam between this crate and the rendering layer.
//!
//! The core never touches a draw API. Everything it needs from the live
//! scene goes through [`SceneAccessor`], which the rendering layer
//! implements over its own object graph (or over [`crate::store::SceneStore`]
//! when it projects from the plain in-memory scene).

use crate::color::Rgb;
use crate::gradient::BackgroundStyle;
use crate::util::Vec2;

/// Namespace marker for mockup instance handles.
pub enum Mockup {}
pub type MockupId = crate::id::UniqueId<Mockup>;

/// Position, scale and rotation of one mockup instance on the stage.
/// Rotation is in degrees, matching what transformer handles report.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MockupTransform {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: f32,
}

impl Default for MockupTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }
}

impl MockupTransform {
    #[must_use]
    pub fn at(position: Vec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..Self::default()
        }
    }
    #[must_use]
    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }
}

/// Document-level canvas settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSettings {
    pub canvas_enabled: bool,
    pub doc_width: f32,
    pub doc_height: f32,
    pub bg_color: Rgb,
    pub background: BackgroundStyle,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            canvas_enabled: false,
            doc_width: 900.0,
            doc_height: 600.0,
            bg_color: Rgb::WHITE,
            background: BackgroundStyle::default(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown frame id `{0}`")]
    UnknownFrame(String),
    #[error("no such mockup instance")]
    UnknownInstance,
    #[error("screenshot failed to load: {0}")]
    ScreenshotLoad(String),
}

/// What the core needs from the rendering layer.
///
/// Instance order in [`mockups`](Self::mockups) is bottom-to-top render
/// order; history restoration recreates instances in that order so z-order
/// survives an undo.
pub trait SceneAccessor {
    fn canvas_settings(&self) -> CanvasSettings;
    fn set_canvas_settings(&mut self, settings: &CanvasSettings);

    /// Live instances, bottom to top.
    fn mockups(&self) -> Vec<MockupId>;
    fn create_mockup(
        &mut self,
        frame_id: &str,
        transform: Option<MockupTransform>,
    ) -> Result<MockupId, SceneError>;
    fn destroy_mockup(&mut self, id: MockupId);

    fn frame_of(&self, id: MockupId) -> Option<String>;
    fn transform(&self, id: MockupId) -> Option<MockupTransform>;
    fn set_transform(&mut self, id: MockupId, transform: MockupTransform);

    /// Source URL of the instance's screenshot, if one is placed.
    fn screenshot_source(&self, id: MockupId) -> Option<String>;
    /// Decode `src` and place it in the instance's screen region.
    ///
    /// Implementations that decode asynchronously must invalidate stale
    /// loads themselves (a newer placement on the same instance wins); the
    /// core only guarantees call order.
    fn place_screenshot(&mut self, id: MockupId, src: &str) -> Result<(), SceneError>;

    fn selection(&self) -> Option<MockupId>;
    fn select(&mut self, id: Option<MockupId>);
}

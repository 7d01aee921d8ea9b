//! In-memory scene state.
//!
//! The store is the single owner of mockup instance records. Rendering
//! layers are projections over it: they apply the mutations the store has
//! already validated and recorded, driven by the event queue drained after
//! each operation. Keeping ownership here means history, placement and
//! layout logic never depend on a particular draw API.

use crate::catalog::FrameCatalog;
use crate::scene::{CanvasSettings, MockupId, MockupTransform, SceneAccessor, SceneError};

/// One placed frame on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct MockupRecord {
    pub id: MockupId,
    pub frame_id: String,
    pub transform: MockupTransform,
    pub screenshot_src: Option<String>,
}

/// Change notifications for projection layers, in the order the mutations
/// happened. Drained, not subscribed to: the consumer pulls after each
/// operation, so no component holds callbacks into another.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    CanvasChanged,
    MockupCreated(MockupId),
    MockupDestroyed(MockupId),
    TransformChanged(MockupId),
    ScreenshotPlaced(MockupId),
    SelectionChanged(Option<MockupId>),
}

pub struct SceneStore {
    catalog: FrameCatalog,
    canvas: CanvasSettings,
    /// Bottom-to-top render order.
    mockups: Vec<MockupRecord>,
    selection: Option<MockupId>,
    last_added: Option<MockupId>,
    events: Vec<SceneEvent>,
}

impl SceneStore {
    #[must_use]
    pub fn new(catalog: FrameCatalog) -> Self {
        Self {
            catalog,
            canvas: CanvasSettings::default(),
            mockups: Vec::new(),
            selection: None,
            last_added: None,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &FrameCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn get(&self, id: MockupId) -> Option<&MockupRecord> {
        self.mockups.iter().find(|record| record.id == id)
    }

    fn get_mut(&mut self, id: MockupId) -> Option<&mut MockupRecord> {
        self.mockups.iter_mut().find(|record| record.id == id)
    }

    /// The most recently added live instance; the anchor for auto layout
    /// and the fallback upload target when nothing is selected.
    #[must_use]
    pub fn last_added(&self) -> Option<MockupId> {
        self.last_added.filter(|&id| self.get(id).is_some())
    }

    /// Upload target: the selection, falling back to the last added frame.
    #[must_use]
    pub fn upload_target(&self) -> Option<MockupId> {
        self.selection.or_else(|| self.last_added())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mockups.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mockups.is_empty()
    }

    /// Pending change notifications, oldest first. Clears the queue.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}

impl SceneAccessor for SceneStore {
    fn canvas_settings(&self) -> CanvasSettings {
        self.canvas.clone()
    }
    fn set_canvas_settings(&mut self, settings: &CanvasSettings) {
        if self.canvas != *settings {
            self.canvas = settings.clone();
            self.events.push(SceneEvent::CanvasChanged);
        }
    }

    fn mockups(&self) -> Vec<MockupId> {
        self.mockups.iter().map(|record| record.id).collect()
    }

    fn create_mockup(
        &mut self,
        frame_id: &str,
        transform: Option<MockupTransform>,
    ) -> Result<MockupId, SceneError> {
        if self.catalog.get(frame_id).is_none() {
            return Err(SceneError::UnknownFrame(frame_id.to_owned()));
        }
        let id = MockupId::next();
        self.mockups.push(MockupRecord {
            id,
            frame_id: frame_id.to_owned(),
            transform: transform.unwrap_or_default(),
            screenshot_src: None,
        });
        self.last_added = Some(id);
        self.events.push(SceneEvent::MockupCreated(id));
        Ok(id)
    }

    fn destroy_mockup(&mut self, id: MockupId) {
        let before = self.mockups.len();
        self.mockups.retain(|record| record.id != id);
        if self.mockups.len() == before {
            return;
        }
        self.events.push(SceneEvent::MockupDestroyed(id));
        if self.selection == Some(id) {
            self.selection = None;
            self.events.push(SceneEvent::SelectionChanged(None));
        }
    }

    fn frame_of(&self, id: MockupId) -> Option<String> {
        self.get(id).map(|record| record.frame_id.clone())
    }
    fn transform(&self, id: MockupId) -> Option<MockupTransform> {
        self.get(id).map(|record| record.transform)
    }
    fn set_transform(&mut self, id: MockupId, transform: MockupTransform) {
        if let Some(record) = self.get_mut(id) {
            record.transform = transform;
            self.events.push(SceneEvent::TransformChanged(id));
        }
    }

    fn screenshot_source(&self, id: MockupId) -> Option<String> {
        self.get(id).and_then(|record| record.screenshot_src.clone())
    }
    fn place_screenshot(&mut self, id: MockupId, src: &str) -> Result<(), SceneError> {
        let record = self.get_mut(id).ok_or(SceneError::UnknownInstance)?;
        record.screenshot_src = Some(src.to_owned());
        self.events.push(SceneEvent::ScreenshotPlaced(id));
        Ok(())
    }

    fn selection(&self) -> Option<MockupId> {
        self.selection
    }
    fn select(&mut self, id: Option<MockupId>) {
        // Selecting a dead instance clears instead.
        let id = id.filter(|&id| self.get(id).is_some());
        if self.selection != id {
            self.selection = id;
            self.events.push(SceneEvent::SelectionChanged(id));
        }
    }
}

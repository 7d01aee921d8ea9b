//! Clipboard and frame-swap operations, composed over the scene accessor
//! and history.

use crate::history::SceneHistory;
use crate::scene::{MockupId, MockupTransform, SceneAccessor, SceneError};
use crate::util::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct ActionsConfig {
    /// Pasted copies land offset from the original so they read as new
    /// objects, like every design tool.
    pub paste_offset: Vec2,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            paste_offset: Vec2::new(20.0, 20.0),
        }
    }
}

/// Transform + screenshot state of one instance, as captured by copy.
#[derive(Clone, Debug, PartialEq)]
pub struct MockupClipboard {
    pub frame_id: String,
    pub transform: MockupTransform,
    pub screenshot_src: Option<String>,
}

/// Capture the selected instance for a later paste. `None` when nothing is
/// selected.
#[must_use]
pub fn copy<A: SceneAccessor + ?Sized>(scene: &A) -> Option<MockupClipboard> {
    let id = scene.selection()?;
    Some(MockupClipboard {
        frame_id: scene.frame_of(id)?,
        transform: scene.transform(id).unwrap_or_default(),
        screenshot_src: scene.screenshot_source(id),
    })
}

/// Create a new instance from the clipboard, offset by the paste offset,
/// select it, and record the result in history.
pub fn paste<A: SceneAccessor + ?Sized>(
    scene: &mut A,
    history: &mut SceneHistory,
    clipboard: &MockupClipboard,
    config: &ActionsConfig,
) -> Result<MockupId, SceneError> {
    let transform = clipboard.transform.translated(config.paste_offset);
    let id = scene.create_mockup(&clipboard.frame_id, Some(transform))?;
    if let Some(src) = &clipboard.screenshot_src {
        // The clipboard's screenshot was loadable moments ago; a failure
        // here leaves an empty frame rather than failing the paste.
        if let Err(error) = scene.place_screenshot(id, src) {
            log::warn!("pasted screenshot failed to place: {error}");
        }
    }
    scene.select(Some(id));
    history.push_from(scene);
    Ok(id)
}

/// Replace the selected instance with one of a different frame type,
/// preserving its transform and screenshot. This is how users change device
/// model without redoing their layout.
pub fn swap_frame<A: SceneAccessor + ?Sized>(
    scene: &mut A,
    history: &mut SceneHistory,
    new_frame_id: &str,
) -> Result<MockupId, SceneError> {
    let old = scene.selection().ok_or(SceneError::UnknownInstance)?;
    let transform = scene.transform(old).unwrap_or_default();
    let screenshot_src = scene.screenshot_source(old);

    let id = scene.create_mockup(new_frame_id, Some(transform))?;
    if let Some(src) = &screenshot_src {
        if let Err(error) = scene.place_screenshot(id, src) {
            log::warn!("screenshot did not survive frame swap: {error}");
        }
    }
    scene.destroy_mockup(old);
    scene.select(Some(id));
    history.push_from(scene);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FrameCatalog;
    use crate::store::SceneStore;

    fn scene_with_selection() -> (SceneStore, SceneHistory, MockupId) {
        let mut scene = SceneStore::new(FrameCatalog::builtin());
        let mut history = SceneHistory::default();
        let id = scene
            .create_mockup(
                "iphone-17-black",
                Some(MockupTransform {
                    x: 100.0,
                    y: 40.0,
                    scale_x: 0.5,
                    scale_y: 0.5,
                    rotation: 15.0,
                }),
            )
            .unwrap();
        scene.place_screenshot(id, "data:image/png;base64,shot").unwrap();
        scene.select(Some(id));
        history.capture_initial(&scene);
        (scene, history, id)
    }

    #[test]
    fn copy_requires_selection() {
        let (mut scene, _, _) = scene_with_selection();
        assert!(copy(&scene).is_some());
        scene.select(None);
        assert!(copy(&scene).is_none());
    }

    #[test]
    fn paste_offsets_and_selects() {
        let (mut scene, mut history, original) = scene_with_selection();
        let clipboard = copy(&scene).unwrap();
        let pasted = paste(&mut scene, &mut history, &clipboard, &ActionsConfig::default()).unwrap();

        assert_ne!(pasted, original);
        assert_eq!(scene.selection(), Some(pasted));
        let transform = scene.transform(pasted).unwrap();
        assert_eq!(transform.x, 120.0);
        assert_eq!(transform.y, 60.0);
        assert_eq!(transform.rotation, 15.0);
        assert_eq!(
            scene.screenshot_source(pasted).as_deref(),
            Some("data:image/png;base64,shot")
        );
        // Paste is one undoable step.
        assert!(history.can_undo());
    }

    #[test]
    fn paste_of_unknown_frame_fails_cleanly() {
        let (mut scene, mut history, _) = scene_with_selection();
        let mut clipboard = copy(&scene).unwrap();
        clipboard.frame_id = "retired-frame".into();
        let before = scene.len();
        assert!(paste(&mut scene, &mut history, &clipboard, &ActionsConfig::default()).is_err());
        assert_eq!(scene.len(), before);
    }

    #[test]
    fn swap_preserves_transform_and_screenshot() {
        let (mut scene, mut history, original) = scene_with_selection();
        let swapped = swap_frame(&mut scene, &mut history, "iphone-16-pro-black-titanium").unwrap();

        assert_eq!(scene.len(), 1, "old instance destroyed");
        assert_eq!(scene.selection(), Some(swapped));
        assert_ne!(swapped, original);
        assert_eq!(
            scene.frame_of(swapped).as_deref(),
            Some("iphone-16-pro-black-titanium")
        );
        let transform = scene.transform(swapped).unwrap();
        assert_eq!(transform.x, 100.0);
        assert_eq!(transform.scale_x, 0.5);
        assert_eq!(
            scene.screenshot_source(swapped).as_deref(),
            Some("data:image/png;base64,shot")
        );
    }

    #[test]
    fn swap_without_selection_is_an_error() {
        let (mut scene, mut history, _) = scene_with_selection();
        scene.select(None);
        assert_eq!(
            swap_frame(&mut scene, &mut history, "iphone-16-black"),
            Err(SceneError::UnknownInstance)
        );
    }
}

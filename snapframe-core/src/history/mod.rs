//! Scene history.
//!
//! A single linear undo stack plus a redo stack over [`SceneSnapshot`]
//! values; the current state is always the top of the undo stack. Pushes
//! de-duplicate against the top by structural signature, so idempotent
//! operations never grow history, and the stack is capacity-bounded with
//! FIFO eviction (the oldest reachable state silently falls off once the
//! bound is exceeded).
//!
//! Restoration drives the rendering layer back through the scene accessor
//! and is best-effort: one broken entry (a frame id gone from the catalog,
//! a screenshot that no longer loads) is logged and skipped, never fatal to
//! the undo/redo operation as a whole.

pub mod trigger;

use std::collections::VecDeque;

use crate::scene::SceneAccessor;
use crate::snapshot::SceneSnapshot;

pub const DEFAULT_CAPACITY: usize = 80;

#[derive(Clone, Copy, Debug)]
pub struct HistoryConfig {
    /// Maximum undo-stack length.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

pub struct SceneHistory {
    undo: VecDeque<SceneSnapshot>,
    redo: Vec<SceneSnapshot>,
    initial: Option<SceneSnapshot>,
    capacity: usize,
    /// Re-entrancy guard: mutations performed by a restore must not record
    /// themselves as new history entries.
    restoring: bool,
}

impl Default for SceneHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl SceneHistory {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            initial: None,
            capacity: config.capacity.max(1),
            restoring: false,
        }
    }

    /// Seed history with the current scene, once initial content exists.
    /// The captured snapshot becomes both the first undo entry and the
    /// target of [`reset`](Self::reset).
    pub fn capture_initial<A: SceneAccessor + ?Sized>(&mut self, scene: &A) {
        let snapshot = SceneSnapshot::capture(scene);
        self.undo.clear();
        self.redo.clear();
        self.undo.push_back(snapshot.clone());
        self.initial = Some(snapshot);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.len() >= 2
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
    #[must_use]
    pub fn is_restoring(&self) -> bool {
        self.restoring
    }
    /// Undo-stack length. The current state counts, so a fresh history has
    /// depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    /// Capture the scene and push it. The usual entry point after any user
    /// edit; burst callers should coalesce through
    /// [`trigger::CoalescingTrigger`] first.
    pub fn push_from<A: SceneAccessor + ?Sized>(&mut self, scene: &A) {
        if self.restoring {
            return;
        }
        self.push(SceneSnapshot::capture(scene));
    }

    /// Push an already-captured snapshot. No-op while a restore is in
    /// flight or when the snapshot is structurally identical to the top.
    pub fn push(&mut self, snapshot: SceneSnapshot) {
        if self.restoring {
            return;
        }
        if self
            .undo
            .back()
            .is_some_and(|top| top.signature() == snapshot.signature())
        {
            return;
        }
        self.undo.push_back(snapshot);
        if self.undo.len() > self.capacity {
            self.undo.pop_front();
            log::trace!("history at capacity, dropped oldest snapshot");
        }
        self.redo.clear();
    }

    /// Step back one entry. Returns whether anything happened; with fewer
    /// than two entries there is nothing to undo to.
    pub fn undo<A: SceneAccessor + ?Sized>(&mut self, scene: &mut A) -> bool {
        if self.undo.len() < 2 {
            return false;
        }
        // Unwrap OK - length checked above.
        let current = self.undo.pop_back().unwrap();
        self.redo.push(current);
        let target = self.undo.back().cloned().unwrap();
        self.restore(scene, &target, true);
        true
    }

    /// Step forward through previously undone entries.
    pub fn redo<A: SceneAccessor + ?Sized>(&mut self, scene: &mut A) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(next.clone());
        self.restore(scene, &next, true);
        true
    }

    /// Restore the startup snapshot. `viewport_reset` runs first so pan and
    /// zoom are back at identity when content reappears. The reset itself
    /// is pushed, making it undoable.
    pub fn reset<A: SceneAccessor + ?Sized>(
        &mut self,
        scene: &mut A,
        viewport_reset: impl FnOnce(),
    ) -> bool {
        let Some(initial) = self.initial.clone() else {
            return false;
        };
        viewport_reset();
        self.restore(scene, &initial, false);
        true
    }

    /// Restore an arbitrary snapshot (e.g. one a caller persisted). The
    /// result is pushed, so the jump is undoable.
    pub fn restore_snapshot<A: SceneAccessor + ?Sized>(
        &mut self,
        scene: &mut A,
        snapshot: &SceneSnapshot,
    ) {
        self.restore(scene, snapshot, false);
    }

    /// Drive the scene back to `snapshot`. `for_history` marks restores
    /// performed by undo/redo, which must not push afterwards.
    fn restore<A: SceneAccessor + ?Sized>(
        &mut self,
        scene: &mut A,
        snapshot: &SceneSnapshot,
        for_history: bool,
    ) {
        self.restoring = true;

        scene.set_canvas_settings(&snapshot.canvas);
        for id in scene.mockups() {
            scene.destroy_mockup(id);
        }
        scene.select(None);

        for mockup in &snapshot.mockups {
            if mockup.frame_id.is_empty() {
                continue;
            }
            let id = match scene.create_mockup(&mockup.frame_id, Some(mockup.transform)) {
                Ok(id) => id,
                Err(error) => {
                    log::warn!(
                        "skipping mockup `{}` during restore: {error}",
                        mockup.frame_id
                    );
                    continue;
                }
            };
            if let Some(src) = &mockup.screenshot_src {
                if let Err(error) = scene.place_screenshot(id, src) {
                    log::warn!("screenshot reload failed during restore: {error}");
                }
            }
        }
        scene.select(None);

        self.restoring = false;
        if !for_history {
            self.push_from(scene);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FrameCatalog;
    use crate::scene::MockupTransform;
    use crate::store::SceneStore;

    fn store() -> SceneStore {
        SceneStore::new(FrameCatalog::builtin())
    }

    fn seeded() -> (SceneStore, SceneHistory) {
        let scene = store();
        let mut history = SceneHistory::default();
        history.capture_initial(&scene);
        (scene, history)
    }

    fn add_frame(scene: &mut SceneStore, history: &mut SceneHistory, frame: &str, x: f32) {
        let transform = MockupTransform {
            x,
            ..MockupTransform::default()
        };
        scene.create_mockup(frame, Some(transform)).unwrap();
        history.push_from(scene);
    }

    #[test]
    fn undo_redo_round_trip() {
        let (mut scene, mut history) = seeded();
        for index in 0..4 {
            add_frame(&mut scene, &mut history, "iphone-17-black", index as f32 * 10.0);
        }
        let final_snapshot = SceneSnapshot::capture(&scene);
        assert_eq!(history.depth(), 5);

        for _ in 0..4 {
            assert!(history.undo(&mut scene));
        }
        assert!(!history.undo(&mut scene), "bottom of history");
        assert!(scene.is_empty());

        for _ in 0..4 {
            assert!(history.redo(&mut scene));
        }
        assert!(!history.redo(&mut scene));
        assert_eq!(
            SceneSnapshot::capture(&scene).signature(),
            final_snapshot.signature()
        );
    }

    #[test]
    fn identical_push_is_deduplicated() {
        let (mut scene, mut history) = seeded();
        add_frame(&mut scene, &mut history, "iphone-17-black", 0.0);
        let depth = history.depth();
        history.push_from(&scene);
        history.push_from(&scene);
        assert_eq!(history.depth(), depth);
    }

    #[test]
    fn push_truncates_redo() {
        let (mut scene, mut history) = seeded();
        add_frame(&mut scene, &mut history, "iphone-17-black", 0.0);
        add_frame(&mut scene, &mut history, "iphone-16-black", 50.0);
        history.undo(&mut scene);
        assert!(history.can_redo());
        add_frame(&mut scene, &mut history, "iphone-air-sky-blue", 100.0);
        assert!(!history.can_redo());
    }

    #[test]
    fn capacity_bound_evicts_oldest() {
        let mut scene = store();
        let mut history = SceneHistory::new(HistoryConfig { capacity: 10 });
        history.capture_initial(&scene);
        for index in 0..15 {
            add_frame(&mut scene, &mut history, "iphone-17-black", index as f32);
        }
        assert_eq!(history.depth(), 10);
        // Undo to the bottom of the retained window: 9 steps, no further.
        let mut undone = 0;
        while history.undo(&mut scene) {
            undone += 1;
        }
        assert_eq!(undone, 9);
        // The oldest retained state has the first 6 frames (initial and the
        // first 5 pushes were evicted).
        assert_eq!(scene.len(), 6);
    }

    #[test]
    fn undo_restores_scene_content() {
        let (mut scene, mut history) = seeded();
        add_frame(&mut scene, &mut history, "iphone-17-black", 0.0);
        let id = scene.mockups()[0];
        scene.place_screenshot(id, "data:image/png;base64,abc").unwrap();
        history.push_from(&scene);

        history.undo(&mut scene);
        let id = scene.mockups()[0];
        assert_eq!(scene.screenshot_source(id), None, "screenshot undone");
        history.redo(&mut scene);
        let id = scene.mockups()[0];
        assert_eq!(
            scene.screenshot_source(id).as_deref(),
            Some("data:image/png;base64,abc")
        );
    }

    #[test]
    fn restore_preserves_z_order() {
        let (mut scene, mut history) = seeded();
        add_frame(&mut scene, &mut history, "iphone-17-black", 0.0);
        add_frame(&mut scene, &mut history, "iphone-16-black", 50.0);
        add_frame(&mut scene, &mut history, "iphone-air-sky-blue", 100.0);
        history.undo(&mut scene);
        history.redo(&mut scene);
        let frames: Vec<String> = scene
            .mockups()
            .into_iter()
            .filter_map(|id| scene.frame_of(id))
            .collect();
        assert_eq!(frames, vec!["iphone-17-black", "iphone-16-black", "iphone-air-sky-blue"]);
    }

    #[test]
    fn reset_returns_to_initial_and_is_undoable() {
        let (mut scene, mut history) = seeded();
        add_frame(&mut scene, &mut history, "iphone-17-black", 0.0);
        add_frame(&mut scene, &mut history, "iphone-16-black", 50.0);

        let mut viewport_reset_ran = false;
        assert!(history.reset(&mut scene, || viewport_reset_ran = true));
        assert!(viewport_reset_ran);
        assert!(scene.is_empty());

        // The reset was pushed, so undoing it brings the frames back.
        assert!(history.undo(&mut scene));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn restore_skips_broken_entries_best_effort() {
        let (mut scene, mut history) = seeded();
        add_frame(&mut scene, &mut history, "iphone-17-black", 0.0);
        add_frame(&mut scene, &mut history, "iphone-16-black", 50.0);

        // Corrupt the middle entry by hand: an id the catalog never had.
        let mut broken = SceneSnapshot::capture(&scene);
        broken.mockups[0].frame_id = "discontinued-frame".into();
        history.restore_snapshot(&mut scene, &broken);

        // The broken mockup is skipped, the healthy one survives.
        assert_eq!(scene.len(), 1);
        let id = scene.mockups()[0];
        assert_eq!(scene.frame_of(id).as_deref(), Some("iphone-16-black"));
        // And history is still operable.
        assert!(history.undo(&mut scene));
    }

    #[test]
    fn no_push_while_restoring() {
        // Emulates a scene-changed handler firing mid-restore: with the
        // guard set, pushes are dropped.
        let (mut scene, mut history) = seeded();
        add_frame(&mut scene, &mut history, "iphone-17-black", 0.0);
        let depth_before = history.depth();
        history.restoring = true;
        assert!(history.is_restoring());
        history.push_from(&scene);
        assert_eq!(history.depth(), depth_before);
        history.restoring = false;
    }
}

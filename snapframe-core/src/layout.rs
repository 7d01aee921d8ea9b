//! Auto layout and bounds math for mockup frames on the stage.

use crate::catalog::FrameEntry;
use crate::util::{clamp, Rect, Size, Vec2};

#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    /// Stage-edge margin new frames are clamped into.
    pub margin: f32,
    /// Gap between a new frame and its anchor.
    pub gap: f32,
    /// Visible margin for [`constrain_to_viewport`], as a fraction of the
    /// frame's shorter side...
    pub visible_fraction: f32,
    /// ...clamped into this range of pixels.
    pub visible_min: f32,
    pub visible_max: f32,
    /// Fraction of the initial stage height the tallest catalog frame
    /// occupies when first added.
    pub initial_height_fraction: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 24.0,
            gap: 24.0,
            visible_fraction: 0.2,
            visible_min: 56.0,
            visible_max: 120.0,
            initial_height_fraction: 0.8,
        }
    }
}

/// Integer bounds, rounded outward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Union bounding box over client rects, floor/ceil'd outward to whole
/// pixels with dimensions floored at 1. Rects with non-finite components
/// contribute nothing; `None` when nothing contributes.
#[must_use]
pub fn content_bounds(rects: &[Rect]) -> Option<PixelBounds> {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for rect in rects {
        if !rect.is_finite() {
            continue;
        }
        min_x = min_x.min(rect.x);
        min_y = min_y.min(rect.y);
        max_x = max_x.max(rect.right());
        max_y = max_y.max(rect.bottom());
    }
    if !min_x.is_finite() || !min_y.is_finite() || !max_x.is_finite() || !max_y.is_finite() {
        return None;
    }
    let x = min_x.floor() as i32;
    let y = min_y.floor() as i32;
    Some(PixelBounds {
        x,
        y,
        width: (max_x.ceil() as i32 - x).max(1),
        height: (max_y.ceil() as i32 - y).max(1),
    })
}

/// Scene exports crop to content when the canvas is off; with the canvas on
/// the full document is exported and no crop applies.
#[must_use]
pub fn export_crop_bounds(canvas_enabled: bool, rects: &[Rect]) -> Option<PixelBounds> {
    if canvas_enabled {
        None
    } else {
        content_bounds(rects)
    }
}

/// Scene download is available whenever at least one frame exists.
#[must_use]
pub fn scene_download_available(frame_count: usize) -> bool {
    frame_count > 0
}

fn centered(frame: Size, viewport: Size) -> Vec2 {
    Vec2::new(
        viewport.width / 2.0 - frame.width / 2.0,
        viewport.height / 2.0 - frame.height / 2.0,
    )
}

/// Position for a newly added frame: centered when the stage is empty,
/// otherwise beside the anchor (the most recently added frame's rect, or
/// the topmost existing rect), wrapping to a new row when the right edge
/// would overflow. The result is clamped into the stage margins; frames
/// larger than the stage sit at the margin.
#[must_use]
pub fn auto_placement(
    existing: &[Rect],
    anchor: Option<Rect>,
    frame: Size,
    viewport: Size,
    config: &LayoutConfig,
) -> Vec2 {
    if existing.is_empty() {
        return centered(frame, viewport);
    }
    let Some(rect) = anchor.or_else(|| existing.last().copied()) else {
        return centered(frame, viewport);
    };

    let mut x = rect.right() + config.gap;
    let mut y = rect.y;
    if x + frame.width > viewport.width - config.margin {
        x = config.margin;
        y = rect.bottom() + config.gap;
    }

    let max_x = (viewport.width - frame.width - config.margin).max(config.margin);
    let max_y = (viewport.height - frame.height - config.margin).max(config.margin);
    Vec2::new(clamp(x, config.margin, max_x), clamp(y, config.margin, max_y))
}

/// Minimal translation keeping at least the visible margin of `rect` inside
/// every viewport edge. Zero when already compliant; the frame may hang off
/// screen beyond the margin, it just can never vanish entirely.
#[must_use]
pub fn constrain_to_viewport(rect: Rect, viewport: Size, config: &LayoutConfig) -> Vec2 {
    let visible = clamp(
        rect.size().shorter_side() * config.visible_fraction,
        config.visible_min,
        config.visible_max,
    );

    let mut dx = 0.0;
    if rect.x > viewport.width - visible {
        dx = viewport.width - visible - rect.x;
    } else if rect.right() < visible {
        dx = visible - rect.right();
    }

    let mut dy = 0.0;
    if rect.y > viewport.height - visible {
        dy = viewport.height - visible - rect.y;
    } else if rect.bottom() < visible {
        dy = visible - rect.bottom();
    }

    Vec2::new(dx, dy)
}

/// Translation applied to every mockup when the stage is resized, keeping
/// content anchored to the stage center: half the delta on each axis.
/// A zero-sized previous stage (first layout) moves nothing.
#[must_use]
pub fn stage_resize_offset(previous: Size, next: Size) -> Vec2 {
    if previous.width == 0.0 || previous.height == 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (next.width - previous.width) / 2.0,
        (next.height - previous.height) / 2.0,
    )
}

/// On-stage size of a newly added frame: the tallest catalog frame takes
/// `initial_height_fraction` of the initial stage height and every other
/// frame keeps its proportion to it.
#[must_use]
pub fn initial_frame_size(
    entry: &FrameEntry,
    max_original_height: f32,
    initial_stage_height: f32,
    config: &LayoutConfig,
) -> Size {
    let max_height = max_original_height.max(1.0);
    let desired_height =
        (entry.original_height / max_height) * (initial_stage_height * config.initial_height_fraction);
    let scale = desired_height / entry.original_height.max(1.0);
    Size::new(entry.original_width * scale, desired_height)
}

#[derive(Clone, Copy, Debug)]
pub struct FitConfig {
    /// Viewports wider than this are left alone; the fit only kicks in on
    /// small (mobile-sized) stages.
    pub small_viewport_max: f32,
    /// Padding kept between the fitted content and the viewport edges.
    pub padding: f32,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            small_viewport_max: 768.0,
            padding: 24.0,
        }
    }
}

/// A uniform scale about `pivot` followed by a translation; how a whole
/// frame set is mapped into a small viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFit {
    pub scale: f32,
    pub pivot: Vec2,
    pub translate: Vec2,
}

impl SceneFit {
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.translate.is_zero()
    }
    /// Map one rect through the fit (both position and size scale).
    #[must_use]
    pub fn apply_to(&self, rect: Rect) -> Rect {
        Rect::new(
            self.pivot.x + (rect.x - self.pivot.x) * self.scale + self.translate.x,
            self.pivot.y + (rect.y - self.pivot.y) * self.scale + self.translate.y,
            rect.width * self.scale,
            rect.height * self.scale,
        )
    }
}

fn nudge_into(bounds: Rect, viewport: Size, padding: f32) -> Vec2 {
    let mut dx = 0.0;
    if bounds.x < padding {
        dx = padding - bounds.x;
    } else if bounds.right() > viewport.width - padding {
        dx = viewport.width - padding - bounds.right();
    }
    let mut dy = 0.0;
    if bounds.y < padding {
        dy = padding - bounds.y;
    } else if bounds.bottom() > viewport.height - padding {
        dy = viewport.height - padding - bounds.bottom();
    }
    Vec2::new(dx, dy)
}

/// Fit the frame set into a small viewport: `None` above the small-viewport
/// threshold or with no finite content. When the combined bounds already
/// fit inside the padded viewport the set is only nudged; otherwise every
/// rect shrinks uniformly about the bounds center first.
#[must_use]
pub fn fit_to_viewport(rects: &[Rect], viewport: Size, config: &FitConfig) -> Option<SceneFit> {
    if viewport.width > config.small_viewport_max {
        return None;
    }
    let bounds = float_bounds(rects)?;

    let available_width = (viewport.width - 2.0 * config.padding).max(1.0);
    let available_height = (viewport.height - 2.0 * config.padding).max(1.0);

    let scale = (available_width / bounds.width)
        .min(available_height / bounds.height)
        .min(1.0);
    let pivot = bounds.center();

    // Bounds after scaling about their own center.
    let scaled = Rect::new(
        pivot.x + (bounds.x - pivot.x) * scale,
        pivot.y + (bounds.y - pivot.y) * scale,
        bounds.width * scale,
        bounds.height * scale,
    );
    Some(SceneFit {
        scale,
        pivot,
        translate: nudge_into(scaled, viewport, config.padding),
    })
}

fn float_bounds(rects: &[Rect]) -> Option<Rect> {
    let mut iter = rects.iter().filter(|rect| rect.is_finite());
    let first = iter.next()?;
    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.right();
    let mut max_y = first.bottom();
    for rect in iter {
        min_x = min_x.min(rect.x);
        min_y = min_y.min(rect.y);
        max_x = max_x.max(rect.right());
        max_y = max_y.max(rect.bottom());
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

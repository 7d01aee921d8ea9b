//! Screenshot profile detection and placement inside a frame's screen
//! region.
//!
//! Screenshots taken on one device model often carry a differently shaped
//! camera cutout than the frame they are dropped into; centering the photo
//! naively leaves the two cutouts visibly misaligned. Placement therefore
//! detects the source device from the image's pixel dimensions and pulls
//! the photo toward cutout alignment, while always keeping the screen
//! region fully covered.

use crate::catalog::FrameEntry;
use crate::util::{clamp, Rect, Size};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ProfileKind {
    DynamicIsland,
    Notch,
    HomeButton,
}

/// Camera cutout of a source screenshot, in fractions of the image size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FractionalRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A category of source screenshot geometry. `known_sizes` are portrait
/// pixel dimensions of devices in the category.
pub struct ScreenshotProfile {
    pub kind: ProfileKind,
    pub aspect_ratio: f32,
    pub known_sizes: &'static [(u32, u32)],
    pub cutout: Option<FractionalRect>,
}

/// Detection priority order: the island profile first, the home-button
/// profile last, matching how distinctive each geometry is.
pub const PROFILES: &[ScreenshotProfile] = &[
    ScreenshotProfile {
        kind: ProfileKind::DynamicIsland,
        aspect_ratio: 1179.0 / 2556.0,
        known_sizes: &[(1179, 2556), (1290, 2796), (1320, 2868)],
        cutout: Some(FractionalRect {
            x: 0.34,
            y: 0.014,
            width: 0.32,
            height: 0.043,
        }),
    },
    ScreenshotProfile {
        kind: ProfileKind::Notch,
        aspect_ratio: 1170.0 / 2532.0,
        known_sizes: &[(1170, 2532), (1125, 2436), (1242, 2688), (828, 1792), (1284, 2778)],
        cutout: Some(FractionalRect {
            x: 0.29,
            y: 0.0,
            width: 0.42,
            height: 0.075,
        }),
    },
    ScreenshotProfile {
        kind: ProfileKind::HomeButton,
        aspect_ratio: 750.0 / 1334.0,
        known_sizes: &[(750, 1334), (640, 1136), (1242, 2208)],
        cutout: None,
    },
];

/// Tunable placement constants. The blend and tolerance values are
/// empirical; defaults reproduce the shipped behavior.
#[derive(Clone, Copy, Debug)]
pub struct PlacementConfig {
    /// Absolute pixel tolerance for the exact known-size pass.
    pub exact_match_tolerance: f32,
    /// Maximum aspect-ratio delta accepted by the fallback pass.
    pub aspect_tolerance: f32,
    /// How far the centered position is pulled toward full cutout
    /// alignment. 1.0 would align exactly, which looks jarring when the
    /// source and target cutout shapes differ.
    pub alignment_blend: f32,
    /// Upward nudge for unrecognized portrait screenshots, as a fraction
    /// of the target cutout height.
    pub headroom_fraction: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            exact_match_tolerance: 6.0,
            aspect_tolerance: 0.035,
            alignment_blend: 0.85,
            headroom_fraction: 0.2,
        }
    }
}

/// Identify the source device category from pixel dimensions. Orientation
/// is irrelevant; sizes are normalized to portrait first. An exact
/// known-size match wins; otherwise the nearest aspect ratio is accepted
/// only within the configured tolerance.
#[must_use]
pub fn detect_profile(
    width: u32,
    height: u32,
    config: &PlacementConfig,
) -> Option<&'static ScreenshotProfile> {
    let (portrait_width, portrait_height) = if width <= height {
        (width, height)
    } else {
        (height, width)
    };
    if portrait_height == 0 {
        return None;
    }

    for profile in PROFILES {
        let known = profile.known_sizes.iter().any(|&(w, h)| {
            (portrait_width as f32 - w as f32).abs() <= config.exact_match_tolerance
                && (portrait_height as f32 - h as f32).abs() <= config.exact_match_tolerance
        });
        if known {
            return Some(profile);
        }
    }

    let aspect = portrait_width as f32 / portrait_height as f32;
    let (best, delta) = PROFILES
        .iter()
        .map(|profile| (profile, (aspect - profile.aspect_ratio).abs()))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))?;
    (delta <= config.aspect_tolerance).then_some(best)
}

/// The frame's island cutout in screen-region-local coordinates at the
/// given render scale, or `None` for frames without one.
#[must_use]
pub fn target_cutout_rect(frame: &FrameEntry, frame_scale: f32) -> Option<Rect> {
    let island = frame.screen.island?;
    Some(Rect::new(
        (island.x - frame.screen.x) * frame_scale,
        (island.y - frame.screen.y) * frame_scale,
        island.width * frame_scale,
        island.height * frame_scale,
    ))
}

/// Place a photo of `image` pixels inside a screen region of `screen` size
/// (screen-local coordinates). Cover semantics: the result always fully
/// covers the region, cropping overflow, never letterboxing.
#[must_use]
pub fn compute_placement(
    image: Size,
    screen: Size,
    target_cutout: Option<Rect>,
    source_profile: Option<&ScreenshotProfile>,
    config: &PlacementConfig,
) -> Rect {
    let image = image.at_least(1.0);
    let screen = screen.at_least(1.0);

    let screen_aspect = screen.width / screen.height;
    let image_aspect = image.width / image.height;
    let (width, height) = if image_aspect > screen_aspect {
        (screen.height * image_aspect, screen.height)
    } else {
        (screen.width, screen.width / image_aspect)
    };

    let mut x = (screen.width - width) / 2.0;
    let mut y = (screen.height - height) / 2.0;

    let portrait = image.height >= image.width;
    let source_cutout = if portrait {
        source_profile.and_then(|profile| profile.cutout)
    } else {
        None
    };
    match (target_cutout, source_cutout) {
        (Some(target), Some(cutout)) => {
            // Align the source cutout's horizontal center and top edge with
            // the target's, blended against plain centering.
            let scale = width / image.width;
            let source_center_x = (cutout.x + cutout.width / 2.0) * image.width;
            let source_top_y = cutout.y * image.height;
            let aligned_x = (target.x + target.width / 2.0) - source_center_x * scale;
            let aligned_y = target.y - source_top_y * scale;
            x += (aligned_x - x) * config.alignment_blend;
            y += (aligned_y - y) * config.alignment_blend;
        }
        (Some(target), None) if portrait => {
            // Unknown device: just lift the photo a little so status-bar
            // content clears the cutout, without revealing space above.
            y = (y + target.height * config.headroom_fraction).min(0.0);
        }
        _ => {}
    }

    Rect::new(
        clamp(x, screen.width - width, 0.0),
        clamp(y, screen.height - height, 0.0),
        width,
        height,
    )
}

//! Canvas background gradients.
//!
//! Covers the whole life of a gradient: loosely-typed input from the stop
//! editor is normalized into a [`Gradient`], resolved against the preset
//! library, and rendered either as a CSS `linear-gradient(...)` string or as
//! a paint descriptor for the canvas rendering layer.

use smallvec::SmallVec;

use crate::color::Rgb;
use crate::util::{clamp, Size, Vec2};

/// Angle applied when the input has none.
pub const DEFAULT_ANGLE: f32 = 135.0;
/// Minimum spacing enforced between adjacent stops after normalization.
pub const MIN_STOP_GAP: f32 = 0.005;
/// Preset id that resolves through the caller-supplied custom gradient.
pub const CUSTOM_GRADIENT_ID: &str = "custom";
/// Gradients never normalize below this many stops.
pub const MIN_STOPS: usize = 2;

const FALLBACK_COLOR: Rgb = Rgb::WHITE;
const DEFAULT_STOP_A: Rgb = Rgb::from_rgb24(0xe0f7ff);
const DEFAULT_STOP_B: Rgb = Rgb::from_rgb24(0x8ec5ff);

#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub position: f32,
    pub color: Rgb,
}

pub type StopList = SmallVec<[GradientStop; 8]>;

/// A normalized gradient: angle in `[0, 360)`, at least two stops sorted
/// ascending with [`MIN_STOP_GAP`] between neighbours.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Gradient {
    pub angle: f32,
    pub stops: StopList,
}

/// Gradient data as it arrives from persisted JSON or the stop editor.
/// `stops` is either a flat alternating `[pos, "#hex", ...]` array or an
/// array of `{position, color}` objects; both shapes are accepted.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RawGradient {
    #[serde(default)]
    pub angle: Option<f64>,
    #[serde(default)]
    pub stops: Option<serde_json::Value>,
}

impl Gradient {
    /// The fixed two-stop gradient used whenever input degenerates.
    #[must_use]
    pub fn default_custom() -> Self {
        Self {
            angle: DEFAULT_ANGLE,
            stops: default_stops(),
        }
    }

    /// Normalize loose input into a well-formed gradient. Idempotent: the
    /// output re-normalizes to itself.
    #[must_use]
    pub fn normalize(raw: &RawGradient) -> Self {
        let collected = collect_raw_stops(raw.stops.as_ref());
        Self {
            angle: normalize_angle(raw.angle),
            stops: normalize_stop_list(collected),
        }
    }

    /// Re-run position normalization over already-typed stops.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            angle: normalize_angle(Some(f64::from(self.angle))),
            stops: normalize_stop_list(self.stops.clone()),
        }
    }
}

fn default_stops() -> StopList {
    let mut stops = StopList::new();
    stops.push(GradientStop {
        position: 0.0,
        color: DEFAULT_STOP_A,
    });
    stops.push(GradientStop {
        position: 1.0,
        color: DEFAULT_STOP_B,
    });
    stops
}

fn normalize_angle(value: Option<f64>) -> f32 {
    match value {
        Some(v) if v.is_finite() => (((v % 360.0) + 360.0) % 360.0) as f32,
        _ => DEFAULT_ANGLE,
    }
}

fn finite_position(value: Option<f64>) -> Option<f32> {
    value.filter(|v| v.is_finite()).map(|v| clamp(v as f32, 0.0, 1.0))
}

fn collect_raw_stops(value: Option<&serde_json::Value>) -> StopList {
    use serde_json::Value;
    let mut collected = StopList::new();
    let Some(Value::Array(items)) = value else {
        return collected;
    };
    if matches!(items.first(), Some(Value::Number(_))) {
        // Flat [pos, color, pos, color, ...] pairs. A missing position gets
        // an even-spacing default based on how many pairs there are.
        let pair_spacing = (items.len() as f32 / 2.0 - 1.0).max(1.0);
        let mut index = 0;
        while index < items.len() {
            let fallback = collected.len() as f32 / pair_spacing;
            let position =
                finite_position(items.get(index).and_then(Value::as_f64)).unwrap_or(fallback);
            let color = items
                .get(index + 1)
                .and_then(Value::as_str)
                .map_or(FALLBACK_COLOR, |text| Rgb::parse_or(text, FALLBACK_COLOR));
            collected.push(GradientStop { position, color });
            index += 2;
        }
    } else {
        for item in items {
            let Some(object) = item.as_object() else {
                continue;
            };
            let position =
                finite_position(object.get("position").and_then(Value::as_f64)).unwrap_or(0.0);
            let color = object
                .get("color")
                .and_then(Value::as_str)
                .map_or(FALLBACK_COLOR, |text| Rgb::parse_or(text, FALLBACK_COLOR));
            collected.push(GradientStop { position, color });
        }
    }
    collected
}

fn normalize_stop_list(mut stops: StopList) -> StopList {
    if stops.len() < MIN_STOPS {
        return default_stops();
    }
    stops.sort_by(|a, b| {
        a.position
            .partial_cmp(&b.position)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for index in 1..stops.len() {
        let floor = stops[index - 1].position + MIN_STOP_GAP;
        if stops[index].position < floor {
            stops[index].position = floor;
        }
    }
    // Gap enforcement can push the tail past 1.0; compress backward so the
    // last stop lands exactly on 1.0 with gaps preserved.
    let overflow = stops[stops.len() - 1].position - 1.0;
    if overflow > 0.0 {
        for index in (0..stops.len()).rev() {
            stops[index].position = clamp(stops[index].position - overflow, 0.0, 1.0);
            if index > 0 {
                let ceiling = stops[index].position - MIN_STOP_GAP;
                if stops[index - 1].position > ceiling {
                    stops[index - 1].position = ceiling;
                }
            }
        }
    }
    for stop in &mut stops {
        stop.position = clamp(stop.position, 0.0, 1.0);
    }
    stops
}

// ---------------------------------------------------------------------------
// Preset library
// ---------------------------------------------------------------------------

/// Which gradient fills the canvas background. `gradient_id` names a preset;
/// [`CUSTOM_GRADIENT_ID`] resolves through `custom` instead.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundStyle {
    pub gradient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Gradient>,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            gradient_id: "solid".into(),
            custom: None,
        }
    }
}

impl BackgroundStyle {
    #[must_use]
    pub fn preset(id: &str) -> Self {
        Self {
            gradient_id: id.into(),
            custom: None,
        }
    }
}

pub struct GradientPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub angle: f32,
    /// `None` for the solid preset.
    pub stops: Option<&'static [(f32, Rgb)]>,
}

pub const PRESETS: &[GradientPreset] = &[
    GradientPreset {
        id: "solid",
        name: "Solid",
        angle: 135.0,
        stops: None,
    },
    GradientPreset {
        id: "skyline",
        name: "Skyline",
        angle: 140.0,
        stops: Some(&[(0.0, Rgb::from_rgb24(0xe0f7ff)), (1.0, Rgb::from_rgb24(0x8ec5ff))]),
    },
    GradientPreset {
        id: "sunset",
        name: "Sunset",
        angle: 132.0,
        stops: Some(&[(0.0, Rgb::from_rgb24(0xf6d365)), (1.0, Rgb::from_rgb24(0xfda085))]),
    },
    GradientPreset {
        id: "aurora",
        name: "Aurora",
        angle: 132.0,
        stops: Some(&[(0.0, Rgb::from_rgb24(0xa1ffce)), (1.0, Rgb::from_rgb24(0xfaffd1))]),
    },
    GradientPreset {
        id: "ocean",
        name: "Ocean",
        angle: 140.0,
        stops: Some(&[(0.0, Rgb::from_rgb24(0x89f7fe)), (1.0, Rgb::from_rgb24(0x66a6ff))]),
    },
    GradientPreset {
        id: "lilac",
        name: "Lilac",
        angle: 138.0,
        stops: Some(&[(0.0, Rgb::from_rgb24(0xfbc2eb)), (1.0, Rgb::from_rgb24(0xa6c1ee))]),
    },
    GradientPreset {
        id: "mint",
        name: "Mint",
        angle: 135.0,
        stops: Some(&[(0.0, Rgb::from_rgb24(0xd4fc79)), (1.0, Rgb::from_rgb24(0x96e6a1))]),
    },
    GradientPreset {
        id: "twilight",
        name: "Twilight",
        angle: 142.0,
        stops: Some(&[(0.0, Rgb::from_rgb24(0x667eea)), (1.0, Rgb::from_rgb24(0x764ba2))]),
    },
    GradientPreset {
        id: "peach",
        name: "Peach",
        angle: 136.0,
        stops: Some(&[(0.0, Rgb::from_rgb24(0xffecd2)), (1.0, Rgb::from_rgb24(0xfcb69f))]),
    },
    GradientPreset {
        id: CUSTOM_GRADIENT_ID,
        name: "Customize",
        angle: 135.0,
        stops: Some(&[(0.0, Rgb::from_rgb24(0xe0f7ff)), (1.0, Rgb::from_rgb24(0x8ec5ff))]),
    },
];

/// Preset lookup; unknown ids fall back to the solid preset.
#[must_use]
pub fn preset_by_id(id: &str) -> &'static GradientPreset {
    PRESETS.iter().find(|preset| preset.id == id).unwrap_or(&PRESETS[0])
}

/// Resolve a background style to a concrete gradient, or `None` for a solid
/// fill. The custom id renormalizes the caller's gradient (falling back to
/// the default custom gradient when none is stored).
#[must_use]
pub fn resolve_background(style: &BackgroundStyle) -> Option<Gradient> {
    if style.gradient_id == CUSTOM_GRADIENT_ID {
        let gradient = style
            .custom
            .clone()
            .unwrap_or_else(Gradient::default_custom);
        return Some(gradient.normalized());
    }
    let preset = preset_by_id(&style.gradient_id);
    let stops = preset.stops?;
    Some(Gradient {
        angle: preset.angle,
        stops: stops
            .iter()
            .map(|&(position, color)| GradientStop { position, color })
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Output forms
// ---------------------------------------------------------------------------

/// Angles are whole degrees in every preset and most user input; print them
/// without a trailing `.0` so the CSS matches what a browser would emit.
fn format_angle(angle: f32) -> String {
    if angle.fract() == 0.0 {
        format!("{}", angle as i64)
    } else {
        format!("{angle}")
    }
}

/// CSS `linear-gradient(...)` for the resolved style, or the plain solid
/// color when the style resolves to no stops.
#[must_use]
pub fn css_linear_gradient(style: &BackgroundStyle, solid: Rgb) -> String {
    let Some(gradient) = resolve_background(style) else {
        return solid.to_string();
    };
    if gradient.stops.is_empty() {
        return solid.to_string();
    }
    let stops = gradient
        .stops
        .iter()
        .map(|stop| format!("{} {}%", stop.color, (stop.position * 100.0).round() as i64))
        .collect::<Vec<_>>()
        .join(", ");
    format!("linear-gradient({}deg, {})", format_angle(gradient.angle), stops)
}

/// Gradient line for the canvas rendering layer: start/end points plus
/// ordered `(position, color)` stops.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradientPaint {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<(f32, Rgb)>,
}

/// Compute the paint for a viewport of the given size: a solid color, or a
/// gradient line through the center oriented by the angle (0 degrees points
/// along +x), extended to the half-diagonal so the fill covers the whole
/// rectangle at any aspect ratio. Zero-sized viewports are clamped to 1.
#[must_use]
pub fn paint_descriptor(
    style: &BackgroundStyle,
    solid: Rgb,
    viewport: Size,
) -> either::Either<Rgb, LinearGradientPaint> {
    let Some(gradient) = resolve_background(style) else {
        return either::Either::Left(solid);
    };
    if gradient.stops.is_empty() {
        return either::Either::Left(solid);
    }
    let viewport = viewport.at_least(1.0);
    let (sin, cos) = gradient.angle.to_radians().sin_cos();
    let center = Vec2::new(viewport.width / 2.0, viewport.height / 2.0);
    let half_diagonal = viewport.width.hypot(viewport.height) / 2.0;
    let offset = Vec2::new(cos * half_diagonal, sin * half_diagonal);
    either::Either::Right(LinearGradientPaint {
        start: center - offset,
        end: center + offset,
        stops: gradient
            .stops
            .iter()
            .map(|stop| (stop.position, stop.color))
            .collect(),
    })
}

/// Color of the gradient at `position`. Outside the stop range the boundary
/// stop's color is returned unchanged; inside, channels are interpolated
/// linearly across the bracketing segment. Assumes sorted stops.
#[must_use]
pub fn interpolate_color_at(stops: &[GradientStop], position: f32) -> Rgb {
    let Some(first) = stops.first() else {
        return FALLBACK_COLOR;
    };
    if position <= first.position {
        return first.color;
    }
    // Unwrap OK - the slice is non-empty.
    let last = stops.last().unwrap();
    if position >= last.position {
        return last.color;
    }
    for pair in stops.windows(2) {
        let [left, right] = pair else { continue };
        if position < left.position || position > right.position {
            continue;
        }
        let spread = right.position - left.position;
        let spread = if spread == 0.0 { 1.0 } else { spread };
        return left.color.lerp(right.color, (position - left.position) / spread);
    }
    FALLBACK_COLOR
}

// ---------------------------------------------------------------------------
// Stop editor
// ---------------------------------------------------------------------------

/// One handle in the stop editor. Ids are only meaningful to the editor.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditorStop {
    pub id: String,
    pub position: f32,
    pub color: Rgb,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
struct RawEditorState {
    #[serde(default)]
    angle: Option<f64>,
    #[serde(default)]
    stops: Option<Vec<serde_json::Value>>,
}

/// Stateful model behind the custom-gradient editor: id-tagged stops kept
/// sorted, with a two-stop floor.
#[derive(Clone, Debug)]
pub struct GradientEditor {
    angle: f32,
    stops: Vec<EditorStop>,
    stop_counter: u32,
}

impl Default for GradientEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl GradientEditor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            angle: DEFAULT_ANGLE,
            stops: vec![
                EditorStop {
                    id: "gs-1".into(),
                    position: 0.0,
                    color: DEFAULT_STOP_A,
                },
                EditorStop {
                    id: "gs-2".into(),
                    position: 1.0,
                    color: DEFAULT_STOP_B,
                },
            ],
            stop_counter: 2,
        }
    }

    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }
    /// Slider input is bounded, so the angle is clamped rather than wrapped.
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = clamp(angle, 0.0, 360.0);
    }
    #[must_use]
    pub fn stops(&self) -> &[EditorStop] {
        &self.stops
    }

    fn next_stop_id(&mut self) -> String {
        self.stop_counter += 1;
        format!("gs-{}", self.stop_counter)
    }

    fn sort_stops(&mut self) {
        self.stops.sort_by(|a, b| {
            a.position
                .partial_cmp(&b.position)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Insert a stop at `position` taking the interpolated color of the
    /// track at that point, so the track looks unchanged until the user
    /// recolors the new handle. Returns the new stop's id.
    pub fn add_stop_at(&mut self, position: f32) -> String {
        let position = clamp(position, 0.0, 1.0);
        let color = interpolate_color_at(&self.as_gradient_stops(), position);
        let id = self.next_stop_id();
        self.stops.push(EditorStop {
            id: id.clone(),
            position,
            color,
        });
        self.sort_stops();
        id
    }

    /// Refused at the two-stop floor. Returns whether a stop was removed.
    pub fn remove_stop(&mut self, id: &str) -> bool {
        if self.stops.len() <= MIN_STOPS {
            return false;
        }
        let before = self.stops.len();
        self.stops.retain(|stop| stop.id != id);
        self.stops.len() != before
    }

    pub fn move_stop(&mut self, id: &str, position: f32) -> bool {
        let Some(stop) = self.stops.iter_mut().find(|stop| stop.id == id) else {
            return false;
        };
        stop.position = clamp(position, 0.0, 1.0);
        self.sort_stops();
        true
    }

    pub fn set_stop_color(&mut self, id: &str, color: Rgb) -> bool {
        let Some(stop) = self.stops.iter_mut().find(|stop| stop.id == id) else {
            return false;
        };
        stop.color = color;
        true
    }

    fn as_gradient_stops(&self) -> StopList {
        self.stops
            .iter()
            .map(|stop| GradientStop {
                position: stop.position,
                color: stop.color,
            })
            .collect()
    }

    /// The editor's current state as a normalized gradient.
    #[must_use]
    pub fn to_gradient(&self) -> Gradient {
        Gradient {
            angle: self.angle,
            stops: self.as_gradient_stops(),
        }
        .normalized()
    }

    /// Load persisted editor state. Malformed JSON or fewer than two usable
    /// stops reverts to the default editor.
    pub fn hydrate(&mut self, json: &str) {
        let raw: RawEditorState = serde_json::from_str(json).unwrap_or_default();
        *self = Self::new();
        self.angle = normalize_angle(raw.angle);
        let mut loaded = Vec::new();
        for item in raw.stops.unwrap_or_default() {
            let Some(object) = item.as_object() else {
                continue;
            };
            let id = match object.get("id").and_then(serde_json::Value::as_str) {
                Some(id) => id.to_owned(),
                None => self.next_stop_id(),
            };
            let position = finite_position(object.get("position").and_then(serde_json::Value::as_f64))
                .unwrap_or(0.0);
            let color = object
                .get("color")
                .and_then(serde_json::Value::as_str)
                .map_or(FALLBACK_COLOR, |text| Rgb::parse_or(text, FALLBACK_COLOR));
            loaded.push(EditorStop { id, position, color });
        }
        if loaded.len() >= MIN_STOPS {
            self.stops = loaded;
            self.sort_stops();
            // Keep generated ids unique past the loaded ones.
            let max_suffix = self
                .stops
                .iter()
                .filter_map(|stop| stop.id.rsplit('-').next()?.parse::<u32>().ok())
                .max()
                .unwrap_or(0);
            self.stop_counter = self.stop_counter.max(max_suffix);
        }
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "angle": self.angle,
            "stops": self.stops,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(angle: Option<f64>, stops: serde_json::Value) -> RawGradient {
        RawGradient {
            angle,
            stops: Some(stops),
        }
    }

    #[test]
    fn angle_wraps_into_range() {
        assert_eq!(Gradient::normalize(&raw(Some(495.0), serde_json::json!([]))).angle, 135.0);
        assert_eq!(Gradient::normalize(&raw(Some(-30.0), serde_json::json!([]))).angle, 330.0);
        assert_eq!(Gradient::normalize(&raw(Some(360.0), serde_json::json!([]))).angle, 0.0);
    }

    #[test]
    fn missing_or_nonfinite_angle_defaults() {
        assert_eq!(Gradient::normalize(&RawGradient::default()).angle, DEFAULT_ANGLE);
        assert_eq!(
            Gradient::normalize(&raw(Some(f64::NAN), serde_json::json!([]))).angle,
            DEFAULT_ANGLE
        );
    }

    #[test]
    fn accepts_flat_and_object_stop_forms() {
        let flat = Gradient::normalize(&raw(None, serde_json::json!([0, "#111111", 1, "#222222"])));
        let objects = Gradient::normalize(&raw(
            None,
            serde_json::json!([
                {"position": 0, "color": "#111111"},
                {"position": 1, "color": "#222222"},
            ]),
        ));
        assert_eq!(flat.stops, objects.stops);
        assert_eq!(flat.stops[0].color, Rgb::from_rgb24(0x111111));
    }

    #[test]
    fn invalid_colors_fall_back_to_white() {
        let gradient =
            Gradient::normalize(&raw(None, serde_json::json!([0, "chartreuse", 1, "#abcdef"])));
        assert_eq!(gradient.stops[0].color, Rgb::WHITE);
        assert_eq!(gradient.stops[1].color, Rgb::from_rgb24(0xabcdef));
    }

    #[test]
    fn too_few_stops_yield_default_gradient() {
        let gradient = Gradient::normalize(&raw(None, serde_json::json!([0.5, "#123456"])));
        assert_eq!(gradient.stops.as_slice(), Gradient::default_custom().stops.as_slice());
        let empty = Gradient::normalize(&RawGradient::default());
        assert_eq!(empty.stops.as_slice(), Gradient::default_custom().stops.as_slice());
    }

    #[test]
    fn stops_sorted_with_minimum_gap() {
        let gradient = Gradient::normalize(&raw(
            None,
            serde_json::json!([0.5, "#111111", 0.5, "#222222", 0.2, "#333333"]),
        ));
        let positions: Vec<f32> = gradient.stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.2, 0.5, 0.5 + MIN_STOP_GAP]);
        for pair in gradient.stops.windows(2) {
            assert!(pair[1].position - pair[0].position >= MIN_STOP_GAP);
        }
    }

    #[test]
    fn tail_overflow_compresses_back_to_one() {
        let gradient = Gradient::normalize(&raw(
            None,
            serde_json::json!([0.999, "#111111", 0.9995, "#222222", 1.0, "#333333"]),
        ));
        let last = gradient.stops.last().unwrap().position;
        assert!((last - 1.0).abs() < 1e-6, "last stop at {last}");
        for pair in gradient.stops.windows(2) {
            assert!(pair[1].position - pair[0].position >= MIN_STOP_GAP - 1e-6);
        }
        assert!(gradient.stops.first().unwrap().position >= 0.0);
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            raw(Some(495.0), serde_json::json!([0.5, "#111111", 0.1, "#222222", 0.1, "bad"])),
            raw(None, serde_json::json!([1.0, "#111111", 1.0, "#222222"])),
            raw(Some(-1.0), serde_json::json!([
                {"position": 0.3, "color": "#aabbcc"},
                {"position": 0.3, "color": "#ddeeff"},
                {"position": 0.9, "color": "#001122"},
            ])),
        ];
        for input in &inputs {
            let once = Gradient::normalize(input);
            assert_eq!(once.normalized(), once);
        }
    }

    #[test]
    fn sunset_preset_css() {
        let css = css_linear_gradient(&BackgroundStyle::preset("sunset"), Rgb::WHITE);
        assert_eq!(css, "linear-gradient(132deg, #f6d365 0%, #fda085 100%)");
    }

    #[test]
    fn solid_and_unknown_presets_render_solid_color() {
        let solid = Rgb::from_rgb24(0x123456);
        assert_eq!(css_linear_gradient(&BackgroundStyle::preset("solid"), solid), "#123456");
        assert_eq!(css_linear_gradient(&BackgroundStyle::preset("nope"), solid), "#123456");
    }

    #[test]
    fn paint_descriptor_spans_half_diagonal() {
        let style = BackgroundStyle {
            gradient_id: CUSTOM_GRADIENT_ID.into(),
            custom: Some(Gradient {
                angle: 0.0,
                stops: default_stops(),
            }),
        };
        let paint = paint_descriptor(&style, Rgb::WHITE, Size::new(300.0, 400.0))
            .right()
            .expect("gradient paint");
        // Half diagonal of 300x400 is 250; angle 0 points along +x.
        assert!((paint.start.x - (150.0 - 250.0)).abs() < 1e-3);
        assert!((paint.end.x - (150.0 + 250.0)).abs() < 1e-3);
        assert!((paint.start.y - 200.0).abs() < 1e-3);
        assert!((paint.end.y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn paint_descriptor_clamps_degenerate_viewport() {
        let paint = paint_descriptor(&BackgroundStyle::preset("sunset"), Rgb::WHITE, Size::new(0.0, 0.0))
            .right()
            .expect("gradient paint");
        let delta = paint.end - paint.start;
        assert!(delta.x.is_finite() && delta.y.is_finite());
        assert!(delta.x.hypot(delta.y) > 0.0);
    }

    #[test]
    fn solid_paint_for_solid_style() {
        let paint = paint_descriptor(&BackgroundStyle::default(), Rgb::BLACK, Size::new(10.0, 10.0));
        assert_eq!(paint.left(), Some(Rgb::BLACK));
    }

    #[test]
    fn interpolation_boundaries_and_midpoint() {
        let stops = [
            GradientStop {
                position: 0.2,
                color: Rgb::new(0, 0, 0),
            },
            GradientStop {
                position: 0.8,
                color: Rgb::new(200, 100, 50),
            },
        ];
        assert_eq!(interpolate_color_at(&stops, 0.0), stops[0].color);
        assert_eq!(interpolate_color_at(&stops, 1.0), stops[1].color);
        assert_eq!(interpolate_color_at(&stops, 0.5), Rgb::new(100, 50, 25));
    }

    #[test]
    fn editor_insert_takes_interpolated_color() {
        let mut editor = GradientEditor::new();
        editor.set_stop_color("gs-1", Rgb::new(0, 0, 0));
        editor.set_stop_color("gs-2", Rgb::new(100, 100, 100));
        let id = editor.add_stop_at(0.5);
        let inserted = editor.stops().iter().find(|stop| stop.id == id).unwrap();
        assert_eq!(inserted.color, Rgb::new(50, 50, 50));
        assert_eq!(editor.stops().len(), 3);
        // Insertion keeps the list sorted.
        assert_eq!(editor.stops()[1].id, id);
    }

    #[test]
    fn editor_refuses_removal_at_floor() {
        let mut editor = GradientEditor::new();
        assert!(!editor.remove_stop("gs-1"));
        editor.add_stop_at(0.5);
        assert!(editor.remove_stop("gs-1"));
        assert!(!editor.remove_stop("gs-2"));
    }

    #[test]
    fn editor_round_trips_through_json() {
        let mut editor = GradientEditor::new();
        editor.set_angle(90.0);
        editor.add_stop_at(0.25);
        let json = editor.to_json();

        let mut restored = GradientEditor::new();
        restored.hydrate(&json);
        assert_eq!(restored.angle(), 90.0);
        assert_eq!(restored.stops(), editor.stops());
        // Counter resumes past loaded ids.
        let new_id = restored.add_stop_at(0.75);
        assert!(editor.stops().iter().all(|stop| stop.id != new_id));
    }

    #[test]
    fn editor_hydrate_rejects_garbage() {
        let mut editor = GradientEditor::new();
        editor.hydrate("not even json");
        assert_eq!(editor.stops().len(), 2);
        assert_eq!(editor.angle(), DEFAULT_ANGLE);
    }
}

//! Device frame geometry catalog.
//!
//! Frame entries describe a device bezel image and where its screen cutout
//! sits in the image's native pixel space. The catalog is loaded once at
//! startup and read-only afterwards; the core never mutates it.

use crate::util::Rect;

/// Camera/sensor housing cutout nested inside the screen region, in the
/// frame image's native pixel space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IslandGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub island: Option<IslandGeometry>,
}

impl ScreenGeometry {
    /// The screen region scaled into render space.
    #[must_use]
    pub fn rect_at_scale(&self, scale: f32) -> Rect {
        Rect::new(
            self.x * scale,
            self.y * scale,
            self.width * scale,
            self.height * scale,
        )
    }
}

/// One selectable device frame. `asset` is the bezel image path, resolved by
/// the rendering layer; the core only cares about the geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameEntry {
    pub id: String,
    pub name: String,
    pub group: String,
    pub asset: String,
    pub original_width: f32,
    pub original_height: f32,
    pub screen: ScreenGeometry,
}

/// Frame entries with an id index. Insertion order is preserved for menus.
#[derive(Clone, Debug, Default)]
pub struct FrameCatalog {
    entries: Vec<FrameEntry>,
    by_id: hashbrown::HashMap<String, usize>,
}

impl FrameCatalog {
    #[must_use]
    pub fn new(entries: Vec<FrameEntry>) -> Self {
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.id.clone(), index))
            .collect();
        Self { entries, by_id }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FrameEntry> {
        self.by_id.get(id).map(|&index| &self.entries[index])
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &FrameEntry> {
        self.entries.iter()
    }

    /// Entries bucketed by group, groups in first-appearance order. Feeds
    /// the frame-picker menu.
    #[must_use]
    pub fn grouped(&self) -> Vec<(&str, Vec<&FrameEntry>)> {
        let mut groups: Vec<(&str, Vec<&FrameEntry>)> = Vec::new();
        for entry in &self.entries {
            match groups.iter_mut().find(|(name, _)| *name == entry.group) {
                Some((_, bucket)) => bucket.push(entry),
                None => groups.push((&entry.group, vec![entry])),
            }
        }
        groups
    }

    /// Tallest native frame height; the reference for sizing new mockups.
    #[must_use]
    pub fn max_original_height(&self) -> f32 {
        self.entries
            .iter()
            .map(|entry| entry.original_height)
            .fold(1.0, f32::max)
    }

    /// The built-in iPhone frame set.
    #[must_use]
    pub fn builtin() -> Self {
        let iphone_17 = ScreenGeometry {
            x: 70.0,
            y: 67.0,
            width: 1210.0,
            height: 2626.0,
            corner_radius: 180.0,
            island: Some(IslandGeometry {
                x: 489.0,
                y: 113.0,
                width: 372.0,
                height: 105.0,
                corner_radius: 52.0,
            }),
        };
        let iphone_17_pro_max = ScreenGeometry {
            x: 73.0,
            y: 64.0,
            width: 1324.0,
            height: 2872.0,
            corner_radius: 180.0,
            island: Some(IslandGeometry {
                x: 549.0,
                y: 110.0,
                width: 372.0,
                height: 106.0,
                corner_radius: 52.0,
            }),
        };
        let iphone_air = ScreenGeometry {
            x: 58.0,
            y: 70.0,
            width: 1264.0,
            height: 2740.0,
            corner_radius: 180.0,
            island: Some(IslandGeometry {
                x: 504.0,
                y: 135.0,
                width: 372.0,
                height: 105.0,
                corner_radius: 52.0,
            }),
        };
        let iphone_16 = ScreenGeometry {
            x: 88.0,
            y: 88.0,
            width: 1183.0,
            height: 2560.0,
            corner_radius: 160.0,
            island: Some(IslandGeometry {
                x: 493.0,
                y: 124.0,
                width: 374.0,
                height: 109.0,
                corner_radius: 52.0,
            }),
        };
        let iphone_16_plus = ScreenGeometry {
            x: 88.0,
            y: 85.0,
            width: 1294.0,
            height: 2800.0,
            corner_radius: 160.0,
            island: Some(IslandGeometry {
                x: 545.0,
                y: 123.0,
                width: 380.0,
                height: 107.0,
                corner_radius: 53.5,
            }),
        };
        let iphone_16_pro = ScreenGeometry {
            x: 70.0,
            y: 67.0,
            width: 1210.0,
            height: 2626.0,
            corner_radius: 180.0,
            island: Some(IslandGeometry {
                x: 487.0,
                y: 107.0,
                width: 376.0,
                height: 112.0,
                corner_radius: 52.0,
            }),
        };
        let iphone_16_pro_max = ScreenGeometry {
            x: 73.0,
            y: 64.0,
            width: 1324.0,
            height: 2872.0,
            corner_radius: 180.0,
            island: Some(IslandGeometry {
                x: 548.0,
                y: 109.0,
                width: 374.0,
                height: 108.0,
                corner_radius: 54.0,
            }),
        };

        struct Family {
            group: &'static str,
            size: (f32, f32),
            screen: ScreenGeometry,
            dir: &'static str,
            variants: &'static [(&'static str, &'static str, &'static str)],
        }
        let families = [
            Family {
                group: "iPhone 17",
                size: (1350.0, 2760.0),
                screen: iphone_17,
                dir: "assets/iphone_17/iPhone_17",
                variants: &[
                    ("iphone-17-black", "iPhone 17 Black", "17_black.png"),
                    ("iphone-17-white", "iPhone 17 White", "17_white.png"),
                    ("iphone-17-lavender", "iPhone 17 Lavender", "17_lavender.png"),
                    ("iphone-17-mistblue", "iPhone 17 Mist Blue", "17_mistblue.png"),
                    ("iphone-17-sage", "iPhone 17 Sage", "17_sage.png"),
                ],
            },
            Family {
                group: "iPhone 17 Pro",
                size: (1350.0, 2760.0),
                screen: iphone_17,
                dir: "assets/iphone_17/iPhone_17_Pro",
                variants: &[
                    ("iphone-17-pro-silver", "iPhone 17 Pro Silver", "17_pro_silver.png"),
                    ("iphone-17-pro-deep-blue", "iPhone 17 Pro Deep Blue", "17_pro_deep_blue.png"),
                    (
                        "iphone-17-pro-cosmic-orange",
                        "iPhone 17 Pro Cosmic Orange",
                        "17_pro_cosmic_orange.png",
                    ),
                ],
            },
            Family {
                group: "iPhone 17 Pro Max",
                size: (1470.0, 3000.0),
                screen: iphone_17_pro_max,
                dir: "assets/iphone_17/iPhone_17_Pro_Max",
                variants: &[
                    ("iphone-17-pro-max-silver", "iPhone 17 Pro Max Silver", "17_pro_max_silver.png"),
                    (
                        "iphone-17-pro-max-deep-blue",
                        "iPhone 17 Pro Max Deep Blue",
                        "17_pro_max_deep_blue.png",
                    ),
                    (
                        "iphone-17-pro-max-cosmic-orange",
                        "iPhone 17 Pro Max Cosmic Orange",
                        "17_pro_max_cosmic_orange.png",
                    ),
                ],
            },
            Family {
                group: "iPhone Air",
                size: (1380.0, 2880.0),
                screen: iphone_air,
                dir: "assets/iphone_air",
                variants: &[
                    ("iphone-air-space-black", "iPhone Air Space Black", "air_space_black.png"),
                    ("iphone-air-cloud-white", "iPhone Air Cloud White", "air_cloud_white.png"),
                    ("iphone-air-light-gold", "iPhone Air Light Gold", "air_light_gold.png"),
                    ("iphone-air-sky-blue", "iPhone Air Sky Blue", "air_sky_blue.png"),
                ],
            },
            Family {
                group: "iPhone 16",
                size: (1359.0, 2736.0),
                screen: iphone_16,
                dir: "assets/iphone_16/iPhone_16",
                variants: &[
                    ("iphone-16-black", "iPhone 16 Black", "16_black.png"),
                    ("iphone-16-white", "iPhone 16 White", "16_white.png"),
                    ("iphone-16-pink", "iPhone 16 Pink", "16_pink.png"),
                    ("iphone-16-teal", "iPhone 16 Teal", "16_teal.png"),
                    ("iphone-16-ultramarine", "iPhone 16 Ultra Marine", "16_ultramarine.png"),
                ],
            },
            Family {
                group: "iPhone 16 Plus",
                size: (1470.0, 2970.0),
                screen: iphone_16_plus,
                dir: "assets/iphone_16/iPhone_16_Plus",
                variants: &[
                    ("iphone-16-plus-black", "iPhone 16 Plus Black", "16_plus_black.png"),
                    ("iphone-16-plus-white", "iPhone 16 Plus White", "16_plus_white.png"),
                    ("iphone-16-plus-pink", "iPhone 16 Plus Pink", "16_plus_pink.png"),
                    ("iphone-16-plus-teal", "iPhone 16 Plus Teal", "16_plus_teal.png"),
                    (
                        "iphone-16-plus-ultramarine",
                        "iPhone 16 Plus Ultra Marine",
                        "16_plus_ultramarine.png",
                    ),
                ],
            },
            Family {
                group: "iPhone 16 Pro",
                size: (1350.0, 2760.0),
                screen: iphone_16_pro,
                dir: "assets/iphone_16/iPhone_16_Pro",
                variants: &[
                    (
                        "iphone-16-pro-black-titanium",
                        "iPhone 16 Pro Black Titanium",
                        "16_pro_black_titanium.png",
                    ),
                    (
                        "iphone-16-pro-white-titanium",
                        "iPhone 16 Pro White Titanium",
                        "16_pro_white_titanium.png",
                    ),
                    (
                        "iphone-16-pro-desert-titanium",
                        "iPhone 16 Pro Desert Titanium",
                        "16_pro_desert_titanium.png",
                    ),
                    (
                        "iphone-16-pro-natural-titanium",
                        "iPhone 16 Pro Natural Titanium",
                        "16_pro_natural_titanium.png",
                    ),
                ],
            },
            Family {
                group: "iPhone 16 Pro Max",
                size: (1470.0, 3000.0),
                screen: iphone_16_pro_max,
                dir: "assets/iphone_16/iPhone_16_Pro_Max",
                variants: &[
                    (
                        "iphone-16-pro-max-black-titanium",
                        "iPhone 16 Pro Max Black Titanium",
                        "16_pro_max_black_titanium.png",
                    ),
                    (
                        "iphone-16-pro-max-white-titanium",
                        "iPhone 16 Pro Max White Titanium",
                        "16_pro_max_white_titanium.png",
                    ),
                    (
                        "iphone-16-pro-max-desert-titanium",
                        "iPhone 16 Pro Max Desert Titanium",
                        "16_pro_max_desert_titanium.png",
                    ),
                    (
                        "iphone-16-pro-max-natural-titanium",
                        "iPhone 16 Pro Max Natural Titanium",
                        "16_pro_max_natural_titanium.png",
                    ),
                ],
            },
        ];

        let mut entries = Vec::new();
        for family in &families {
            for &(id, name, file) in family.variants {
                entries.push(FrameEntry {
                    id: id.into(),
                    name: name.into(),
                    group: family.group.into(),
                    asset: format!("{}/{}", family.dir, file),
                    original_width: family.size.0,
                    original_height: family.size.1,
                    screen: family.screen,
                });
            }
        }
        Self::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup() {
        let catalog = FrameCatalog::builtin();
        let entry = catalog.get("iphone-16-pro-black-titanium").expect("known frame");
        assert_eq!(entry.group, "iPhone 16 Pro");
        assert_eq!(entry.original_width, 1350.0);
        assert!(entry.screen.island.is_some());
        assert!(catalog.get("pixel-9").is_none());
    }

    #[test]
    fn groups_preserve_first_appearance_order() {
        let catalog = FrameCatalog::builtin();
        let groups = catalog.grouped();
        let names: Vec<&str> = groups.iter().map(|(name, _)| *name).collect();
        assert_eq!(names[0], "iPhone 17");
        assert_eq!(names.last().copied(), Some("iPhone 16 Pro Max"));
        let total: usize = groups.iter().map(|(_, bucket)| bucket.len()).sum();
        assert_eq!(total, catalog.len());
    }

    #[test]
    fn max_height_is_the_pro_max() {
        assert_eq!(FrameCatalog::builtin().max_original_height(), 3000.0);
    }

    #[test]
    fn screen_rect_scales_uniformly() {
        let catalog = FrameCatalog::builtin();
        let entry = catalog.get("iphone-17-black").unwrap();
        let rect = entry.screen.rect_at_scale(0.5);
        assert_eq!(rect, Rect::new(35.0, 33.5, 605.0, 1313.0));
    }
}

use crate::color::{HsvColorFormat, RgbColorFormat};

pub const ORANGE_HUE_MIN: f32 = 10_f32;
pub const ORANGE_HUE_MAX: f32 = 50_f32;
pub const ORANGE_SATURATION_MIN: f32 = 30_f32;
pub const ORANGE_VALUE_MIN: f32 = 20_f32;

pub const BROWN_HUE_MIN: f32 = 10_f32;
pub const BROWN_HUE_MAX: f32 = 45_f32;
pub const BROWN_SATURATION_MIN: f32 = 20_f32;
pub const BROWN_VALUE_MIN: f32 = 10_f32;

pub const BEIGE_HUE_MIN: f32 = 20_f32;
pub const BEIGE_HUE_MAX: f32 = 50_f32;
pub const BEIGE_SATURATION_MIN: f32 = 10_f32;
pub const BEIGE_SATURATION_MAX: f32 = 50_f32;
pub const BEIGE_VALUE_MIN: f32 = 70_f32;

pub const TARGET_BLUE_HUE: f32 = 210_f32;
pub const TARGET_BLUE_HUE_MIN: f32 = 200_f32;
pub const TARGET_BLUE_HUE_MAX: f32 = 220_f32;

const ORANGE_HUE_CENTER: f32 = 30_f32;
const HUE_SPREAD_FACTOR: f32 = 0.5_f32;
const ORANGE_SATURATION_BOOST: f32 = 1.1_f32;
const BEIGE_SATURATION_DAMPING: f32 = 0.5_f32;
const BEIGE_SATURATION_FLOOR: f32 = 10_f32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HueClass {
    /// Orange and brown share one remap formula.
    OrangeOrBrown,
    Beige,
}

fn is_orange(color: &HsvColorFormat) -> bool {
    (ORANGE_HUE_MIN..=ORANGE_HUE_MAX).contains(&color.hue)
        && color.saturation > ORANGE_SATURATION_MIN
        && color.value > ORANGE_VALUE_MIN
}

fn is_brown(color: &HsvColorFormat) -> bool {
    (BROWN_HUE_MIN..=BROWN_HUE_MAX).contains(&color.hue)
        && color.saturation > BROWN_SATURATION_MIN
        && color.value > BROWN_VALUE_MIN
}

fn is_beige(color: &HsvColorFormat) -> bool {
    (BEIGE_HUE_MIN..=BEIGE_HUE_MAX).contains(&color.hue)
        && (BEIGE_SATURATION_MIN..=BEIGE_SATURATION_MAX).contains(&color.saturation)
        && color.value > BEIGE_VALUE_MIN
}

/// First match wins; `None` means the pixel stays untouched.
pub fn classify(color: &HsvColorFormat) -> Option<HueClass> {
    if is_orange(color) || is_brown(color) {
        Some(HueClass::OrangeOrBrown)
    } else if is_beige(color) {
        Some(HueClass::Beige)
    } else {
        None
    }
}

/// Shifts a classified color into the blue palette. Value is never changed.
pub fn remap(color: &HsvColorFormat, class: HueClass) -> HsvColorFormat {
    match class {
        HueClass::OrangeOrBrown => HsvColorFormat {
            hue: (TARGET_BLUE_HUE + (color.hue - ORANGE_HUE_CENTER) * HUE_SPREAD_FACTOR)
                .clamp(TARGET_BLUE_HUE_MIN, TARGET_BLUE_HUE_MAX),
            saturation: (color.saturation * ORANGE_SATURATION_BOOST).min(100_f32),
            value: color.value,
        },
        HueClass::Beige => HsvColorFormat {
            hue: TARGET_BLUE_HUE,
            saturation: (color.saturation * BEIGE_SATURATION_DAMPING).max(BEIGE_SATURATION_FLOOR),
            value: color.value,
        },
    }
}

/// Classifies and remaps one RGB pixel. Returns `None` for unclassified
/// pixels so callers can leave them bit-identical.
pub fn remap_pixel(red: u8, green: u8, blue: u8) -> Option<(u8, u8, u8)> {
    let rgb = RgbColorFormat { red, green, blue };
    let hsv = HsvColorFormat::from(&rgb);
    let class = classify(&hsv)?;
    let remapped = RgbColorFormat::from(&remap(&hsv, class));
    Some((remapped.red, remapped.green, remapped.blue))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RgbColorFormat {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Hue in degrees [0, 360), saturation and value in percent [0, 100].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HsvColorFormat {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl From<&RgbColorFormat> for HsvColorFormat {
    fn from(value: &RgbColorFormat) -> Self {
        let red = value.red as f32 / 255_f32;
        let green = value.green as f32 / 255_f32;
        let blue = value.blue as f32 / 255_f32;

        let max_channel = red.max(green).max(blue);
        let min_channel = red.min(green).min(blue);
        let chroma = max_channel - min_channel;

        let hue = if chroma == 0_f32 {
            0_f32
        } else if max_channel == red {
            (60_f32 * ((green - blue) / chroma) + 360_f32) % 360_f32
        } else if max_channel == green {
            (60_f32 * ((blue - red) / chroma) + 120_f32) % 360_f32
        } else {
            (60_f32 * ((red - green) / chroma) + 240_f32) % 360_f32
        };
        let saturation = if max_channel == 0_f32 {
            0_f32
        } else {
            chroma / max_channel * 100_f32
        };
        let value = max_channel * 100_f32;

        HsvColorFormat {
            hue,
            saturation,
            value,
        }
    }
}

impl From<RgbColorFormat> for HsvColorFormat {
    fn from(value: RgbColorFormat) -> Self {
        HsvColorFormat::from(&value)
    }
}

impl From<&HsvColorFormat> for RgbColorFormat {
    fn from(value: &HsvColorFormat) -> Self {
        let saturation = value.saturation / 100_f32;
        let brightness = value.value / 100_f32;

        let chroma = brightness * saturation;
        let intermediate = chroma * (1_f32 - ((value.hue / 60_f32) % 2_f32 - 1_f32).abs());
        let matched = brightness - chroma;

        let (red, green, blue) = match value.hue {
            h if (0_f32..60_f32).contains(&h) => (chroma, intermediate, 0_f32),
            h if (60_f32..120_f32).contains(&h) => (intermediate, chroma, 0_f32),
            h if (120_f32..180_f32).contains(&h) => (0_f32, chroma, intermediate),
            h if (180_f32..240_f32).contains(&h) => (0_f32, intermediate, chroma),
            h if (240_f32..300_f32).contains(&h) => (intermediate, 0_f32, chroma),
            _ => (chroma, 0_f32, intermediate),
        };

        // Channel values are truncated, not rounded.
        RgbColorFormat {
            red: ((red + matched) * 255_f32) as u8,
            green: ((green + matched) * 255_f32) as u8,
            blue: ((blue + matched) * 255_f32) as u8,
        }
    }
}

impl From<HsvColorFormat> for RgbColorFormat {
    fn from(value: HsvColorFormat) -> Self {
        RgbColorFormat::from(&value)
    }
}

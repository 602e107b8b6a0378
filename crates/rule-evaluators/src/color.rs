//! CSS colour parsing and the WCAG 2.x contrast formula.

use once_cell::sync::Lazy;
use regex::Regex;

static FUNCTIONAL_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^rgba?\(\s*([\d.]+%?)\s*[, ]\s*([\d.]+%?)\s*[, ]\s*([\d.]+%?)\s*(?:[,/]\s*([\d.]+%?)\s*)?\)$",
    )
    .expect("functional colour pattern")
});

/// Opaque sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Parsed CSS colour with alpha in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    pub fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    /// Source-over compositing onto an opaque backdrop.
    pub fn over(&self, backdrop: Rgb) -> Rgb {
        if self.is_opaque() {
            return self.rgb;
        }
        let alpha = self.alpha.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u8 {
            (f64::from(top) * alpha + f64::from(bottom) * (1.0 - alpha))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.rgb.r, backdrop.r),
            mix(self.rgb.g, backdrop.g),
            mix(self.rgb.b, backdrop.b),
        )
    }
}

/// Parses hex, `rgb()`/`rgba()`, `transparent` and the common named colours.
/// Anything else (gradients, `currentcolor`, variables) yields `None`.
pub fn parse_color(value: &str) -> Option<Rgba> {
    let trimmed = value.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "transparent" {
        return Some(Rgba {
            rgb: Rgb::BLACK,
            alpha: 0.0,
        });
    }
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }
    if trimmed.starts_with("rgb") {
        return parse_functional(&trimmed);
    }
    named_color(&trimmed).map(Rgba::opaque)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expand = |digit: &str| u8::from_str_radix(&digit.repeat(2), 16).ok();
    let pair = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        3 | 4 => {
            let rgb = Rgb::new(expand(&hex[0..1])?, expand(&hex[1..2])?, expand(&hex[2..3])?);
            let alpha = if hex.len() == 4 {
                f64::from(expand(&hex[3..4])?) / 255.0
            } else {
                1.0
            };
            Some(Rgba { rgb, alpha })
        }
        6 | 8 => {
            let rgb = Rgb::new(pair(&hex[0..2])?, pair(&hex[2..4])?, pair(&hex[4..6])?);
            let alpha = if hex.len() == 8 {
                f64::from(pair(&hex[6..8])?) / 255.0
            } else {
                1.0
            };
            Some(Rgba { rgb, alpha })
        }
        _ => None,
    }
}

fn parse_functional(value: &str) -> Option<Rgba> {
    let caps = FUNCTIONAL_COLOR.captures(value)?;
    let channel = |raw: &str| -> Option<u8> {
        let value = match raw.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? * 2.55,
            None => raw.parse::<f64>().ok()?,
        };
        Some(value.round().clamp(0.0, 255.0) as u8)
    };
    let rgb = Rgb::new(channel(&caps[1])?, channel(&caps[2])?, channel(&caps[3])?);
    let alpha = match caps.get(4) {
        Some(raw) => {
            let raw = raw.as_str();
            match raw.strip_suffix('%') {
                Some(percent) => percent.parse::<f64>().ok()? / 100.0,
                None => raw.parse::<f64>().ok()?,
            }
        }
        None => 1.0,
    };
    Some(Rgba {
        rgb,
        alpha: alpha.clamp(0.0, 1.0),
    })
}

fn named_color(name: &str) -> Option<Rgb> {
    let rgb = match name {
        "white" => Rgb::new(255, 255, 255),
        "black" => Rgb::new(0, 0, 0),
        "red" => Rgb::new(255, 0, 0),
        "green" => Rgb::new(0, 128, 0),
        "blue" => Rgb::new(0, 0, 255),
        "yellow" => Rgb::new(255, 255, 0),
        "gray" | "grey" => Rgb::new(128, 128, 128),
        "darkgray" | "darkgrey" => Rgb::new(169, 169, 169),
        "lightgray" | "lightgrey" => Rgb::new(211, 211, 211),
        "silver" => Rgb::new(192, 192, 192),
        "maroon" => Rgb::new(128, 0, 0),
        "olive" => Rgb::new(128, 128, 0),
        "lime" => Rgb::new(0, 255, 0),
        "aqua" | "cyan" => Rgb::new(0, 255, 255),
        "teal" => Rgb::new(0, 128, 128),
        "navy" => Rgb::new(0, 0, 128),
        "fuchsia" | "magenta" => Rgb::new(255, 0, 255),
        "purple" => Rgb::new(128, 0, 128),
        "orange" => Rgb::new(255, 165, 0),
        "whitesmoke" => Rgb::new(245, 245, 245),
        "gainsboro" => Rgb::new(220, 220, 220),
        _ => return None,
    };
    Some(rgb)
}

/// Relative luminance per WCAG 2.x.
pub fn relative_luminance(color: Rgb) -> f64 {
    let linear = |channel: u8| {
        let v = f64::from(channel) / 255.0;
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(color.r) + 0.7152 * linear(color.g) + 0.0722 * linear(color.b)
}

/// Ratio in `1.0..=21.0`, symmetric in its arguments. Not rounded.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Inclusive: a ratio equal to the threshold passes.
pub fn meets(ratio: f64, threshold: f64) -> bool {
    ratio >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_notations() {
        assert_eq!(parse_color("#fff"), Some(Rgba::opaque(Rgb::WHITE)));
        assert_eq!(parse_color("#1A2b3C").map(|c| c.rgb), Some(Rgb::new(26, 43, 60)));
        assert_eq!(parse_color("rgb(10, 20, 30)").map(|c| c.rgb), Some(Rgb::new(10, 20, 30)));
        assert_eq!(parse_color("rgb(10 20 30 / 50%)").map(|c| c.alpha), Some(0.5));
        assert_eq!(parse_color("rgba(0,0,0,0.25)").map(|c| c.alpha), Some(0.25));
        assert!(parse_color("transparent").unwrap().is_transparent());
        assert!(parse_color("rgba(0, 0, 0, 0)").unwrap().is_transparent());
        assert_eq!(parse_color("Navy").map(|c| c.rgb), Some(Rgb::new(0, 0, 128)));
        assert_eq!(parse_color("linear-gradient(red, blue)"), None);
        assert_eq!(parse_color("#ggg"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn black_on_white_is_maximum_contrast() {
        let ratio = contrast_ratio(Rgb::BLACK, Rgb::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9);
        assert_eq!(contrast_ratio(Rgb::WHITE, Rgb::BLACK), ratio);
        assert!((contrast_ratio(Rgb::WHITE, Rgb::WHITE) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn known_reference_pairs() {
        // #767676 on white is the lightest grey that passes 4.5:1
        let passing = contrast_ratio(Rgb::new(0x76, 0x76, 0x76), Rgb::WHITE);
        assert!(meets(passing, 4.5), "{passing}");
        let failing = contrast_ratio(Rgb::new(0x77, 0x77, 0x77), Rgb::WHITE);
        assert!(!meets(failing, 4.5), "{failing}");
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(meets(4.5, 4.5));
        assert!(meets(3.0, 3.0));
        assert!(!meets(4.499_999, 4.5));
    }

    #[test]
    fn alpha_composites_over_backdrop() {
        let half_black = parse_color("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!(half_black.over(Rgb::WHITE), Rgb::new(128, 128, 128));
        assert_eq!(Rgba::opaque(Rgb::BLACK).over(Rgb::WHITE), Rgb::BLACK);
    }
}

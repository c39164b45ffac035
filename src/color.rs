//! Color utilities — randomized tag colors constrained to a brightness band
//!
//! Default tag colors are drawn by rejection sampling: sample an RGB triple
//! from the mode's channel range, keep it only if its perceptual brightness
//! lands inside the mode's band. Sampling is bounded; if the cap is ever
//! exhausted a known-good fallback color is returned instead.

use rand::Rng;
use tracing::warn;

// ─────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────

/// Default cap on rejection-sampling attempts before falling back
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Fallback when dark sampling exhausts its attempt cap
pub const FALLBACK_DARK: &str = "#202020";

/// Fallback when light sampling exhausts its attempt cap
pub const FALLBACK_LIGHT: &str = "#f0f0f0";

/// Dark mode: channels in [0, 150), brightness must not exceed this
const DARK_MAX_BRIGHTNESS: f32 = 128.0;

/// Light mode: channels in [150, 256), brightness must reach this
const LIGHT_MIN_BRIGHTNESS: f32 = 200.0;

// ─────────────────────────────────────────────────────────────────
// Color Mode
// ─────────────────────────────────────────────────────────────────

/// Which brightness band generated colors are constrained to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Bright colors, suitable against dark text
    Light,
    /// Muted colors, suitable against light text
    Dark,
}

impl ColorMode {
    /// The opposite mode
    pub fn toggled(&self) -> ColorMode {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    /// Parse a mode name as used in configuration files
    pub fn parse(s: &str) -> Option<ColorMode> {
        match s.to_lowercase().as_str() {
            "light" => Some(ColorMode::Light),
            "dark" => Some(ColorMode::Dark),
            _ => None,
        }
    }

    fn fallback(&self) -> &'static str {
        match self {
            ColorMode::Light => FALLBACK_LIGHT,
            ColorMode::Dark => FALLBACK_DARK,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Parsing & Brightness
// ─────────────────────────────────────────────────────────────────

/// Parse a `#rrggbb` hex or `rgb(a)(r, g, b[, a])` color string.
///
/// Unparseable input reads as black, matching how the engine treats an
/// unknown host text color: black text gets light tag colors.
pub fn parse_color(color: &str) -> [u8; 3] {
    let s = color.trim();

    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return [r, g, b];
            }
        }
        return [0, 0, 0];
    }

    if let Some(body) = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let channels: Vec<u8> = body
            .split(',')
            .take(3)
            .filter_map(|part| part.trim().parse().ok())
            .collect();
        if channels.len() == 3 {
            return [channels[0], channels[1], channels[2]];
        }
    }

    [0, 0, 0]
}

/// Perceptual brightness of an RGB triple: `(299 R + 587 G + 114 B) / 1000`
pub fn brightness(rgb: [u8; 3]) -> f32 {
    let [r, g, b] = rgb;
    (r as f32 * 299.0 + g as f32 * 587.0 + b as f32 * 114.0) / 1000.0
}

fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

// ─────────────────────────────────────────────────────────────────
// Generation
// ─────────────────────────────────────────────────────────────────

/// Generate a random color in the given mode's brightness band.
pub fn generate_color(mode: ColorMode) -> String {
    generate_color_with(mode, DEFAULT_MAX_ATTEMPTS, &mut rand::thread_rng())
}

/// Generate with an explicit attempt cap and RNG.
///
/// The rejection bands are wide (a large share of samples within the channel
/// range already satisfies the brightness constraint), so the cap exists only
/// to rule out pathological non-termination. Exhausting it returns the
/// mode's fallback color.
pub fn generate_color_with<R: Rng>(mode: ColorMode, max_attempts: u32, rng: &mut R) -> String {
    for _ in 0..max_attempts {
        let rgb = match mode {
            ColorMode::Dark => [
                rng.gen_range(0..150u16) as u8,
                rng.gen_range(0..150u16) as u8,
                rng.gen_range(0..150u16) as u8,
            ],
            ColorMode::Light => [
                rng.gen_range(150..256u16) as u8,
                rng.gen_range(150..256u16) as u8,
                rng.gen_range(150..256u16) as u8,
            ],
        };

        let y = brightness(rgb);
        let accepted = match mode {
            ColorMode::Dark => y <= DARK_MAX_BRIGHTNESS,
            ColorMode::Light => y >= LIGHT_MIN_BRIGHTNESS,
        };
        if accepted {
            return to_hex(rgb);
        }
    }

    warn!(mode = ?mode, max_attempts, "Color sampling exhausted attempt cap, using fallback");
    mode.fallback().to_string()
}

/// Generate a color that contrasts with the given base color.
///
/// A bright base (brightness above 128) gets a dark-range color, anything
/// else gets a light-range one. Used when the new-tag color picker must
/// stand out against the host's prevailing text color.
pub fn generate_contrasting_color(base_color: &str) -> String {
    let mode = if brightness(parse_color(base_color)) > 128.0 {
        ColorMode::Dark
    } else {
        ColorMode::Light
    };
    generate_color(mode)
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

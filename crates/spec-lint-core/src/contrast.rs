//! WCAG 2.1 color contrast math.
//!
//! Everything here is pure except [`background_color_for`] and
//! [`analyze_text_node`], which read parent links through a [`CanvasHost`].

use crate::node::{CanvasHost, Fills, Node, NodeId, NormalizedColor, PaintKind};
use std::fmt;

/// Minimum ratio for AA, normal text.
pub const AA_NORMAL: f64 = 4.5;
/// Minimum ratio for AA, large text.
pub const AA_LARGE: f64 = 3.0;
/// Minimum ratio for AAA, normal text.
pub const AAA_NORMAL: f64 = 7.0;
/// Minimum ratio for AAA, large text.
pub const AAA_LARGE: f64 = 4.5;

/// Pixels per point used for the large-text cutoff.
const PX_PER_PT: f64 = 1.33;

/// Errors from hex-based helpers.
#[derive(Debug, thiserror::Error)]
pub enum ContrastError {
    /// The string is not a 6-digit hex color.
    #[error("Invalid hex color format: `{0}`")]
    InvalidHex(String),
}

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// White, the fallback background.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a color from 8-bit channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts a normalized color by rounding each channel to the nearest integer.
    #[must_use]
    pub fn from_normalized(color: NormalizedColor) -> Self {
        Self::new(
            channel_to_u8(color.r),
            channel_to_u8(color.g),
            channel_to_u8(color.b),
        )
    }

    /// Parses `#rrggbb` or `rrggbb`, case-insensitive. Returns `None` when malformed.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Formats as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_to_u8(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.1.
#[must_use]
pub fn luminance(color: Rgb) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Contrast ratio between two colors, in `1.0..=21.0`. Order does not matter.
#[must_use]
pub fn contrast_ratio(foreground: Rgb, background: Rgb) -> f64 {
    let a = luminance(foreground);
    let b = luminance(background);
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Which WCAG criteria a ratio satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WcagPasses {
    /// ≥ 4.5.
    pub aa: bool,
    /// ≥ 7.0.
    pub aaa: bool,
    /// ≥ 3.0.
    pub aa_large: bool,
    /// ≥ 4.5.
    pub aaa_large: bool,
}

impl WcagPasses {
    /// Best grade reached, judged by the large-text pair when `is_large_text`.
    #[must_use]
    pub fn grade(self, is_large_text: bool) -> Grade {
        let (aa, aaa) = if is_large_text {
            (self.aa_large, self.aaa_large)
        } else {
            (self.aa, self.aaa)
        };
        if aaa {
            Grade::Aaa
        } else if aa {
            Grade::Aa
        } else {
            Grade::Fail
        }
    }
}

/// Classifies a ratio against all four WCAG thresholds.
#[must_use]
pub fn classify(ratio: f64) -> WcagPasses {
    WcagPasses {
        aa: ratio >= AA_NORMAL,
        aaa: ratio >= AAA_NORMAL,
        aa_large: ratio >= AA_LARGE,
        aaa_large: ratio >= AAA_LARGE,
    }
}

/// WCAG conformance grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    /// Below AA.
    Fail,
    /// AA.
    Aa,
    /// AAA.
    Aaa,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => write!(f, "Fail"),
            Self::Aa => write!(f, "AA"),
            Self::Aaa => write!(f, "AAA"),
        }
    }
}

/// WCAG large text: at least 18pt, or at least 14pt and bold (weight ≥ 700).
#[must_use]
pub fn is_large_text(font_size_px: f64, font_weight: f64) -> bool {
    let pt = font_size_px / PX_PER_PT;
    pt >= 18.0 || (pt >= 14.0 && font_weight >= 700.0)
}

/// Returns true if the ratio meets AA for the given text size.
#[must_use]
pub fn meets_aa(ratio: f64, is_large_text: bool) -> bool {
    ratio >= if is_large_text { AA_LARGE } else { AA_NORMAL }
}

/// Returns true if the ratio meets AAA for the given text size.
#[must_use]
pub fn meets_aaa(ratio: f64, is_large_text: bool) -> bool {
    ratio >= if is_large_text { AAA_LARGE } else { AAA_NORMAL }
}

/// First solid paint's color. Later solid fills are ignored; no alpha blending.
#[must_use]
pub fn extract_solid_color(fills: &Fills) -> Option<Rgb> {
    fills
        .paints()?
        .iter()
        .find(|p| p.kind == PaintKind::Solid)
        .and_then(|p| p.color)
        .map(Rgb::from_normalized)
}

/// Color of the nearest ancestor with a solid fill, white if none has one.
///
/// Heuristic: siblings painted underneath and opacity are not considered.
#[must_use]
pub fn background_color_for(host: &dyn CanvasHost, id: &NodeId) -> Rgb {
    let mut current = host.parent_of(id);
    while let Some(parent_id) = current {
        if let Some(color) = host
            .resolve_by_id(parent_id)
            .and_then(|parent| extract_solid_color(&parent.fills))
        {
            return color;
        }
        current = host.parent_of(parent_id);
    }
    Rgb::WHITE
}

/// Contrast analysis of one text node.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastResult {
    /// Ratio rounded to two decimals.
    pub ratio: f64,
    /// Thresholds met.
    pub passes: WcagPasses,
    /// Text color.
    pub foreground: Rgb,
    /// Resolved background color.
    pub background: Rgb,
    /// Whether the text counts as large.
    pub large_text: bool,
}

impl ContrastResult {
    /// Grade for this node's text size.
    #[must_use]
    pub fn grade(&self) -> Grade {
        self.passes.grade(self.large_text)
    }
}

/// Computes the contrast of a text node against its resolved background.
///
/// Returns `None` when the node has no usable solid text color.
#[must_use]
pub fn analyze_text_node(
    host: &dyn CanvasHost,
    node: &Node,
    mixed_font_size: f64,
) -> Option<ContrastResult> {
    let foreground = extract_solid_color(&node.fills)?;
    let background = background_color_for(host, &node.id);
    let ratio = contrast_ratio(foreground, background);
    let large_text = is_large_text(
        node.resolved_font_size(mixed_font_size),
        node.resolved_font_weight(),
    );

    Some(ContrastResult {
        ratio: (ratio * 100.0).round() / 100.0,
        passes: classify(ratio),
        foreground,
        background,
        large_text,
    })
}

/// Remediation hints for a ratio below the active AA target; empty otherwise.
#[must_use]
pub fn suggestions(result: &ContrastResult, is_large_text: bool) -> Vec<String> {
    let target = if is_large_text { AA_LARGE } else { AA_NORMAL };
    if result.ratio >= target {
        return Vec::new();
    }

    let mut hints = vec![format!(
        "Current contrast ratio is {}:1, needs to be at least {}:1",
        result.ratio, target
    )];
    if result.ratio < 2.0 {
        hints.push("Consider using significantly different colors".to_string());
    } else {
        hints.push("Try darkening the text color or lightening the background".to_string());
        hints.push("Alternatively, lighten the text color or darken the background".to_string());
    }
    if is_large_text {
        hints.push("For large text, you only need 3:1 ratio".to_string());
    } else {
        hints.push(
            "Consider making text larger (18pt+) to lower contrast requirements".to_string(),
        );
    }
    hints
}

/// Contrast ratio between two hex colors.
///
/// # Errors
///
/// Returns an error if either color is not valid hex.
pub fn quick_contrast_check(foreground: &str, background: &str) -> Result<f64, ContrastError> {
    let fg = Rgb::from_hex(foreground)
        .ok_or_else(|| ContrastError::InvalidHex(foreground.to_string()))?;
    let bg = Rgb::from_hex(background)
        .ok_or_else(|| ContrastError::InvalidHex(background.to_string()))?;
    Ok(contrast_ratio(fg, bg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::node::{FontSize, NodeKind, Paint};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn black_on_white_is_21() {
        assert!(approx(contrast_ratio(Rgb::BLACK, Rgb::WHITE), 21.0));
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = Rgb::new(120, 30, 200);
        let b = Rgb::new(250, 240, 10);
        assert!((contrast_ratio(a, b) - contrast_ratio(b, a)).abs() < f64::EPSILON);
    }

    #[test]
    fn same_color_is_one() {
        for c in [Rgb::BLACK, Rgb::WHITE, Rgb::new(18, 52, 86)] {
            assert!((contrast_ratio(c, c) - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn darker_foreground_increases_ratio() {
        let light = Rgb::new(200, 200, 200);
        assert!(contrast_ratio(Rgb::BLACK, Rgb::WHITE) > contrast_ratio(light, Rgb::WHITE));
    }

    #[test]
    fn luminance_bounds() {
        assert!(luminance(Rgb::BLACK).abs() < f64::EPSILON);
        assert!(approx(luminance(Rgb::WHITE), 1.0));
    }

    #[test]
    fn hex_round_trip() {
        for c in [Rgb::BLACK, Rgb::WHITE, Rgb::new(1, 2, 3), Rgb::new(171, 205, 239)] {
            assert_eq!(Rgb::from_hex(&c.to_hex()), Some(c));
        }
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("#FFFFFF"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("00ff0a"), Some(Rgb::new(0, 255, 10)));
        assert_eq!(Rgb::new(10, 0, 255).to_hex(), "#0a00ff");
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb::from_hex("#1234567"), None);
    }

    #[test]
    fn normalized_channels_round() {
        let c = Rgb::from_normalized(NormalizedColor::new(0.5, 1.0, 0.0));
        assert_eq!(c, Rgb::new(128, 255, 0));
    }

    #[test]
    fn classification_thresholds() {
        let p = classify(4.5);
        assert!(p.aa && !p.aaa && p.aa_large && p.aaa_large);
        let p = classify(3.2);
        assert!(!p.aa && p.aa_large && !p.aaa_large);
        assert_eq!(p.grade(false), Grade::Fail);
        assert_eq!(p.grade(true), Grade::Aa);
        assert_eq!(classify(7.1).grade(false), Grade::Aaa);
    }

    #[test]
    fn large_text_cutoffs() {
        // 24px = 18.05pt
        assert!(is_large_text(24.0, 400.0));
        assert!(!is_large_text(23.0, 400.0));
        // 19px = 14.29pt
        assert!(is_large_text(19.0, 700.0));
        assert!(!is_large_text(19.0, 600.0));
    }

    #[test]
    fn wcag_helpers() {
        assert!(meets_aa(3.0, true));
        assert!(!meets_aa(3.0, false));
        assert!(meets_aaa(4.5, true));
        assert!(!meets_aaa(4.5, false));
    }

    #[test]
    fn first_solid_fill_wins() {
        let fills = Fills::Paints(vec![
            Paint::image(),
            Paint::solid(NormalizedColor::new(1.0, 0.0, 0.0)),
            Paint::solid(NormalizedColor::new(0.0, 0.0, 1.0)),
        ]);
        assert_eq!(extract_solid_color(&fills), Some(Rgb::new(255, 0, 0)));
        assert_eq!(extract_solid_color(&Fills::Mixed), None);
        assert_eq!(extract_solid_color(&Fills::Paints(vec![])), None);
        assert_eq!(extract_solid_color(&Fills::Paints(vec![Paint::image()])), None);
    }

    const TREE: &str = r##"{
        "nodes": [
            {"id": "page", "type": "FRAME", "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0}}], "children": [
                {"id": "group", "type": "GROUP", "children": [
                    {"id": "label", "type": "TEXT", "characters": "Hi", "fontSize": 12,
                     "fills": [{"type": "SOLID", "color": {"r": 0.2, "g": 0.2, "b": 0.2}}]}
                ]}
            ]},
            {"id": "loose", "type": "TEXT", "characters": "Alone", "fontSize": 32,
             "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0}}]}
        ]
    }"##;

    #[test]
    fn background_walks_up_to_filled_ancestor() {
        let doc = Document::from_json(TREE).unwrap();
        assert_eq!(background_color_for(&doc, &NodeId::from("label")), Rgb::BLACK);
        assert_eq!(background_color_for(&doc, &NodeId::from("loose")), Rgb::WHITE);
    }

    #[test]
    fn analyze_dark_text_on_dark_background() {
        let doc = Document::from_json(TREE).unwrap();
        let node = doc.resolve_by_id(&NodeId::from("label")).unwrap();
        let result = analyze_text_node(&doc, node, 14.0).unwrap();
        assert!(result.ratio < 2.0);
        assert_eq!(result.grade(), Grade::Fail);
        assert_eq!(result.foreground.to_hex(), "#333333");

        let hints = suggestions(&result, result.large_text);
        assert_eq!(hints.len(), 3);
        assert!(hints[0].starts_with("Current contrast ratio is"));
        assert_eq!(hints[1], "Consider using significantly different colors");
    }

    #[test]
    fn analyze_large_black_text_on_default_white() {
        let doc = Document::from_json(TREE).unwrap();
        let node = doc.resolve_by_id(&NodeId::from("loose")).unwrap();
        let result = analyze_text_node(&doc, node, 14.0).unwrap();
        assert!(approx(result.ratio, 21.0));
        assert!(result.large_text);
        assert_eq!(result.grade(), Grade::Aaa);
        assert!(suggestions(&result, true).is_empty());
    }

    #[test]
    fn analyze_without_solid_fill_is_none() {
        let doc = Document::default();
        let mut node = Node::new("t", "Text", NodeKind::Text);
        node.font_size = Some(FontSize::Mixed);
        node.fills = Fills::Mixed;
        assert!(analyze_text_node(&doc, &node, 14.0).is_none());
    }

    #[test]
    fn mid_range_suggestions_offer_both_directions() {
        let result = ContrastResult {
            ratio: 3.5,
            passes: classify(3.5),
            foreground: Rgb::new(119, 119, 119),
            background: Rgb::WHITE,
            large_text: false,
        };
        let hints = suggestions(&result, false);
        assert_eq!(
            hints,
            vec![
                "Current contrast ratio is 3.5:1, needs to be at least 4.5:1".to_string(),
                "Try darkening the text color or lightening the background".to_string(),
                "Alternatively, lighten the text color or darken the background".to_string(),
                "Consider making text larger (18pt+) to lower contrast requirements".to_string(),
            ]
        );
        assert!(suggestions(&result, true).is_empty());
    }

    #[test]
    fn quick_check_rejects_bad_hex() {
        assert!(approx(quick_contrast_check("#000000", "#FFFFFF").unwrap(), 21.0));
        assert!(matches!(
            quick_contrast_check("black", "#ffffff"),
            Err(ContrastError::InvalidHex(_))
        ));
    }
}

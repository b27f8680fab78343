use crate::layers::marker::MarkerIcon;
use egui::{Color32, FontId, Stroke};

/// Look of the map canvas and the panels around it
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Canvas color behind the markers
    pub background_color: Color32,
    /// Faint coordinate grid
    pub grid_stroke: Stroke,
    pub markers: MarkerStyle,
    pub attribution: AttributionStyle,
    /// Links and toggles ("show more", websites)
    pub accent_color: Color32,
    pub notice_background: Color32,
    pub error_background: Color32,
    pub error_text: Color32,
}

/// Style for map markers
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    /// Outline around each pin
    pub border_width: f32,
    /// Ring drawn around the selected marker
    pub pulse_color: Color32,
    /// Period of one pulse, in seconds
    pub pulse_period: f32,
    /// Largest pulse ring radius in points
    pub pulse_radius: f32,
}

/// Style for attribution text
#[derive(Debug, Clone)]
pub struct AttributionStyle {
    pub text_color: Color32,
    pub background_color: Color32,
    pub font_id: FontId,
    pub padding: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(232, 236, 230),
            grid_stroke: Stroke::new(1.0, Color32::from_rgba_unmultiplied(0, 0, 0, 18)),
            markers: MarkerStyle::default(),
            attribution: AttributionStyle::default(),
            accent_color: Color32::from_rgb(13, 148, 136),
            notice_background: Color32::from_rgba_unmultiplied(255, 255, 255, 230),
            error_background: Color32::from_rgb(254, 226, 226),
            error_text: Color32::from_rgb(239, 68, 68),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            border_width: 1.5,
            pulse_color: Color32::from_rgb(255, 87, 34),
            pulse_period: 1.5,
            pulse_radius: 24.0,
        }
    }
}

impl Default for AttributionStyle {
    fn default() -> Self {
        Self {
            text_color: Color32::from_gray(60),
            background_color: Color32::from_rgba_unmultiplied(255, 255, 255, 200),
            font_id: FontId::proportional(10.0),
            padding: 4.0,
        }
    }
}

impl MarkerStyle {
    pub fn fill(&self, icon: MarkerIcon) -> Color32 {
        let [r, g, b] = icon.rgb();
        Color32::from_rgb(r, g, b)
    }
}

/// Parses `#rgb` or `#rrggbb` category colors
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let hex = value.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 => Some(Color32::from_rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

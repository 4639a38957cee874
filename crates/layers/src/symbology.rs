/// 8-bit RGBA colour as arc and marker attributes take it.
pub type Rgba8 = [u8; 4];

pub fn rgba8_to_unit(c: Rgba8) -> [f32; 4] {
    [
        f32::from(c[0]) / 255.0,
        f32::from(c[1]) / 255.0,
        f32::from(c[2]) / 255.0,
        f32::from(c[3]) / 255.0,
    ]
}

/// Arc and airplane colours, with and without selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FlightPalette {
    pub arc_selected: Rgba8,
    pub arc_unselected: Rgba8,
    pub airplane_selected: Rgba8,
    pub airplane_unselected: Rgba8,
}

impl FlightPalette {
    pub const BLUE: Rgba8 = [59, 130, 246, 255];
    pub const WHITE: Rgba8 = [255, 255, 255, 255];
    pub const LIGHT_GRAY: Rgba8 = [200, 200, 200, 255];

    pub fn arc(&self, selected: bool) -> Rgba8 {
        if selected {
            self.arc_selected
        } else {
            self.arc_unselected
        }
    }

    pub fn airplane(&self, selected: bool) -> Rgba8 {
        if selected {
            self.airplane_selected
        } else {
            self.airplane_unselected
        }
    }
}

impl Default for FlightPalette {
    fn default() -> Self {
        Self {
            arc_selected: Self::BLUE,
            arc_unselected: Self::WHITE,
            airplane_selected: Self::LIGHT_GRAY,
            airplane_unselected: Self::BLUE,
        }
    }
}

/// Shared visibility/colour settings for the simple layers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerStyle {
    pub visible: bool,
    pub color: Rgba8,
    pub width: f64,
}

impl LayerStyle {
    pub const fn new(visible: bool, color: Rgba8, width: f64) -> Self {
        Self {
            visible,
            color,
            width,
        }
    }
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self::new(true, FlightPalette::WHITE, 1.0)
    }
}

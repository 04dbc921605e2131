use serde::Serialize;

/// An opaque 8-bit RGB color.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Components scaled to the `0.0..=1.0` range used by PDF color operators.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_fifty_one_is_twenty_percent() {
        let [r, g, b] = Color::gray(51).to_unit();
        assert!((r - 0.2).abs() < 1e-6);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn black_is_default() {
        assert_eq!(Color::default(), Color::BLACK);
        assert_eq!(Color::BLACK.to_unit(), [0.0, 0.0, 0.0]);
    }
}

//! Texture references and the level-wide colour palette.

use serde::{Deserialize, Serialize};

/// RGBA tint applied on top of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const WHITE: Colour = Colour::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Normalised colour for vertex data.
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 4]> for Colour {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Colour> for [u8; 4] {
    fn from(c: Colour) -> Self {
        c.to_array()
    }
}

/// A texture slot: index into the texture array plus a tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureProp {
    pub id: u32,
    pub colour: Colour,
}

impl TextureProp {
    pub fn new(id: u32, colour: Colour) -> Self {
        Self { id, colour }
    }
}

impl std::fmt::Display for TextureProp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = self.colour;
        write!(
            f,
            "{}/#{:02x}{:02x}{:02x}{:02x}",
            self.id, c.r, c.g, c.b, c.a
        )
    }
}

/// Deduplicated colour palette written into the level metadata.
///
/// Textures persist as `[texture_id, colour_index]` into this table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColourTable {
    colours: Vec<Colour>,
}

impl ColourTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_colours(colours: Vec<Colour>) -> Self {
        Self { colours }
    }

    /// Index of `colour`, inserting it if it is not in the table yet.
    pub fn index_of(&mut self, colour: Colour) -> usize {
        match self.colours.iter().position(|c| *c == colour) {
            Some(index) => index,
            None => {
                self.colours.push(colour);
                self.colours.len() - 1
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<Colour> {
        self.colours.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_table_deduplicates() {
        let mut table = ColourTable::new();
        let red = Colour::new(255, 0, 0, 255);
        assert_eq!(table.index_of(Colour::WHITE), 0);
        assert_eq!(table.index_of(red), 1);
        assert_eq!(table.index_of(Colour::WHITE), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1), Some(red));
        assert_eq!(table.get(2), None);
    }

    #[test]
    fn texture_display() {
        let tex = TextureProp::new(3, Colour::new(255, 0, 128, 255));
        assert_eq!(tex.to_string(), "3/#ff0080ff");
    }

    #[test]
    fn colour_normalises() {
        assert_eq!(Colour::WHITE.to_f32(), [1.0; 4]);
        assert_eq!(Colour::new(0, 0, 0, 0).to_f32(), [0.0; 4]);
    }
}

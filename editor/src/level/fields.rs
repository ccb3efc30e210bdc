//! Flat JSON field arrays used by the per-kind persisted layouts.
//!
//! Each object persists its params and props as plain arrays in a fixed
//! order. [`FieldWriter`] builds such an array; [`FieldReader`] consumes one,
//! checking arity up front and converting planar lengths between tile units
//! (on disk) and drawing units (in memory).

use classicyou_core::math::Vec2;
use serde_json::Value;

use super::TILE_SIZE;
use super::object::ObjectParseError;
use super::texture::{ColourTable, TextureProp};

pub struct FieldWriter<'a> {
    values: Vec<Value>,
    colours: &'a mut ColourTable,
}

impl<'a> FieldWriter<'a> {
    pub fn new(colours: &'a mut ColourTable) -> Self {
        Self {
            values: Vec::new(),
            colours,
        }
    }

    /// Planar length in drawing units, stored in tile units.
    pub fn length(&mut self, value: f32) -> &mut Self {
        self.values.push(Value::from(value / TILE_SIZE));
        self
    }

    pub fn point(&mut self, point: Vec2) -> &mut Self {
        self.length(point.x).length(point.y)
    }

    /// Unscaled number (heights).
    pub fn number(&mut self, value: f32) -> &mut Self {
        self.values.push(Value::from(value));
        self
    }

    pub fn integer(&mut self, value: u32) -> &mut Self {
        self.values.push(Value::from(value));
        self
    }

    pub fn flag(&mut self, value: bool) -> &mut Self {
        self.values.push(Value::Bool(value));
        self
    }

    pub fn texture(&mut self, texture: TextureProp) -> &mut Self {
        let index = self.colours.index_of(texture.colour);
        self.values
            .push(Value::Array(vec![Value::from(texture.id), Value::from(index)]));
        self
    }

    pub fn finish(&mut self) -> Value {
        Value::Array(std::mem::take(&mut self.values))
    }
}

pub struct FieldReader<'a> {
    kind: &'static str,
    values: &'a [Value],
    next: usize,
    colours: &'a ColourTable,
}

impl<'a> FieldReader<'a> {
    /// Fails with [`ObjectParseError::WrongArity`] unless `value` is an
    /// array of exactly `expected` entries.
    pub fn new(
        kind: &'static str,
        group: &'static str,
        value: &'a Value,
        expected: usize,
        colours: &'a ColourTable,
    ) -> Result<Self, ObjectParseError> {
        let values = value.as_array().ok_or(ObjectParseError::WrongArity {
            kind,
            group,
            expected,
            found: 0,
        })?;
        if values.len() != expected {
            return Err(ObjectParseError::WrongArity {
                kind,
                group,
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            kind,
            values,
            next: 0,
            colours,
        })
    }

    fn take(&mut self) -> &'a Value {
        let values = self.values;
        let value = &values[self.next];
        self.next += 1;
        value
    }

    fn invalid(&self, field: &'static str) -> ObjectParseError {
        ObjectParseError::InvalidValue {
            kind: self.kind,
            field,
        }
    }

    pub fn number(&mut self, field: &'static str) -> Result<f32, ObjectParseError> {
        let value = self.take();
        value
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| self.invalid(field))
    }

    pub fn length(&mut self, field: &'static str) -> Result<f32, ObjectParseError> {
        Ok(self.number(field)? * TILE_SIZE)
    }

    pub fn point(&mut self, field: &'static str) -> Result<Vec2, ObjectParseError> {
        Ok(Vec2::new(self.length(field)?, self.length(field)?))
    }

    pub fn integer(&mut self, field: &'static str) -> Result<u32, ObjectParseError> {
        let value = self.take();
        value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| self.invalid(field))
    }

    pub fn flag(&mut self, field: &'static str) -> Result<bool, ObjectParseError> {
        let value = self.take();
        value.as_bool().ok_or_else(|| self.invalid(field))
    }

    pub fn texture(&mut self, field: &'static str) -> Result<TextureProp, ObjectParseError> {
        let value = self.take();
        let pair = match value.as_array() {
            Some(pair) if pair.len() == 2 => pair,
            _ => return Err(self.invalid(field)),
        };
        let id = pair[0]
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| self.invalid(field))?;
        let colour = pair[1]
            .as_u64()
            .and_then(|i| self.colours.get(i as usize))
            .ok_or_else(|| self.invalid(field))?;
        Ok(TextureProp::new(id, colour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::texture::Colour;
    use serde_json::json;

    #[test]
    fn writer_scales_lengths_and_indexes_colours() {
        let mut colours = ColourTable::new();
        let red = Colour::new(255, 0, 0, 255);
        let value = FieldWriter::new(&mut colours)
            .length(64.0)
            .number(1.5)
            .texture(TextureProp::new(4, red))
            .flag(true)
            .finish();
        assert_eq!(value, json!([2.0, 1.5, [4, 0], true]));
        assert_eq!(colours.get(0), Some(red));
    }

    #[test]
    fn reader_checks_arity() {
        let colours = ColourTable::new();
        let value = json!([1.0, 2.0]);
        let err = FieldReader::new("walls", "params", &value, 4, &colours)
            .err()
            .unwrap();
        assert_eq!(
            err,
            ObjectParseError::WrongArity {
                kind: "walls",
                group: "params",
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn reader_rejects_unknown_colour_index() {
        let colours = ColourTable::new();
        let value = json!([[1, 3]]);
        let mut reader = FieldReader::new("pillars", "props", &value, 1, &colours).unwrap();
        assert!(matches!(
            reader.texture("texture"),
            Err(ObjectParseError::InvalidValue { field: "texture", .. })
        ));
    }

    #[test]
    fn reader_scales_lengths_back() {
        let colours = ColourTable::from_colours(vec![Colour::WHITE]);
        let value = json!([0.5, 3, false, [2, 0]]);
        let mut reader = FieldReader::new("platforms", "props", &value, 4, &colours).unwrap();
        assert_eq!(reader.length("width").unwrap(), 16.0);
        assert_eq!(reader.integer("style").unwrap(), 3);
        assert!(!reader.flag("visible").unwrap());
        assert_eq!(
            reader.texture("texture").unwrap(),
            TextureProp::new(2, Colour::WHITE)
        );
    }
}

// Binary NBT to JSON
// Player blobs are big-endian NBT, usually gzip-compressed

use std::io::Read;

use anyhow::{anyhow, bail, Result};
use flate2::read::GzDecoder;
use serde_json::{Map, Number, Value};

use backend_domain::NbtDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
/// Deepest container level accepted, counting the root as 0. Decoded values are cached as
/// JSON text and parsed back with serde_json, which stops at 128 nested levels.
const MAX_DEPTH: usize = 126;

const TAG_END: u8 = 0;
const TAG_BYTE: u8 = 1;
const TAG_SHORT: u8 = 2;
const TAG_INT: u8 = 3;
const TAG_LONG: u8 = 4;
const TAG_FLOAT: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_BYTE_ARRAY: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_LIST: u8 = 9;
const TAG_COMPOUND: u8 = 10;
const TAG_INT_ARRAY: u8 = 11;
const TAG_LONG_ARRAY: u8 = 12;

#[derive(Debug, Default, Clone, Copy)]
pub struct GzipNbtDecoder;

impl NbtDecoder for GzipNbtDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Value> {
        if bytes.starts_with(&GZIP_MAGIC) {
            let mut inflated = Vec::new();
            GzDecoder::new(bytes).read_to_end(&mut inflated)?;
            decode_uncompressed(&inflated)
        } else {
            decode_uncompressed(bytes)
        }
    }
}

/// Decodes a named root tag; the root name is dropped.
pub fn decode_uncompressed(bytes: &[u8]) -> Result<Value> {
    let mut reader = NbtReader { bytes, position: 0 };
    let tag = reader.u8()?;
    if tag == TAG_END {
        return Ok(Value::Object(Map::new()));
    }
    reader.string()?;
    reader.payload(tag, 0)
}

struct NbtReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> NbtReader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| anyhow!("unexpected end of nbt data at offset {}", self.position))?;
        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    fn i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.array()?))
    }

    fn i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.array()?))
    }

    fn i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.array()?))
    }

    fn length(&mut self) -> Result<usize> {
        let len = self.i32()?;
        usize::try_from(len).map_err(|_| anyhow!("negative nbt length {}", len))
    }

    fn string(&mut self) -> Result<String> {
        let len = u16::from_be_bytes(self.array()?) as usize;
        Ok(String::from_utf8_lossy(self.take(len)?).into_owned())
    }

    fn payload(&mut self, tag: u8, depth: usize) -> Result<Value> {
        if depth > MAX_DEPTH {
            bail!("nbt nesting deeper than {}", MAX_DEPTH);
        }
        let value = match tag {
            TAG_BYTE => Value::from(self.u8()? as i8),
            TAG_SHORT => Value::from(self.i16()?),
            TAG_INT => Value::from(self.i32()?),
            TAG_LONG => Value::from(self.i64()?),
            TAG_FLOAT => float(f32::from_be_bytes(self.array()?) as f64),
            TAG_DOUBLE => float(f64::from_be_bytes(self.array()?)),
            TAG_BYTE_ARRAY => {
                let len = self.length()?;
                Value::Array(
                    self.take(len)?
                        .iter()
                        .map(|byte| Value::from(*byte as i8))
                        .collect(),
                )
            }
            TAG_STRING => Value::String(self.string()?),
            TAG_LIST => {
                let element = self.u8()?;
                let len = self.length()?;
                if element == TAG_END && len > 0 {
                    bail!("list of end tags with length {}", len);
                }
                let mut items = Vec::with_capacity(len.min(4096));
                for _ in 0..len {
                    items.push(self.payload(element, depth + 1)?);
                }
                Value::Array(items)
            }
            TAG_COMPOUND => {
                let mut map = Map::new();
                loop {
                    let child = self.u8()?;
                    if child == TAG_END {
                        break;
                    }
                    let name = self.string()?;
                    let value = self.payload(child, depth + 1)?;
                    map.insert(name, value);
                }
                Value::Object(map)
            }
            TAG_INT_ARRAY => {
                let len = self.length()?;
                let mut items = Vec::with_capacity(len.min(4096));
                for _ in 0..len {
                    items.push(Value::from(self.i32()?));
                }
                Value::Array(items)
            }
            TAG_LONG_ARRAY => {
                let len = self.length()?;
                let mut items = Vec::with_capacity(len.min(4096));
                for _ in 0..len {
                    items.push(Value::from(self.i64()?));
                }
                Value::Array(items)
            }
            other => bail!("unknown nbt tag {} at offset {}", other, self.position),
        };
        Ok(value)
    }
}

fn float(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

//! Canonical binary encoding for array payloads.
//!
//! Every array crosses the wire in one fixed little-endian layout per
//! element kind, so re-encoding an unchanged array always yields identical
//! bytes and the store can detect idempotent re-uploads. The element set is
//! closed: float32 scalars and points, int32 scalars and index pairs.
//! Codecs are selected by the element type at the call site, never by
//! inspecting values at runtime.

use byteorder::{ByteOrder, LittleEndian};
use glam::{IVec2, Vec3};

use crate::util::{DataType, Error, PodType, Result};

/// Per-file upload limit in bytes. Arrays that encode past this fail
/// validation before any network I/O is attempted.
pub const FILE_SIZE_LIMIT: usize = 5_000_000;

/// Types with a canonical little-endian wire encoding.
pub trait WireElement: Copy {
    /// Dtype of one element as stored on the wire.
    const DTYPE: DataType;

    /// Append the canonical encoding of `self` to `out`.
    fn write_le(self, out: &mut Vec<u8>);

    /// Read one element from exactly `DTYPE.num_bytes()` bytes.
    fn read_le(bytes: &[u8]) -> Self;
}

impl WireElement for f32 {
    const DTYPE: DataType = DataType::FLOAT32;

    fn write_le(self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        LittleEndian::write_f32(&mut buf, self);
        out.extend_from_slice(&buf);
    }

    fn read_le(bytes: &[u8]) -> Self {
        LittleEndian::read_f32(bytes)
    }
}

impl WireElement for i32 {
    const DTYPE: DataType = DataType::INT32;

    fn write_le(self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        LittleEndian::write_i32(&mut buf, self);
        out.extend_from_slice(&buf);
    }

    fn read_le(bytes: &[u8]) -> Self {
        LittleEndian::read_i32(bytes)
    }
}

impl WireElement for Vec3 {
    const DTYPE: DataType = DataType::VEC3F;

    fn write_le(self, out: &mut Vec<u8>) {
        for c in self.to_array() {
            c.write_le(out);
        }
    }

    fn read_le(bytes: &[u8]) -> Self {
        Vec3::new(
            LittleEndian::read_f32(&bytes[0..4]),
            LittleEndian::read_f32(&bytes[4..8]),
            LittleEndian::read_f32(&bytes[8..12]),
        )
    }
}

impl WireElement for IVec2 {
    const DTYPE: DataType = DataType::VEC2I;

    fn write_le(self, out: &mut Vec<u8>) {
        self.x.write_le(out);
        self.y.write_le(out);
    }

    fn read_le(bytes: &[u8]) -> Self {
        IVec2::new(
            LittleEndian::read_i32(&bytes[0..4]),
            LittleEndian::read_i32(&bytes[4..8]),
        )
    }
}

/// Byte length [`encode`] would produce, without materializing anything.
#[inline]
pub fn byte_size<T: WireElement>(len: usize) -> usize {
    len * T::DTYPE.num_bytes()
}

/// Encode an array into its canonical byte form.
pub fn encode<T: WireElement>(items: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(byte_size::<T>(items.len()));
    for &item in items {
        item.write_le(&mut out);
    }
    out
}

/// Decode canonical bytes back into an array.
///
/// Fails when the byte length is not a whole number of elements; a
/// truncated or mis-declared payload never produces a partial array.
pub fn decode<T: WireElement>(bytes: &[u8]) -> Result<Vec<T>> {
    let elem = T::DTYPE.num_bytes();
    if bytes.len() % elem != 0 {
        return Err(Error::Decode {
            dtype: T::DTYPE,
            len: bytes.len(),
        });
    }
    let mut items = Vec::with_capacity(bytes.len() / elem);
    for chunk in bytes.chunks_exact(elem) {
        items.push(T::read_le(chunk));
    }
    Ok(items)
}

/// An encoded array together with its dtype tag, ready for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedArray {
    /// Wire dtype of the encoded elements.
    pub dtype: DataType,
    /// Canonical little-endian bytes.
    pub bytes: Vec<u8>,
}

impl EncodedArray {
    /// Dtype tag sent alongside the file (`"Float32Arr"` / `"Int32Arr"`).
    pub fn tag(&self) -> &'static str {
        self.dtype.pod.array_tag()
    }

    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode an array and pair it with its dtype.
pub fn encode_array<T: WireElement>(items: &[T]) -> EncodedArray {
    EncodedArray {
        dtype: T::DTYPE,
        bytes: encode(items),
    }
}

/// Fail fast when an encoded array would exceed `limit` bytes.
pub fn check_file_size(array: &'static str, nbytes: usize, limit: usize) -> Result<()> {
    if nbytes > limit {
        return Err(Error::PayloadTooLarge {
            array,
            nbytes,
            limit,
        });
    }
    Ok(())
}

/// Check a dtype tag from a resource document against the expected kind.
pub fn check_kind(field: &'static str, expected: PodType, tag: &str) -> Result<()> {
    if PodType::from_tag(tag) != Some(expected) {
        return Err(Error::KindMismatch {
            field,
            expected: expected.array_tag(),
            actual: tag.to_string(),
        });
    }
    Ok(())
}

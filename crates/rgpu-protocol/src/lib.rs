//! Wire format for remoted GPU binding resources.
//!
//! The content process and the GPU process exchange bind-group entries as
//! flat, self-describing records: a stable resource-type tag plus one or more
//! opaque identifiers. Resource contents never appear on the wire — only
//! identifiers minted by the owning side's registry do.
//!
//! This is a deliberately small, stable format intended to be:
//! - dependency-free (both sides of the boundary implement it easily)
//! - endian-stable (little-endian)
//!
//! Records are framed by the transport; this crate defines the payload only.

use core::fmt;

/// Opaque, process-wide-unique reference token for a remoted resource.
///
/// Carries no type information of its own; interpretation depends on the
/// accompanying [`BindingResourceType`] tag and the registry it is looked up
/// in. Zero is reserved invalid and rejected by the decoder, so a missing
/// identifier can never masquerade as a valid one.
pub type RawIdentifier = u64;

/// Tag identifying which resource kind a backing entry carries.
///
/// Discriminants are wire-stable: they must never be renumbered across
/// versions sharing the same transport, and a retired value must never be
/// reused. Adding a resource kind means adding a new value.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingResourceType {
    Sampler = 0,
    TextureView = 1,
    BufferBinding = 2,
    ExternalTexture = 3,
}

impl BindingResourceType {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::Sampler),
            1 => Some(Self::TextureView),
            2 => Some(Self::BufferBinding),
            3 => Some(Self::ExternalTexture),
            _ => None,
        }
    }
}

/// Wire form of a buffer binding: the buffer's identifier plus the bound
/// range. `offset` and `size` are plain numbers and cross the boundary
/// untranslated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackingBufferBinding {
    pub buffer: RawIdentifier,
    pub offset: u64,
    /// `None` binds from `offset` to the end of the buffer.
    pub size: Option<u64>,
}

/// Identifier payload of a backing entry, keyed by resource kind.
///
/// On the wire this is the `resource_type` tag followed by a generic
/// identifier slot (for buffer bindings, that slot carries the buffer's own
/// identifier). In the typed layer the tag is the enum discriminant, so a
/// mismatched tag/payload pair is unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackingResource {
    Sampler(RawIdentifier),
    TextureView(RawIdentifier),
    Buffer(BackingBufferBinding),
    ExternalTexture(RawIdentifier),
}

impl BackingResource {
    pub const fn resource_type(&self) -> BindingResourceType {
        match self {
            BackingResource::Sampler(_) => BindingResourceType::Sampler,
            BackingResource::TextureView(_) => BindingResourceType::TextureView,
            BackingResource::Buffer(_) => BindingResourceType::BufferBinding,
            BackingResource::ExternalTexture(_) => BindingResourceType::ExternalTexture,
        }
    }

    /// The generic identifier slot. For buffer bindings this is the buffer's
    /// identifier, so code that only inspects this slot treats every kind
    /// uniformly.
    pub const fn identifier(&self) -> RawIdentifier {
        match self {
            BackingResource::Sampler(id)
            | BackingResource::TextureView(id)
            | BackingResource::ExternalTexture(id) => *id,
            BackingResource::Buffer(binding) => binding.buffer,
        }
    }
}

/// Wire form of one bind-group entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackingBindGroupEntry {
    /// Shader-visible binding slot index, copied through verbatim.
    pub binding: u32,
    pub resource: BackingResource,
}

/// Wire form of a whole bind group: the containing message an entry travels
/// in. Resolution on the receiving side is all-or-nothing per group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackingBindGroup {
    pub label: Option<String>,
    pub entries: Vec<BackingBindGroupEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    UnexpectedEof,
    /// Unrecognized resource-type tag: corruption or version skew. Decoding
    /// of the whole message aborts; the decoder never guesses.
    UnknownTag(u32),
    /// A zero identifier arrived on the wire.
    InvalidIdentifier,
    InvalidUtf8,
    TrailingBytes,
    OversizedPayload,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnexpectedEof => write!(f, "unexpected EOF"),
            DecodeError::UnknownTag(v) => write!(f, "unknown resource type tag {v}"),
            DecodeError::InvalidIdentifier => write!(f, "zero resource identifier"),
            DecodeError::InvalidUtf8 => write!(f, "invalid UTF-8"),
            DecodeError::TrailingBytes => write!(f, "trailing bytes after record"),
            DecodeError::OversizedPayload => write!(f, "payload too large"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Defensive maximum message size (bytes) for decode.
pub const MAX_MESSAGE_BYTES: usize = 1 << 20; // 1 MiB

/// Defensive maximum entry count per bind group; far above any real device
/// limit for bindings per group.
pub const MAX_BIND_GROUP_ENTRIES: usize = 1024;

pub fn encode_entry(entry: &BackingBindGroupEntry) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entry_into(entry, &mut out);
    out
}

pub fn encode_entry_into(entry: &BackingBindGroupEntry, out: &mut Vec<u8>) {
    push_u32(out, entry.binding);
    push_u32(out, entry.resource.resource_type() as u32);
    push_u64(out, entry.resource.identifier());
    if let BackingResource::Buffer(binding) = &entry.resource {
        push_u64(out, binding.offset);
        match binding.size {
            Some(size) => {
                out.push(1);
                push_u64(out, size);
            }
            None => out.push(0),
        }
    }
}

pub fn encode_bind_group(group: &BackingBindGroup) -> Vec<u8> {
    let mut out = Vec::new();
    encode_bind_group_into(group, &mut out);
    out
}

pub fn encode_bind_group_into(group: &BackingBindGroup, out: &mut Vec<u8>) {
    match &group.label {
        Some(label) => {
            out.push(1);
            let bytes = label.as_bytes();
            push_u32(out, bytes.len() as u32);
            out.extend_from_slice(bytes);
        }
        None => out.push(0),
    }
    push_u32(out, group.entries.len() as u32);
    for entry in &group.entries {
        encode_entry_into(entry, out);
    }
}

pub fn decode_entry(bytes: &[u8]) -> Result<BackingBindGroupEntry, DecodeError> {
    if bytes.len() > MAX_MESSAGE_BYTES {
        return Err(DecodeError::OversizedPayload);
    }
    let mut r = Reader::new(bytes);
    let entry = decode_entry_from(&mut r)?;
    if r.remaining() != 0 {
        return Err(DecodeError::TrailingBytes);
    }
    Ok(entry)
}

pub fn decode_bind_group(bytes: &[u8]) -> Result<BackingBindGroup, DecodeError> {
    if bytes.len() > MAX_MESSAGE_BYTES {
        return Err(DecodeError::OversizedPayload);
    }
    let mut r = Reader::new(bytes);
    let label = match r.read_u8()? {
        0 => None,
        _ => {
            let len = r.read_u32()? as usize;
            let bytes = r.read_bytes(len)?;
            let label = core::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
            Some(label.to_string())
        }
    };
    let count = r.read_u32()? as usize;
    if count > MAX_BIND_GROUP_ENTRIES {
        return Err(DecodeError::OversizedPayload);
    }
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        entries.push(decode_entry_from(&mut r)?);
    }
    if r.remaining() != 0 {
        return Err(DecodeError::TrailingBytes);
    }
    Ok(BackingBindGroup { label, entries })
}

fn decode_entry_from(r: &mut Reader<'_>) -> Result<BackingBindGroupEntry, DecodeError> {
    let binding = r.read_u32()?;
    let tag = r.read_u32()?;
    let resource_type = BindingResourceType::from_u32(tag).ok_or(DecodeError::UnknownTag(tag))?;
    let identifier = r.read_u64()?;
    if identifier == 0 {
        return Err(DecodeError::InvalidIdentifier);
    }
    let resource = match resource_type {
        BindingResourceType::Sampler => BackingResource::Sampler(identifier),
        BindingResourceType::TextureView => BackingResource::TextureView(identifier),
        BindingResourceType::ExternalTexture => BackingResource::ExternalTexture(identifier),
        BindingResourceType::BufferBinding => {
            let offset = r.read_u64()?;
            let size = match r.read_u8()? {
                0 => None,
                _ => Some(r.read_u64()?),
            };
            BackingResource::Buffer(BackingBufferBinding {
                buffer: identifier,
                offset,
                size,
            })
        }
    };
    Ok(BackingBindGroupEntry { binding, resource })
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_u64(out: &mut Vec<u8>, v: u64) {
    out.extend_from_slice(&v.to_le_bytes());
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let b = *self.bytes.get(self.pos).ok_or(DecodeError::UnexpectedEof)?;
        self.pos += 1;
        Ok(b)
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::UnexpectedEof);
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.bytes[start..start + len])
    }
}

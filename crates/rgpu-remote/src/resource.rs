//! Content-side resource handles and bind-group entries.
//!
//! These are the type-safe objects a process holds while issuing GPU calls.
//! The hardware-backed objects live behind the process boundary; a handle is
//! a cheap-to-clone reference carrying the process-local identity used to
//! marshal it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

fn next_object_id() -> u64 {
    NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Process-local identity of a resource object.
///
/// Distinct from the wire identifier: object ids are never sent anywhere,
/// they only key idempotent registration (re-registering the same object
/// yields the same wire identifier).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) u64);

#[derive(Debug)]
struct SamplerInner {
    id: u64,
    label: Option<String>,
}

/// Handle to a sampler object.
#[derive(Clone, Debug)]
pub struct Sampler {
    inner: Arc<SamplerInner>,
}

impl Sampler {
    pub fn new(label: Option<&str>) -> Self {
        Self {
            inner: Arc::new(SamplerInner {
                id: next_object_id(),
                label: label.map(str::to_owned),
            }),
        }
    }

    pub fn object_id(&self) -> ObjectId {
        ObjectId(self.inner.id)
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    /// Two handles reference the same object when they share identity, not
    /// when their labels match.
    pub fn same_object(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

#[derive(Debug)]
struct TextureViewInner {
    id: u64,
    label: Option<String>,
}

/// Handle to a texture-view object.
#[derive(Clone, Debug)]
pub struct TextureView {
    inner: Arc<TextureViewInner>,
}

impl TextureView {
    pub fn new(label: Option<&str>) -> Self {
        Self {
            inner: Arc::new(TextureViewInner {
                id: next_object_id(),
                label: label.map(str::to_owned),
            }),
        }
    }

    pub fn object_id(&self) -> ObjectId {
        ObjectId(self.inner.id)
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn same_object(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

#[derive(Debug)]
struct BufferInner {
    id: u64,
    label: Option<String>,
    destroyed: AtomicBool,
}

/// Handle to a buffer object.
///
/// Buffers can be destroyed while handles to them remain; a destroyed buffer
/// can no longer be marshalled across the boundary.
#[derive(Clone, Debug)]
pub struct Buffer {
    inner: Arc<BufferInner>,
}

impl Buffer {
    pub fn new(label: Option<&str>) -> Self {
        Self {
            inner: Arc::new(BufferInner {
                id: next_object_id(),
                label: label.map(str::to_owned),
                destroyed: AtomicBool::new(false),
            }),
        }
    }

    pub fn object_id(&self) -> ObjectId {
        ObjectId(self.inner.id)
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn same_object(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }

    /// Releases the underlying object. Irreversible; every clone of this
    /// handle observes the destruction.
    pub fn destroy(&self) {
        self.inner.destroyed.store(true, Ordering::Release);
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
struct ExternalTextureInner {
    id: u64,
    label: Option<String>,
}

/// Handle to an external-texture object (e.g. imported video frames).
#[derive(Clone, Debug)]
pub struct ExternalTexture {
    inner: Arc<ExternalTextureInner>,
}

impl ExternalTexture {
    pub fn new(label: Option<&str>) -> Self {
        Self {
            inner: Arc::new(ExternalTextureInner {
                id: next_object_id(),
                label: label.map(str::to_owned),
            }),
        }
    }

    pub fn object_id(&self) -> ObjectId {
        ObjectId(self.inner.id)
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn same_object(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

/// One buffer slice bound into a shader slot.
#[derive(Clone, Debug)]
pub struct BufferBinding {
    pub buffer: Buffer,
    pub offset: u64,
    /// `None` binds from `offset` to the end of the buffer.
    pub size: Option<u64>,
}

/// Exactly one resource kind per binding slot.
///
/// The enum is closed: adding a kind forces both the outbound converter and
/// the inbound resolver to handle it at compile time.
#[derive(Clone, Debug)]
pub enum BindingResource {
    Sampler(Sampler),
    TextureView(TextureView),
    Buffer(BufferBinding),
    ExternalTexture(ExternalTexture),
}

/// One binding slot of a bind group.
#[derive(Clone, Debug)]
pub struct BindGroupEntry {
    /// Shader-visible binding slot index; unique within a bind group.
    pub binding: u32,
    pub resource: BindingResource,
}

/// A whole bind group as described by the caller.
#[derive(Clone, Debug, Default)]
pub struct BindGroupDescriptor {
    pub label: Option<String>,
    pub entries: Vec<BindGroupEntry>,
}

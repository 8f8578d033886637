//! Identifier registry: the handle table mapping wire identifiers to live
//! local objects.
//!
//! Each side of the boundary owns one registry. The side holding the real
//! objects mints identifiers through `register_*`; the peer installs proxy
//! objects under those identifiers (`insert_*`, driven by resource-creation
//! messages) and resolves inbound records through `lookup_*`. Lookups are
//! pure: they allocate nothing and never mint.

use std::collections::HashMap;

use rgpu_protocol::RawIdentifier;

use crate::resource::{Buffer, ExternalTexture, ObjectId, Sampler, TextureView};

/// Opaque wire identifier of a registered resource.
///
/// A weak, revocable reference: it never owns the object, and once the object
/// is revoked the identifier is permanently dead. Identifiers are minted from
/// 1 and never reused; 0 never appears (the protocol decoder rejects it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceIdentifier(RawIdentifier);

impl ResourceIdentifier {
    /// Wraps an identifier received from the peer.
    pub fn from_raw(raw: RawIdentifier) -> Self {
        Self(raw)
    }

    pub fn to_raw(self) -> RawIdentifier {
        self.0
    }
}

impl std::fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct HandleTable<T> {
    by_identifier: HashMap<ResourceIdentifier, T>,
    by_object: HashMap<ObjectId, ResourceIdentifier>,
}

impl<T: Clone> HandleTable<T> {
    fn new() -> Self {
        Self {
            by_identifier: HashMap::new(),
            by_object: HashMap::new(),
        }
    }

    fn register(
        &mut self,
        object: ObjectId,
        value: T,
        next_identifier: &mut RawIdentifier,
    ) -> ResourceIdentifier {
        if let Some(id) = self.by_object.get(&object) {
            return *id;
        }
        let id = ResourceIdentifier(*next_identifier);
        *next_identifier += 1;
        self.by_object.insert(object, id);
        self.by_identifier.insert(id, value);
        id
    }

    fn insert(&mut self, id: ResourceIdentifier, object: ObjectId, value: T) {
        self.by_object.insert(object, id);
        self.by_identifier.insert(id, value);
    }

    fn lookup(&self, id: ResourceIdentifier) -> Option<T> {
        self.by_identifier.get(&id).cloned()
    }

    fn revoke(&mut self, id: ResourceIdentifier) -> bool {
        if self.by_identifier.remove(&id).is_none() {
            return false;
        }
        self.by_object.retain(|_, v| *v != id);
        true
    }
}

/// Typed handle tables for the four binding-resource kinds, sharing one
/// monotonic counter so identifiers are unique across kinds.
pub struct BindingRegistry {
    next_identifier: RawIdentifier,
    samplers: HandleTable<Sampler>,
    texture_views: HandleTable<TextureView>,
    buffers: HandleTable<Buffer>,
    external_textures: HandleTable<ExternalTexture>,
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self {
            next_identifier: 1,
            samplers: HandleTable::new(),
            texture_views: HandleTable::new(),
            buffers: HandleTable::new(),
            external_textures: HandleTable::new(),
        }
    }

    /// Mints an identifier for the sampler, or returns the one it already
    /// has. Owner-side only.
    pub fn register_sampler(&mut self, sampler: &Sampler) -> ResourceIdentifier {
        self.samplers
            .register(sampler.object_id(), sampler.clone(), &mut self.next_identifier)
    }

    pub fn register_texture_view(&mut self, view: &TextureView) -> ResourceIdentifier {
        self.texture_views
            .register(view.object_id(), view.clone(), &mut self.next_identifier)
    }

    /// Like `register_sampler`, but fails for a destroyed buffer: a dead
    /// object must never be assigned a fresh identifier.
    pub fn register_buffer(&mut self, buffer: &Buffer) -> Option<ResourceIdentifier> {
        if buffer.is_destroyed() {
            return None;
        }
        Some(
            self.buffers
                .register(buffer.object_id(), buffer.clone(), &mut self.next_identifier),
        )
    }

    pub fn register_external_texture(&mut self, texture: &ExternalTexture) -> ResourceIdentifier {
        self.external_textures.register(
            texture.object_id(),
            texture.clone(),
            &mut self.next_identifier,
        )
    }

    /// Installs a proxy under a peer-minted identifier. Receiver-side only;
    /// called by resource-creation message handlers.
    pub fn insert_sampler(&mut self, id: ResourceIdentifier, sampler: Sampler) {
        self.samplers.insert(id, sampler.object_id(), sampler);
    }

    pub fn insert_texture_view(&mut self, id: ResourceIdentifier, view: TextureView) {
        self.texture_views.insert(id, view.object_id(), view);
    }

    pub fn insert_buffer(&mut self, id: ResourceIdentifier, buffer: Buffer) {
        self.buffers.insert(id, buffer.object_id(), buffer);
    }

    pub fn insert_external_texture(&mut self, id: ResourceIdentifier, texture: ExternalTexture) {
        self.external_textures.insert(id, texture.object_id(), texture);
    }

    pub fn lookup_sampler(&self, id: ResourceIdentifier) -> Option<Sampler> {
        self.samplers.lookup(id)
    }

    pub fn lookup_texture_view(&self, id: ResourceIdentifier) -> Option<TextureView> {
        self.texture_views.lookup(id)
    }

    pub fn lookup_buffer(&self, id: ResourceIdentifier) -> Option<Buffer> {
        self.buffers.lookup(id)
    }

    pub fn lookup_external_texture(&self, id: ResourceIdentifier) -> Option<ExternalTexture> {
        self.external_textures.lookup(id)
    }

    /// Drops the object behind `id`, whichever table holds it. The
    /// identifier is dead afterwards: it is never reminted, and lookups fail
    /// permanently. Returns whether anything was revoked.
    pub fn revoke(&mut self, id: ResourceIdentifier) -> bool {
        self.samplers.revoke(id)
            || self.texture_views.revoke(id)
            || self.buffers.revoke(id)
            || self.external_textures.revoke(id)
    }
}

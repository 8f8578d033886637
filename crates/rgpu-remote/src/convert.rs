//! Bidirectional conversion between local bind-group entries and their wire
//! backing records.
//!
//! The outbound converter runs on the side owning the live objects and mints
//! identifiers as a side effect. The inbound resolver runs on the side that
//! only has identifiers; every lookup is treated as potentially stale and
//! fails closed — a bind group with any unresolvable entry is rejected whole,
//! never handed to the execution path partially resolved.

use rgpu_protocol::{
    BackingBindGroup, BackingBindGroupEntry, BackingBufferBinding, BackingResource,
};

use crate::error::{ConvertError, ResolveError};
use crate::registry::{BindingRegistry, ResourceIdentifier};
use crate::resource::{
    BindGroupDescriptor, BindGroupEntry, BindingResource, BufferBinding,
};

/// Outbound converter, owned by the side holding the live resource objects.
#[derive(Default)]
pub struct ConvertToBackingContext {
    registry: BindingRegistry,
}

impl ConvertToBackingContext {
    pub fn new() -> Self {
        Self {
            registry: BindingRegistry::new(),
        }
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BindingRegistry {
        &mut self.registry
    }

    /// Snapshots one bind-group entry into its wire form, registering (or
    /// reusing) an identifier for the referenced object.
    pub fn convert_entry(
        &mut self,
        entry: &BindGroupEntry,
    ) -> Result<BackingBindGroupEntry, ConvertError> {
        let resource = match &entry.resource {
            BindingResource::Sampler(sampler) => {
                BackingResource::Sampler(self.registry.register_sampler(sampler).to_raw())
            }
            BindingResource::TextureView(view) => {
                BackingResource::TextureView(self.registry.register_texture_view(view).to_raw())
            }
            BindingResource::Buffer(binding) => {
                BackingResource::Buffer(self.convert_buffer_binding(binding)?)
            }
            BindingResource::ExternalTexture(texture) => BackingResource::ExternalTexture(
                self.registry.register_external_texture(texture).to_raw(),
            ),
        };
        Ok(BackingBindGroupEntry {
            binding: entry.binding,
            resource,
        })
    }

    /// Converts the nested buffer binding of a `BindingResource::Buffer`
    /// entry. Fails if the buffer was destroyed; the caller must then fail
    /// the whole entry rather than emit a partial record.
    pub fn convert_buffer_binding(
        &mut self,
        binding: &BufferBinding,
    ) -> Result<BackingBufferBinding, ConvertError> {
        let identifier = self.registry.register_buffer(&binding.buffer).ok_or_else(|| {
            ConvertError::DestroyedBuffer {
                label: binding.buffer.label().map(str::to_owned),
            }
        })?;
        Ok(BackingBufferBinding {
            buffer: identifier.to_raw(),
            offset: binding.offset,
            size: binding.size,
        })
    }

    /// Converts a whole bind group; the first untransferable entry fails the
    /// descriptor.
    ///
    /// Identifiers minted for earlier entries are not rolled back on failure.
    /// Registration is idempotent and identifiers are weak references, so a
    /// minted-but-unsent identifier is harmless.
    pub fn convert_bind_group(
        &mut self,
        descriptor: &BindGroupDescriptor,
    ) -> Result<BackingBindGroup, ConvertError> {
        let mut entries = Vec::with_capacity(descriptor.entries.len());
        for entry in &descriptor.entries {
            entries.push(self.convert_entry(entry)?);
        }
        Ok(BackingBindGroup {
            label: descriptor.label.clone(),
            entries,
        })
    }
}

/// Inbound resolver, owned by the side that only has identifiers. Its
/// registry holds proxy objects installed by resource-creation messages.
#[derive(Default)]
pub struct ConvertFromBackingContext {
    registry: BindingRegistry,
}

impl ConvertFromBackingContext {
    pub fn new() -> Self {
        Self {
            registry: BindingRegistry::new(),
        }
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BindingRegistry {
        &mut self.registry
    }

    /// Resolves a wire record back into an entry referencing local proxy
    /// objects.
    ///
    /// Pure with respect to the registry: safe to invoke repeatedly, mints
    /// nothing. A stale identifier fails the entry; it never resolves to a
    /// default or placeholder object.
    pub fn resolve_entry(
        &self,
        entry: &BackingBindGroupEntry,
    ) -> Result<BindGroupEntry, ResolveError> {
        let result = self.resolve_resource(&entry.resource);
        match result {
            Ok(resource) => Ok(BindGroupEntry {
                binding: entry.binding,
                resource,
            }),
            Err(err) => {
                tracing::warn!(binding = entry.binding, %err, "dropping unresolvable bind group entry");
                Err(err)
            }
        }
    }

    fn resolve_resource(&self, resource: &BackingResource) -> Result<BindingResource, ResolveError> {
        match resource {
            BackingResource::Sampler(raw) => {
                let id = ResourceIdentifier::from_raw(*raw);
                let sampler = self
                    .registry
                    .lookup_sampler(id)
                    .ok_or(ResolveError::MissingSampler(id))?;
                Ok(BindingResource::Sampler(sampler))
            }
            BackingResource::TextureView(raw) => {
                let id = ResourceIdentifier::from_raw(*raw);
                let view = self
                    .registry
                    .lookup_texture_view(id)
                    .ok_or(ResolveError::MissingTextureView(id))?;
                Ok(BindingResource::TextureView(view))
            }
            BackingResource::Buffer(binding) => {
                let id = ResourceIdentifier::from_raw(binding.buffer);
                let buffer = self
                    .registry
                    .lookup_buffer(id)
                    .ok_or(ResolveError::MissingBuffer(id))?;
                Ok(BindingResource::Buffer(BufferBinding {
                    buffer,
                    offset: binding.offset,
                    size: binding.size,
                }))
            }
            BackingResource::ExternalTexture(raw) => {
                let id = ResourceIdentifier::from_raw(*raw);
                let texture = self
                    .registry
                    .lookup_external_texture(id)
                    .ok_or(ResolveError::MissingExternalTexture(id))?;
                Ok(BindingResource::ExternalTexture(texture))
            }
        }
    }

    /// Resolves a whole bind group, all-or-nothing: one stale entry rejects
    /// the group so no partially-resolved bind group reaches the execution
    /// path.
    pub fn resolve_bind_group(
        &self,
        group: &BackingBindGroup,
    ) -> Result<Vec<BindGroupEntry>, ResolveError> {
        group
            .entries
            .iter()
            .map(|entry| self.resolve_entry(entry))
            .collect()
    }
}

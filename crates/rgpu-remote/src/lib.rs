//! Binding-resource marshalling for a two-process GPU pipeline.
//!
//! A content process issues GPU calls against type-safe resource handles; a
//! separate GPU process executes the hardware-backed operations. Resources
//! never cross the boundary — only registry-minted identifiers do, carried in
//! the flat backing records defined by [`rgpu_protocol`].
//!
//! This crate provides:
//! - typed resource handles and bind-group entries ([`Sampler`],
//!   [`TextureView`], [`Buffer`], [`ExternalTexture`], [`BindGroupEntry`])
//! - the identifier registry / handle table ([`BindingRegistry`])
//! - the outbound converter ([`ConvertToBackingContext`]) and the
//!   fail-closed inbound resolver ([`ConvertFromBackingContext`])

mod convert;
mod error;
mod registry;
mod resource;

pub use convert::{ConvertFromBackingContext, ConvertToBackingContext};
pub use error::{ConvertError, ResolveError};
pub use registry::{BindingRegistry, ResourceIdentifier};
pub use resource::{
    BindGroupDescriptor, BindGroupEntry, BindingResource, Buffer, BufferBinding, ExternalTexture,
    ObjectId, Sampler, TextureView,
};

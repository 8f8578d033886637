use thiserror::Error;

use crate::registry::ResourceIdentifier;

/// Failure to produce a wire record from a local bind-group entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The nested buffer-binding conversion failed: the buffer was destroyed
    /// and can no longer be assigned an identifier. The whole entry is
    /// untransferable; no partially-populated record is produced.
    #[error("buffer {label:?} was destroyed and cannot be marshalled")]
    DestroyedBuffer { label: Option<String> },
}

/// Failure to resolve a wire record back into local objects.
///
/// A missing object is an expected cross-process race: the peer can destroy
/// a resource strictly after the referencing message was sent and strictly
/// before it is processed. These errors fail the consuming bind-group
/// operation, not the process, and there is nothing to retry — the object
/// cannot reappear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no live sampler for identifier {0}")]
    MissingSampler(ResourceIdentifier),
    #[error("no live texture view for identifier {0}")]
    MissingTextureView(ResourceIdentifier),
    #[error("no live buffer for identifier {0}")]
    MissingBuffer(ResourceIdentifier),
    #[error("no live external texture for identifier {0}")]
    MissingExternalTexture(ResourceIdentifier),
}

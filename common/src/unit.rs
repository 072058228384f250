//! Marker types.

/// Marker type describing a token issuance.
#[derive(Clone, Copy, Debug)]
pub struct Issuance;

/// Marker type describing an expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

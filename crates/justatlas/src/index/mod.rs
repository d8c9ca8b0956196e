//! Subset-minimality indexing with Bloom-fingerprint prefiltering.
//!
//! [`MinimalityIndex`] answers "is this candidate set subset-minimal with
//! respect to everything stored so far?". A per-set [`Fingerprint`] gives a
//! necessary condition for subset inclusion that prunes most comparisons;
//! an exact element-wise test decides the survivors, so fingerprint
//! collisions never affect correctness.

mod fingerprint;
mod minimality;

pub use fingerprint::Fingerprint;
pub use minimality::{ElementSet, MinimalityIndex};

//! Secret-keyed entropy construction.
//!
//! This module mixes a document's canonical fields with the user secret
//! into an [`EntropySeed`] using two HMAC-keyed Fisher-Yates passes, and
//! derives the document-bound [`IdentitySecret`].

mod rng;
mod secret;
mod seed;

pub use rng::{KeyedDraw, DRAW_BITS};
pub use secret::{IdentitySecret, Secret};
pub use seed::{EntropySeed, CHECKSUM_DIGITS};

//! # Domain Models
//!
//! Data structures for host login details and host profiles.
//!
//! ## Security Design
//!
//! Passwords live in [`SecureString`] (or `Zeroizing<String>` on the raw
//! form input): zeroed on drop and never exposed through `Debug`.
//!
//! ## Login Resolution
//!
//! A [`RawHostInput`] carries whatever the operator typed. Only the resolver
//! turns it into a [`ConnectionSpec`], whose escalation method is implied by
//! the login:
//! 1. **root** - commands run directly, the root password is the login password
//! 2. **sudo** - the login password unlocks `sudo`
//! 3. **su** - a separate root password is required

pub mod credentials;
pub mod profile;

pub use credentials::{ConnectionSpec, Escalation, RawHostInput, SecureString};
pub use profile::{Entry, EntryValues, Profile, Section};

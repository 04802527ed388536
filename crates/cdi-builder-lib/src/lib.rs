//! Building blocks for multi-session DiscJuggler (CDI) disc images.
//!
//! Populate an [`disc::Image`] with sessions and tracks, then stream it with
//! [`cdi::write_cdi`].

pub mod audio;
pub mod boot;
pub mod cd;
pub mod cdi;
pub mod disc;

//! Client for the Instagram Graph API media feed (`/me/media`).
//!
//! Pages come back newest-first; callers rely on that order to stop
//! early once they reach a post they already know.

pub mod index;

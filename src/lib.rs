//! Gazette library.
//!
//! Groups one turn of Diplomacy orders into battles, summarises them, and
//! has a text-generation service ghost-write a newspaper about the turn.

pub mod announcements;
pub mod battle;
pub mod board;
pub mod config;
pub mod error;
pub mod newspaper;
pub mod press;
pub mod source;

pub use error::{Error, Result};

//! Assembling and rendering one edition of the newspaper.

pub mod edition;
pub mod render;

pub use edition::{standing, Edition, Standing, Story, StoryKind};
pub use render::{render_html, write_html};

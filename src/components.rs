//! Reusable HTML components for the viewer page
//!
//! Maud component functions for the document shell and the navigation
//! pane. The viewer page in `pages` composes them with rendered content.

pub mod layout;
pub mod nav;

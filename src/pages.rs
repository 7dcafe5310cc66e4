//! Page generation for the help viewer
//!
//! The whole viewer is a single page; its module composes the shared
//! components with the rendered landing content and help documents.

pub mod viewer;

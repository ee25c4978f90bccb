//! Presentation scripts for the marketing site: case study accordion,
//! entrance and hover animations, touch-aware service cards, mobile
//! navigation and smooth in-page scrolling.
//!
//! Everything outside [`web`] is written against the [`dom::Document`] and
//! [`motion::Animator`] traits so it runs the same in tests and in the browser.

pub mod accordion;
pub mod cards;
pub mod case_studies;
pub mod config;
pub mod dom;
pub mod entrance;
pub mod error;
pub mod hover;
pub mod markup;
pub mod motion;
pub mod nav;
pub mod render;
pub mod scroll;
pub mod site;
pub mod web;

#[cfg(test)]
mod testing;

pub use case_studies::{CaseStudy, CaseStudyMeta, ContentBlock};
pub use error::SiteError;
pub use site::{start, Site};

// src/render/mod.rs
//! Render capability: something that can open a dashboard URL in a real
//! browser session and hand back what is currently rendered.
//!
//! The pipeline only ever asks three things of it, strictly one at a time:
//! navigate, "is there a table yet?", and "give me the markup".
//! Lifecycle of the browser itself stays outside this crate.

use std::time::Duration;

use crate::core::TableProbe;
use crate::core::table::probe_markup;
use crate::error::RenderError;

pub mod boot;
pub mod webdriver;

pub use webdriver::WebDriverRenderer;

pub trait Renderer {
    /// Load `url` in the session. An error here abandons the current account.
    fn navigate(&mut self, url: &str) -> Result<(), RenderError>;

    /// Counts for the first `<table>`, waiting up to `wait` for one to appear.
    /// `Ok(None)` means no table is rendered (yet).
    fn probe_table(&mut self, wait: Duration) -> Result<Option<TableProbe>, RenderError> {
        let _ = wait;
        Ok(self.page_source()?.as_deref().and_then(probe_markup))
    }

    /// Markup as rendered right now. `Ok(None)` when the session has nothing to give.
    fn page_source(&mut self) -> Result<Option<String>, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn navigate(&mut self, url: &str) -> Result<(), RenderError> {
        (**self).navigate(url)
    }
    fn probe_table(&mut self, wait: Duration) -> Result<Option<TableProbe>, RenderError> {
        (**self).probe_table(wait)
    }
    fn page_source(&mut self) -> Result<Option<String>, RenderError> {
        (**self).page_source()
    }
}

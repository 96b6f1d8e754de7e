use anyhow::Context as _;
use tracing::{debug, trace};

use super::{DomMap, PreviewSurface};
use crate::sync::{RequestId, RequestSequencer};

/// Writes preview markup into the surface and keeps the [`DomMap`] in step with it.
#[derive(Debug)]
pub struct PreviewRenderer<S> {
    surface: S,
    map: DomMap,
    sequencer: RequestSequencer,
}

impl<S: PreviewSurface> PreviewRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            map: DomMap::default(),
            sequencer: RequestSequencer::default(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn map(&self) -> &DomMap {
        &self.map
    }

    /// Records `id` as the request whose markup should end up on the surface.
    pub fn expect(&mut self, id: RequestId) {
        self.sequencer.issue(id);
    }

    /// Applies markup answering request `id`.
    ///
    /// Returns `Ok(false)` without touching the surface if a newer request was issued since.
    pub fn apply(&mut self, id: RequestId, html: &str) -> anyhow::Result<bool> {
        if !self.sequencer.is_current(id) {
            debug!("dropping stale preview markup from request {id}");
            return Ok(false);
        }

        self.render(html)?;
        Ok(true)
    }

    /// Writes markup that does not answer a sequenced request, such as the initial layout load.
    ///
    /// Any preview request still in flight becomes stale.
    pub fn render(&mut self, html: &str) -> anyhow::Result<()> {
        let _span = tracy_client::span!("PreviewRenderer::render");

        self.sequencer.reset();
        self.surface
            .write_html(html)
            .context("error writing preview markup")?;
        self.map = DomMap::scan(&self.surface.scan());
        trace!("preview rendered");
        Ok(())
    }

    /// Forgets the mapping and every pending request, for when the edited entity goes away.
    pub fn clear(&mut self) {
        self.sequencer.reset();
        self.map = DomMap::default();
    }
}

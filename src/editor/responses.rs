use pagecraft_api::{
    ComponentCatalog, ContentEntity, FormResponse, LayoutResponse, PreviewResponse, Section,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::{Editor, OpenForm};
use crate::assets::AssetHost;
use crate::catalog::Catalog;
use crate::preview::PreviewSurface;
use crate::sync::{RequestError, RequestId, RequestKind};

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RequestError> {
    Ok(serde_json::from_value(value)?)
}

impl<S: PreviewSurface, H: AssetHost> Editor<S, H> {
    /// Reports the outcome of a request handed out by [`Editor::poll_requests`].
    ///
    /// Responses for requests the editor no longer waits for, because the entity was closed in
    /// the meantime, are ignored.
    pub fn handle_response(&mut self, id: RequestId, response: Result<Value, RequestError>) {
        let Some(kind) = self.outbox.complete(id) else {
            debug!("ignoring response to request {id}");
            return;
        };
        trace!("response to {kind:?} request {id}");

        let res = response.and_then(|value| self.apply_response(id, kind, value));
        match res {
            Ok(()) => {
                self.errors.remove(&kind);
            }
            Err(RequestError::Conflict(report)) => {
                warn!("{kind:?} request {id} hit a conflict");
                self.conflicts.report(report);
            }
            Err(err) => {
                warn!("{kind:?} request {id} failed: {err}");
                // Nothing to retry once the entity is closed.
                if self.is_open() {
                    self.errors.insert(kind, err);
                }
            }
        }
    }

    fn apply_response(
        &mut self,
        id: RequestId,
        kind: RequestKind,
        value: Value,
    ) -> Result<(), RequestError> {
        match kind {
            RequestKind::LoadLayout => {
                let response: LayoutResponse = decode(value)?;
                self.apply_layout(id, response)
            }
            RequestKind::LoadCatalog => {
                let catalog: ComponentCatalog = decode(value)?;
                debug!("catalog has {} component types", catalog.len());
                self.set_catalog(Catalog::new(catalog));
                Ok(())
            }
            RequestKind::Save | RequestKind::Preview => {
                let response: PreviewResponse = decode(value)?;
                match self.preview.apply(id, &response.html) {
                    Ok(_) => (),
                    Err(err) => warn!("error updating the preview: {err:?}"),
                }
                Ok(())
            }
            RequestKind::ListSections => {
                self.sections = decode(value)?;
                Ok(())
            }
            RequestKind::SaveSection => {
                let section: Section = decode(value)?;
                debug!("saved section {:?}", section.name);
                self.sections.push(section);
                Ok(())
            }
            RequestKind::ListContent => {
                self.content = decode(value)?;
                Ok(())
            }
            RequestKind::CreateContent => {
                let entity: ContentEntity = decode(value)?;
                self.content.push(entity);
                Ok(())
            }
            RequestKind::DeleteContent => {
                self.list_content();
                Ok(())
            }
            RequestKind::PageDataForm | RequestKind::ComponentForm => {
                let response: FormResponse = decode(value)?;
                self.apply_form(id, response);
                Ok(())
            }
        }
    }

    fn apply_layout(
        &mut self,
        id: RequestId,
        response: LayoutResponse,
    ) -> Result<(), RequestError> {
        if !self.layout_requests.is_current(id) {
            debug!("dropping stale layout from request {id}");
            return Ok(());
        }

        self.store
            .load(response.layout, response.model)
            .map_err(|err| RequestError::InvalidResponse(err.to_string()))?;
        self.first_load.layout = true;

        match response.html {
            Some(html) => {
                if let Err(err) = self.preview.render(&html) {
                    warn!("error rendering the preview: {err:?}");
                }
            }
            None => self.refresh.call(()),
        }

        match self.pending_route.take() {
            Some(path) => {
                self.navigation.navigate(&path, self.store.layout());
            }
            None => self.navigation.sync(self.store.layout()),
        }
        Ok(())
    }

    fn apply_form(&mut self, id: RequestId, response: FormResponse) {
        if !self.form_requests.is_current(id) {
            debug!("dropping stale form from request {id}");
            return;
        }
        let Some(target) = self.pending_form.take() else {
            return;
        };

        let report = self
            .assets
            .attach(&response.attachments, &mut self.asset_host);
        debug!("form assets: {report:?}");
        self.form = Some(OpenForm { target, response });
    }
}

//! Attaching form assets to the host document.

use std::collections::HashSet;

use pagecraft_api::Attachments;
use serde_json::Value;
use tracing::{debug, warn};

/// The host document that stylesheets and scripts get added to.
pub trait AssetHost {
    /// Whether the document already has a stylesheet or script with this url, added by anyone.
    fn has_asset(&self, url: &str) -> bool;
    fn add_stylesheet(&mut self, url: &str) -> anyhow::Result<()>;
    fn add_script(&mut self, url: &str) -> anyhow::Result<()>;
    /// Merges `settings` into the host's settings object.
    fn merge_settings(&mut self, settings: &Value) -> anyhow::Result<()>;
}

/// What one [`AssetRegistry::attach`] call did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttachReport {
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Remembers which asset urls were attached so each is only added once.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    attached: HashSet<String>,
}

impl AssetRegistry {
    /// Adds every stylesheet and script of `attachments` not present yet, then merges settings.
    ///
    /// Failures are logged and skipped; a form with a missing asset is often still usable.
    pub fn attach(&mut self, attachments: &Attachments, host: &mut dyn AssetHost) -> AttachReport {
        let mut report = AttachReport::default();

        let css = attachments.css.iter().map(|url| (url, AssetKind::Stylesheet));
        let js = attachments.js.iter().map(|url| (url, AssetKind::Script));
        for (url, kind) in css.chain(js) {
            if self.attached.contains(url) || host.has_asset(url) {
                report.skipped += 1;
                continue;
            }

            let res = match kind {
                AssetKind::Stylesheet => host.add_stylesheet(url),
                AssetKind::Script => host.add_script(url),
            };
            match res {
                Ok(()) => {
                    self.attached.insert(url.clone());
                    report.added += 1;
                }
                Err(err) => {
                    warn!("error adding {kind:?} {url}: {err:?}");
                    report.failed += 1;
                }
            }
        }

        if !attachments.settings.is_null() {
            if let Err(err) = host.merge_settings(&attachments.settings) {
                warn!("error merging asset settings: {err:?}");
                report.failed += 1;
            }
        }

        debug!(
            "attached assets: {} added, {} skipped, {} failed",
            report.added, report.skipped, report.failed
        );
        report
    }

    pub fn is_attached(&self, url: &str) -> bool {
        self.attached.contains(url)
    }
}

#[derive(Debug, Clone, Copy)]
enum AssetKind {
    Stylesheet,
    Script,
}

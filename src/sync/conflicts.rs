use pagecraft_api::{ConflictEntry, ConflictReport};
use serde_json::Value;

/// One line of the conflict list shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictDiagnostic {
    pub code: Option<String>,
    pub message: String,
    /// The entry as the server sent it.
    pub raw: Value,
}

impl From<ConflictEntry> for ConflictDiagnostic {
    fn from(entry: ConflictEntry) -> Self {
        let raw = serde_json::to_value(&entry).unwrap_or(Value::Null);
        let message = if entry.detail.is_empty() {
            entry
                .extra
                .get("title")
                .and_then(Value::as_str)
                .or(entry.code.as_deref())
                .unwrap_or(NO_DETAILS)
                .to_owned()
        } else {
            entry.detail
        };

        Self {
            code: entry.code,
            message,
            raw,
        }
    }
}

const NO_DETAILS: &str = "the server reported a conflict without details";

/// Conflicts reported by the server since the user last dismissed them.
///
/// Nothing here reconciles anything; the list is informational and resolution is up to the
/// user.
#[derive(Debug, Default)]
pub struct Conflicts {
    entries: Vec<ConflictDiagnostic>,
}

impl Conflicts {
    pub fn report(&mut self, report: ConflictReport) {
        if report.errors.is_empty() {
            let message = report
                .extra
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(NO_DETAILS)
                .to_owned();
            self.entries.push(ConflictDiagnostic {
                code: None,
                message,
                raw: serde_json::to_value(&report).unwrap_or(Value::Null),
            });
            return;
        }

        self.entries
            .extend(report.errors.into_iter().map(ConflictDiagnostic::from));
    }

    pub fn entries(&self) -> &[ConflictDiagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dismiss(&mut self) {
        self.entries.clear();
    }
}

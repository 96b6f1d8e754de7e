use std::fmt;

/// Identity of one request handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source of increasing request ids.
#[derive(Debug, Default)]
pub struct RequestIds {
    next: u64,
}

impl RequestIds {
    pub fn next(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }
}

/// Tracks the latest request of one kind so that slower, older responses can be told apart.
///
/// Responses are matched by request identity, and only the response to the most recently issued
/// request is current. An older one arriving late would overwrite fresher state, so it is
/// dropped.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: Option<RequestId>,
}

impl RequestSequencer {
    /// Marks `id` as the latest request.
    pub fn issue(&mut self, id: RequestId) {
        self.latest = Some(id);
    }

    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest == Some(id)
    }

    /// Forgets the latest request, so every response still in flight becomes stale.
    pub fn reset(&mut self) {
        self.latest = None;
    }
}

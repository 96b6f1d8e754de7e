use pagecraft_api::NodeId;
use pagecraft_config::EntityRef;

const REGION_SEGMENT: &str = "region";
const COMPONENT_SEGMENT: &str = "component";

/// What an editor path points at.
///
/// ```text
/// {editor}/{type}/{id}
/// {editor}/{type}/{id}/component/{uuid}
/// {editor}/{type}/{id}/region/{region}
/// {editor}/{type}/{id}/region/{region}/component/{uuid}
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub entity: EntityRef,
    pub region: Option<String>,
    pub component: Option<NodeId>,
}

impl Route {
    pub fn entity(entity: EntityRef) -> Self {
        Self {
            entity,
            region: None,
            component: None,
        }
    }

    /// Parses a path under `editor_path`. Returns `None` for anything that is not an editor
    /// route.
    pub fn parse(editor_path: &str, path: &str) -> Option<Self> {
        let rest = path.strip_prefix(editor_path.trim_end_matches('/'))?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }

        let mut segments = rest.split('/').filter(|s| !s.is_empty());
        let entity = EntityRef {
            entity_type: segments.next()?.to_owned(),
            entity_id: segments.next()?.to_owned(),
        };
        let mut route = Self::entity(entity);

        let mut next = segments.next();
        if next == Some(REGION_SEGMENT) {
            route.region = Some(segments.next()?.to_owned());
            next = segments.next();
        }
        if next == Some(COMPONENT_SEGMENT) {
            route.component = Some(NodeId::from(segments.next()?));
            next = segments.next();
        }

        // Trailing garbage means this is not one of ours.
        match next {
            None => Some(route),
            Some(_) => None,
        }
    }

    pub fn to_path(&self, editor_path: &str) -> String {
        let mut path = format!(
            "{}/{}/{}",
            editor_path.trim_end_matches('/'),
            self.entity.entity_type,
            self.entity.entity_id
        );
        if let Some(region) = &self.region {
            path.push_str(&format!("/{REGION_SEGMENT}/{region}"));
        }
        if let Some(uuid) = &self.component {
            path.push_str(&format!("/{COMPONENT_SEGMENT}/{uuid}"));
        }
        path
    }
}

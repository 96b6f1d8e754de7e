use std::fmt;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// A remote endpoint of the CMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Layout tree and page data of one content entity.
    Layout {
        entity_type: String,
        entity_id: String,
    },
    /// Renders a posted layout without storing it.
    Preview {
        entity_type: String,
        entity_id: String,
    },
    /// Component type metadata.
    ComponentCatalog,
    /// Saved sections; `POST` creates one.
    Sections,
    /// Content entities of one type; `POST` creates one.
    ContentEntities { entity_type: String },
    /// One content entity; `DELETE` removes it.
    ContentEntity {
        entity_type: String,
        entity_id: String,
    },
    /// Server-rendered page-data form.
    PageDataForm {
        entity_type: String,
        entity_id: String,
    },
    /// Server-rendered settings form of one component instance.
    ComponentForm {
        entity_type: String,
        entity_id: String,
        component: String,
    },
}

impl Endpoint {
    /// Path relative to the CMS base url.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Layout {
                entity_type,
                entity_id,
            } => format!("/api/layout/{entity_type}/{entity_id}"),
            Endpoint::Preview {
                entity_type,
                entity_id,
            } => format!("/api/preview/{entity_type}/{entity_id}"),
            Endpoint::ComponentCatalog => String::from("/api/config/component"),
            Endpoint::Sections => String::from("/api/config/section"),
            Endpoint::ContentEntities { entity_type } => format!("/api/content/{entity_type}"),
            Endpoint::ContentEntity {
                entity_type,
                entity_id,
            } => format!("/api/content/{entity_type}/{entity_id}"),
            Endpoint::PageDataForm {
                entity_type,
                entity_id,
            } => format!("/api/form/content-entity/{entity_type}/{entity_id}"),
            Endpoint::ComponentForm {
                entity_type,
                entity_id,
                component,
            } => format!("/api/form/component-instance/{entity_type}/{entity_id}/{component}"),
        }
    }

    /// Full url under `base_url`, which may or may not end with a slash.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

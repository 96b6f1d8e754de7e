/// Where the editor runs and what it edits.
#[derive(knuffel::Decode, Debug, Clone, PartialEq, Eq)]
pub struct Host {
    #[knuffel(child, unwrap(argument), default = Self::default().base_url)]
    pub base_url: String,
    /// Path prefix of the editor's own routes.
    #[knuffel(child, unwrap(argument), default = Self::default().editor_path)]
    pub editor_path: String,
    #[knuffel(child)]
    pub entity: Option<EntityRef>,
    /// Region whose components are addressed without a region segment.
    #[knuffel(child, unwrap(argument), default = Self::default().default_region)]
    pub default_region: String,
}

impl Default for Host {
    fn default() -> Self {
        Self {
            base_url: String::from("/"),
            editor_path: String::from("/editor"),
            entity: None,
            default_region: String::from("content"),
        }
    }
}

/// The content entity being edited.
#[derive(knuffel::Decode, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    #[knuffel(argument)]
    pub entity_type: String,
    #[knuffel(argument)]
    pub entity_id: String,
}

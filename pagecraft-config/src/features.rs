use bitflags::bitflags;

/// A feature the host can switch on.
#[derive(knuffel::DecodeScalar, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Saving and inserting reusable sections.
    Sections,
    /// Editing regions other than the default one.
    GlobalRegions,
    /// Listing, creating and deleting content entities.
    ContentList,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FeatureFlags: u32 {
        const SECTIONS = 1 << 0;
        const GLOBAL_REGIONS = 1 << 1;
        const CONTENT_LIST = 1 << 2;
    }
}

impl From<Feature> for FeatureFlags {
    fn from(value: Feature) -> Self {
        match value {
            Feature::Sections => FeatureFlags::SECTIONS,
            Feature::GlobalRegions => FeatureFlags::GLOBAL_REGIONS,
            Feature::ContentList => FeatureFlags::CONTENT_LIST,
        }
    }
}

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq, Eq)]
pub struct Features {
    #[knuffel(arguments)]
    pub enabled: Vec<Feature>,
}

impl Features {
    pub fn flags(&self) -> FeatureFlags {
        self.enabled
            .iter()
            .fold(FeatureFlags::empty(), |flags, &f| flags | f.into())
    }
}

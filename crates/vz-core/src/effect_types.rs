/// Remote image effects the client knows how to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    PhotoToVectorArt,
}

impl Effect {
    /// Effect name for display
    pub fn name(&self) -> &str {
        match self {
            Self::PhotoToVectorArt => "Photo to Vector Art",
        }
    }

    /// Effect ID sent as `effectId`
    pub fn id(&self) -> &str {
        match self {
            Self::PhotoToVectorArt => "photoToVectorArt",
        }
    }

    /// Value sent as `model`
    pub fn model(&self) -> &str {
        match self {
            Self::PhotoToVectorArt => "image-effects",
        }
    }

    /// Value sent as `toolType`
    pub fn tool_type(&self) -> &str {
        match self {
            Self::PhotoToVectorArt => "image-effects",
        }
    }

    /// Label of the generate action when idle
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::PhotoToVectorArt => "Generate Vector Art",
        }
    }

    /// Prefix of downloaded result files
    pub fn download_prefix(&self) -> &str {
        match self {
            Self::PhotoToVectorArt => "vector_art",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|effect| effect.id() == id)
    }

    /// All available effects
    pub fn all() -> [Effect; 1] {
        [Self::PhotoToVectorArt]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_ids() {
        assert_eq!(Effect::PhotoToVectorArt.id(), "photoToVectorArt");
        assert_eq!(Effect::PhotoToVectorArt.model(), "image-effects");
        assert_eq!(Effect::PhotoToVectorArt.tool_type(), "image-effects");
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Effect::from_id("photoToVectorArt"), Some(Effect::PhotoToVectorArt));
        assert_eq!(Effect::from_id("photoToSketch"), None);
    }

    #[test]
    fn test_all_effects() {
        assert_eq!(Effect::all().len(), 1);
        assert_eq!(Effect::default(), Effect::PhotoToVectorArt);
    }
}

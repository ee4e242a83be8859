//! Collection title/vibe seam.
//!
//! Naming a collection is delegated to an external text-generation service.
//! The service is opaque behind [`ThemeService`]; everything that can go
//! wrong with it is absorbed here into fixed fallback pairs, so callers
//! always get a usable title and never see an error.

/// A short title plus a one-line mood description for an exported wall.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CollectionTheme {
    pub title: String,
    pub vibe: String,
}

impl CollectionTheme {
    /// Pair used when no service/credentials are configured at all.
    pub fn offline_fallback() -> Self {
        Self {
            title: "我的电影收藏".to_string(),
            vibe: "一段充满回忆的光影之旅。".to_string(),
        }
    }

    /// Pair used when the configured service fails for any reason.
    pub fn service_fallback() -> Self {
        Self {
            title: "光影长廊".to_string(),
            vibe: "属于你的私人电影画廊。".to_string(),
        }
    }
}

/// The opaque external generator. Implementations own their credentials and
/// transport; the core never inspects either.
pub trait ThemeService {
    fn generate(&self, image_count: usize) -> anyhow::Result<CollectionTheme>;
}

/// Resolve a collection theme for `image_count` posters.
///
/// `None` (no credentials/service configured) yields the offline fallback; a
/// failing service yields the service fallback. Never fails.
pub fn collection_theme(
    service: Option<&dyn ThemeService>,
    image_count: usize,
) -> CollectionTheme {
    let Some(service) = service else {
        return CollectionTheme::offline_fallback();
    };
    match service.generate(image_count) {
        Ok(theme) => theme,
        Err(e) => {
            tracing::warn!(error = %e, "collection theme service failed, using fallback");
            CollectionTheme::service_fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingService;
    impl ThemeService for FailingService {
        fn generate(&self, _image_count: usize) -> anyhow::Result<CollectionTheme> {
            anyhow::bail!("quota exhausted")
        }
    }

    struct EchoService;
    impl ThemeService for EchoService {
        fn generate(&self, image_count: usize) -> anyhow::Result<CollectionTheme> {
            Ok(CollectionTheme {
                title: format!("{image_count} posters"),
                vibe: "ok".to_string(),
            })
        }
    }

    #[test]
    fn missing_service_returns_offline_fallback() {
        assert_eq!(
            collection_theme(None, 12),
            CollectionTheme::offline_fallback()
        );
    }

    #[test]
    fn failing_service_is_absorbed() {
        assert_eq!(
            collection_theme(Some(&FailingService), 12),
            CollectionTheme::service_fallback()
        );
    }

    #[test]
    fn working_service_passes_through() {
        let theme = collection_theme(Some(&EchoService), 3);
        assert_eq!(theme.title, "3 posters");
    }
}

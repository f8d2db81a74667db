//! Runtime settings read from the process environment.

/// Settings shared by the validators and the marketplace glue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Public base URL of this store, always ending with `/`.
    pub site_domain: String,
    /// Path (relative to `site_domain`) under which uploaded assets are served.
    pub media_path: String,
    /// Name this store registers itself with on marketplaces.
    pub store_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_domain: "http://localhost:8004/".to_string(),
            media_path: "media/resources/".to_string(),
            store_name: "WStore".to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `BAE_SITE_DOMAIN`, `BAE_MEDIA_PATH` and `BAE_STORE_NAME`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (falls back to defaults).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let site_domain = lookup("BAE_SITE_DOMAIN").unwrap_or_else(|| {
            tracing::warn!(default = %defaults.site_domain, "BAE_SITE_DOMAIN not set; using default");
            defaults.site_domain.clone()
        });
        let media_path = lookup("BAE_MEDIA_PATH").unwrap_or(defaults.media_path);
        let store_name = lookup("BAE_STORE_NAME").unwrap_or(defaults.store_name);

        Self {
            site_domain: with_trailing_slash(site_domain),
            media_path: with_trailing_slash(media_path.trim().trim_start_matches('/').to_string()),
            store_name,
        }
    }

    /// URL prefix identifying assets uploaded to this store.
    pub fn media_url_prefix(&self) -> String {
        format!("{}{}", self.site_domain, self.media_path)
    }
}

fn with_trailing_slash(mut value: String) -> String {
    if !value.is_empty() && !value.ends_with('/') {
        value.push('/');
    }
    value
}

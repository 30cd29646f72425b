//! Site configuration and message catalog bundled with the wasm module.
use blockhaven_site::{Catalog, SiteConfig};

const SITE_JSON: &str = include_str!("../static/site.json");

/// Load the embedded site config, falling back to defaults when it is invalid.
#[must_use]
pub fn load_from_static() -> SiteConfig {
    SiteConfig::from_json(SITE_JSON).unwrap_or_else(|err| {
        log::error!("static/site.json rejected, using defaults: {err}");
        SiteConfig::default_config()
    })
}

/// Catalog for the configured language, or the built-in default.
#[must_use]
pub fn catalog_for(config: &SiteConfig) -> Catalog {
    Catalog::for_lang(&config.default_lang).unwrap_or_else(|err| {
        log::warn!("{err}; falling back to default catalog");
        Catalog::default_catalog()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        assert_eq!(load_from_static(), SiteConfig::default_config());
    }

    #[test]
    fn unknown_language_falls_back() {
        let config = SiteConfig {
            default_lang: "xx".into(),
            ..SiteConfig::default_config()
        };
        assert_eq!(catalog_for(&config).lang(), "fa");
    }
}

use derive_builder::Builder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Everything on the page that does not come from the menu data.
#[derive(Debug, Clone, Builder)]
pub struct SiteConfig {
    #[builder(setter(into), default = "String::from(\"ABO ALEZZ\")")]
    pub name: String,
    #[builder(setter(into), default = "String::from(\"/images/logo.png\")")]
    pub logo: String,
    #[builder(setter(into), default = "String::from(DEFAULT_BACKGROUND)")]
    pub background: String,
    #[builder(default = "default_socials()")]
    pub socials: Vec<SocialLink>,
    #[builder(default = "default_phones()")]
    pub phones: Vec<String>,
}

const DEFAULT_BACKGROUND: &str = "https://images.unsplash.com/photo-1414235077428-338989a2e8c0?q=80&w=2070&auto=format&fit=crop";

fn default_socials() -> Vec<SocialLink> {
    vec![
        SocialLink::new(
            "Facebook",
            "https://www.facebook.com/share/19rYiQbPwS/?mibextid=wwXIfr",
        ),
        SocialLink::new(
            "Instagram",
            "https://www.instagram.com/aboelezzsyrian?igsh=MTZvOHEybGxnemd0OQ==",
        ),
    ]
}

fn default_phones() -> Vec<String> {
    vec!["01144435111".to_string(), "01011445555".to_string()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: String::from("ABO ALEZZ"),
            logo: String::from("/images/logo.png"),
            background: String::from(DEFAULT_BACKGROUND),
            socials: default_socials(),
            phones: default_phones(),
        }
    }
}

impl SiteConfig {
    /// Defaults, overridden by `MENU_SITE_NAME` and `MENU_PHONES`.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("MENU_SITE_NAME").ok(),
            std::env::var("MENU_PHONES").ok(),
        )
    }

    fn from_vars(name: Option<String>, phones: Option<String>) -> Self {
        let mut builder = SiteConfigBuilder::default();
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            builder.name(name.trim());
        }
        if let Some(phones) = phones {
            let phones: Vec<String> = phones
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
            if !phones.is_empty() {
                builder.phones(phones);
            }
        }
        // every field has a default
        builder.build().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

impl ServerConfig {
    pub const DEFAULT_BIND: &'static str = "127.0.0.1:8080";

    pub fn from_env() -> Self {
        let bind = std::env::var("MENU_BIND")
            .ok()
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BIND.to_string());
        Self { bind }
    }
}

use std::path::Path;

use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

/// English messages compiled into the binary; used when no `.ftl` file can be read.
const EMBEDDED_EN: &str = include_str!("../../resources/en.ftl");

/// Fluent-based internationalization.
pub struct I18n {
    bundle: FluentBundle<FluentResource>,
    lang: String,
}

impl I18n {
    /// Load `.ftl` files from the resources directory and auto-detect the system language.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();

        let sys_lang = sys_locale::get_locale()
            .unwrap_or_else(|| "en".to_string())
            .to_lowercase();
        let lang_code = if sys_lang.starts_with("de") {
            "de"
        } else {
            "en"
        };

        if let Some(i18n) = Self::try_load(dir, lang_code) {
            return i18n;
        }
        if lang_code != "en" {
            if let Some(i18n) = Self::try_load(dir, "en") {
                return i18n;
            }
        }

        warn!(dir = %dir.display(), "no translations found, using built-in English");
        Self::english()
    }

    /// The built-in English bundle.
    pub fn english() -> Self {
        match Self::from_source("en", EMBEDDED_EN.to_string()) {
            Some(i18n) => i18n,
            None => Self {
                bundle: Self::bundle_for(LanguageIdentifier::default()),
                lang: "en".to_string(),
            },
        }
    }

    fn try_load(dir: &Path, lang: &str) -> Option<Self> {
        let path = dir.join(format!("{}.ftl", lang));
        let source = std::fs::read_to_string(&path).ok()?;
        debug!(path = %path.display(), "loaded translations");
        Self::from_source(lang, source)
    }

    fn from_source(lang: &str, source: String) -> Option<Self> {
        let resource = FluentResource::try_new(source).ok()?;
        let langid: LanguageIdentifier = lang.parse().ok()?;
        let mut bundle = Self::bundle_for(langid);
        bundle.add_resource(resource).ok()?;
        Some(Self {
            bundle,
            lang: lang.to_string(),
        })
    }

    fn bundle_for(langid: LanguageIdentifier) -> FluentBundle<FluentResource> {
        let mut bundle = FluentBundle::new(vec![langid]);
        // Status strings are shown verbatim in labels; no bidi isolation marks.
        bundle.set_use_isolating(false);
        bundle
    }

    /// Get a translated message by its identifier.
    pub fn t(&self, id: &str) -> String {
        self.format(id, None)
    }

    /// Get a translated message with arguments.
    pub fn t_args(&self, id: &str, args: &FluentArgs) -> String {
        self.format(id, Some(args))
    }

    fn format(&self, id: &str, args: Option<&FluentArgs>) -> String {
        let msg = match self.bundle.get_message(id) {
            Some(m) => m,
            None => return id.to_string(),
        };
        let pattern = match msg.value() {
            Some(p) => p,
            None => return id.to_string(),
        };
        let mut errors = vec![];
        self.bundle
            .format_pattern(pattern, args, &mut errors)
            .to_string()
    }

    pub fn current_language(&self) -> &str {
        &self.lang
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_status_messages() {
        let i18n = I18n::english();
        let mut args = FluentArgs::new();
        args.set("mark", "X");
        assert_eq!(i18n.t_args("status-turn", &args), "Turn: X");
        assert_eq!(i18n.t_args("status-won", &args), "X Wins!");
        assert_eq!(i18n.t("status-draw"), "Draw!");
        assert_eq!(i18n.current_language(), "en");
    }

    #[test]
    fn unknown_id_falls_back_to_id() {
        assert_eq!(I18n::english().t("no-such-message"), "no-such-message");
    }

    #[test]
    fn missing_directory_uses_builtin_english() {
        let i18n = I18n::load_from_dir("/definitely/not/a/resources/dir");
        assert_eq!(i18n.t("button-reset"), "Reset Game");
    }
}

//! Language registry: Single source of truth for all supported languages.
//!
//! The registry holds every language the bot can translate into, together with
//! the aliases users may type to pick it. It is built once behind a `OnceLock`
//! and is read-only afterwards, so it can be shared by any number of concurrent
//! request handlers without locking.

use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code sent to the translation provider (e.g., "en", "ru")
    pub code: &'static str,

    /// English name of the language (e.g., "Russian")
    pub name: &'static str,

    /// Native name of the language (e.g., "Русский")
    pub native_name: &'static str,

    /// Label shown in inline result titles (flag + Uzbek name)
    pub label: &'static str,

    /// Strings a user may type to select this language.
    ///
    /// Compared case-insensitively after trimming. The code itself is always
    /// accepted, whether or not it is listed here.
    pub aliases: &'static [&'static str],
}

/// An alias that was claimed by more than one language.
///
/// The first language in table order keeps the alias; the later claim is
/// recorded here and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedAlias {
    pub alias: String,
    pub kept_by: &'static str,
    pub dropped_from: &'static str,
}

/// Language registry.
///
/// Holds the language table and a normalized alias index. Resolution is a
/// single hash lookup, so table iteration order never affects the result.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
    alias_index: HashMap<String, usize>,
    shadowed: Vec<ShadowedAlias>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

/// Normalize user input for alias comparison.
pub(crate) fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry::from_configs(default_languages()))
    }

    /// Build a registry from a language table.
    ///
    /// Aliases are normalized here. If two languages claim the same alias, the
    /// language that appears first in `languages` keeps it.
    pub fn from_configs(languages: Vec<LanguageConfig>) -> Self {
        let mut alias_index: HashMap<String, usize> = HashMap::new();
        let mut shadowed = Vec::new();

        for (idx, lang) in languages.iter().enumerate() {
            let candidates = std::iter::once(lang.code).chain(lang.aliases.iter().copied());

            for alias in candidates {
                let key = normalize(alias);
                if key.is_empty() {
                    continue;
                }

                match alias_index.get(&key) {
                    None => {
                        alias_index.insert(key, idx);
                    }
                    Some(&owner) if owner == idx => {}
                    Some(&owner) => {
                        let kept_by = languages[owner].code;
                        warn!(
                            "Alias '{}' claimed by both '{}' and '{}', keeping '{}'",
                            key, kept_by, lang.code, kept_by
                        );
                        shadowed.push(ShadowedAlias {
                            alias: key,
                            kept_by,
                            dropped_from: lang.code,
                        });
                    }
                }
            }
        }

        Self {
            languages,
            alias_index,
            shadowed,
        }
    }

    /// Get a language configuration by its canonical code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Resolve a free-form token (code, English name, native name, local
    /// variant) to a language.
    ///
    /// The token is trimmed and lowercased, then matched exactly against the
    /// alias index. Partial or prefix matches are never accepted.
    pub fn resolve(&self, token: &str) -> Option<&LanguageConfig> {
        self.alias_index
            .get(&normalize(token))
            .map(|&idx| &self.languages[idx])
    }

    /// Get all languages in table order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Number of distinct aliases (codes included) in the index.
    pub fn alias_count(&self) -> usize {
        self.alias_index.len()
    }

    /// Aliases dropped during construction because an earlier language
    /// already claimed them.
    pub fn shadowed_aliases(&self) -> &[ShadowedAlias] {
        &self.shadowed
    }
}

/// Default language table.
///
/// Aliases cover ISO 639-1/639-2 codes, English names, native-script names and
/// the Uzbek and Russian names users of the bot commonly type.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            label: "🇷🇺 Rus tili",
            aliases: &[
                "rus",
                "russian",
                "russia",
                "русский",
                "rus tilida",
                "на русском языке",
                "russkiy",
                "russkaya",
                "рус",
            ],
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            label: "🇬🇧 Ingliz tili",
            aliases: &[
                "eng",
                "english",
                "ingliz",
                "ingliz tilida",
                "in english",
                "английский",
                "инглиз",
                "англ",
            ],
        },
        LanguageConfig {
            code: "uz",
            name: "Uzbek",
            native_name: "O'zbek",
            label: "🇺🇿 O'zbek tili",
            aliases: &[
                "uzb",
                "uzbek",
                "uzbek tilida",
                "o'zbek",
                "ozbek",
                "узбекский",
                "ўзбек",
                "ozbekcha",
            ],
        },
        LanguageConfig {
            code: "tr",
            name: "Turkish",
            native_name: "Türkçe",
            label: "🇹🇷 Turk tili",
            aliases: &[
                "tur",
                "turk",
                "turkish",
                "turkcha",
                "turk tilida",
                "türkçe",
                "турецкий",
                "turkiye",
            ],
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            label: "🇩🇪 Nemis tili",
            aliases: &[
                "deu", "german", "nemis", "deutsch", "немецкий", "germaniya", "olmon",
            ],
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            label: "🇫🇷 Fransuz tili",
            aliases: &[
                "fra",
                "french",
                "fransuz",
                "français",
                "francais",
                "французский",
                "fransiya",
            ],
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            label: "🇪🇸 Ispan tili",
            aliases: &[
                "spa", "spanish", "ispan", "español", "espanol", "испанский", "ispaniya",
            ],
        },
        LanguageConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            label: "🇸🇦 Arab tili",
            aliases: &[
                "ara", "arabic", "arab", "عربي", "арабский", "arabcha", "arabiya",
            ],
        },
        LanguageConfig {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
            label: "🇨🇳 Xitoy tili",
            aliases: &[
                "chi", "chinese", "xitoy", "中文", "китайский", "china", "xitoycha",
            ],
        },
        LanguageConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
            label: "🇯🇵 Yapon tili",
            aliases: &[
                "jpn", "japanese", "yapon", "日本語", "японский", "japan", "yaponcha",
            ],
        },
        LanguageConfig {
            code: "ko",
            name: "Korean",
            native_name: "한국어",
            label: "🇰🇷 Koreys tili",
            aliases: &[
                "kor", "korean", "koreys", "한국어", "корейский", "korea", "koreycha",
            ],
        },
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            label: "🇮🇹 Italyan tili",
            aliases: &[
                "ita",
                "italian",
                "italyan",
                "italiano",
                "итальянский",
                "italiya",
                "italyancha",
            ],
        },
        LanguageConfig {
            code: "pt",
            name: "Portuguese",
            native_name: "Português",
            label: "🇵🇹 Portugal tili",
            aliases: &[
                "por",
                "portuguese",
                "portugal",
                "português",
                "portugues",
                "португальский",
                "portugalcha",
            ],
        },
        LanguageConfig {
            code: "hi",
            name: "Hindi",
            native_name: "हिन्दी",
            label: "🇮🇳 Hind tili",
            aliases: &[
                "hin", "hindi", "hind", "हिन्दी", "хинди", "hindiston", "hindcha",
            ],
        },
        LanguageConfig {
            code: "pl",
            name: "Polish",
            native_name: "Polski",
            label: "🇵🇱 Polsha tili",
            aliases: &["pol", "polish", "polsha", "polski", "польский", "polcha"],
        },
        LanguageConfig {
            code: "uk",
            name: "Ukrainian",
            native_name: "Українська",
            label: "🇺🇦 Ukraina tili",
            aliases: &[
                "ukr",
                "ukrainian",
                "ukraina",
                "українська",
                "украинский",
                "ukrain",
            ],
        },
        LanguageConfig {
            code: "nl",
            name: "Dutch",
            native_name: "Nederlands",
            label: "🇳🇱 Golland tili",
            aliases: &[
                "dut",
                "dutch",
                "golland",
                "nederlands",
                "голландский",
                "niderland",
            ],
        },
        LanguageConfig {
            code: "sv",
            name: "Swedish",
            native_name: "Svenska",
            label: "🇸🇪 Shved tili",
            aliases: &["swe", "swedish", "shved", "svenska", "шведский", "shvetsiya"],
        },
        LanguageConfig {
            code: "cs",
            name: "Czech",
            native_name: "Čeština",
            label: "🇨🇿 Chex tili",
            aliases: &["cze", "czech", "chex", "čeština", "чешский", "chexiya"],
        },
        LanguageConfig {
            code: "el",
            name: "Greek",
            native_name: "Ελληνικά",
            label: "🇬🇷 Yunon tili",
            aliases: &["gre", "greek", "yunon", "ελληνικά", "греческий", "gretsiya"],
        },
        LanguageConfig {
            code: "he",
            name: "Hebrew",
            native_name: "עברית",
            label: "🇮🇱 Ibroniy tili",
            aliases: &["heb", "hebrew", "ibroniy", "עברית", "иврит", "yahudiy"],
        },
        LanguageConfig {
            code: "th",
            name: "Thai",
            native_name: "ไทย",
            label: "🇹🇭 Tailand tili",
            aliases: &["tha", "thai", "tailand", "ไทย", "тайский", "taycha"],
        },
        LanguageConfig {
            code: "vi",
            name: "Vietnamese",
            native_name: "Tiếng Việt",
            label: "🇻🇳 Vyetnam tili",
            aliases: &[
                "vie",
                "vietnamese",
                "vyetnam",
                "tiếng việt",
                "вьетнамский",
                "vyetnamcha",
            ],
        },
        LanguageConfig {
            code: "id",
            name: "Indonesian",
            native_name: "Bahasa Indonesia",
            label: "🇮🇩 Indoneziya tili",
            aliases: &[
                "ind",
                "indonesian",
                "indoneziya",
                "bahasa indonesia",
                "индонезийский",
                "indonez",
            ],
        },
        LanguageConfig {
            code: "fa",
            name: "Persian",
            native_name: "فارسی",
            label: "🇮🇷 Fors tili",
            aliases: &[
                "per",
                "persian",
                "fors",
                "فارسی",
                "персидский",
                "eron",
                "forscha",
            ],
        },
        LanguageConfig {
            code: "ro",
            name: "Romanian",
            native_name: "Română",
            label: "🇷🇴 Rumin tili",
            aliases: &["rum", "romanian", "rumin", "română", "румынский", "ruminiya"],
        },
        LanguageConfig {
            code: "hu",
            name: "Hungarian",
            native_name: "Magyar",
            label: "🇭🇺 Venger tili",
            aliases: &[
                "hun",
                "hungarian",
                "venger",
                "magyar",
                "венгерский",
                "vengriya",
            ],
        },
        LanguageConfig {
            code: "da",
            name: "Danish",
            native_name: "Dansk",
            label: "🇩🇰 Daniya tili",
            aliases: &["dan", "danish", "daniya", "dansk", "датский", "daniyacha"],
        },
        LanguageConfig {
            code: "fi",
            name: "Finnish",
            native_name: "Suomi",
            label: "🇫🇮 Finlyandiya tili",
            aliases: &[
                "fin",
                "finnish",
                "finlyandiya",
                "suomi",
                "финский",
                "fincha",
            ],
        },
        LanguageConfig {
            code: "no",
            name: "Norwegian",
            native_name: "Norsk",
            label: "🇳🇴 Norvegiya tili",
            aliases: &[
                "nor",
                "norwegian",
                "norvegiya",
                "norsk",
                "норвежский",
                "norvegcha",
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(code: &'static str, aliases: &'static [&'static str]) -> LanguageConfig {
        LanguageConfig {
            code,
            name: code,
            native_name: code,
            label: code,
            aliases,
        }
    }

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        // Should return the same instance (same memory address)
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_default_table_has_thirty_languages() {
        assert_eq!(LanguageRegistry::get().list_all().len(), 30);
    }

    #[test]
    fn test_default_table_has_no_shadowed_aliases() {
        let shadowed = LanguageRegistry::get().shadowed_aliases();
        assert!(shadowed.is_empty(), "unexpected duplicates: {:?}", shadowed);
    }

    #[test]
    fn test_default_table_codes_are_unique() {
        let all = LanguageRegistry::get().list_all();
        let mut codes: Vec<_> = all.iter().map(|lang| lang.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_get_by_code_russian() {
        let config = LanguageRegistry::get().get_by_code("ru").expect("ru exists");
        assert_eq!(config.name, "Russian");
        assert_eq!(config.native_name, "Русский");
        assert_eq!(config.label, "🇷🇺 Rus tili");
    }

    #[test]
    fn test_get_by_code_is_exact() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("RU").is_none());
        assert!(registry.get_by_code("russian").is_none());
        assert!(registry.get_by_code("xx").is_none());
    }

    #[test]
    fn test_resolve_code_english_name_native_name() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.resolve("de").map(|l| l.code), Some("de"));
        assert_eq!(registry.resolve("german").map(|l| l.code), Some("de"));
        assert_eq!(registry.resolve("deutsch").map(|l| l.code), Some("de"));
        assert_eq!(registry.resolve("немецкий").map(|l| l.code), Some("de"));
        assert_eq!(registry.resolve("nemis").map(|l| l.code), Some("de"));
    }

    #[test]
    fn test_resolve_unicode_case_folding() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.resolve("РУССКИЙ").map(|l| l.code), Some("ru"));
        assert_eq!(registry.resolve("TÜRKÇE").map(|l| l.code), Some("tr"));
        assert_eq!(registry.resolve("Español").map(|l| l.code), Some("es"));
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.resolve("  ja\t").map(|l| l.code), Some("ja"));
    }

    #[test]
    fn test_resolve_multi_word_alias_whole() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.resolve("in english").map(|l| l.code), Some("en"));
        assert_eq!(registry.resolve("Tiếng Việt").map(|l| l.code), Some("vi"));
    }

    #[test]
    fn test_resolve_is_exact_not_prefix() {
        let registry = LanguageRegistry::get();
        assert!(registry.resolve("rus salom").is_none());
        assert!(registry.resolve("englis").is_none());
        assert!(registry.resolve("englishman").is_none());
    }

    #[test]
    fn test_resolve_empty_and_unknown() {
        let registry = LanguageRegistry::get();
        assert!(registry.resolve("").is_none());
        assert!(registry.resolve("   ").is_none());
        assert!(registry.resolve("klingon").is_none());
    }

    #[test]
    fn test_code_is_alias_even_if_not_listed() {
        let registry = LanguageRegistry::from_configs(vec![config("xx", &["ex"])]);
        assert_eq!(registry.resolve("XX").map(|l| l.code), Some("xx"));
        assert_eq!(registry.resolve("ex").map(|l| l.code), Some("xx"));
        assert_eq!(registry.alias_count(), 2);
    }

    #[test]
    fn test_duplicate_alias_first_entry_wins() {
        let registry = LanguageRegistry::from_configs(vec![
            config("aa", &["shared", "alpha"]),
            config("bb", &["Shared ", "beta"]),
        ]);

        assert_eq!(registry.resolve("shared").map(|l| l.code), Some("aa"));
        assert_eq!(registry.resolve("beta").map(|l| l.code), Some("bb"));
        assert_eq!(
            registry.shadowed_aliases(),
            &[ShadowedAlias {
                alias: "shared".to_string(),
                kept_by: "aa",
                dropped_from: "bb",
            }]
        );
    }

    #[test]
    fn test_duplicate_alias_resolution_follows_table_order() {
        let registry = LanguageRegistry::from_configs(vec![
            config("bb", &["shared"]),
            config("aa", &["shared"]),
        ]);

        assert_eq!(registry.resolve("shared").map(|l| l.code), Some("bb"));
    }

    #[test]
    fn test_repeated_alias_within_one_language_is_not_shadowed() {
        let registry = LanguageRegistry::from_configs(vec![config("aa", &["aa", "AA", "alpha"])]);
        assert!(registry.shadowed_aliases().is_empty());
        assert_eq!(registry.alias_count(), 2);
    }

    #[test]
    fn test_blank_aliases_are_ignored() {
        let registry = LanguageRegistry::from_configs(vec![config("aa", &["", "  "])]);
        assert!(registry.resolve("").is_none());
        assert_eq!(registry.alias_count(), 1);
    }
}

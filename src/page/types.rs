//! Page and translation map types.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Locale code to translated string.
pub type LocaleMap = BTreeMap<String, String>;

/// Translation key to locale map.
///
/// Both levels are keyed maps, so a key appears at most once per page and a
/// locale at most once per key. Serializes as a plain nested JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<String, LocaleMap>);

impl Translations {
    /// Create an empty translation map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of translation keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no translation keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Locale map for a translation key.
    pub fn get(&self, key: &str) -> Option<&LocaleMap> {
        self.0.get(key)
    }

    /// Translated string for a key in one locale.
    pub fn lookup(&self, key: &str, locale: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|locales| locales.get(locale))
            .map(String::as_str)
    }

    /// Replace the whole locale map of a key.
    pub fn insert(&mut self, key: impl Into<String>, locales: LocaleMap) -> Option<LocaleMap> {
        self.0.insert(key.into(), locales)
    }

    /// Layer `incoming` onto this map at locale granularity.
    ///
    /// New keys are added with their full locale map. For existing keys each
    /// incoming locale overwrites or adds; locales and keys not mentioned in
    /// `incoming` are left as they are.
    pub fn merge(&mut self, incoming: Translations) {
        for (key, locales) in incoming.0 {
            match self.0.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(locales);
                }
                Entry::Occupied(mut slot) => slot.get_mut().extend(locales),
            }
        }
    }

    /// Project every key onto a single locale.
    ///
    /// Keys without a value for `locale`, or whose value is empty, get the
    /// missing-translation placeholder.
    pub fn for_locale(&self, locale: &str) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(key, locales)| {
                let value = locales
                    .get(locale)
                    .filter(|value| !value.is_empty())
                    .cloned()
                    .unwrap_or_else(|| missing_translation(locale));
                (key.clone(), value)
            })
            .collect()
    }
}

impl FromIterator<(String, LocaleMap)> for Translations {
    fn from_iter<I: IntoIterator<Item = (String, LocaleMap)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Placeholder returned for a key that has no value in the requested locale.
pub fn missing_translation(locale: &str) -> String {
    format!("Translation missing for {locale}")
}

/// A named unit of translatable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique page name.
    pub page: String,
    /// Translation key -> locale -> string.
    pub translations: Translations,
    /// Set on every create or update.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Page {
    /// Create a page stamped with the current time.
    pub fn new(page: impl Into<String>, translations: Translations) -> Self {
        Self {
            page: page.into(),
            translations,
            updated_at: timestamp_now(),
        }
    }

    /// Merge `incoming` into this page and refresh `updated_at`.
    pub fn apply(&mut self, incoming: Translations) {
        self.translations.merge(incoming);
        self.updated_at = timestamp_now();
    }

    /// Key -> string view of this page for one locale.
    pub fn for_locale(&self, locale: &str) -> BTreeMap<String, String> {
        self.translations.for_locale(locale)
    }
}

/// Current UTC time at millisecond precision, the resolution of the store's date type.
pub fn timestamp_now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.nanosecond() / 1_000_000 * 1_000_000)
        .unwrap_or(now)
}

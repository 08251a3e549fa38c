//! Quality and language profiles.
//!
//! A [`Profile`] describes which qualities a movie may be grabbed in (an
//! ordered ladder from least to most preferred, with a cutoff) and which
//! languages are wanted. Language preferences come from two places: the
//! profile's own `language` and any positively scored custom formats that
//! carry a non-negated language specification.
//!
//! # Module layout
//!
//! - [`quality`] -- Quality definitions and release-title detection.
//! - [`store`] -- Profile lookup by id.

pub mod quality;
pub mod store;

use serde::{Deserialize, Serialize};

use sceneseek_common::{Error, Language, ProfileId, Result};

pub use quality::Quality;
pub use store::{InMemoryProfileStore, ProfileStore};

/// One rung of a profile's quality ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityItem {
    pub quality: Quality,
    #[serde(default)]
    pub allowed: bool,
}

/// A single matching rule inside a [`CustomFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    #[serde(default)]
    pub name: String,

    /// Invert the match.
    #[serde(default)]
    pub negate: bool,

    #[serde(default)]
    pub required: bool,

    #[serde(flatten)]
    pub kind: SpecificationKind,
}

/// What a [`Specification`] matches on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecificationKind {
    /// Release language, by [`Language`] id. Ids `<= 0` match nothing.
    Language { value: i32 },
    /// Case-insensitive term in the release title.
    ReleaseTitle { term: String },
    /// Exact release quality.
    Quality { value: Quality },
}

/// A named group of specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFormat {
    pub name: String,
    #[serde(default)]
    pub specifications: Vec<Specification>,
}

/// A custom format together with the score a profile assigns to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFormatItem {
    pub format: CustomFormat,
    #[serde(default)]
    pub score: i32,
}

/// A quality and language profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,

    pub name: String,

    /// Quality at which upgrading stops.
    pub cutoff: Quality,

    /// Ordered from least to most preferred.
    pub items: Vec<QualityItem>,

    #[serde(default)]
    pub preferred_tags: Vec<String>,

    /// Preferred language.
    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub format_items: Vec<ProfileFormatItem>,
}

impl Profile {
    /// The most preferred allowed quality: the highest-index allowed item.
    ///
    /// A profile without any allowed item is corrupt data; this is reported
    /// as [`Error::InvalidProfile`] rather than papered over.
    pub fn last_allowed_quality(&self) -> Result<Quality> {
        self.items
            .iter()
            .rev()
            .find(|item| item.allowed)
            .map(|item| item.quality)
            .ok_or_else(|| {
                Error::invalid_profile(format!(
                    "profile '{}' has no allowed quality",
                    self.name
                ))
            })
    }

    /// Ladder position of `quality`, if the profile lists it.
    pub fn quality_index(&self, quality: Quality) -> Option<usize> {
        self.items.iter().position(|item| item.quality == quality)
    }

    /// Whether `quality` is listed and allowed.
    pub fn is_allowed(&self, quality: Quality) -> bool {
        self.items
            .iter()
            .any(|item| item.quality == quality && item.allowed)
    }

    /// Ladder position of the cutoff quality.
    pub fn cutoff_index(&self) -> Result<usize> {
        self.quality_index(self.cutoff).ok_or_else(|| {
            Error::invalid_profile(format!(
                "cutoff {} is not part of profile '{}'",
                self.cutoff, self.name
            ))
        })
    }

    /// Languages whose translated titles should be searched for.
    ///
    /// Scans positively scored format items for non-negated language
    /// specifications with a positive language id, then adds the profile's
    /// own language. Duplicates are dropped; first occurrence wins.
    /// Recomputed on every call.
    pub fn wanted_languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = Vec::new();

        let from_formats = self
            .format_items
            .iter()
            .filter(|item| item.score > 0)
            .flat_map(|item| item.format.specifications.iter())
            .filter(|spec| !spec.negate)
            .filter_map(|spec| match spec.kind {
                SpecificationKind::Language { value } if value > 0 => Language::from_id(value),
                _ => None,
            });

        for language in from_formats.chain(std::iter::once(self.language)) {
            if !languages.contains(&language) {
                languages.push(language);
            }
        }

        languages
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn item(quality: Quality, allowed: bool) -> QualityItem {
        QualityItem { quality, allowed }
    }

    pub(crate) fn language_format(name: &str, language: Language, negate: bool) -> CustomFormat {
        CustomFormat {
            name: name.to_string(),
            specifications: vec![Specification {
                name: format!("{name} language"),
                negate,
                required: false,
                kind: SpecificationKind::Language {
                    value: language.id(),
                },
            }],
        }
    }

    pub(crate) fn profile(items: Vec<QualityItem>) -> Profile {
        Profile {
            id: ProfileId::new(1),
            name: "HD".to_string(),
            cutoff: Quality::Bluray1080p,
            items,
            preferred_tags: Vec::new(),
            language: Language::English,
            format_items: Vec::new(),
        }
    }

    #[test]
    fn last_allowed_quality_picks_highest_index() {
        let p = profile(vec![
            item(Quality::Hdtv720p, true),
            item(Quality::Webdl1080p, true),
            item(Quality::Bluray1080p, false),
            item(Quality::Remux1080p, true),
            item(Quality::Remux2160p, false),
        ]);
        assert_eq!(p.last_allowed_quality().unwrap(), Quality::Remux1080p);
    }

    #[test]
    fn last_allowed_quality_single_allowed_first() {
        let p = profile(vec![item(Quality::Sdtv, true), item(Quality::Dvd, false)]);
        assert_eq!(p.last_allowed_quality().unwrap(), Quality::Sdtv);
    }

    #[test]
    fn last_allowed_quality_fails_without_allowed_items() {
        let p = profile(vec![item(Quality::Sdtv, false), item(Quality::Dvd, false)]);
        let err = p.last_allowed_quality().unwrap_err();
        assert!(matches!(err, Error::InvalidProfile(_)));
        assert!(err.to_string().contains("HD"));

        let empty = profile(Vec::new());
        assert!(empty.last_allowed_quality().is_err());
    }

    #[test]
    fn cutoff_index_and_membership() {
        let p = profile(vec![
            item(Quality::Webdl1080p, true),
            item(Quality::Bluray1080p, true),
            item(Quality::Remux2160p, false),
        ]);
        assert_eq!(p.cutoff_index().unwrap(), 1);
        assert_eq!(p.quality_index(Quality::Remux2160p), Some(2));
        assert!(p.is_allowed(Quality::Webdl1080p));
        assert!(!p.is_allowed(Quality::Remux2160p));
        assert!(!p.is_allowed(Quality::Dvd));

        let mut missing = p.clone();
        missing.cutoff = Quality::Dvd;
        assert!(matches!(
            missing.cutoff_index(),
            Err(Error::InvalidProfile(_))
        ));
    }

    #[test]
    fn wanted_languages_includes_profile_language() {
        let p = profile(vec![item(Quality::Sdtv, true)]);
        assert_eq!(p.wanted_languages(), vec![Language::English]);
    }

    #[test]
    fn wanted_languages_from_positive_formats() {
        let mut p = profile(vec![item(Quality::Sdtv, true)]);
        p.format_items = vec![
            ProfileFormatItem {
                format: language_format("French", Language::French, false),
                score: 10,
            },
            ProfileFormatItem {
                format: language_format("German", Language::German, false),
                score: 0,
            },
            ProfileFormatItem {
                format: language_format("Not Italian", Language::Italian, true),
                score: 50,
            },
            ProfileFormatItem {
                format: language_format("Unknown", Language::Unknown, false),
                score: 5,
            },
            ProfileFormatItem {
                format: language_format("French again", Language::French, false),
                score: 1,
            },
        ];

        assert_eq!(
            p.wanted_languages(),
            vec![Language::French, Language::English]
        );
    }

    #[test]
    fn wanted_languages_ignores_other_specification_kinds() {
        let mut p = profile(vec![item(Quality::Sdtv, true)]);
        p.format_items = vec![ProfileFormatItem {
            format: CustomFormat {
                name: "Mixed".to_string(),
                specifications: vec![
                    Specification {
                        name: "x265".to_string(),
                        negate: false,
                        required: false,
                        kind: SpecificationKind::ReleaseTitle {
                            term: "x265".to_string(),
                        },
                    },
                    Specification {
                        name: "Spanish".to_string(),
                        negate: false,
                        required: true,
                        kind: SpecificationKind::Language {
                            value: Language::Spanish.id(),
                        },
                    },
                ],
            },
            score: 3,
        }];

        assert_eq!(
            p.wanted_languages(),
            vec![Language::Spanish, Language::English]
        );
    }

    #[test]
    fn profile_deserializes_from_toml() {
        let toml_str = r#"
            id = 4
            name = "Multi"
            cutoff = "bluray1080p"
            language = "english"

            [[items]]
            quality = "webdl1080p"
            allowed = true

            [[items]]
            quality = "bluray1080p"
            allowed = true

            [[format_items]]
            score = 25

            [format_items.format]
            name = "French Audio"

            [[format_items.format.specifications]]
            type = "language"
            value = 2
        "#;

        let p: Profile = toml::from_str(toml_str).unwrap();
        assert_eq!(p.id, ProfileId::new(4));
        assert_eq!(p.items.len(), 2);
        assert_eq!(
            p.format_items[0].format.specifications[0].kind,
            SpecificationKind::Language { value: 2 }
        );
        assert_eq!(
            p.wanted_languages(),
            vec![Language::French, Language::English]
        );
    }
}

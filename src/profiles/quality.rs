//! Quality definitions and release-title quality detection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A release quality: a source paired with a resolution.
///
/// Variant order is only a declaration order. The preference ladder used for
/// decisions comes from the profile's item order, never from this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Unknown,
    Sdtv,
    Dvd,
    Webdl480p,
    Hdtv720p,
    Webdl720p,
    Bluray720p,
    Hdtv1080p,
    Webdl1080p,
    Bluray1080p,
    Remux1080p,
    Hdtv2160p,
    Webdl2160p,
    Bluray2160p,
    Remux2160p,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Tv,
    Web,
    Dvd,
    Bluray,
    Remux,
}

impl Quality {
    /// Detect the quality of a release from its title.
    ///
    /// Titles are tokenized on non-alphanumeric characters. A missing
    /// resolution on a DVD or TV source falls back to the SD variants; any
    /// other unrecognized combination yields [`Quality::Unknown`].
    pub fn parse(title: &str) -> Self {
        let tokens: Vec<String> = title
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_ascii_lowercase())
            .collect();

        let has = |needles: &[&str]| tokens.iter().any(|t| needles.contains(&t.as_str()));

        let resolution = if has(&["2160p", "4k", "uhd"]) {
            Some(2160)
        } else if has(&["1080p", "1080i"]) {
            Some(1080)
        } else if has(&["720p"]) {
            Some(720)
        } else if has(&["480p", "576p"]) {
            Some(480)
        } else {
            None
        };

        let source = if has(&["remux"]) {
            Some(Source::Remux)
        } else if has(&["bluray", "bdrip", "brrip"]) {
            Some(Source::Bluray)
        } else if has(&["webdl", "webrip", "web"]) {
            Some(Source::Web)
        } else if has(&["hdtv", "pdtv", "sdtv", "tvrip"]) {
            Some(Source::Tv)
        } else if has(&["dvd", "dvdrip", "dvdr"]) {
            Some(Source::Dvd)
        } else {
            None
        };

        match (source, resolution) {
            (Some(Source::Remux), Some(2160)) => Quality::Remux2160p,
            (Some(Source::Remux), _) => Quality::Remux1080p,
            (Some(Source::Bluray), Some(2160)) => Quality::Bluray2160p,
            (Some(Source::Bluray), Some(1080)) => Quality::Bluray1080p,
            (Some(Source::Bluray), Some(720)) => Quality::Bluray720p,
            (Some(Source::Web), Some(2160)) => Quality::Webdl2160p,
            (Some(Source::Web), Some(1080)) => Quality::Webdl1080p,
            (Some(Source::Web), Some(720)) => Quality::Webdl720p,
            (Some(Source::Web), Some(480)) => Quality::Webdl480p,
            (Some(Source::Tv), Some(2160)) => Quality::Hdtv2160p,
            (Some(Source::Tv), Some(1080)) => Quality::Hdtv1080p,
            (Some(Source::Tv), Some(720)) => Quality::Hdtv720p,
            (Some(Source::Tv), _) => Quality::Sdtv,
            (Some(Source::Dvd), _) => Quality::Dvd,
            _ => Quality::Unknown,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::Sdtv => "SDTV",
            Self::Dvd => "DVD",
            Self::Webdl480p => "WEBDL-480p",
            Self::Hdtv720p => "HDTV-720p",
            Self::Webdl720p => "WEBDL-720p",
            Self::Bluray720p => "Bluray-720p",
            Self::Hdtv1080p => "HDTV-1080p",
            Self::Webdl1080p => "WEBDL-1080p",
            Self::Bluray1080p => "Bluray-1080p",
            Self::Remux1080p => "Remux-1080p",
            Self::Hdtv2160p => "HDTV-2160p",
            Self::Webdl2160p => "WEBDL-2160p",
            Self::Bluray2160p => "Bluray-2160p",
            Self::Remux2160p => "Remux-2160p",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_scene_names() {
        assert_eq!(
            Quality::parse("The.Movie.2019.1080p.BluRay.x264-GRP"),
            Quality::Bluray1080p
        );
        assert_eq!(
            Quality::parse("The Movie 2019 2160p UHD BluRay REMUX HDR HEVC"),
            Quality::Remux2160p
        );
        assert_eq!(
            Quality::parse("Le.Film.2019.FRENCH.720p.WEB-DL.DD5.1"),
            Quality::Webdl720p
        );
        assert_eq!(Quality::parse("Movie.2019.HDTV.x264"), Quality::Sdtv);
        assert_eq!(Quality::parse("Movie.2019.DVDRip.XviD"), Quality::Dvd);
    }

    #[test]
    fn unknown_when_no_source() {
        assert_eq!(Quality::parse("Movie.2019.1080p.x264"), Quality::Unknown);
        assert_eq!(Quality::parse(""), Quality::Unknown);
    }

    #[test]
    fn resolution_tokens_must_be_whole() {
        // "x1080p265" is not a resolution token.
        assert_eq!(Quality::parse("Movie.WEB.x1080p265"), Quality::Unknown);
    }

    #[test]
    fn display_names() {
        assert_eq!(Quality::Bluray1080p.to_string(), "Bluray-1080p");
        assert_eq!(Quality::Webdl2160p.to_string(), "WEBDL-2160p");
    }
}

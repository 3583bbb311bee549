//! Fixed vocabularies used to constrain categorical inputs.
//!
//! Wire spelling matches what the prediction service's encoders were trained
//! on, including the irregular casing of `war`, `other_genres` and
//! `Other_regions`.

use crate::error::VocabularyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of values with a stable wire spelling.
pub trait Vocabulary: Copy + Eq + 'static {
    /// Human-readable vocabulary name used in errors.
    const NAME: &'static str;
    /// Every value, in display order.
    const ALL: &'static [Self];

    /// Wire spelling of the value.
    fn as_str(&self) -> &'static str;

    /// Parse a value from its wire spelling.
    fn parse(value: &str) -> Result<Self, VocabularyError> {
        Self::ALL
            .iter()
            .copied()
            .find(|item| item.as_str() == value)
            .ok_or_else(|| VocabularyError::Unknown {
                vocabulary: Self::NAME,
                value: value.to_string(),
            })
    }
}

/// Movie genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Drama,
    Comedy,
    Thriller,
    Romance,
    Action,
    Crime,
    Adventure,
    Horror,
    Mystery,
    Fantasy,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Family,
    Documentary,
    Animation,
    Sport,
    Musical,
    Western,
    Biography,
    #[serde(rename = "war")]
    War,
    #[serde(rename = "other_genres")]
    Other,
}

impl Vocabulary for Genre {
    const NAME: &'static str = "genre";
    const ALL: &'static [Self] = &[
        Genre::Drama,
        Genre::Comedy,
        Genre::Thriller,
        Genre::Romance,
        Genre::Action,
        Genre::Crime,
        Genre::Adventure,
        Genre::Horror,
        Genre::Mystery,
        Genre::Fantasy,
        Genre::SciFi,
        Genre::Family,
        Genre::Documentary,
        Genre::Animation,
        Genre::Sport,
        Genre::Musical,
        Genre::Western,
        Genre::Biography,
        Genre::War,
        Genre::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Genre::Drama => "Drama",
            Genre::Comedy => "Comedy",
            Genre::Thriller => "Thriller",
            Genre::Romance => "Romance",
            Genre::Action => "Action",
            Genre::Crime => "Crime",
            Genre::Adventure => "Adventure",
            Genre::Horror => "Horror",
            Genre::Mystery => "Mystery",
            Genre::Fantasy => "Fantasy",
            Genre::SciFi => "Sci-Fi",
            Genre::Family => "Family",
            Genre::Documentary => "Documentary",
            Genre::Animation => "Animation",
            Genre::Sport => "Sport",
            Genre::Musical => "Musical",
            Genre::Western => "Western",
            Genre::Biography => "Biography",
            Genre::War => "war",
            Genre::Other => "other_genres",
        }
    }
}

/// Spoken language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    German,
    Italian,
    Spanish,
    Latin,
    Cantonese,
    French,
    Arabic,
    Japanese,
    Mandarin,
    Russian,
    Hebrew,
    Hindi,
    Portuguese,
}

impl Vocabulary for Language {
    const NAME: &'static str = "language";
    const ALL: &'static [Self] = &[
        Language::English,
        Language::German,
        Language::Italian,
        Language::Spanish,
        Language::Latin,
        Language::Cantonese,
        Language::French,
        Language::Arabic,
        Language::Japanese,
        Language::Mandarin,
        Language::Russian,
        Language::Hebrew,
        Language::Hindi,
        Language::Portuguese,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Spanish => "Spanish",
            Language::Latin => "Latin",
            Language::Cantonese => "Cantonese",
            Language::French => "French",
            Language::Arabic => "Arabic",
            Language::Japanese => "Japanese",
            Language::Mandarin => "Mandarin",
            Language::Russian => "Russian",
            Language::Hebrew => "Hebrew",
            Language::Hindi => "Hindi",
            Language::Portuguese => "Portuguese",
        }
    }
}

/// Country or region of origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "United States")]
    UnitedStates,
    France,
    Canada,
    Spain,
    Japan,
    India,
    Mexico,
    Italy,
    Australia,
    Germany,
    #[serde(rename = "United Kingdom")]
    UnitedKingdom,
    China,
    #[serde(rename = "Asian countries")]
    Asian,
    #[serde(rename = "European countries")]
    European,
    #[serde(rename = "Nordic countries")]
    Nordic,
    #[serde(rename = "Other_regions")]
    Other,
}

impl Vocabulary for Country {
    const NAME: &'static str = "country";
    const ALL: &'static [Self] = &[
        Country::UnitedStates,
        Country::France,
        Country::Canada,
        Country::Spain,
        Country::Japan,
        Country::India,
        Country::Mexico,
        Country::Italy,
        Country::Australia,
        Country::Germany,
        Country::UnitedKingdom,
        Country::China,
        Country::Asian,
        Country::European,
        Country::Nordic,
        Country::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Country::UnitedStates => "United States",
            Country::France => "France",
            Country::Canada => "Canada",
            Country::Spain => "Spain",
            Country::Japan => "Japan",
            Country::India => "India",
            Country::Mexico => "Mexico",
            Country::Italy => "Italy",
            Country::Australia => "Australia",
            Country::Germany => "Germany",
            Country::UnitedKingdom => "United Kingdom",
            Country::China => "China",
            Country::Asian => "Asian countries",
            Country::European => "European countries",
            Country::Nordic => "Nordic countries",
            Country::Other => "Other_regions",
        }
    }
}

/// Audience content rating.
///
/// The first four are the categories offered on the form; the MPA codes are
/// accepted as well since the service's rating encoder knows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContentRating {
    #[default]
    #[serde(rename = "All Audiences")]
    AllAudiences,
    Teen,
    Mature,
    Unrated,
    G,
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "PG-13")]
    Pg13,
    R,
    #[serde(rename = "NC-17")]
    Nc17,
}

impl Vocabulary for ContentRating {
    const NAME: &'static str = "content rating";
    const ALL: &'static [Self] = &[
        ContentRating::AllAudiences,
        ContentRating::Teen,
        ContentRating::Mature,
        ContentRating::Unrated,
        ContentRating::G,
        ContentRating::Pg,
        ContentRating::Pg13,
        ContentRating::R,
        ContentRating::Nc17,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ContentRating::AllAudiences => "All Audiences",
            ContentRating::Teen => "Teen",
            ContentRating::Mature => "Mature",
            ContentRating::Unrated => "Unrated",
            ContentRating::G => "G",
            ContentRating::Pg => "PG",
            ContentRating::Pg13 => "PG-13",
            ContentRating::R => "R",
            ContentRating::Nc17 => "NC-17",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContentRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = VocabularyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        <Self as Vocabulary>::parse(value)
    }
}

impl FromStr for Language {
    type Err = VocabularyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        <Self as Vocabulary>::parse(value)
    }
}

impl FromStr for Country {
    type Err = VocabularyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        <Self as Vocabulary>::parse(value)
    }
}

impl FromStr for ContentRating {
    type Err = VocabularyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        <Self as Vocabulary>::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentRating, Country, Genre, Language, Vocabulary};
    use crate::VocabularyError;
    use pretty_assertions::assert_eq;

    /// Serde spelling and `as_str` must never drift apart.
    fn assert_wire_spelling<T>()
    where
        T: Vocabulary + serde::Serialize + std::fmt::Debug,
    {
        for item in T::ALL {
            let encoded = serde_json::to_value(item).expect("encode");
            assert_eq!(encoded, serde_json::Value::String(item.as_str().to_string()));
            assert_eq!(T::parse(item.as_str()).expect("parse"), *item);
        }
    }

    #[test]
    fn serde_matches_wire_spelling() {
        assert_wire_spelling::<Genre>();
        assert_wire_spelling::<Language>();
        assert_wire_spelling::<Country>();
        assert_wire_spelling::<ContentRating>();
    }

    #[test]
    fn vocabulary_sizes_match_form_lists() {
        assert_eq!(Genre::ALL.len(), 20);
        assert_eq!(Language::ALL.len(), 14);
        assert_eq!(Country::ALL.len(), 16);
        assert_eq!(ContentRating::ALL.len(), 9);
    }

    #[test]
    fn irregular_spellings_are_preserved() {
        assert_eq!("war".parse::<Genre>().expect("war"), Genre::War);
        assert_eq!("Sci-Fi".parse::<Genre>().expect("sci-fi"), Genre::SciFi);
        assert_eq!(
            "Other_regions".parse::<Country>().expect("other"),
            Country::Other
        );
        assert_eq!(
            "PG-13".parse::<ContentRating>().expect("pg-13"),
            ContentRating::Pg13
        );
    }

    #[test]
    fn rejects_values_outside_vocabulary() {
        let err = "Klingon".parse::<Language>().unwrap_err();
        assert_eq!(
            err,
            VocabularyError::Unknown {
                vocabulary: "language",
                value: "Klingon".to_string(),
            }
        );
        assert!(serde_json::from_str::<Genre>("\"drama\"").is_err());
    }

    #[test]
    fn default_rating_is_all_audiences() {
        assert_eq!(ContentRating::default().to_string(), "All Audiences");
    }
}

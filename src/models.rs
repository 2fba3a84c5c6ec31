use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder the collaborator sends for missing credits.
const UNKNOWN: &str = "Unknown";

/// Opaque movie identifier. The collaborator sends TMDB ids as numbers, but
/// nothing here does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        MovieId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => MovieId::new(n.to_string()),
            Raw::Text(s) => MovieId::new(s),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Rating {
    Score(f32),
    #[default]
    NotAvailable,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Score(score) => write!(f, "{score:.1}"),
            Rating::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Null(()),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Rating::Score(n as f32),
            Raw::Text(s) => s
                .trim()
                .parse::<f32>()
                .map(Rating::Score)
                .unwrap_or(Rating::NotAvailable),
            Raw::Null(()) => Rating::NotAvailable,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "tmdbID")]
    pub id: MovieId,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "imdbRating", default)]
    pub rating: Rating,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    /// Relevance in `0.0..=1.0`; only search results carry it.
    #[serde(default)]
    pub score: Option<f64>,
}

impl MovieSummary {
    pub fn primary_genre(&self) -> &str {
        self.genre.split(',').next().unwrap_or("").trim()
    }

    pub fn match_percent(&self) -> Option<u32> {
        self.score.map(|s| (s * 100.0).round().clamp(0.0, 100.0) as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    #[serde(rename = "ReleaseDate", default)]
    pub release_date: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Actors", default)]
    pub cast: String,
    #[serde(rename = "ProductionCompanies", default)]
    pub production_companies: String,
    #[serde(rename = "TrailerKey", default)]
    pub trailer_key: Option<String>,
    #[serde(rename = "StreamingProviders", default, deserialize_with = "null_as_empty")]
    pub streaming: Vec<StreamingOffer>,
}

impl MovieDetail {
    pub fn director(&self) -> Option<&str> {
        known(&self.director)
    }

    pub fn cast(&self) -> Option<&str> {
        known(&self.cast)
    }

    pub fn production_companies(&self) -> Option<&str> {
        known(&self.production_companies)
    }

    pub fn has_trailer(&self) -> bool {
        self.trailer_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

fn known(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value == UNKNOWN {
        None
    } else {
        Some(value)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum OfferKind {
    Stream,
    Rent,
    Buy,
    Other,
}

impl From<String> for OfferKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "stream" => OfferKind::Stream,
            "rent" => OfferKind::Rent,
            "buy" => OfferKind::Buy,
            _ => OfferKind::Other,
        }
    }
}

impl OfferKind {
    pub fn label(self) -> &'static str {
        match self {
            OfferKind::Stream => "Stream",
            OfferKind::Rent => "Rent",
            OfferKind::Buy => "Buy",
            OfferKind::Other => "Available",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreamingOffer {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OfferKind,
    pub url: String,
}

/// Search-type tag attached by the collaborator. Display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SearchType {
    Plain,
    Actor,
    Company,
}

impl From<String> for SearchType {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "actor" => SearchType::Actor,
            "company" => SearchType::Company,
            _ => SearchType::Plain,
        }
    }
}

impl SearchType {
    pub fn header_suffix(self) -> &'static str {
        match self {
            SearchType::Plain => "",
            SearchType::Actor => " (Actor Search)",
            SearchType::Company => " (Company Search)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResultSet {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(rename = "searchType", default)]
    pub search_type: Option<SearchType>,
    /// Elapsed seconds reported by the collaborator.
    #[serde(rename = "searchTime", default)]
    pub search_time: Option<f64>,
}

impl SearchResultSet {
    pub fn recommendations(genre: &str, results: Vec<MovieSummary>) -> Self {
        SearchResultSet {
            query: recommendation_description(genre),
            results,
            search_type: None,
            search_time: None,
        }
    }
}

pub fn recommendation_description(genre: &str) -> String {
    format!("{genre} recommendations")
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreShelf {
    pub genre: String,
    pub movies: Vec<MovieSummary>,
}

/// Trending movies grouped by genre, in the order the collaborator sent them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendingCatalog {
    pub shelves: Vec<GenreShelf>,
}

impl TrendingCatalog {
    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }

    pub fn shelf(&self, index: usize) -> Option<&GenreShelf> {
        self.shelves.get(index)
    }
}

impl<'de> Deserialize<'de> for TrendingCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = TrendingCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of genre to movies")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut shelves = Vec::new();
                while let Some((genre, movies)) = map.next_entry::<String, Vec<MovieSummary>>()? {
                    if shelves.iter().any(|s: &GenreShelf| s.genre == genre) {
                        return Err(de::Error::custom(format!("duplicate genre `{genre}`")));
                    }
                    shelves.push(GenreShelf { genre, movies });
                }
                Ok(TrendingCatalog { shelves })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Human label for the genre keys the collaborator uses on the home page.
pub fn genre_display_name(genre: &str) -> String {
    match genre {
        "action" => "Action".to_string(),
        "comedy" => "Comedy".to_string(),
        "drama" => "Drama".to_string(),
        "romance" => "Romance".to_string(),
        "thriller" => "Thriller".to_string(),
        "sci-fi" => "Sci-Fi".to_string(),
        other => other.to_string(),
    }
}

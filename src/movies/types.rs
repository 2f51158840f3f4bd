//! Movie Data Types
//!
//! Records exchanged with API clients and persisted in the document store.
//!
//! - `Movie` is a stored record: an immutable `MovieId` plus independently optional details.
//! - `NewMovie` is the create payload, where the identifier may be omitted.
//! - `MovieUpdate` is the sparse patch payload. Every field is tri-state (absent, null, value)
//!   and resolves into a `MoviePatch` holding only the fields that carry a value.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use mongodb::bson::oid::ObjectId;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Free-form nested map passed through untouched (awards, imdb, tomatoes).
pub type Blob = Map<String, Value>;

/// Unique identifier of a movie record.
///
/// Records imported into the collection carry a 24-hex ObjectId. Any other non-empty string
/// is an opaque key, which is also how identifiers generated here (UUID v4) are held. Both
/// render as plain strings on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovieId {
    Object(ObjectId),
    Key(String),
}

impl MovieId {
    /// Fresh random identifier for a record the client did not name.
    pub fn generate() -> Self {
        Self::Key(Uuid::new_v4().to_string())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("malformed movie id '{0}'")]
pub struct MalformedId(pub String);

impl FromStr for MovieId {
    type Err = MalformedId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(MalformedId(s.to_string()));
        }
        Ok(ObjectId::parse_str(s)
            .map(Self::Object)
            .unwrap_or_else(|_| Self::Key(s.to_string())))
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(oid) => write!(f, "{}", oid.to_hex()),
            Self::Key(key) => f.write_str(key),
        }
    }
}

impl Serialize for MovieId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Release date normalized to a UTC timestamp.
///
/// Accepted as an ISO-8601 string (date, naive datetime or RFC 3339) or as epoch
/// milliseconds. Always emitted as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Released(pub DateTime<Utc>);

impl Released {
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
            return Some(Self(stamp.with_timezone(&Utc)));
        }
        for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
                return Some(Self(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }
}

impl Serialize for Released {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

struct ReleasedVisitor;

impl Visitor<'_> for ReleasedVisitor {
    type Value = Released;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an ISO-8601 date string or epoch milliseconds")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Released, E> {
        Released::parse(v).ok_or_else(|| E::custom(format!("unrecognized date '{}'", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Released, E> {
        Released::from_millis(v).ok_or_else(|| E::custom(format!("timestamp {} out of range", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Released, E> {
        let millis = i64::try_from(v).map_err(E::custom)?;
        self.visit_i64(millis)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Released, E> {
        self.visit_i64(v as i64)
    }
}

impl<'de> Deserialize<'de> for Released {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ReleasedVisitor)
    }
}

/// Every optional attribute of a movie.
///
/// Unset fields are left out of the serialized form, which keeps stored documents and
/// `$set` patches free of nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullplot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<Released>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awards: Option<Blob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastupdated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb: Option<Blob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tomatoes: Option<Blob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_mflix_comments: Option<i64>,
}

macro_rules! overlay_fields {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = Some(value);
            }
        )+
    };
}

impl MovieDetails {
    /// Writes every field set in `patch` over `self`; unset patch fields leave `self` alone.
    pub fn overlay(&mut self, patch: MoviePatch) {
        let patch = patch.0;
        overlay_fields!(self, patch;
            title, plot, fullplot, genres, runtime, cast, poster, languages, released,
            directors, writers, rated, awards, lastupdated, year, imdb, countries, kind,
            tomatoes, num_mflix_comments,
        );
    }
}

/// A stored movie record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id", alias = "id")]
    pub id: MovieId,
    #[serde(flatten)]
    pub details: MovieDetails,
}

/// Create payload; the identifier is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMovie {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<MovieId>,
    #[serde(flatten)]
    pub details: MovieDetails,
}

impl NewMovie {
    pub fn into_movie(self) -> Movie {
        Movie {
            id: self.id.unwrap_or_else(MovieId::generate),
            details: self.details,
        }
    }
}

/// One field of a sparse update.
///
/// `Absent` when the key is missing from the payload, `Null` when it is sent as `null`,
/// `Value` otherwise. Only `Value` is ever written.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Field<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Null, Self::Value))
    }
}

/// Update payload: same fields as `MovieDetails`, each tri-state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieUpdate {
    pub title: Field<String>,
    pub plot: Field<String>,
    pub fullplot: Field<String>,
    pub genres: Field<Vec<String>>,
    pub runtime: Field<i64>,
    pub cast: Field<Vec<String>>,
    pub poster: Field<String>,
    pub languages: Field<Vec<String>>,
    pub released: Field<Released>,
    pub directors: Field<Vec<String>>,
    pub writers: Field<Vec<String>>,
    pub rated: Field<String>,
    pub awards: Field<Blob>,
    pub lastupdated: Field<String>,
    pub year: Field<i64>,
    pub imdb: Field<Blob>,
    pub countries: Field<Vec<String>>,
    #[serde(rename = "type")]
    pub kind: Field<String>,
    pub tomatoes: Field<Blob>,
    pub num_mflix_comments: Field<i64>,
}

impl MovieUpdate {
    /// Keeps only the fields that carry a value. Nulls are treated like absent keys.
    pub fn into_patch(self) -> MoviePatch {
        MoviePatch(MovieDetails {
            title: self.title.into_option(),
            plot: self.plot.into_option(),
            fullplot: self.fullplot.into_option(),
            genres: self.genres.into_option(),
            runtime: self.runtime.into_option(),
            cast: self.cast.into_option(),
            poster: self.poster.into_option(),
            languages: self.languages.into_option(),
            released: self.released.into_option(),
            directors: self.directors.into_option(),
            writers: self.writers.into_option(),
            rated: self.rated.into_option(),
            awards: self.awards.into_option(),
            lastupdated: self.lastupdated.into_option(),
            year: self.year.into_option(),
            imdb: self.imdb.into_option(),
            countries: self.countries.into_option(),
            kind: self.kind.into_option(),
            tomatoes: self.tomatoes.into_option(),
            num_mflix_comments: self.num_mflix_comments.into_option(),
        })
    }
}

/// Resolved sparse patch: the set fields are exactly the ones to write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch(pub MovieDetails);

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.0 == MovieDetails::default()
    }
}

impl From<MovieUpdate> for MoviePatch {
    fn from(update: MovieUpdate) -> Self {
        update.into_patch()
    }
}

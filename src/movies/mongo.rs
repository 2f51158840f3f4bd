//! MongoDB Movie Store
//!
//! Backs `MovieStore` with a MongoDB collection through the official driver.
//!
//! ## Document Mapping
//! - `_id` is an `ObjectId` for imported records and a string for every other key.
//! - `released` is a BSON date.
//! - Free-form maps (awards, imdb, tomatoes) go through relaxed extended JSON, so nested
//!   dates survive as `{"$date": ...}` and convert back to BSON dates on write.

use super::store::{DuplicateId, MovieFilter, MovieSelector, MovieStore};
use super::types::{Movie, MovieDetails, MovieId, MoviePatch};

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{
    ClientOptions, FindOneAndUpdateOptions, FindOptions, ReturnDocument, ServerApi,
    ServerApiVersion,
};
use mongodb::{Client, Collection, Cursor};
use std::collections::HashSet;

pub struct MongoMovieStore {
    collection: Collection<Document>,
}

impl MongoMovieStore {
    /// Connects with the Stable API v1 and binds to `database.collection`.
    ///
    /// The driver connects lazily; the first operation surfaces connection failures.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        let client = Client::with_options(options)?;

        tracing::info!("MongoDB store bound to {}.{}", database, collection);

        Ok(Self {
            collection: client.database(database).collection::<Document>(collection),
        })
    }
}

pub(crate) fn id_to_bson(id: &MovieId) -> Bson {
    match id {
        MovieId::Object(oid) => Bson::ObjectId(*oid),
        MovieId::Key(key) => Bson::String(key.clone()),
    }
}

pub(crate) fn selector_filter(selector: &MovieSelector) -> Document {
    match selector {
        MovieSelector::Id(id) => doc! { "_id": id_to_bson(id) },
        MovieSelector::Title(title) => doc! { "title": title.as_str() },
    }
}

pub(crate) fn filter_document(filter: &MovieFilter) -> Document {
    let mut query = Document::new();
    if let Some(title) = &filter.title {
        query.insert("title", doc! { "$regex": title.pattern(), "$options": "i" });
    }
    if let Some(cast) = &filter.cast {
        query.insert("cast", doc! { "$regex": cast.pattern(), "$options": "i" });
    }
    query
}

/// Serializes the set fields of `details`; unset fields are omitted, not nulled.
pub(crate) fn encode_details(details: &MovieDetails) -> Result<Document> {
    let value = serde_json::to_value(details)?;
    let mut document = match Bson::try_from(value)? {
        Bson::Document(document) => document,
        other => bail!("movie encoded to {:?} instead of a document", other.element_type()),
    };

    if let Some(released) = &details.released {
        document.insert(
            "released",
            Bson::DateTime(bson::DateTime::from_millis(released.timestamp_millis())),
        );
    }

    Ok(document)
}

pub(crate) fn encode_movie(movie: &Movie) -> Result<Document> {
    let mut document = doc! { "_id": id_to_bson(&movie.id) };
    for (key, value) in encode_details(&movie.details)? {
        document.insert(key, value);
    }
    Ok(document)
}

pub(crate) fn decode_movie(mut document: Document) -> Result<Movie> {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => MovieId::Object(oid),
        Some(Bson::String(key)) => MovieId::Key(key),
        Some(other) => bail!("unsupported _id type {:?}", other.element_type()),
        None => bail!("movie document has no _id"),
    };

    if let Some(Bson::DateTime(stamp)) = document.get("released") {
        let millis = stamp.timestamp_millis();
        document.insert("released", Bson::Int64(millis));
    }

    let details: MovieDetails =
        serde_json::from_value(Bson::Document(document).into_relaxed_extjson())
            .map_err(|e| anyhow!("movie {} does not decode: {}", id, e))?;

    Ok(Movie { id, details })
}

/// Server error code of a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

async fn drain(mut cursor: Cursor<Document>) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();
    while cursor.advance().await? {
        movies.push(decode_movie(cursor.deserialize_current()?)?);
    }
    Ok(movies)
}

#[async_trait]
impl MovieStore for MongoMovieStore {
    async fn find(&self, filter: &MovieFilter, limit: Option<usize>) -> Result<Vec<Movie>> {
        let options = FindOptions::builder()
            .limit(limit.map(|l| l as i64))
            .build();
        let cursor = self
            .collection
            .find(filter_document(filter), options)
            .await?;
        drain(cursor).await
    }

    async fn find_one(&self, selector: &MovieSelector) -> Result<Option<Movie>> {
        self.collection
            .find_one(selector_filter(selector), None)
            .await?
            .map(decode_movie)
            .transpose()
    }

    async fn titles(&self) -> Result<HashSet<String>> {
        let options = FindOptions::builder()
            .projection(doc! { "title": 1 })
            .build();
        let mut cursor = self.collection.find(Document::new(), options).await?;

        let mut titles = HashSet::new();
        while cursor.advance().await? {
            let document: Document = cursor.deserialize_current()?;
            if let Ok(title) = document.get_str("title") {
                titles.insert(title.to_string());
            }
        }
        Ok(titles)
    }

    async fn insert(&self, movie: &Movie) -> Result<MovieId> {
        match self.collection.insert_one(encode_movie(movie)?, None).await {
            Ok(_) => Ok(movie.id.clone()),
            Err(e) if is_duplicate_key(&e) => Err(DuplicateId(movie.id.clone()).into()),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_one(
        &self,
        selector: &MovieSelector,
        patch: &MoviePatch,
    ) -> Result<Option<Movie>> {
        let changes = encode_details(&patch.0)?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        self.collection
            .find_one_and_update(selector_filter(selector), doc! { "$set": changes }, options)
            .await?
            .map(decode_movie)
            .transpose()
    }

    async fn delete_one(&self, id: &MovieId) -> Result<u64> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id_to_bson(id) }, None)
            .await?;
        Ok(result.deleted_count)
    }
}

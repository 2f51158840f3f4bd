//! Process Configuration
//!
//! Loaded once at startup from command-line flags, each backed by an environment variable.
//! A `.env` file in the working directory fills in variables the process does not already set.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "reelstore", about = "Movie document and review graph HTTP API")]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    pub bind_addr: SocketAddr,

    /// MongoDB connection string.
    #[arg(long, env = "CONNECTION_STRING", required_unless_present = "in_memory")]
    pub connection_string: Option<String>,

    /// MongoDB database holding the movie collection.
    #[arg(long, env = "DB_NAME", required_unless_present = "in_memory")]
    pub db_name: Option<String>,

    #[arg(long, env = "MOVIES_COLLECTION", default_value = "movies")]
    pub movies_collection: String,

    /// Neo4j Bolt URI (`bolt://`, `neo4j://` or their `+s` / `+ssc` variants).
    #[arg(long, env = "NEO4J_URI", required_unless_present = "in_memory")]
    pub neo4j_uri: Option<String>,

    #[arg(long, env = "NEO4J_USERNAME", required_unless_present = "in_memory")]
    pub neo4j_username: Option<String>,

    #[arg(
        long,
        env = "NEO4J_PASSWORD",
        hide_env_values = true,
        required_unless_present = "in_memory"
    )]
    pub neo4j_password: Option<String>,

    #[arg(long, env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub neo4j_database: String,

    /// Serve from empty in-process stores instead of MongoDB and Neo4j.
    #[arg(long)]
    pub in_memory: bool,
}

/// Connection settings of the MongoDB movie collection.
#[derive(Clone)]
pub struct MongoSettings<'a> {
    pub uri: &'a str,
    pub database: &'a str,
    pub collection: &'a str,
}

/// Connection settings of the Neo4j review graph.
#[derive(Clone)]
pub struct GraphSettings<'a> {
    pub uri: &'a str,
    pub database: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl Config {
    pub fn mongo(&self) -> Result<MongoSettings<'_>> {
        Ok(MongoSettings {
            uri: self
                .connection_string
                .as_deref()
                .context("CONNECTION_STRING is not set")?,
            database: self.db_name.as_deref().context("DB_NAME is not set")?,
            collection: &self.movies_collection,
        })
    }

    pub fn graph(&self) -> Result<GraphSettings<'_>> {
        Ok(GraphSettings {
            uri: self.neo4j_uri.as_deref().context("NEO4J_URI is not set")?,
            database: &self.neo4j_database,
            username: self
                .neo4j_username
                .as_deref()
                .context("NEO4J_USERNAME is not set")?,
            password: self
                .neo4j_password
                .as_deref()
                .context("NEO4J_PASSWORD is not set")?,
        })
    }
}

/// Exports the variables of `path` into the process environment without overriding
/// variables that are already set. Returns the path when a file was loaded and `None` when
/// there is no such file.
pub fn load_env_file(path: &Path) -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(Some(path.to_path_buf())),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // ============================================================
    // ENV FILE TESTS
    // ============================================================

    #[test]
    fn test_env_file_supplies_store_settings() {
        let path = std::env::temp_dir().join(format!("reelstore-{}.env", std::process::id()));
        fs::write(
            &path,
            "CONNECTION_STRING=mongodb://file-host:27017\n\
             DB_NAME=sample_mflix\n\
             NEO4J_URI=bolt://graph.internal:17687\n\
             NEO4J_USERNAME=neo4j\n\
             NEO4J_PASSWORD=secret\n",
        )
        .unwrap();

        assert_eq!(load_env_file(&path).unwrap(), Some(path.clone()));
        fs::remove_file(&path).unwrap();

        let config = Config::try_parse_from(["reelstore"]).unwrap();
        assert_eq!(config.mongo().unwrap().database, "sample_mflix");
        assert_eq!(config.graph().unwrap().uri, "bolt://graph.internal:17687");
    }

    #[test]
    fn test_missing_env_file_is_skipped() {
        let path = std::env::temp_dir().join("reelstore-does-not-exist.env");
        assert_eq!(load_env_file(&path).unwrap(), None);
    }

    #[test]
    fn test_malformed_env_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("reelstore-bad-{}.env", std::process::id()));
        fs::write(&path, "NOT A VALID LINE\n").unwrap();

        let result = load_env_file(&path);
        fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_in_memory_needs_no_store_settings() {
        let config = Config::try_parse_from(["reelstore", "--in-memory"]).unwrap();
        assert!(config.in_memory);
        assert_eq!(config.movies_collection, "movies");
        assert_eq!(config.neo4j_database, "neo4j");
    }
}

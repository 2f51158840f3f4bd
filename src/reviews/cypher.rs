//! Review Graph Statements
//!
//! Cypher issued against the review graph. Every statement is parameterized; user input never
//! lands in the query text. Nodes are returned as their property maps.

/// Each Person with a REVIEWED edge to a Movie titled exactly `$title`, once.
pub const REVIEWERS_OF_MOVIE: &str = "MATCH (p:Person)-[:REVIEWED]->(:Movie {title: $title}) \
     WITH DISTINCT p \
     RETURN properties(p) AS p";

/// Count and collected movies for the person named exactly `$name`.
///
/// Grouping by `p.name` yields no row at all for an unknown person and a row with
/// `count = 0` for a known person without reviews.
pub const MOVIES_REVIEWED_BY: &str = "MATCH (p:Person {name: $name}) \
     OPTIONAL MATCH (p)-[:REVIEWED]->(m:Movie) \
     RETURN p.name AS user, count(m) AS count, collect(properties(m)) AS movies";

/// Movie titles restricted store-side to the `$titles` candidates.
pub const TITLES_AMONG: &str =
    "MATCH (m:Movie) WHERE m.title IN $titles RETURN DISTINCT m.title AS title";

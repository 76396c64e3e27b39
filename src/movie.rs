//! The movie record scraped from a detail page

use serde::{Deserialize, Serialize};

/// Metadata of one movie as shown on its detail page
///
/// `name` is the natural key: saving a record whose name already exists in
/// the collection overwrites every field of the stored document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Cover image URL
    pub cover: Option<String>,

    /// Display name of the movie
    pub name: String,

    /// Category labels in page display order
    pub categories: Vec<String>,

    /// Release date in `YYYY-MM-DD` form
    pub published_time: Option<String>,

    /// Synopsis text
    pub drama: String,

    /// Rating score
    pub score: Option<f64>,
}

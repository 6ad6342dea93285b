//! # resrec Catalog
//!
//! The restaurant dataset behind the recommendation form.
//!
//! Loads the restaurant CSV (`Name, City, Cuisine, Rating, popularity_score`,
//! extra columns ignored) and answers the two questions the web form asks:
//! which cities and cuisines exist, and which restaurants are the best match
//! for a city and a cuisine.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::io;
use std::path::Path;

/// Default number of recommendations returned
pub const DEFAULT_LIMIT: usize = 5;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed row at line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// One row of the dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "City")]
    pub city: String,

    /// Comma separated cuisines, e.g. `"North Indian, Chinese"`
    #[serde(rename = "Cuisine", default)]
    pub cuisine: String,

    #[serde(rename = "Rating", default, deserialize_with = "csv::invalid_option")]
    pub rating: Option<f32>,

    #[serde(rename = "popularity_score", default, deserialize_with = "csv::invalid_option")]
    pub popularity_score: Option<f32>,
}

impl Restaurant {
    fn cuisines(&self) -> impl Iterator<Item = &str> {
        self.cuisine
            .split(", ")
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    fn serves(&self, cuisine_lower: &str) -> bool {
        self.cuisine.to_lowercase().contains(cuisine_lower)
    }
}

/// In-memory restaurant dataset
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        let restaurants = restaurants.into_iter().map(sanitize).collect();
        Self { restaurants }
    }

    /// Load a CSV dataset from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = reader_builder().from_path(path).map_err(|source| CatalogError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_csv(reader)?;
        tracing::info!(
            path = %path.display(),
            restaurants = catalog.len(),
            "restaurant catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a CSV dataset from any reader
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        Self::from_csv(reader_builder().from_reader(reader))
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut restaurants = Vec::new();
        for row in reader.deserialize::<Restaurant>() {
            let restaurant = row.map_err(|source| CatalogError::Row {
                line: source.position().map(|p| p.line()).unwrap_or(0),
                source,
            })?;
            restaurants.push(restaurant);
        }
        Ok(Self::new(restaurants))
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Distinct cities in first-seen order
    pub fn cities(&self) -> Vec<String> {
        distinct(self.restaurants.iter().map(|r| r.city.as_str()))
    }

    /// Distinct individual cuisines in first-seen order
    pub fn cuisines(&self) -> Vec<String> {
        distinct(self.restaurants.iter().flat_map(Restaurant::cuisines))
    }

    /// Best restaurants in `city` serving `cuisine`.
    ///
    /// City must match exactly; cuisine is a case-insensitive substring match.
    /// Ordered by rating then popularity, both descending with missing values
    /// last. Ties keep dataset order.
    pub fn recommend(&self, city: &str, cuisine: &str, limit: usize) -> Vec<&Restaurant> {
        let cuisine_lower = cuisine.to_lowercase();
        let mut matches: Vec<&Restaurant> = self
            .restaurants
            .iter()
            .filter(|r| r.city == city && r.serves(&cuisine_lower))
            .collect();

        matches.sort_by(|a, b| {
            descending(a.rating, b.rating)
                .then_with(|| descending(a.popularity_score, b.popularity_score))
        });
        matches.truncate(limit);
        matches
    }

    /// Names of [`Catalog::recommend`]
    pub fn recommend_names(&self, city: &str, cuisine: &str, limit: usize) -> Vec<String> {
        self.recommend(city, cuisine, limit)
            .into_iter()
            .map(|r| r.name.clone())
            .collect()
    }
}

/// Padded cells would otherwise hide numbers behind `csv::invalid_option`.
fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All);
    builder
}

/// Text cells are trimmed once here so listing and matching see the same strings.
fn sanitize(mut restaurant: Restaurant) -> Restaurant {
    trim_in_place(&mut restaurant.name);
    trim_in_place(&mut restaurant.city);
    trim_in_place(&mut restaurant.cuisine);
    restaurant.rating = restaurant.rating.filter(|v| v.is_finite());
    restaurant.popularity_score = restaurant.popularity_score.filter(|v| v.is_finite());
    restaurant
}

fn trim_in_place(value: &mut String) {
    if value.trim().len() != value.len() {
        *value = value.trim().to_string();
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = AHashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

fn descending(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DATASET: &str = "\
Name,City,Cuisine,Rating,popularity_score,Locality
Spice Route,Delhi,\"North Indian, Chinese\",4.5,120,Saket
Pasta Place,Delhi,\"Italian, Continental\",4.7,80,Saket
Curry House,Delhi,North Indian,4.5,200,Block A
Dim Sum Co,Mumbai,Chinese,4.9,300,Bandra
No Rating Diner,Delhi,North Indian,,500,Block A
Tandoor Nights,Delhi,north indian,3.9,10,Saket
";

    fn catalog() -> Catalog {
        Catalog::from_reader(DATASET.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_ignores_extra_columns() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.restaurants()[4].rating, None);
        assert_eq!(catalog.restaurants()[4].popularity_score, Some(500.0));
    }

    #[test]
    fn test_cities_first_seen_order() {
        assert_eq!(catalog().cities(), vec!["Delhi", "Mumbai"]);
    }

    #[test]
    fn test_cuisines_are_exploded() {
        assert_eq!(
            catalog().cuisines(),
            vec!["North Indian", "Chinese", "Italian", "Continental", "north indian"]
        );
    }

    #[test]
    fn test_recommend_sorted_by_rating_then_popularity() {
        let catalog = catalog();
        let names = catalog.recommend_names("Delhi", "North Indian", DEFAULT_LIMIT);
        assert_eq!(
            names,
            vec!["Curry House", "Spice Route", "Tandoor Nights", "No Rating Diner"]
        );
    }

    #[test]
    fn test_recommend_respects_limit_and_city() {
        let catalog = catalog();
        assert_eq!(catalog.recommend_names("Delhi", "indian", 2).len(), 2);
        assert!(catalog.recommend_names("delhi", "Chinese", 5).is_empty());
        assert_eq!(catalog.recommend_names("Mumbai", "chinese", 5), vec!["Dim Sum Co"]);
    }

    #[test]
    fn test_padded_cells_match_listed_city() {
        let padded = "Name,City,Cuisine,Rating,popularity_score\n\
Haveli ,Delhi , North Indian ,4.2 , 90\n";
        let catalog = Catalog::from_reader(padded.as_bytes()).unwrap();
        let cities = catalog.cities();
        let city = cities[0].as_str();
        assert_eq!(city, "Delhi");
        assert_eq!(catalog.recommend_names(city, "North Indian", 5), vec!["Haveli"]);
        assert_eq!(catalog.restaurants()[0].rating, Some(4.2));
    }

    #[test]
    fn test_new_trims_constructed_rows() {
        let catalog = Catalog::new(vec![Restaurant {
            name: "Haveli".to_string(),
            city: " Delhi ".to_string(),
            cuisine: "North Indian".to_string(),
            rating: Some(4.2),
            popularity_score: Some(f32::NAN),
        }]);
        assert_eq!(catalog.cities(), vec!["Delhi"]);
        assert_eq!(catalog.recommend_names("Delhi", "indian", 5), vec!["Haveli"]);
        assert_eq!(catalog.restaurants()[0].popularity_score, None);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();
        let catalog = Catalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::from_path(dir.path().join("restaurants.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::Open { .. }));
    }

    #[test]
    fn test_malformed_row() {
        let broken = "Name,City\nOnly Name\n";
        assert!(matches!(
            Catalog::from_reader(broken.as_bytes()),
            Err(CatalogError::Row { .. })
        ));
    }
}

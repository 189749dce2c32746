//! Productivity indicator weights, one row per institution.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

/// A row from the `productivity_weights` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductivityWeight {
    pub weight_id: DbId,
    pub institution_id: DbId,
    pub a1: f64,
    pub a2: f64,
    pub a3: f64,
    pub a4: f64,
    pub b1: f64,
    pub b2: f64,
    pub b3: f64,
    pub b4: f64,
    pub c: f64,
    pub sq: f64,
    pub book: f64,
    pub book_chapter: f64,
    pub f1: f64,
    pub f2: f64,
    pub f3: f64,
    pub f4: f64,
    pub f5: f64,
    pub software: String,
    pub patent_granted: String,
    pub patent_not_granted: String,
    pub report: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Weights for one institution. Field names follow the indicator codes
/// (`A1`, `BOOK_CHAPTER`, ...); lower-case names are accepted as well.
#[derive(Debug, Clone, Deserialize)]
pub struct SetProductivityWeight {
    pub institution_id: DbId,
    #[serde(rename = "A1", alias = "a1")]
    pub a1: f64,
    #[serde(rename = "A2", alias = "a2")]
    pub a2: f64,
    #[serde(rename = "A3", alias = "a3")]
    pub a3: f64,
    #[serde(rename = "A4", alias = "a4")]
    pub a4: f64,
    #[serde(rename = "B1", alias = "b1")]
    pub b1: f64,
    #[serde(rename = "B2", alias = "b2")]
    pub b2: f64,
    #[serde(rename = "B3", alias = "b3")]
    pub b3: f64,
    #[serde(rename = "B4", alias = "b4")]
    pub b4: f64,
    #[serde(rename = "C", alias = "c")]
    pub c: f64,
    #[serde(rename = "SQ", alias = "sq")]
    pub sq: f64,
    #[serde(rename = "BOOK", alias = "book")]
    pub book: f64,
    #[serde(rename = "BOOK_CHAPTER", alias = "book_chapter")]
    pub book_chapter: f64,
    #[serde(rename = "F1", alias = "f1", default)]
    pub f1: f64,
    #[serde(rename = "F2", alias = "f2", default)]
    pub f2: f64,
    #[serde(rename = "F3", alias = "f3", default)]
    pub f3: f64,
    #[serde(rename = "F4", alias = "f4", default)]
    pub f4: f64,
    #[serde(rename = "F5", alias = "f5", default)]
    pub f5: f64,
    #[serde(rename = "SOFTWARE", alias = "software")]
    pub software: String,
    #[serde(rename = "PATENT_GRANTED", alias = "patent_granted")]
    pub patent_granted: String,
    #[serde(rename = "PATENT_NOT_GRANTED", alias = "patent_not_granted")]
    pub patent_not_granted: String,
    #[serde(rename = "REPORT", alias = "report")]
    pub report: String,
}

impl SetProductivityWeight {
    /// Numeric weights paired with their indicator codes.
    pub fn numeric(&self) -> [(&'static str, f64); 17] {
        [
            ("A1", self.a1),
            ("A2", self.a2),
            ("A3", self.a3),
            ("A4", self.a4),
            ("B1", self.b1),
            ("B2", self.b2),
            ("B3", self.b3),
            ("B4", self.b4),
            ("C", self.c),
            ("SQ", self.sq),
            ("BOOK", self.book),
            ("BOOK_CHAPTER", self.book_chapter),
            ("F1", self.f1),
            ("F2", self.f2),
            ("F3", self.f3),
            ("F4", self.f4),
            ("F5", self.f5),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductivityWeightFilter {
    pub institution_id: Option<DbId>,
}

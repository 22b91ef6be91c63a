//! Travel offer model

use serde::{Deserialize, Serialize};

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Image file name, served by the static file host
    pub image: String,
}

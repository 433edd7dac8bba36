//! Region model

use serde::{Deserialize, Serialize};

/// Administrative region and the service centers it contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub centers: Vec<String>,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>, centers: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            centers: centers.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn has_center(&self, center: &str) -> bool {
        self.centers.iter().any(|c| c == center)
    }
}

//! Region Table
//!
//! Read-only lookup of regions and the service centers inside them. Loaded
//! once at startup (built-in table or a JSON file) and shared across
//! sessions behind an `Arc`.

mod builtin;

use shared::{ErrorCode, Region};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Region lookup and table loading errors
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Service center {center} is not in region {region}")]
    CenterNotInRegion { region: String, center: String },

    #[error("Invalid region table: {0}")]
    InvalidTable(String),

    #[error("Failed to read region table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse region table: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RegionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegionError::UnknownRegion(_) => ErrorCode::UnknownRegion,
            RegionError::CenterNotInRegion { .. } => ErrorCode::CenterNotInRegion,
            RegionError::InvalidTable(_) | RegionError::Io(_) | RegionError::Parse(_) => {
                ErrorCode::ConfigError
            }
        }
    }
}

/// Static region / service-center table
#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: Vec<Region>,
    /// region id -> position in `regions`
    index: HashMap<String, usize>,
}

impl RegionTable {
    /// Build a table, rejecting empty ids, duplicate ids and regions
    /// without service centers
    pub fn new(regions: Vec<Region>) -> Result<Self, RegionError> {
        if regions.is_empty() {
            return Err(RegionError::InvalidTable("table has no regions".into()));
        }

        let mut index = HashMap::with_capacity(regions.len());
        for (pos, region) in regions.iter().enumerate() {
            if region.id.trim().is_empty() {
                return Err(RegionError::InvalidTable(format!(
                    "region #{pos} has an empty id"
                )));
            }
            if region.centers.is_empty() {
                return Err(RegionError::InvalidTable(format!(
                    "region {} has no service centers",
                    region.id
                )));
            }
            if index.insert(region.id.clone(), pos).is_some() {
                return Err(RegionError::InvalidTable(format!(
                    "duplicate region id {}",
                    region.id
                )));
            }
        }

        Ok(Self { regions, index })
    }

    /// The built-in table of Bangladesh divisions
    pub fn builtin() -> Self {
        let regions: Vec<Region> = builtin::DIVISIONS
            .iter()
            .map(|(id, name, centers)| Region::new(*id, *name, centers))
            .collect();
        let index = regions
            .iter()
            .enumerate()
            .map(|(pos, r)| (r.id.clone(), pos))
            .collect();
        Self { regions, index }
    }

    /// Parse a JSON table: `[{ "id", "name", "centers": [..] }]`
    pub fn from_json(json: &str) -> Result<Self, RegionError> {
        let regions: Vec<Region> = serde_json::from_str(json)?;
        Self::new(regions)
    }

    /// Load a JSON table from disk
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            regions = table.len(),
            "Region table loaded"
        );
        Ok(table)
    }

    /// Service centers of `region`
    pub fn centers_of(&self, region: &str) -> Result<&[String], RegionError> {
        self.region(region).map(|r| r.centers.as_slice())
    }

    pub fn region(&self, id: &str) -> Result<&Region, RegionError> {
        self.index
            .get(id)
            .map(|&pos| &self.regions[pos])
            .ok_or_else(|| RegionError::UnknownRegion(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Check that `center` belongs to `region`
    pub fn check_center(&self, region: &str, center: &str) -> Result<(), RegionError> {
        if self.region(region)?.has_center(center) {
            Ok(())
        } else {
            Err(RegionError::CenterNotInRegion {
                region: region.to_string(),
                center: center.to_string(),
            })
        }
    }

    /// All regions in table order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_table() {
        let table = RegionTable::builtin();
        assert_eq!(table.len(), 8);

        // Same checks as a loaded table
        let revalidated = RegionTable::new(table.regions().to_vec()).unwrap();
        assert_eq!(revalidated.len(), 8);

        let centers = table.centers_of("sylhet").unwrap();
        assert_eq!(centers, ["Habiganj", "Moulvibazar", "Sunamganj", "Sylhet"]);
        assert!(table.check_center("dhaka", "Gazipur").is_ok());
        assert_eq!(table.region("mymensingh").unwrap().name, "Mymensingh Division");
    }

    #[test]
    fn test_unknown_region() {
        let table = RegionTable::builtin();
        let err = table.centers_of("atlantis").unwrap_err();
        assert!(matches!(err, RegionError::UnknownRegion(ref r) if r == "atlantis"));
        assert_eq!(err.code(), ErrorCode::UnknownRegion);
    }

    #[test]
    fn test_center_outside_region() {
        let table = RegionTable::builtin();
        let err = table.check_center("dhaka", "Sylhet").unwrap_err();
        assert!(matches!(err, RegionError::CenterNotInRegion { .. }));
    }

    #[test]
    fn test_rejects_duplicates_and_empty_centers() {
        let dup = r#"[
            {"id": "north", "name": "North", "centers": ["A"]},
            {"id": "north", "name": "North again", "centers": ["B"]}
        ]"#;
        assert!(matches!(
            RegionTable::from_json(dup),
            Err(RegionError::InvalidTable(_))
        ));

        let empty = r#"[{"id": "south", "name": "South", "centers": []}]"#;
        assert!(matches!(
            RegionTable::from_json(empty),
            Err(RegionError::InvalidTable(_))
        ));

        assert!(matches!(
            RegionTable::from_json("[]"),
            Err(RegionError::InvalidTable(_))
        ));
        assert!(matches!(
            RegionTable::from_json("{not json"),
            Err(RegionError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "east", "name": "East", "centers": ["Port", "Hill"]}}]"#
        )
        .unwrap();

        let table = RegionTable::load_from_path(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.contains("east"));
        assert!(!table.contains("dhaka"));
        assert_eq!(table.centers_of("east").unwrap().len(), 2);

        let missing = RegionTable::load_from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(missing, RegionError::Io(_)));
        assert_eq!(missing.code(), ErrorCode::ConfigError);
    }
}

use serde::{Deserialize, Serialize};

use crate::sheets::rows::{Row, SheetRow};
use crate::sheets::SOURCE_TYPES_RANGE;

pub const SOURCE_TYPE_ID_PREFIX: &str = "ST";

/// A medium offered for one source, e.g. "Paid Social" (abbr "PS") on instagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceType {
    pub source_type_id: String,
    pub name: String,
    pub abbr: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSourceType {
    pub name: String,
    pub abbr: String,
    pub source: String,
}

impl SourceType {
    pub fn from_new(source_type_id: String, new: NewSourceType) -> Self {
        Self {
            source_type_id,
            name: new.name,
            abbr: new.abbr,
            source: new.source,
        }
    }

    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.source_type_id.clone(),
            self.name.clone(),
            self.abbr.clone(),
            self.source.clone(),
        ]
    }
}

impl SheetRow for SourceType {
    const RANGE: &'static str = SOURCE_TYPES_RANGE;
    const WIDTH: usize = 4;

    fn decode(_index: usize, row: Row<'_>) -> Result<Self, String> {
        let source_type_id = row.cell(0).trim();
        if source_type_id.is_empty() {
            return Err("source type id is empty".to_string());
        }

        Ok(Self {
            source_type_id: source_type_id.to_string(),
            name: row.cell(1).to_string(),
            abbr: row.cell(2).to_string(),
            source: row.cell(3).to_string(),
        })
    }
}

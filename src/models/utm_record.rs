use serde::{Deserialize, Serialize};

use super::Department;
use crate::sheets::rows::{Row, SheetRow};
use crate::sheets::UTM_RECORDS_RANGE;

/// A generated link as stored in the UTMRecords sheet.
///
/// `utm_id` is derived from the row position (`utm-1`, `utm-2`, ...). It shifts
/// whenever rows above are inserted or removed, so it must not be used as a
/// durable key; `utm_url` is the only column the desk keeps unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtmRecord {
    pub utm_id: String,
    pub url: String,
    pub client: String,
    pub campaign: String,
    pub source: String,
    pub source_type: String,
    pub identifier: String,
    pub utm_url: String,
    pub created_at: String,
    pub department: Department,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUtmRecord {
    pub url: String,
    pub client: String,
    pub campaign: String,
    pub source: String,
    pub source_type: String,
    pub identifier: String,
    pub utm_url: String,
    #[serde(default)]
    pub department: Department,
}

impl NewUtmRecord {
    /// Cells in sheet column order, stamped with `created_at`.
    pub fn to_cells(&self, created_at: &str) -> Vec<String> {
        vec![
            self.url.clone(),
            self.client.clone(),
            self.campaign.clone(),
            self.source.clone(),
            self.source_type.clone(),
            self.identifier.clone(),
            self.utm_url.clone(),
            created_at.to_string(),
            self.department.to_string(),
        ]
    }
}

pub fn positional_utm_id(index: usize) -> String {
    format!("utm-{}", index + 1)
}

impl SheetRow for UtmRecord {
    const RANGE: &'static str = UTM_RECORDS_RANGE;
    const WIDTH: usize = 9;

    fn decode(index: usize, row: Row<'_>) -> Result<Self, String> {
        Ok(Self {
            utm_id: positional_utm_id(index),
            url: row.cell(0).to_string(),
            client: row.cell(1).to_string(),
            campaign: row.cell(2).to_string(),
            source: row.cell(3).to_string(),
            source_type: row.cell(4).to_string(),
            identifier: row.cell(5).to_string(),
            utm_url: row.cell(6).to_string(),
            created_at: row.cell(7).to_string(),
            department: Department::from_cell(row.cell(8)),
        })
    }
}

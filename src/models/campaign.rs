use serde::{Deserialize, Serialize};

use crate::sheets::rows::{Row, SheetRow};
use crate::sheets::CAMPAIGNS_RANGE;

pub const CAMPAIGN_ID_PREFIX: &str = "C";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub campaign_id: String,
    pub name: String,
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub name: String,
    pub client_id: String,
}

impl Campaign {
    pub fn from_new(campaign_id: String, new: NewCampaign) -> Self {
        Self {
            campaign_id,
            name: new.name,
            client_id: new.client_id,
        }
    }

    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.campaign_id.clone(),
            self.name.clone(),
            self.client_id.clone(),
        ]
    }
}

impl SheetRow for Campaign {
    const RANGE: &'static str = CAMPAIGNS_RANGE;
    const WIDTH: usize = 3;

    fn decode(_index: usize, row: Row<'_>) -> Result<Self, String> {
        let campaign_id = row.cell(0).trim();
        if campaign_id.is_empty() {
            return Err("campaign id is empty".to_string());
        }

        Ok(Self {
            campaign_id: campaign_id.to_string(),
            name: row.cell(1).to_string(),
            client_id: row.cell(2).to_string(),
        })
    }
}

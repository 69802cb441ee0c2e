pub mod campaign;
pub mod department;
pub mod source_type;
pub mod utm_record;

pub use campaign::{Campaign, NewCampaign, CAMPAIGN_ID_PREFIX};
pub use department::Department;
pub use source_type::{NewSourceType, SourceType, SOURCE_TYPE_ID_PREFIX};
pub use utm_record::{NewUtmRecord, UtmRecord};

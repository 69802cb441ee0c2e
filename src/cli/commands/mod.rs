pub mod campaign;
pub mod identifier;
pub mod record;
pub mod source_type;
pub mod token;

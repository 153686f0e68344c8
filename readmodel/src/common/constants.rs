// doc constants
pub const DOC_ID: &str = "_id";
pub const MODEL_ID: &str = "id";

// plain form of a store timestamp
pub const TIMESTAMP_SECONDS: &str = "t";
pub const TIMESTAMP_INCREMENT: &str = "i";

use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Province, regency or district from the geographic reference service
#[derive(Object, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
}

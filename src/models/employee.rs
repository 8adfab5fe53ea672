use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::EmployeeStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    /// Filename of the uploaded photo under the uploads directory.
    pub photo: Option<String>,
    pub status: EmployeeStatus,
}

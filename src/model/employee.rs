use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "0b8f6a3e-4d0c-4a7e-9a53-2f3b8f0e6c11",
        "employee_id": "EMP-001",
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    /// Store-assigned key.
    #[schema(example = "0b8f6a3e-4d0c-4a7e-9a53-2f3b8f0e6c11")]
    pub id: String,

    /// Uppercased employee identifier.
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

/// A validated registration, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl NewEmployee {
    pub fn into_employee(self, id: String) -> Employee {
        Employee {
            id,
            employee_id: self.employee_id,
            full_name: self.full_name,
            email: self.email,
            department: self.department,
        }
    }
}

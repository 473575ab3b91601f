//! Employee Model

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::{self, parse_timestamp};
use crate::validation::{
    FieldErrors, MAX_NAME_LEN, MAX_ORG_TEXT_LEN, MAX_PHONE_LEN, Validate, validate_email,
    validate_optional_text, validate_positive, validate_required_text, validate_timestamp,
};

/// Default and maximum page size for list/search
pub const MAX_PAGE_SIZE: i64 = 100;

/// Employee entity (one row of `employees`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub hire_date: NaiveDateTime,
    /// Set by the database on insert
    pub created_at: DateTime<Utc>,
    /// Set by the database on insert and refreshed on every update
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Employee(id={}, name={} {}, position={})",
            self.id, self.first_name, self.last_name, self.position
        )
    }
}

/// Create employee payload
///
/// `hire_date` is kept as sent and checked by [`Validate`], so a bad date is
/// reported alongside every other offending field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub hire_date: String,
}

impl EmployeeCreate {
    /// Parsed `hire_date`
    pub fn parsed_hire_date(&self) -> Result<NaiveDateTime, FieldErrors> {
        parse_hire_date(&self.hire_date)
    }
}

impl Validate for EmployeeCreate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_required_text(&mut errors, "first_name", &self.first_name, MAX_NAME_LEN);
        validate_required_text(&mut errors, "last_name", &self.last_name, MAX_NAME_LEN);
        validate_email(&mut errors, "email", &self.email);
        validate_optional_text(&mut errors, "phone", self.phone.as_deref(), MAX_PHONE_LEN);
        validate_required_text(&mut errors, "position", &self.position, MAX_ORG_TEXT_LEN);
        validate_required_text(&mut errors, "department", &self.department, MAX_ORG_TEXT_LEN);
        validate_positive(&mut errors, "salary", self.salary);
        validate_timestamp(&mut errors, "hire_date", &self.hire_date);
        errors.into_result()
    }
}

fn parse_hire_date(raw: &str) -> Result<NaiveDateTime, FieldErrors> {
    parse_timestamp(raw).ok_or_else(|| {
        let mut errors = FieldErrors::new();
        validate_timestamp(&mut errors, "hire_date", raw);
        errors
    })
}

/// Update employee payload (PUT and PATCH)
///
/// Absent fields are left untouched. `null` is treated as absent, except
/// for `phone` where an explicit `null` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
}

impl EmployeeUpdate {
    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.position.is_none()
            && self.department.is_none()
            && self.salary.is_none()
            && self.hire_date.is_none()
    }

    /// Parsed `hire_date`, `None` when not supplied
    pub fn parsed_hire_date(&self) -> Result<Option<NaiveDateTime>, FieldErrors> {
        self.hire_date.as_deref().map(parse_hire_date).transpose()
    }

    /// The new email, if one was supplied and differs from `current`
    pub fn email_change(&self, current: &str) -> Option<&str> {
        self.email.as_deref().filter(|email| *email != current)
    }
}

impl Validate for EmployeeUpdate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(v) = &self.first_name {
            validate_required_text(&mut errors, "first_name", v, MAX_NAME_LEN);
        }
        if let Some(v) = &self.last_name {
            validate_required_text(&mut errors, "last_name", v, MAX_NAME_LEN);
        }
        if let Some(v) = &self.email {
            validate_email(&mut errors, "email", v);
        }
        if let Some(phone) = &self.phone {
            validate_optional_text(&mut errors, "phone", phone.as_deref(), MAX_PHONE_LEN);
        }
        if let Some(v) = &self.position {
            validate_required_text(&mut errors, "position", v, MAX_ORG_TEXT_LEN);
        }
        if let Some(v) = &self.department {
            validate_required_text(&mut errors, "department", v, MAX_ORG_TEXT_LEN);
        }
        if let Some(v) = self.salary {
            validate_positive(&mut errors, "salary", v);
        }
        if let Some(v) = &self.hire_date {
            validate_timestamp(&mut errors, "hire_date", v);
        }
        errors.into_result()
    }
}

/// Employee response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub hire_date: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            first_name: e.first_name,
            last_name: e.last_name,
            email: e.email,
            phone: e.phone,
            position: e.position,
            department: e.department,
            salary: e.salary,
            hire_date: e.hire_date,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Query parameters for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_limit() -> i64 {
    MAX_PAGE_SIZE
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: MAX_PAGE_SIZE,
            search: None,
        }
    }
}

impl ListParams {
    /// Search term, ignoring an empty `search=`
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// 1-indexed page derived from skip/limit, saturating at `i64::MAX`
    pub fn page(&self) -> i64 {
        (self.skip / self.limit).saturating_add(1)
    }
}

impl Validate for ListParams {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.skip < 0 {
            errors.add("skip", "skip must be greater than or equal to 0");
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.limit) {
            errors.add(
                "limit",
                format!("limit must be between 1 and {MAX_PAGE_SIZE}"),
            );
        }
        errors.into_result()
    }
}

/// Paginated list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeListResponse {
    /// Total number of employees (not narrowed by `search`)
    pub total: i64,
    pub employees: Vec<EmployeeResponse>,
    pub page: i64,
    /// Requested `limit`, not the number of rows returned
    pub page_size: i64,
}

impl EmployeeListResponse {
    pub fn new(total: i64, employees: Vec<Employee>, params: &ListParams) -> Self {
        Self {
            total,
            employees: employees.into_iter().map(Into::into).collect(),
            page: params.page(),
            page_size: params.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_json() -> serde_json::Value {
        serde_json::json!({
            "first_name": "Ana",
            "last_name": "Ruiz",
            "email": "ana@x.com",
            "position": "Dev",
            "department": "Eng",
            "salary": 50000,
            "hire_date": "2024-01-01T00:00:00"
        })
    }

    fn sample_employee() -> Employee {
        let now = Utc::now();
        Employee {
            id: 7,
            first_name: "Ana".into(),
            last_name: "Ruiz".into(),
            email: "ana@x.com".into(),
            phone: None,
            position: "Dev".into(),
            department: "Eng".into(),
            salary: 50000.0,
            hire_date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn create_payload_parses_and_validates() {
        let payload: EmployeeCreate = serde_json::from_value(create_json()).unwrap();
        assert_eq!(payload.first_name, "Ana");
        assert_eq!(payload.salary, 50000.0);
        assert_eq!(payload.phone, None);
        assert!(payload.validate().is_ok());
        assert_eq!(
            payload.parsed_hire_date().unwrap().to_string(),
            "2024-01-01 00:00:00"
        );
    }

    #[test]
    fn create_payload_reports_every_bad_field() {
        let mut json = create_json();
        json["first_name"] = "".into();
        json["email"] = "nope".into();
        json["salary"] = 0.into();
        json["phone"] = "1".repeat(21).into();

        let payload: EmployeeCreate = serde_json::from_value(json).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["email", "first_name", "phone", "salary"]);
    }

    #[test]
    fn create_payload_requires_fields() {
        let mut json = create_json();
        json.as_object_mut().unwrap().remove("last_name");
        assert!(serde_json::from_value::<EmployeeCreate>(json).is_err());
    }

    #[test]
    fn bad_hire_date_is_reported_with_other_fields() {
        let mut json = create_json();
        json["hire_date"] = "yesterday".into();
        json["first_name"] = "".into();
        json["email"] = "nope".into();

        let payload: EmployeeCreate = serde_json::from_value(json).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["email", "first_name", "hire_date"]);
        assert!(payload.parsed_hire_date().unwrap_err().contains("hire_date"));
    }

    #[test]
    fn update_payload_skips_unset_fields_when_serialized() {
        let update: EmployeeUpdate = serde_json::from_str(r#"{"salary": 55000}"#).unwrap();
        assert_eq!(update.salary, Some(55000.0));
        assert!(!update.is_empty());

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "salary": 55000.0 }));
    }

    #[test]
    fn update_payload_phone_null_clears() {
        let update: EmployeeUpdate = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert_eq!(update.phone, Some(None));
        assert!(update.validate().is_ok());

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "phone": null }));
    }

    #[test]
    fn update_payload_rejects_blank_present_fields() {
        let update: EmployeeUpdate =
            serde_json::from_str(r#"{"first_name": "", "salary": -5}"#).unwrap();
        let errors = update.validate().unwrap_err();
        assert!(errors.contains("first_name"));
        assert!(errors.contains("salary"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn update_hire_date_is_optional_but_checked() {
        let update: EmployeeUpdate = serde_json::from_str(r#"{"salary": 1}"#).unwrap();
        assert_eq!(update.parsed_hire_date().unwrap(), None);

        let update: EmployeeUpdate =
            serde_json::from_str(r#"{"hire_date": "2023-06-01"}"#).unwrap();
        assert!(update.validate().is_ok());
        assert_eq!(
            update.parsed_hire_date().unwrap().unwrap().to_string(),
            "2023-06-01 00:00:00"
        );

        let update: EmployeeUpdate =
            serde_json::from_str(r#"{"hire_date": "soon"}"#).unwrap();
        assert!(update.validate().unwrap_err().contains("hire_date"));
    }

    #[test]
    fn empty_update() {
        let update: EmployeeUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn email_change_ignores_same_email() {
        let update = EmployeeUpdate {
            email: Some("ana@x.com".into()),
            ..Default::default()
        };
        assert_eq!(update.email_change("ana@x.com"), None);
        assert_eq!(update.email_change("old@x.com"), Some("ana@x.com"));
        assert_eq!(EmployeeUpdate::default().email_change("ana@x.com"), None);
    }

    #[test]
    fn display_identity() {
        assert_eq!(
            sample_employee().to_string(),
            "Employee(id=7, name=Ana Ruiz, position=Dev)"
        );
    }

    #[test]
    fn response_serializes_hire_date_naive() {
        let json = serde_json::to_value(EmployeeResponse::from(sample_employee())).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["hire_date"], "2024-01-01T00:00:00");
        assert!(json["phone"].is_null());
    }

    #[test]
    fn list_params_defaults_and_page() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 100);
        assert_eq!(params.page(), 1);

        let params = ListParams {
            skip: 20,
            limit: 10,
            search: Some(String::new()),
        };
        assert_eq!(params.page(), 3);
        assert_eq!(params.search_term(), None);

        let params = ListParams {
            skip: 5,
            limit: 10,
            search: None,
        };
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn page_saturates_at_max_skip() {
        let params = ListParams {
            skip: i64::MAX,
            limit: 1,
            search: None,
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.page(), i64::MAX);

        let response = EmployeeListResponse::new(0, Vec::new(), &params);
        assert_eq!(response.page, i64::MAX);
        assert_eq!(response.page_size, 1);
    }

    #[test]
    fn list_params_bounds() {
        let bad = ListParams {
            skip: -1,
            limit: 101,
            search: None,
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.contains("skip"));
        assert!(errors.contains("limit"));

        let zero = ListParams {
            limit: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn list_response_uses_requested_limit_as_page_size() {
        let params = ListParams {
            skip: 4,
            limit: 2,
            search: None,
        };
        let response = EmployeeListResponse::new(5, vec![sample_employee()], &params);
        assert_eq!(response.total, 5);
        assert_eq!(response.employees.len(), 1);
        assert_eq!(response.page, 3);
        assert_eq!(response.page_size, 2);
    }
}

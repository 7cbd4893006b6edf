// Wire representations for the menus resource.
//
// Two projections: Summary for list responses, Detail for single-record
// responses. Input parsing accepts only the writable fields; `id`, the owner
// reference, and `created_at` appearing in a payload are ignored rather than
// rejected.
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

use crate::database::models::menu::Menu;
use crate::error::ApiError;

/// List projection: no description, no timestamps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuSummary {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
}

/// Single-record projection: summary fields plus description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuDetail {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
}

impl From<&Menu> for MenuSummary {
    fn from(menu: &Menu) -> Self {
        Self {
            id: menu.id,
            title: menu.title.clone(),
            time_minutes: menu.time_minutes,
            price: menu.price,
        }
    }
}

impl From<&Menu> for MenuDetail {
    fn from(menu: &Menu) -> Self {
        Self {
            id: menu.id,
            title: menu.title.clone(),
            time_minutes: menu.time_minutes,
            price: menu.price,
            description: menu.description.clone(),
        }
    }
}

/// Complete writable field set, used for create and full update
#[derive(Debug, Clone, PartialEq)]
pub struct MenuDraft {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
}

/// Partial update: only fields present in the payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuPatch {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

impl MenuPatch {
    /// Merge this patch over an existing record's writable fields
    pub fn apply(&self, menu: &Menu) -> MenuDraft {
        MenuDraft {
            title: self.title.clone().unwrap_or_else(|| menu.title.clone()),
            time_minutes: self.time_minutes.unwrap_or(menu.time_minutes),
            price: self.price.unwrap_or(menu.price),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| menu.description.clone()),
        }
    }
}

/// Parse a create / full-update payload. All required fields must be present
/// and well-formed; failures are reported per field.
pub fn draft_from_payload(payload: &Value) -> Result<MenuDraft, ApiError> {
    let obj = require_object(payload)?;
    let mut field_errors = HashMap::new();

    let title = required_field(obj, "title", parse_title, &mut field_errors);
    let time_minutes = required_field(obj, "time_minutes", parse_time_minutes, &mut field_errors);
    let price = required_field(obj, "price", parse_price, &mut field_errors);

    let description = match obj.get("description") {
        None | Some(Value::Null) => Some(String::new()),
        Some(value) => match parse_description(value) {
            Ok(description) => Some(description),
            Err(message) => {
                field_errors.insert("description".to_string(), message);
                None
            }
        },
    };

    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid menu payload", Some(field_errors)));
    }

    Ok(MenuDraft {
        title: title.unwrap(),
        time_minutes: time_minutes.unwrap(),
        price: price.unwrap(),
        description: description.unwrap(),
    })
}

/// Parse a partial-update payload. Only keys present in the payload are
/// touched; each present value must still be well-formed.
pub fn patch_from_payload(payload: &Value) -> Result<MenuPatch, ApiError> {
    let obj = require_object(payload)?;
    let mut field_errors = HashMap::new();
    let mut patch = MenuPatch::default();

    if let Some(value) = obj.get("title") {
        match parse_title(value) {
            Ok(title) => patch.title = Some(title),
            Err(message) => {
                field_errors.insert("title".to_string(), message);
            }
        }
    }
    if let Some(value) = obj.get("time_minutes") {
        match parse_time_minutes(value) {
            Ok(time_minutes) => patch.time_minutes = Some(time_minutes),
            Err(message) => {
                field_errors.insert("time_minutes".to_string(), message);
            }
        }
    }
    if let Some(value) = obj.get("price") {
        match parse_price(value) {
            Ok(price) => patch.price = Some(price),
            Err(message) => {
                field_errors.insert("price".to_string(), message);
            }
        }
    }
    if let Some(value) = obj.get("description") {
        match value {
            Value::Null => patch.description = Some(String::new()),
            other => match parse_description(other) {
                Ok(description) => patch.description = Some(description),
                Err(message) => {
                    field_errors.insert("description".to_string(), message);
                }
            },
        }
    }

    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid menu payload", Some(field_errors)));
    }

    Ok(patch)
}

fn require_object(payload: &Value) -> Result<&Map<String, Value>, ApiError> {
    payload
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))
}

fn required_field<T>(
    obj: &Map<String, Value>,
    field: &str,
    parse: fn(&Value) -> Result<T, String>,
    field_errors: &mut HashMap<String, String>,
) -> Option<T> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            field_errors.insert(field.to_string(), "This field is required".to_string());
            None
        }
        Some(value) => match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                field_errors.insert(field.to_string(), message);
                None
            }
        },
    }
}

fn parse_title(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => Err("Must not be blank".to_string()),
        _ => Err("Must be a string".to_string()),
    }
}

fn parse_time_minutes(value: &Value) -> Result<i32, String> {
    let minutes = match value {
        Value::Number(n) => n.as_i64().ok_or("Must be an integer")?,
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| "Must be an integer".to_string())?,
        _ => return Err("Must be an integer".to_string()),
    };

    if minutes < 0 {
        return Err("Must be a non-negative integer".to_string());
    }
    i32::try_from(minutes).map_err(|_| "Must be less than 2147483648".to_string())
}

fn parse_price(value: &Value) -> Result<Decimal, String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err("Must be a decimal number".to_string()),
    };

    let mut price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| "Must be a decimal number".to_string())?;

    if price.scale() > 2 {
        return Err("No more than 2 decimal places".to_string());
    }
    if price.abs() >= Decimal::new(100_000_000, 0) {
        return Err("Must be less than 100000000".to_string());
    }

    // Stable two-decimal wire form, e.g. "15.00"
    price.rescale(2);
    Ok(price)
}

fn parse_description(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err("Must be a string".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn sample_menu() -> Menu {
        Menu {
            id: 7,
            owner_id: Uuid::new_v4(),
            title: "Sample menu".to_string(),
            time_minutes: 30,
            price: Decimal::new(1500, 2),
            description: "This is a sample menu.".to_string(),
            created_at: Utc::now(),
        }
    }

    fn field_errors(err: ApiError) -> HashMap<String, String> {
        match err {
            ApiError::ValidationError { field_errors, .. } => field_errors.unwrap(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn summary_projects_exactly_the_list_fields() {
        let menu = sample_menu();
        let value = serde_json::to_value(MenuSummary::from(&menu)).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["id", "price", "time_minutes", "title"]);
    }

    #[test]
    fn detail_adds_only_description() {
        let menu = sample_menu();
        let value = serde_json::to_value(MenuDetail::from(&menu)).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj["description"], json!("This is a sample menu."));
        assert!(!obj.contains_key("created_at"));
        assert!(!obj.contains_key("owner_id"));
    }

    #[test]
    fn price_serializes_with_two_decimal_places() {
        let menu = sample_menu();
        let value = serde_json::to_value(MenuSummary::from(&menu)).unwrap();
        assert_eq!(value["price"], json!("15.00"));
    }

    #[test]
    fn draft_requires_title_time_and_price() {
        let err = draft_from_payload(&json!({})).unwrap_err();
        let errors = field_errors(err);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors["title"], "This field is required");
        assert_eq!(errors["time_minutes"], "This field is required");
        assert_eq!(errors["price"], "This field is required");
    }

    #[test]
    fn draft_defaults_description_to_empty() {
        let draft = draft_from_payload(&json!({
            "title": "New menu",
            "time_minutes": 60,
            "price": "20.00",
        }))
        .unwrap();

        assert_eq!(draft.description, "");
        assert_eq!(draft.time_minutes, 60);
        assert_eq!(draft.price, Decimal::new(2000, 2));
    }

    #[test]
    fn draft_rejects_negative_duration() {
        let err = draft_from_payload(&json!({
            "title": "New menu",
            "time_minutes": -5,
            "price": "20.00",
        }))
        .unwrap_err();

        assert_eq!(field_errors(err)["time_minutes"], "Must be a non-negative integer");
    }

    #[test]
    fn draft_rejects_non_numeric_price() {
        let err = draft_from_payload(&json!({
            "title": "New menu",
            "time_minutes": 60,
            "price": "twenty",
        }))
        .unwrap_err();

        assert_eq!(field_errors(err)["price"], "Must be a decimal number");
    }

    #[test]
    fn draft_rejects_overlong_price_fraction() {
        let err = draft_from_payload(&json!({
            "title": "New menu",
            "time_minutes": 60,
            "price": "19.999",
        }))
        .unwrap_err();

        assert_eq!(field_errors(err)["price"], "No more than 2 decimal places");
    }

    #[test]
    fn draft_accepts_coercible_scalar_forms() {
        // Form-style clients send numbers as strings and prices as numbers
        let draft = draft_from_payload(&json!({
            "title": "New menu",
            "time_minutes": "45",
            "price": 12.5,
        }))
        .unwrap();

        assert_eq!(draft.time_minutes, 45);
        assert_eq!(draft.price.to_string(), "12.50");
    }

    #[test]
    fn draft_ignores_server_controlled_fields() {
        let draft = draft_from_payload(&json!({
            "id": 999,
            "owner_id": Uuid::new_v4(),
            "created_at": "2020-01-01T00:00:00Z",
            "title": "New menu",
            "time_minutes": 60,
            "price": "20.00",
        }))
        .unwrap();

        assert_eq!(draft.title, "New menu");
    }

    #[test]
    fn draft_rejects_non_object_payload() {
        let err = draft_from_payload(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn patch_touches_only_present_fields() {
        let menu = sample_menu();
        let patch = patch_from_payload(&json!({ "title": "Updated menu" })).unwrap();
        let draft = patch.apply(&menu);

        assert_eq!(draft.title, "Updated menu");
        assert_eq!(draft.time_minutes, menu.time_minutes);
        assert_eq!(draft.price, menu.price);
        assert_eq!(draft.description, menu.description);
    }

    #[test]
    fn empty_patch_preserves_every_field() {
        let menu = sample_menu();
        let draft = patch_from_payload(&json!({})).unwrap().apply(&menu);

        assert_eq!(draft.title, menu.title);
        assert_eq!(draft.time_minutes, menu.time_minutes);
        assert_eq!(draft.price, menu.price);
        assert_eq!(draft.description, menu.description);
    }

    #[test]
    fn patch_with_owner_field_changes_nothing() {
        let menu = sample_menu();
        let patch = patch_from_payload(&json!({ "owner_id": Uuid::new_v4() })).unwrap();

        assert_eq!(patch, MenuPatch::default());
        assert_eq!(patch.apply(&menu).title, menu.title);
    }

    #[test]
    fn patch_still_validates_present_fields() {
        let err = patch_from_payload(&json!({ "time_minutes": "soon" })).unwrap_err();
        assert_eq!(field_errors(err)["time_minutes"], "Must be an integer");
    }
}

//! Records managed through the dashboard.

use jiff::Timestamp;
use serde::{Deserialize, de::DeserializeOwned};

use crate::form::{Draft, FieldKind, FieldSpec};

const RECORD_STATUSES: &[&str] = &["active", "inactive"];
const ORDER_STATUSES: &[&str] = &["pending", "processing", "shipped", "delivered", "cancelled"];

/// A REST collection the dashboard can list and edit.
pub trait Resource: Clone + PartialEq + DeserializeOwned + 'static {
    /// Collection path below the role scope, e.g. `brands`.
    const ENDPOINT: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;
    const DESCRIPTION: &'static str;
    /// Form fields for create and edit.
    const FIELDS: &'static [FieldSpec];
    const COLUMNS: &'static [&'static str];
    const CAN_CREATE: bool = true;

    fn id(&self) -> &str;

    /// One string per entry of [`Resource::COLUMNS`].
    fn cells(&self) -> Vec<String>;

    /// Short name used in confirmations.
    fn label(&self) -> String;

    /// Form values seeded from this record.
    fn draft(&self) -> Draft;

    fn filters() -> impl Iterator<Item = &'static FieldSpec> {
        Self::FIELDS.iter().filter(|f| f.filterable)
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn dash(value: &str) -> String {
    if value.is_empty() {
        "—".to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Resource for Brand {
    const ENDPOINT: &'static str = "brands";
    const SINGULAR: &'static str = "Brand";
    const PLURAL: &'static str = "Brands";
    const DESCRIPTION: &'static str = "Manufacturers carried in the catalog.";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name", FieldKind::Text).filterable(),
        FieldSpec::optional("description", "Description", FieldKind::TextArea),
        FieldSpec::optional("status", "Status", FieldKind::Select(RECORD_STATUSES)).filterable(),
    ];
    const COLUMNS: &'static [&'static str] = &["Name", "Description", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            dash(&text(&self.description)),
            dash(&text(&self.status)),
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn draft(&self) -> Draft {
        Draft::from_pairs([
            ("name", self.name.clone()),
            ("description", text(&self.description)),
            ("status", text(&self.status)),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Resource for Model {
    const ENDPOINT: &'static str = "models";
    const SINGULAR: &'static str = "Model";
    const PLURAL: &'static str = "Models";
    const DESCRIPTION: &'static str = "Product models and the brand they belong to.";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name", FieldKind::Text).filterable(),
        FieldSpec::required("brand", "Brand", FieldKind::Text).filterable(),
        FieldSpec::optional("year", "Year", FieldKind::Number),
        FieldSpec::optional("status", "Status", FieldKind::Select(RECORD_STATUSES)).filterable(),
    ];
    const COLUMNS: &'static [&'static str] = &["Name", "Brand", "Year", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            dash(&text(&self.brand)),
            self.year.map(|y| y.to_string()).unwrap_or_else(|| dash("")),
            dash(&text(&self.status)),
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn draft(&self) -> Draft {
        Draft::from_pairs([
            ("name", self.name.clone()),
            ("brand", text(&self.brand)),
            ("year", self.year.map(|y| y.to_string()).unwrap_or_default()),
            ("status", text(&self.status)),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Resource for User {
    const ENDPOINT: &'static str = "users";
    const SINGULAR: &'static str = "User";
    const PLURAL: &'static str = "Users";
    const DESCRIPTION: &'static str = "Customer accounts.";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Name", FieldKind::Text).filterable(),
        FieldSpec::required("email", "Email", FieldKind::Email).filterable(),
        FieldSpec::optional("mobile", "Mobile", FieldKind::Tel),
        FieldSpec::optional("status", "Status", FieldKind::Select(RECORD_STATUSES)).filterable(),
    ];
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Mobile", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            dash(&self.email),
            dash(&text(&self.mobile)),
            dash(&text(&self.status)),
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn draft(&self) -> Draft {
        Draft::from_pairs([
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("mobile", text(&self.mobile)),
            ("status", text(&self.status)),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Order {
    pub fn number(&self) -> &str {
        self.order_number.as_deref().unwrap_or(&self.id)
    }
}

impl Resource for Order {
    const ENDPOINT: &'static str = "orders";
    const SINGULAR: &'static str = "Order";
    const PLURAL: &'static str = "Orders";
    const DESCRIPTION: &'static str = "Placed orders and their fulfilment status.";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("status", "Status", FieldKind::Select(ORDER_STATUSES)).filterable(),
        FieldSpec::optional("notes", "Notes", FieldKind::TextArea),
    ];
    const COLUMNS: &'static [&'static str] = &["Order", "Customer", "Total", "Status", "Placed"];
    const CAN_CREATE: bool = false;

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.number().to_string(),
            dash(&text(&self.customer)),
            self.total
                .map(|t| format!("{t:.2}"))
                .unwrap_or_else(|| dash("")),
            dash(&text(&self.status)),
            self.created_at
                .map(|ts| ts.strftime("%b %d, %Y").to_string())
                .unwrap_or_else(|| dash("")),
        ]
    }

    fn label(&self) -> String {
        format!("order {}", self.number())
    }

    fn draft(&self) -> Draft {
        Draft::from_pairs([
            ("status", text(&self.status)),
            ("notes", text(&self.notes)),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Resource for Vendor {
    const ENDPOINT: &'static str = "vendors";
    const SINGULAR: &'static str = "Vendor";
    const PLURAL: &'static str = "Vendors";
    const DESCRIPTION: &'static str = "Suppliers and marketplace sellers.";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", "Contact name", FieldKind::Text).filterable(),
        FieldSpec::optional("company", "Company", FieldKind::Text).filterable(),
        FieldSpec::required("email", "Email", FieldKind::Email),
        FieldSpec::optional("mobile", "Mobile", FieldKind::Tel),
        FieldSpec::optional("status", "Status", FieldKind::Select(RECORD_STATUSES)).filterable(),
    ];
    const COLUMNS: &'static [&'static str] = &["Name", "Company", "Email", "Mobile", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            dash(&text(&self.company)),
            dash(&text(&self.email)),
            dash(&text(&self.mobile)),
            dash(&text(&self.status)),
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn draft(&self) -> Draft {
        Draft::from_pairs([
            ("name", self.name.clone()),
            ("company", text(&self.company)),
            ("email", text(&self.email)),
            ("mobile", text(&self.mobile)),
            ("status", text(&self.status)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        form::Submission,
        listing::{Envelope, ListPayload, Page},
    };

    fn columns_line_up<R: Resource>(record: &R) {
        assert_eq!(record.cells().len(), R::COLUMNS.len(), "{}", R::PLURAL);
    }

    fn drafts_cover_fields<R: Resource>(record: &R) {
        let draft = record.draft();
        for field in R::FIELDS {
            assert!(
                draft.values().contains_key(field.name),
                "{} draft lacks {}",
                R::SINGULAR,
                field.name
            );
        }
    }

    #[test]
    fn records_decode_with_mongo_ids() {
        let json = r#"{
            "success": true,
            "data": {
                "items": [
                    { "_id": "b1", "name": "Velo", "status": "active" },
                    { "id": "b2", "name": "Orbit" }
                ],
                "pagination": { "totalItems": 2 }
            }
        }"#;
        let env: Envelope<ListPayload<Brand>> = serde_json::from_str(json).unwrap();
        let page = Page::from(env.into_result().unwrap());
        assert_eq!(page.items[0].id(), "b1");
        assert_eq!(page.items[1].id(), "b2");
        assert_eq!(page.items[1].cells(), ["Orbit", "—", "—"]);
    }

    #[test]
    fn orders_format_totals_and_dates() {
        let order: Order = serde_json::from_str(
            r#"{
                "_id": "o1",
                "orderNumber": "A-1001",
                "customer": "Lin",
                "total": 1234.5,
                "status": "shipped",
                "createdAt": "2024-03-05T10:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(
            order.cells(),
            ["A-1001", "Lin", "1234.50", "shipped", "Mar 05, 2024"]
        );
        assert_eq!(order.label(), "order A-1001");
        assert!(!Order::CAN_CREATE);
    }

    #[test]
    fn every_resource_is_consistent() {
        let brand: Brand = serde_json::from_str(r#"{"id":"1","name":"n"}"#).unwrap();
        let model: Model = serde_json::from_str(r#"{"id":"1","name":"n","year":2020}"#).unwrap();
        let user: User = serde_json::from_str(r#"{"id":"1","name":"n"}"#).unwrap();
        let order: Order = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        let vendor: Vendor = serde_json::from_str(r#"{"id":"1","name":"n"}"#).unwrap();

        columns_line_up(&brand);
        columns_line_up(&model);
        columns_line_up(&user);
        columns_line_up(&order);
        columns_line_up(&vendor);

        drafts_cover_fields(&brand);
        drafts_cover_fields(&model);
        drafts_cover_fields(&user);
        drafts_cover_fields(&order);
        drafts_cover_fields(&vendor);

        assert_eq!(model.draft().get("year"), "2020");
    }

    #[test]
    fn editing_can_clear_a_description() {
        let brand = Brand {
            id: "b1".into(),
            name: "Velo".into(),
            description: Some("old".into()),
            status: None,
        };
        let mut draft = brand.draft();
        draft.set("description", "");

        let body = draft.to_json(Brand::FIELDS, Submission::Update);
        assert_eq!(body["name"], "Velo");
        assert!(body["description"].is_null());
        assert!(body.as_object().unwrap().contains_key("description"));

        let created = draft.to_json(Brand::FIELDS, Submission::Create);
        assert!(!created.as_object().unwrap().contains_key("description"));
    }

    #[test]
    fn filters_follow_field_flags() {
        let names: Vec<_> = Vendor::filters().map(|f| f.name).collect();
        assert_eq!(names, ["name", "company", "status"]);
    }
}

use std::collections::BTreeMap;

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    TextArea,
    Select(&'static [&'static str]),
}

impl FieldKind {
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            FieldKind::Text | FieldKind::TextArea | FieldKind::Select(_) => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in the request body and in list filters.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Offered in the filter bar above the table.
    pub filterable: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            filterable: false,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            filterable: false,
        }
    }

    pub const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Same field with the requirement dropped, as used by filters.
    pub const fn relaxed(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Which request a body is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Create,
    /// Fields present in the draft but left blank are sent as `null` so the
    /// server clears them.
    Update,
}

/// Editable copy of a record's fields, as the strings the inputs hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    values: BTreeMap<String, String>,
}

impl Draft {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Labels of required fields that are blank.
    pub fn missing_required<'a>(&self, fields: &'a [FieldSpec]) -> Vec<&'a str> {
        fields
            .iter()
            .filter(|f| f.required && self.get(f.name).trim().is_empty())
            .map(|f| f.label)
            .collect()
    }

    pub fn is_submittable(&self, fields: &[FieldSpec]) -> bool {
        self.missing_required(fields).is_empty()
    }

    /// Request body for create/update. Numeric fields are sent as numbers
    /// when they parse. Blank fields are left out of creates and cleared on
    /// updates.
    pub fn to_json(&self, fields: &[FieldSpec], submission: Submission) -> Value {
        let mut body = Map::new();
        for field in fields {
            let raw = self.get(field.name).trim();
            if raw.is_empty() {
                if submission == Submission::Update && self.values.contains_key(field.name) {
                    body.insert(field.name.to_string(), Value::Null);
                }
                continue;
            }
            let value = match field.kind {
                FieldKind::Number => raw
                    .parse::<i64>()
                    .map(Value::from)
                    .or_else(|_| raw.parse::<f64>().map(Value::from))
                    .unwrap_or_else(|_| Value::from(raw)),
                _ => Value::from(raw),
            };
            body.insert(field.name.to_string(), value);
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::optional("year", "Year", FieldKind::Number),
        FieldSpec::optional("price", "Price", FieldKind::Number),
        FieldSpec::required("status", "Status", FieldKind::Select(&["active", "inactive"]))
            .filterable(),
    ];

    #[test]
    fn blank_required_fields_block_submit() {
        let mut draft = Draft::default();
        assert_eq!(draft.missing_required(FIELDS), ["Name", "Status"]);
        assert!(!draft.is_submittable(FIELDS));

        draft.set("name", "   ");
        draft.set("status", "active");
        assert_eq!(draft.missing_required(FIELDS), ["Name"]);

        draft.set("name", "Velo");
        assert!(draft.is_submittable(FIELDS));
    }

    #[test]
    fn body_omits_blanks_and_types_numbers() {
        let draft = Draft::from_pairs([
            ("name", " Velo "),
            ("year", "2021"),
            ("price", "19.5"),
            ("status", "active"),
            ("ignored", "x"),
        ]);
        assert_eq!(
            draft.to_json(FIELDS, Submission::Create),
            json!({ "name": "Velo", "year": 2021, "price": 19.5, "status": "active" })
        );

        let sparse = Draft::from_pairs([("name", "Velo"), ("year", "soon"), ("price", " ")]);
        assert_eq!(
            sparse.to_json(FIELDS, Submission::Create),
            json!({ "name": "Velo", "year": "soon" })
        );
    }

    #[test]
    fn update_clears_blanked_fields() {
        let draft = Draft::from_pairs([("name", "Velo"), ("year", ""), ("status", "active")]);
        assert_eq!(
            draft.to_json(FIELDS, Submission::Update),
            json!({ "name": "Velo", "year": null, "status": "active" })
        );
    }

    #[test]
    fn only_marked_fields_filter() {
        let filterable: Vec<_> = FIELDS.iter().filter(|f| f.filterable).map(|f| f.name).collect();
        assert_eq!(filterable, ["status"]);
    }
}

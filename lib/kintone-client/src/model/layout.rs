//! Form layout definitions.

use serde::{Deserialize, Serialize};

/// One stripe of the form layout, tagged by its wire `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layout {
    /// A row of side-by-side elements.
    Row { fields: Vec<LayoutField> },
    /// A table whose columns are listed left to right.
    Subtable { code: String, fields: Vec<LayoutField> },
    /// A collapsible group containing its own rows.
    Group { code: String, layout: Vec<Layout> },
}

/// One element inside a layout row.
///
/// `element_type` repeats the field's wire type (`SINGLE_LINE_TEXT`, ...) or
/// names a decoration element (`LABEL`, `SPACER`, `HR`). Fields carry a
/// `code`; decorations carry a `label` or `element_id` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutField {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<FieldSize>,
}

impl LayoutField {
    /// A field element referencing a form field by code.
    pub fn field(element_type: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            code: Some(code.into()),
            label: None,
            element_id: None,
            size: None,
        }
    }
}

/// Pixel dimensions of a layout element; the wire spells them as strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_height: Option<String>,
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_a_row_with_sized_fields() {
        let layout: Layout = serde_json::from_value(json!({
            "type": "ROW",
            "fields": [
                {
                    "type": "SINGLE_LINE_TEXT",
                    "code": "name",
                    "size": {"width": "200"}
                },
                {"type": "SPACER", "elementId": "sp1"}
            ]
        }))
        .expect("valid layout");

        assert2::let_assert!(Layout::Row { fields } = layout);
        check!(fields.len() == 2);
        check!(fields[0].size.as_ref().and_then(|s| s.width.as_deref()) == Some("200"));
        check!(fields[1].element_id.as_deref() == Some("sp1"));
    }

    #[test]
    fn decodes_nested_groups() {
        let layout: Layout = serde_json::from_value(json!({
            "type": "GROUP",
            "code": "details",
            "layout": [
                {"type": "ROW", "fields": [{"type": "NUMBER", "code": "qty"}]}
            ]
        }))
        .expect("valid layout");

        assert2::let_assert!(Layout::Group { code, layout } = layout);
        check!(code == "details");
        check!(layout.len() == 1);
    }

    #[test]
    fn field_elements_omit_decoration_members() {
        let element = LayoutField::field("SINGLE_LINE_TEXT", "name");
        let encoded = serde_json::to_value(element).expect("serializable");
        check!(encoded == json!({"type": "SINGLE_LINE_TEXT", "code": "name"}));
    }
}

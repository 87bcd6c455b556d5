//! Form field definitions.
//!
//! Field properties are tagged on the wire by their `type` member. Settable
//! attributes are optional throughout: an unset attribute is omitted from
//! update payloads, which tells the server to leave the remote value as it
//! is.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::app::Entity;

/// One selectable choice of a choice-style field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    #[serde(with = "crate::model::stringified")]
    pub index: i64,
}

/// How choice labels are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    Horizontal,
    Vertical,
}

/// Where the unit text of a numeric field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitPosition {
    Before,
    After,
}

/// The protocol of a link field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkProtocol {
    Web,
    Call,
    Mail,
}

/// One form field definition, tagged by its wire `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldProperty {
    #[serde(rename_all = "camelCase")]
    SingleLineText {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unique: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hide_expression: Option<bool>,
    },
    #[serde(rename_all = "camelCase")]
    MultiLineText {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    RichText {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Number {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unique: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        digit: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_scale: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit_position: Option<UnitPosition>,
    },
    #[serde(rename_all = "camelCase")]
    Calc {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        expression: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_scale: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hide_expression: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit_position: Option<UnitPosition>,
    },
    #[serde(rename_all = "camelCase")]
    RadioButton {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        options: IndexMap<String, FieldOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        align: Option<Alignment>,
    },
    #[serde(rename_all = "camelCase")]
    CheckBox {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<Vec<String>>,
        options: IndexMap<String, FieldOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        align: Option<Alignment>,
    },
    #[serde(rename_all = "camelCase")]
    MultiSelect {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<Vec<String>>,
        options: IndexMap<String, FieldOption>,
    },
    #[serde(rename_all = "camelCase")]
    DropDown {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        options: IndexMap<String, FieldOption>,
    },
    #[serde(rename_all = "camelCase")]
    Date {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unique: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_now_value: Option<bool>,
    },
    #[serde(rename_all = "camelCase")]
    Time {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_now_value: Option<bool>,
    },
    #[serde(rename_all = "camelCase")]
    Datetime {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unique: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_now_value: Option<bool>,
    },
    #[serde(rename_all = "camelCase")]
    Link {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unique: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
        protocol: LinkProtocol,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    UserSelect {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<Vec<Entity>>,
    },
    #[serde(rename_all = "camelCase")]
    Attachment {
        code: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        required: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumbnail_size: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Subtable {
        code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        no_label: Option<bool>,
        fields: IndexMap<String, FieldProperty>,
    },
}

impl FieldProperty {
    /// The field code, unique within a form.
    pub fn code(&self) -> &str {
        match self {
            Self::SingleLineText { code, .. }
            | Self::MultiLineText { code, .. }
            | Self::RichText { code, .. }
            | Self::Number { code, .. }
            | Self::Calc { code, .. }
            | Self::RadioButton { code, .. }
            | Self::CheckBox { code, .. }
            | Self::MultiSelect { code, .. }
            | Self::DropDown { code, .. }
            | Self::Date { code, .. }
            | Self::Time { code, .. }
            | Self::Datetime { code, .. }
            | Self::Link { code, .. }
            | Self::UserSelect { code, .. }
            | Self::Attachment { code, .. }
            | Self::Subtable { code, .. } => code,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use serde_json::json;

    use super::*;

    fn rich_text() -> FieldProperty {
        FieldProperty::RichText {
            code: "body".to_string(),
            label: "Body".to_string(),
            no_label: None,
            required: Some(true),
            default_value: None,
        }
    }

    #[test]
    fn serializes_with_wire_type_tag() {
        insta::assert_json_snapshot!(rich_text(), @r#"
        {
          "type": "RICH_TEXT",
          "code": "body",
          "label": "Body",
          "required": true
        }
        "#);
    }

    #[test]
    fn unset_attributes_are_absent_from_the_payload() {
        let encoded = serde_json::to_value(rich_text()).expect("serializable");
        let object = encoded.as_object().expect("an object");
        check!(!object.contains_key("defaultValue"));
        check!(!object.contains_key("noLabel"));
    }

    #[test]
    fn decodes_a_choice_field_with_options() {
        let field: FieldProperty = serde_json::from_value(json!({
            "type": "DROP_DOWN",
            "code": "priority",
            "label": "Priority",
            "noLabel": false,
            "required": true,
            "defaultValue": "Low",
            "options": {
                "Low": {"label": "Low", "index": "0"},
                "High": {"label": "High", "index": "1"}
            }
        }))
        .expect("valid field");

        assert2::let_assert!(FieldProperty::DropDown { options, .. } = &field);
        check!(options["High"].index == 1);
        check!(field.code() == "priority");
    }

    #[test]
    fn decodes_nested_subtable_fields() {
        let field: FieldProperty = serde_json::from_value(json!({
            "type": "SUBTABLE",
            "code": "items",
            "fields": {
                "qty": {
                    "type": "NUMBER",
                    "code": "qty",
                    "label": "Quantity"
                }
            }
        }))
        .expect("valid field");

        assert2::let_assert!(FieldProperty::Subtable { fields, .. } = &field);
        check!(fields["qty"].code() == "qty");
    }

    #[test]
    fn alignment_uses_wire_names() {
        check!(serde_json::to_value(Alignment::Horizontal).expect("serializable") == "HORIZONTAL");
        check!(serde_json::to_value(LinkProtocol::Mail).expect("serializable") == "MAIL");
    }
}

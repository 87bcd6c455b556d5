//! App-level resources: apps, permissions, views, process management,
//! customization and deployment.

use indexmap::IndexMap;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A deployed app, as returned by the app read endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(with = "crate::model::stringified")]
    pub app_id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    #[serde(with = "crate::model::stringified::option", default)]
    pub space_id: Option<i64>,
    #[serde(with = "crate::model::stringified::option", default)]
    pub thread_id: Option<i64>,
    pub created_at: Timestamp,
    pub creator: Member,
    pub modified_at: Timestamp,
    pub modifier: Member,
}

/// A user reference attached to audit fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub code: String,
    pub name: String,
}

/// The kind of principal an ACL entry addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    User,
    Group,
    Organization,
    FieldEntity,
    Creator,
}

/// A principal in an ACL entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Entity {
    pub fn new(entity_type: EntityType, code: impl Into<String>) -> Self {
        Self {
            entity_type,
            code: Some(code.into()),
        }
    }

    /// The pseudo-entity matching the record creator; it carries no code.
    pub fn creator() -> Self {
        Self {
            entity_type: EntityType::Creator,
            code: None,
        }
    }
}

/// One app-permission entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRightEntity {
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_subs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_editable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_viewable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_addable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_editable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_deletable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_importable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_exportable: Option<bool>,
}

impl AppRightEntity {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            include_subs: None,
            app_editable: None,
            record_viewable: None,
            record_addable: None,
            record_editable: None,
            record_deletable: None,
            record_importable: None,
            record_exportable: None,
        }
    }
}

/// One record-permission rule: a filter condition plus the principals it
/// grants rights to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRight {
    pub entities: Vec<RecordRightEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_cond: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRightEntity {
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_subs: Option<bool>,
}

/// What a principal may do with a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Accessibility {
    Read,
    Write,
    None,
}

/// Field-permission rules for one field code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRight {
    pub code: String,
    pub entities: Vec<FieldRightEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRightEntity {
    pub entity: Entity,
    pub accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_subs: Option<bool>,
}

/// The evaluated permissions of the API user on one record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedRecordRight {
    #[serde(with = "crate::model::stringified")]
    pub id: i64,
    pub record: EvaluatedRecordAccess,
    #[serde(default)]
    pub fields: IndexMap<String, EvaluatedFieldAccess>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedRecordAccess {
    pub viewable: bool,
    pub editable: bool,
    pub deletable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedFieldAccess {
    pub viewable: bool,
    pub editable: bool,
}

/// The rendering style of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewType {
    List,
    Calendar,
    Custom,
}

/// One record-list view.
///
/// Which optional members are meaningful depends on [`ViewType`]: `fields`
/// for lists, `date`/`title` for calendars, `html` and `pager` for custom
/// views. Unset members are omitted on update, leaving the remote value
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    #[serde(rename = "type")]
    pub view_type: ViewType,
    #[serde(
        with = "crate::model::stringified::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    pub name: String,
    #[serde(
        with = "crate::model::stringified::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pager: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_cond: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl View {
    pub fn new(view_type: ViewType, name: impl Into<String>) -> Self {
        Self {
            view_type,
            id: None,
            name: name.into(),
            index: None,
            fields: None,
            date: None,
            title: None,
            html: None,
            pager: None,
            device: None,
            filter_cond: None,
            sort: None,
        }
    }
}

/// The identifier assigned to a view after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ViewId {
    #[serde(with = "crate::model::stringified")]
    pub id: i64,
}

/// An app icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Icon {
    Preset { key: String },
    File { file: FileBody },
}

/// An uploaded file reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileBody {
    pub file_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        with = "crate::model::stringified::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<i64>,
}

/// The record-title selection of an app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleField {
    pub selection_mode: TitleFieldSelectionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TitleFieldSelectionMode {
    Auto,
    Manual,
}

/// One state in a process-management workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessState {
    pub name: String,
    #[serde(with = "crate::model::stringified")]
    pub index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<ProcessAssignee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAssignee {
    #[serde(rename = "type")]
    pub assignee_type: AssigneeType,
    pub entities: Vec<ProcessEntity>,
}

/// Whether one assignee or all of them must act to advance the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssigneeType {
    One,
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessEntity {
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_subs: Option<bool>,
}

/// One transition between workflow states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAction {
    pub name: String,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_cond: Option<String>,
}

/// Who the JavaScript/CSS customizations apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomizeScope {
    All,
    Admin,
    None,
}

/// The JavaScript and CSS resources for one platform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomizeSet {
    #[serde(default)]
    pub js: Vec<CustomizeResource>,
    #[serde(default)]
    pub css: Vec<CustomizeResource>,
}

/// A customization resource, hosted remotely or uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomizeResource {
    Url { url: String },
    File { file: FileBody },
}

/// One app in a deploy request, optionally pinned to a revision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployApp {
    #[serde(with = "crate::model::stringified")]
    pub app: i64,
    #[serde(
        with = "crate::model::stringified::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub revision: Option<i64>,
}

impl DeployApp {
    pub fn new(app: i64) -> Self {
        Self {
            app,
            revision: None,
        }
    }

    /// Pins the deployment to a settings revision; the server rejects the
    /// deploy when the pre-live revision has moved past it.
    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

/// The deployment progress of one app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeployStatus {
    Processing,
    Success,
    Fail,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeployStatusEntry {
    #[serde(with = "crate::model::stringified")]
    pub app: i64,
    pub status: DeployStatus,
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use serde_json::json;

    use super::*;

    #[test]
    fn app_decodes_stringified_identifiers() {
        let app: App = serde_json::from_value(json!({
            "appId": "42",
            "code": "CRM",
            "name": "Customers",
            "description": "",
            "spaceId": null,
            "threadId": null,
            "createdAt": "2024-01-15T09:12:00Z",
            "creator": {"code": "alice", "name": "Alice"},
            "modifiedAt": "2024-02-01T10:00:00Z",
            "modifier": {"code": "bob", "name": "Bob"}
        }))
        .expect("valid app payload");

        check!(app.app_id == 42);
        check!(app.space_id.is_none());
        check!(app.creator.code == "alice");
    }

    #[test]
    fn entity_creator_serializes_without_code() {
        let encoded = serde_json::to_value(Entity::creator()).expect("serializable");
        check!(encoded == json!({"type": "CREATOR"}));
    }

    #[test]
    fn view_omits_unset_members() {
        let view = View::new(ViewType::List, "All records");
        let encoded = serde_json::to_value(&view).expect("serializable");
        check!(encoded == json!({"type": "LIST", "name": "All records"}));
    }

    #[test]
    fn view_round_trips_calendar_members() {
        let payload = json!({
            "type": "CALENDAR",
            "id": "20",
            "name": "Schedule",
            "index": "1",
            "date": "start",
            "title": "subject"
        });

        let view: View = serde_json::from_value(payload).expect("valid view");
        check!(view.view_type == ViewType::Calendar);
        check!(view.id == Some(20));
        check!(view.date.as_deref() == Some("start"));
    }

    #[test]
    fn customize_resource_is_tagged_by_type() {
        let url: CustomizeResource =
            serde_json::from_value(json!({"type": "URL", "url": "https://example.com/app.js"}))
                .expect("valid resource");
        check!(url == CustomizeResource::Url {
            url: "https://example.com/app.js".to_string(),
        });

        let file: CustomizeResource = serde_json::from_value(
            json!({"type": "FILE", "file": {"fileKey": "abc", "name": "app.js", "size": "128"}}),
        )
        .expect("valid resource");
        assert2::let_assert!(CustomizeResource::File { file } = file);
        check!(file.size == Some(128));
    }

    #[test]
    fn deploy_request_omits_unpinned_revision() {
        let encoded = serde_json::to_value(DeployApp::new(7)).expect("serializable");
        check!(encoded == json!({"app": "7"}));

        let pinned = serde_json::to_value(DeployApp::new(7).revision(3)).expect("serializable");
        check!(pinned == json!({"app": "7", "revision": "3"}));
    }

    #[test]
    fn deploy_status_decodes_wire_names() {
        let entry: DeployStatusEntry =
            serde_json::from_value(json!({"app": "9", "status": "PROCESSING"}))
                .expect("valid entry");
        check!(entry.status == DeployStatus::Processing);
    }
}

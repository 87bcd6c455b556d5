//! Request and response bodies for the app administration endpoints.
//!
//! Requests serialize with `camelCase` wire names; every optional member is
//! skipped when unset, so a partial update never overwrites remote values
//! the caller did not touch. Read requests flatten into the query string,
//! write requests travel as JSON bodies; the dispatcher picks based on the
//! endpoint's method.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Api, ApiRequest};
use crate::model::{
    App, AppRightEntity, CustomizeScope, CustomizeSet, DeployApp, DeployStatusEntry,
    EvaluatedRecordRight, FieldProperty, FieldRight, Icon, Layout, ProcessAction, ProcessState,
    RecordRight, TitleField, View, ViewId,
};

/// Declares a read request addressing one app, with an optional response
/// language and a fixed operation key.
macro_rules! app_read_request {
    ($(#[$doc:meta])* $name:ident, $api:expr, $response:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub app: i64,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub lang: Option<String>,
        }

        impl $name {
            pub fn new(app: i64) -> Self {
                Self { app, lang: None }
            }

            /// Requests localized names in the given language code.
            #[must_use]
            pub fn lang(mut self, lang: impl Into<String>) -> Self {
                self.lang = Some(lang.into());
                self
            }
        }

        impl ApiRequest for $name {
            const API: Api = $api;
            type Response = $response;
        }
    };
}

/// Declares a read request addressing one app with no further parameters.
macro_rules! app_only_request {
    ($(#[$doc:meta])* $name:ident, $api:expr, $response:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub app: i64,
        }

        impl $name {
            pub fn new(app: i64) -> Self {
                Self { app }
            }
        }

        impl ApiRequest for $name {
            const API: Api = $api;
            type Response = $response;
        }
    };
}

/// The new settings revision returned by every update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RevisionResponse {
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

// ---------------------------------------------------------------------------
// App lifecycle
// ---------------------------------------------------------------------------

/// Creates a pre-live app, optionally inside a space thread.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAppRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<i64>,
}

impl AddAppRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            space: None,
            thread: None,
        }
    }

    /// Places the app in a space thread. Both identifiers are required
    /// together by the server.
    #[must_use]
    pub fn in_space(mut self, space: i64, thread: i64) -> Self {
        self.space = Some(space);
        self.thread = Some(thread);
        self
    }
}

impl ApiRequest for AddAppRequest {
    const API: Api = Api::AddApp;
    type Response = AddAppResponse;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AddAppResponse {
    #[serde(with = "crate::model::stringified")]
    pub app: i64,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

/// Fetches one deployed app by identifier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAppRequest {
    pub id: i64,
}

impl GetAppRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl ApiRequest for GetAppRequest {
    const API: Api = Api::GetApp;
    type Response = App;
}

/// Searches deployed apps by identifier, code, name or space.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAppsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl GetAppsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.ids = Some(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn codes<I, T>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.codes = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    /// Matches apps whose name contains the given text.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn space_ids(mut self, space_ids: impl IntoIterator<Item = i64>) -> Self {
        self.space_ids = Some(space_ids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl ApiRequest for GetAppsRequest {
    const API: Api = Api::GetApps;
    type Response = GetAppsResponse;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetAppsResponse {
    pub apps: Vec<App>,
}

// ---------------------------------------------------------------------------
// Form fields
// ---------------------------------------------------------------------------

/// Adds fields to the pre-live form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFormFieldsRequest {
    pub app: i64,
    pub properties: IndexMap<String, FieldProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl AddFormFieldsRequest {
    pub fn new(app: i64, properties: IndexMap<String, FieldProperty>) -> Self {
        Self {
            app,
            properties,
            revision: None,
        }
    }

    /// Guards the update against concurrent edits; the server rejects the
    /// call when the pre-live revision no longer matches.
    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for AddFormFieldsRequest {
    const API: Api = Api::AddFormFields;
    type Response = RevisionResponse;
}

/// Replaces attributes of existing pre-live form fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormFieldsRequest {
    pub app: i64,
    pub properties: IndexMap<String, FieldProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl UpdateFormFieldsRequest {
    pub fn new(app: i64, properties: IndexMap<String, FieldProperty>) -> Self {
        Self {
            app,
            properties,
            revision: None,
        }
    }

    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for UpdateFormFieldsRequest {
    const API: Api = Api::UpdateFormFields;
    type Response = RevisionResponse;
}

/// Removes fields from the pre-live form by code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFormFieldsRequest {
    pub app: i64,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl DeleteFormFieldsRequest {
    pub fn new<I, T>(app: i64, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            app,
            fields: fields.into_iter().map(Into::into).collect(),
            revision: None,
        }
    }

    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for DeleteFormFieldsRequest {
    const API: Api = Api::DeleteFormFields;
    type Response = RevisionResponse;
}

app_read_request!(
    /// Fetches the deployed form field definitions.
    GetFormFieldsRequest,
    Api::GetFormFields,
    GetFormFieldsResponse
);

app_read_request!(
    /// Fetches the pre-live form field definitions.
    GetFormFieldsPreviewRequest,
    Api::GetFormFieldsPreview,
    GetFormFieldsResponse
);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetFormFieldsResponse {
    pub properties: IndexMap<String, FieldProperty>,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

// ---------------------------------------------------------------------------
// Form layout
// ---------------------------------------------------------------------------

app_only_request!(
    /// Fetches the deployed form layout.
    GetFormLayoutRequest,
    Api::GetFormLayout,
    GetFormLayoutResponse
);

app_only_request!(
    /// Fetches the pre-live form layout.
    GetFormLayoutPreviewRequest,
    Api::GetFormLayoutPreview,
    GetFormLayoutResponse
);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetFormLayoutResponse {
    pub layout: Vec<Layout>,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

/// Replaces the pre-live form layout wholesale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormLayoutRequest {
    pub app: i64,
    pub layout: Vec<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl UpdateFormLayoutRequest {
    pub fn new(app: i64, layout: Vec<Layout>) -> Self {
        Self {
            app,
            layout,
            revision: None,
        }
    }

    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for UpdateFormLayoutRequest {
    const API: Api = Api::UpdateFormLayout;
    type Response = RevisionResponse;
}

// ---------------------------------------------------------------------------
// App settings
// ---------------------------------------------------------------------------

app_read_request!(
    /// Fetches the deployed general settings.
    GetAppSettingsRequest,
    Api::GetAppSettings,
    GetAppSettingsResponse
);

app_read_request!(
    /// Fetches the pre-live general settings.
    GetAppSettingsPreviewRequest,
    Api::GetAppSettingsPreview,
    GetAppSettingsResponse
);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAppSettingsResponse {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub title_field: Option<TitleField>,
    #[serde(default)]
    pub enable_thumbnails: Option<bool>,
    #[serde(default)]
    pub enable_bulk_deletion: Option<bool>,
    #[serde(default)]
    pub enable_comments: Option<bool>,
    #[serde(default)]
    pub enable_duplicate_record: Option<bool>,
    #[serde(with = "crate::model::stringified::option", default)]
    pub first_month_of_fiscal_year: Option<i64>,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

/// Updates the pre-live general settings; unset members keep their remote
/// values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppSettingsRequest {
    pub app: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_field: Option<TitleField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl UpdateAppSettingsRequest {
    pub fn new(app: i64) -> Self {
        Self {
            app,
            name: None,
            description: None,
            icon: None,
            theme: None,
            title_field: None,
            revision: None,
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    #[must_use]
    pub fn title_field(mut self, title_field: TitleField) -> Self {
        self.title_field = Some(title_field);
        self
    }

    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for UpdateAppSettingsRequest {
    const API: Api = Api::UpdateAppSettings;
    type Response = RevisionResponse;
}

// ---------------------------------------------------------------------------
// Process management
// ---------------------------------------------------------------------------

app_read_request!(
    /// Fetches the deployed process management settings.
    GetProcessManagementRequest,
    Api::GetProcessManagement,
    GetProcessManagementResponse
);

app_read_request!(
    /// Fetches the pre-live process management settings.
    GetProcessManagementPreviewRequest,
    Api::GetProcessManagementPreview,
    GetProcessManagementResponse
);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProcessManagementResponse {
    pub enable: bool,
    #[serde(default)]
    pub states: IndexMap<String, ProcessState>,
    #[serde(default)]
    pub actions: Vec<ProcessAction>,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

/// Updates the pre-live process management settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProcessManagementRequest {
    pub app: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<IndexMap<String, ProcessState>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ProcessAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl UpdateProcessManagementRequest {
    pub fn new(app: i64) -> Self {
        Self {
            app,
            enable: None,
            states: None,
            actions: None,
            revision: None,
        }
    }

    #[must_use]
    pub fn enable(mut self, enable: bool) -> Self {
        self.enable = Some(enable);
        self
    }

    #[must_use]
    pub fn states(mut self, states: IndexMap<String, ProcessState>) -> Self {
        self.states = Some(states);
        self
    }

    #[must_use]
    pub fn actions(mut self, actions: Vec<ProcessAction>) -> Self {
        self.actions = Some(actions);
        self
    }

    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for UpdateProcessManagementRequest {
    const API: Api = Api::UpdateProcessManagement;
    type Response = RevisionResponse;
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

app_read_request!(
    /// Fetches the deployed views.
    GetViewsRequest,
    Api::GetViews,
    GetViewsResponse
);

app_read_request!(
    /// Fetches the pre-live views.
    GetViewsPreviewRequest,
    Api::GetViewsPreview,
    GetViewsResponse
);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetViewsResponse {
    pub views: IndexMap<String, View>,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

/// Replaces the pre-live views wholesale; views absent from the map are
/// deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateViewsRequest {
    pub app: i64,
    pub views: IndexMap<String, View>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl UpdateViewsRequest {
    pub fn new(app: i64, views: IndexMap<String, View>) -> Self {
        Self {
            app,
            views,
            revision: None,
        }
    }

    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for UpdateViewsRequest {
    const API: Api = Api::UpdateViews;
    type Response = UpdateViewsResponse;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateViewsResponse {
    pub views: IndexMap<String, ViewId>,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

app_only_request!(
    /// Fetches the deployed app permissions.
    GetAppAclRequest,
    Api::GetAppAcl,
    GetAppAclResponse
);

app_only_request!(
    /// Fetches the pre-live app permissions.
    GetAppAclPreviewRequest,
    Api::GetAppAclPreview,
    GetAppAclResponse
);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetAppAclResponse {
    pub rights: Vec<AppRightEntity>,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

/// Replaces the pre-live app permissions wholesale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppAclRequest {
    pub app: i64,
    pub rights: Vec<AppRightEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl UpdateAppAclRequest {
    pub fn new(app: i64, rights: Vec<AppRightEntity>) -> Self {
        Self {
            app,
            rights,
            revision: None,
        }
    }

    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for UpdateAppAclRequest {
    const API: Api = Api::UpdateAppAcl;
    type Response = RevisionResponse;
}

app_read_request!(
    /// Fetches the deployed record permissions.
    GetRecordAclRequest,
    Api::GetRecordAcl,
    GetRecordAclResponse
);

app_read_request!(
    /// Fetches the pre-live record permissions.
    GetRecordAclPreviewRequest,
    Api::GetRecordAclPreview,
    GetRecordAclResponse
);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetRecordAclResponse {
    pub rights: Vec<RecordRight>,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

/// Replaces the pre-live record permissions wholesale. Rule order is
/// precedence order: the first matching rule wins.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordAclRequest {
    pub app: i64,
    pub rights: Vec<RecordRight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl UpdateRecordAclRequest {
    pub fn new(app: i64, rights: Vec<RecordRight>) -> Self {
        Self {
            app,
            rights,
            revision: None,
        }
    }

    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for UpdateRecordAclRequest {
    const API: Api = Api::UpdateRecordAcl;
    type Response = RevisionResponse;
}

app_only_request!(
    /// Fetches the deployed field permissions.
    GetFieldAclRequest,
    Api::GetFieldAcl,
    GetFieldAclResponse
);

app_only_request!(
    /// Fetches the pre-live field permissions.
    GetFieldAclPreviewRequest,
    Api::GetFieldAclPreview,
    GetFieldAclResponse
);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetFieldAclResponse {
    pub rights: Vec<FieldRight>,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

/// Replaces the pre-live field permissions wholesale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldAclRequest {
    pub app: i64,
    pub rights: Vec<FieldRight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl UpdateFieldAclRequest {
    pub fn new(app: i64, rights: Vec<FieldRight>) -> Self {
        Self {
            app,
            rights,
            revision: None,
        }
    }

    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for UpdateFieldAclRequest {
    const API: Api = Api::UpdateFieldAcl;
    type Response = RevisionResponse;
}

/// Evaluates the API user's permissions on the given records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRecordAclRequest {
    pub app: i64,
    pub ids: Vec<i64>,
}

impl EvaluateRecordAclRequest {
    pub fn new(app: i64, ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            app,
            ids: ids.into_iter().collect(),
        }
    }
}

impl ApiRequest for EvaluateRecordAclRequest {
    const API: Api = Api::EvaluateRecordAcl;
    type Response = EvaluateRecordAclResponse;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluateRecordAclResponse {
    pub rights: Vec<EvaluatedRecordRight>,
}

// ---------------------------------------------------------------------------
// Customization
// ---------------------------------------------------------------------------

app_only_request!(
    /// Fetches the deployed JavaScript/CSS customizations.
    GetAppCustomizeRequest,
    Api::GetAppCustomize,
    GetAppCustomizeResponse
);

app_only_request!(
    /// Fetches the pre-live JavaScript/CSS customizations.
    GetAppCustomizePreviewRequest,
    Api::GetAppCustomizePreview,
    GetAppCustomizeResponse
);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetAppCustomizeResponse {
    pub scope: CustomizeScope,
    #[serde(default)]
    pub desktop: CustomizeSet,
    #[serde(default)]
    pub mobile: CustomizeSet,
    #[serde(with = "crate::model::stringified")]
    pub revision: i64,
}

/// Updates the pre-live JavaScript/CSS customizations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppCustomizeRequest {
    pub app: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<CustomizeScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop: Option<CustomizeSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<CustomizeSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl UpdateAppCustomizeRequest {
    pub fn new(app: i64) -> Self {
        Self {
            app,
            scope: None,
            desktop: None,
            mobile: None,
            revision: None,
        }
    }

    #[must_use]
    pub fn scope(mut self, scope: CustomizeScope) -> Self {
        self.scope = Some(scope);
        self
    }

    #[must_use]
    pub fn desktop(mut self, desktop: CustomizeSet) -> Self {
        self.desktop = Some(desktop);
        self
    }

    #[must_use]
    pub fn mobile(mut self, mobile: CustomizeSet) -> Self {
        self.mobile = Some(mobile);
        self
    }

    #[must_use]
    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }
}

impl ApiRequest for UpdateAppCustomizeRequest {
    const API: Api = Api::UpdateAppCustomize;
    type Response = RevisionResponse;
}

// ---------------------------------------------------------------------------
// Deployment
// ---------------------------------------------------------------------------

/// Deploys pre-live settings to production, or reverts them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployAppRequest {
    pub apps: Vec<DeployApp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revert: Option<bool>,
}

impl DeployAppRequest {
    pub fn new(apps: Vec<DeployApp>) -> Self {
        Self { apps, revert: None }
    }

    /// Discards the pre-live changes instead of deploying them.
    #[must_use]
    pub fn revert(mut self, revert: bool) -> Self {
        self.revert = Some(revert);
        self
    }
}

impl ApiRequest for DeployAppRequest {
    const API: Api = Api::DeployApp;
    type Response = DeployAppResponse;
}

/// The deploy endpoint acknowledges with an empty body; progress is polled
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct DeployAppResponse {}

/// Polls the deployment progress of the given apps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDeployStatusRequest {
    pub apps: Vec<i64>,
}

impl GetDeployStatusRequest {
    pub fn new(apps: impl IntoIterator<Item = i64>) -> Self {
        Self {
            apps: apps.into_iter().collect(),
        }
    }
}

impl ApiRequest for GetDeployStatusRequest {
    const API: Api = Api::GetDeployStatus;
    type Response = GetDeployStatusResponse;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetDeployStatusResponse {
    pub apps: Vec<DeployStatusEntry>,
}

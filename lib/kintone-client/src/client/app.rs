//! Ergonomic facade over the app administration endpoints.
//!
//! Every method delegates to [`KintoneClient::call`] with the matching
//! request type and unwraps single-value responses; nothing here adds
//! behavior, so errors pass through untranslated. Callers needing the full
//! response (revisions, localized names) use the `*_with` variants or
//! [`KintoneClient::call`] directly.

use indexmap::IndexMap;

use super::error::ApiClientError;
use super::KintoneClient;
use crate::api::app::{
    AddAppRequest, AddAppResponse, AddFormFieldsRequest, DeleteFormFieldsRequest,
    DeployAppRequest, EvaluateRecordAclRequest, GetAppAclPreviewRequest, GetAppAclRequest,
    GetAppCustomizePreviewRequest, GetAppCustomizeRequest, GetAppCustomizeResponse,
    GetAppRequest, GetAppSettingsPreviewRequest, GetAppSettingsRequest, GetAppSettingsResponse,
    GetAppsRequest, GetDeployStatusRequest, GetFieldAclPreviewRequest, GetFieldAclRequest,
    GetFormFieldsPreviewRequest, GetFormFieldsRequest, GetFormFieldsResponse,
    GetFormLayoutPreviewRequest, GetFormLayoutRequest, GetProcessManagementPreviewRequest,
    GetProcessManagementRequest, GetProcessManagementResponse, GetRecordAclPreviewRequest,
    GetRecordAclRequest, GetViewsPreviewRequest, GetViewsRequest, UpdateAppAclRequest,
    UpdateAppCustomizeRequest, UpdateAppSettingsRequest, UpdateFieldAclRequest,
    UpdateFormFieldsRequest, UpdateFormLayoutRequest, UpdateProcessManagementRequest,
    UpdateRecordAclRequest, UpdateViewsRequest, UpdateViewsResponse,
};
use crate::model::{
    App, AppRightEntity, DeployApp, DeployStatus, DeployStatusEntry, EvaluatedRecordRight,
    FieldProperty, FieldRight, Layout, RecordRight, View,
};

/// App administration operations, scoped to one [`KintoneClient`].
///
/// Obtained with [`KintoneClient::app`]; borrows the client, so it is
/// created per call site rather than stored.
#[derive(Debug, Clone, Copy)]
pub struct AppClient<'a> {
    client: &'a KintoneClient,
}

impl<'a> AppClient<'a> {
    pub(super) fn new(client: &'a KintoneClient) -> Self {
        Self { client }
    }

    /// Creates a pre-live app and returns its identifier and initial
    /// revision. The app serves no traffic until deployed.
    pub async fn add_app(&self, name: &str) -> Result<AddAppResponse, ApiClientError> {
        self.client.call(AddAppRequest::new(name)).await
    }

    /// Creates a pre-live app inside a space thread.
    pub async fn add_app_in_space(
        &self,
        name: &str,
        space: i64,
        thread: i64,
    ) -> Result<AddAppResponse, ApiClientError> {
        self.client
            .call(AddAppRequest::new(name).in_space(space, thread))
            .await
    }

    /// Fetches one deployed app.
    pub async fn get_app(&self, id: i64) -> Result<App, ApiClientError> {
        self.client.call(GetAppRequest::new(id)).await
    }

    /// Searches deployed apps with arbitrary filters.
    pub async fn get_apps(&self, request: GetAppsRequest) -> Result<Vec<App>, ApiClientError> {
        Ok(self.client.call(request).await?.apps)
    }

    /// Fetches the deployed apps with the given identifiers.
    pub async fn get_apps_by_ids(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<Vec<App>, ApiClientError> {
        self.get_apps(GetAppsRequest::new().ids(ids)).await
    }

    /// Fetches the deployed apps with the given app codes.
    pub async fn get_apps_by_codes<I, T>(&self, codes: I) -> Result<Vec<App>, ApiClientError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.get_apps(GetAppsRequest::new().codes(codes)).await
    }

    /// Adds fields to the pre-live form and returns the new revision.
    pub async fn add_form_fields(
        &self,
        request: AddFormFieldsRequest,
    ) -> Result<i64, ApiClientError> {
        Ok(self.client.call(request).await?.revision)
    }

    /// Updates pre-live form fields and returns the new revision.
    pub async fn update_form_fields(
        &self,
        request: UpdateFormFieldsRequest,
    ) -> Result<i64, ApiClientError> {
        Ok(self.client.call(request).await?.revision)
    }

    /// Deletes pre-live form fields and returns the new revision.
    pub async fn delete_form_fields(
        &self,
        request: DeleteFormFieldsRequest,
    ) -> Result<i64, ApiClientError> {
        Ok(self.client.call(request).await?.revision)
    }

    /// Fetches the deployed form fields, keyed by field code.
    pub async fn get_form_fields(
        &self,
        app: i64,
    ) -> Result<IndexMap<String, FieldProperty>, ApiClientError> {
        Ok(self
            .client
            .call(GetFormFieldsRequest::new(app))
            .await?
            .properties)
    }

    /// Fetches the deployed form fields with the full response, for callers
    /// needing the revision or a localized form.
    pub async fn get_form_fields_with(
        &self,
        request: GetFormFieldsRequest,
    ) -> Result<GetFormFieldsResponse, ApiClientError> {
        self.client.call(request).await
    }

    /// Fetches the pre-live form fields, keyed by field code.
    pub async fn get_form_fields_preview(
        &self,
        app: i64,
    ) -> Result<IndexMap<String, FieldProperty>, ApiClientError> {
        Ok(self
            .client
            .call(GetFormFieldsPreviewRequest::new(app))
            .await?
            .properties)
    }

    /// Fetches the pre-live form fields with the full response.
    pub async fn get_form_fields_preview_with(
        &self,
        request: GetFormFieldsPreviewRequest,
    ) -> Result<GetFormFieldsResponse, ApiClientError> {
        self.client.call(request).await
    }

    /// Fetches the deployed form layout.
    pub async fn get_form_layout(&self, app: i64) -> Result<Vec<Layout>, ApiClientError> {
        Ok(self.client.call(GetFormLayoutRequest::new(app)).await?.layout)
    }

    /// Fetches the pre-live form layout.
    pub async fn get_form_layout_preview(&self, app: i64) -> Result<Vec<Layout>, ApiClientError> {
        Ok(self
            .client
            .call(GetFormLayoutPreviewRequest::new(app))
            .await?
            .layout)
    }

    /// Replaces the pre-live form layout and returns the new revision.
    pub async fn update_form_layout(
        &self,
        request: UpdateFormLayoutRequest,
    ) -> Result<i64, ApiClientError> {
        Ok(self.client.call(request).await?.revision)
    }

    /// Fetches the deployed general settings.
    pub async fn get_app_settings(
        &self,
        app: i64,
    ) -> Result<GetAppSettingsResponse, ApiClientError> {
        self.client.call(GetAppSettingsRequest::new(app)).await
    }

    /// Fetches the pre-live general settings.
    pub async fn get_app_settings_preview(
        &self,
        app: i64,
    ) -> Result<GetAppSettingsResponse, ApiClientError> {
        self.client
            .call(GetAppSettingsPreviewRequest::new(app))
            .await
    }

    /// Updates the pre-live general settings and returns the new revision.
    pub async fn update_app_settings(
        &self,
        request: UpdateAppSettingsRequest,
    ) -> Result<i64, ApiClientError> {
        Ok(self.client.call(request).await?.revision)
    }

    /// Fetches the deployed process management settings.
    pub async fn get_process_management(
        &self,
        app: i64,
    ) -> Result<GetProcessManagementResponse, ApiClientError> {
        self.client.call(GetProcessManagementRequest::new(app)).await
    }

    /// Fetches the pre-live process management settings.
    pub async fn get_process_management_preview(
        &self,
        app: i64,
    ) -> Result<GetProcessManagementResponse, ApiClientError> {
        self.client
            .call(GetProcessManagementPreviewRequest::new(app))
            .await
    }

    /// Updates the pre-live process management settings and returns the new
    /// revision.
    pub async fn update_process_management(
        &self,
        request: UpdateProcessManagementRequest,
    ) -> Result<i64, ApiClientError> {
        Ok(self.client.call(request).await?.revision)
    }

    /// Fetches the deployed views, keyed by view name.
    pub async fn get_views(&self, app: i64) -> Result<IndexMap<String, View>, ApiClientError> {
        Ok(self.client.call(GetViewsRequest::new(app)).await?.views)
    }

    /// Fetches the pre-live views, keyed by view name.
    pub async fn get_views_preview(
        &self,
        app: i64,
    ) -> Result<IndexMap<String, View>, ApiClientError> {
        Ok(self
            .client
            .call(GetViewsPreviewRequest::new(app))
            .await?
            .views)
    }

    /// Replaces the pre-live views and returns their assigned identifiers.
    pub async fn update_views(
        &self,
        request: UpdateViewsRequest,
    ) -> Result<UpdateViewsResponse, ApiClientError> {
        self.client.call(request).await
    }

    /// Fetches the deployed app permissions.
    pub async fn get_app_acl(&self, app: i64) -> Result<Vec<AppRightEntity>, ApiClientError> {
        Ok(self.client.call(GetAppAclRequest::new(app)).await?.rights)
    }

    /// Fetches the pre-live app permissions.
    pub async fn get_app_acl_preview(
        &self,
        app: i64,
    ) -> Result<Vec<AppRightEntity>, ApiClientError> {
        Ok(self
            .client
            .call(GetAppAclPreviewRequest::new(app))
            .await?
            .rights)
    }

    /// Replaces the pre-live app permissions and returns the new revision.
    pub async fn update_app_acl(
        &self,
        request: UpdateAppAclRequest,
    ) -> Result<i64, ApiClientError> {
        Ok(self.client.call(request).await?.revision)
    }

    /// Fetches the deployed record permissions.
    pub async fn get_record_acl(&self, app: i64) -> Result<Vec<RecordRight>, ApiClientError> {
        Ok(self.client.call(GetRecordAclRequest::new(app)).await?.rights)
    }

    /// Fetches the pre-live record permissions.
    pub async fn get_record_acl_preview(
        &self,
        app: i64,
    ) -> Result<Vec<RecordRight>, ApiClientError> {
        Ok(self
            .client
            .call(GetRecordAclPreviewRequest::new(app))
            .await?
            .rights)
    }

    /// Replaces the pre-live record permissions and returns the new revision.
    pub async fn update_record_acl(
        &self,
        request: UpdateRecordAclRequest,
    ) -> Result<i64, ApiClientError> {
        Ok(self.client.call(request).await?.revision)
    }

    /// Fetches the deployed field permissions.
    pub async fn get_field_acl(&self, app: i64) -> Result<Vec<FieldRight>, ApiClientError> {
        Ok(self.client.call(GetFieldAclRequest::new(app)).await?.rights)
    }

    /// Fetches the pre-live field permissions.
    pub async fn get_field_acl_preview(
        &self,
        app: i64,
    ) -> Result<Vec<FieldRight>, ApiClientError> {
        Ok(self
            .client
            .call(GetFieldAclPreviewRequest::new(app))
            .await?
            .rights)
    }

    /// Replaces the pre-live field permissions and returns the new revision.
    pub async fn update_field_acl(
        &self,
        request: UpdateFieldAclRequest,
    ) -> Result<i64, ApiClientError> {
        Ok(self.client.call(request).await?.revision)
    }

    /// Evaluates the API user's permissions on the given records.
    pub async fn evaluate_record_acl(
        &self,
        app: i64,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<Vec<EvaluatedRecordRight>, ApiClientError> {
        Ok(self
            .client
            .call(EvaluateRecordAclRequest::new(app, ids))
            .await?
            .rights)
    }

    /// Fetches the deployed JavaScript/CSS customizations.
    pub async fn get_app_customize(
        &self,
        app: i64,
    ) -> Result<GetAppCustomizeResponse, ApiClientError> {
        self.client.call(GetAppCustomizeRequest::new(app)).await
    }

    /// Fetches the pre-live JavaScript/CSS customizations.
    pub async fn get_app_customize_preview(
        &self,
        app: i64,
    ) -> Result<GetAppCustomizeResponse, ApiClientError> {
        self.client
            .call(GetAppCustomizePreviewRequest::new(app))
            .await
    }

    /// Updates the pre-live JavaScript/CSS customizations and returns the
    /// new revision.
    pub async fn update_app_customize(
        &self,
        request: UpdateAppCustomizeRequest,
    ) -> Result<i64, ApiClientError> {
        Ok(self.client.call(request).await?.revision)
    }

    /// Starts deploying one app's pre-live settings to production.
    ///
    /// Deployment is asynchronous; poll [`get_deploy_status`](Self::get_deploy_status)
    /// until it leaves [`DeployStatus::Processing`].
    pub async fn deploy_app(&self, app: i64) -> Result<(), ApiClientError> {
        self.deploy_apps(vec![DeployApp::new(app)]).await
    }

    /// Starts deploying several apps atomically: all of them succeed or all
    /// of them are canceled.
    pub async fn deploy_apps(&self, apps: Vec<DeployApp>) -> Result<(), ApiClientError> {
        self.client.call(DeployAppRequest::new(apps)).await?;
        Ok(())
    }

    /// Discards one app's pre-live changes, restoring the deployed settings.
    pub async fn revert_app(&self, app: i64) -> Result<(), ApiClientError> {
        self.client
            .call(DeployAppRequest::new(vec![DeployApp::new(app)]).revert(true))
            .await?;
        Ok(())
    }

    /// Polls the deployment progress of one app.
    pub async fn get_deploy_status(&self, app: i64) -> Result<DeployStatus, ApiClientError> {
        let statuses = self.get_deploy_statuses([app]).await?;
        statuses
            .into_iter()
            .find(|entry| entry.app == app)
            .map(|entry| entry.status)
            .ok_or(ApiClientError::Remote {
                status: 200,
                code: String::new(),
                id: String::new(),
                message: format!("deploy status response did not mention app {app}"),
            })
    }

    /// Polls the deployment progress of several apps.
    pub async fn get_deploy_statuses(
        &self,
        apps: impl IntoIterator<Item = i64>,
    ) -> Result<Vec<DeployStatusEntry>, ApiClientError> {
        Ok(self
            .client
            .call(GetDeployStatusRequest::new(apps))
            .await?
            .apps)
    }
}

//! Endpoint registry and the request/response dispatch contract.
//!
//! Every remote operation has one [`Api`] key, one immutable [`Endpoint`]
//! descriptor in the process-wide registry, and one request type
//! implementing [`ApiRequest`]. The dispatcher
//! ([`KintoneClient::call`](crate::KintoneClient::call)) is a pure function
//! of the descriptor, the request, the registered handlers and the client
//! configuration.

use std::sync::LazyLock;

use http::Method;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::ApiClientError;

pub mod app;

/// Stable operation keys, one per remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Api {
    /// Add App (creates a pre-live app).
    AddApp,
    /// Get App.
    GetApp,
    /// Get Apps.
    GetApps,
    /// Add Form Fields (pre-live).
    AddFormFields,
    /// Update Form Fields (pre-live).
    UpdateFormFields,
    /// Delete Form Fields (pre-live).
    DeleteFormFields,
    /// Get Form Fields.
    GetFormFields,
    /// Get Form Fields (pre-live settings).
    GetFormFieldsPreview,
    /// Get Form Layout.
    GetFormLayout,
    /// Get Form Layout (pre-live settings).
    GetFormLayoutPreview,
    /// Update Form Layout (pre-live).
    UpdateFormLayout,
    /// Get App Settings.
    GetAppSettings,
    /// Get App Settings (pre-live settings).
    GetAppSettingsPreview,
    /// Update App Settings (pre-live).
    UpdateAppSettings,
    /// Get Process Management settings.
    GetProcessManagement,
    /// Get Process Management settings (pre-live).
    GetProcessManagementPreview,
    /// Update Process Management settings (pre-live).
    UpdateProcessManagement,
    /// Get Views.
    GetViews,
    /// Get Views (pre-live settings).
    GetViewsPreview,
    /// Update Views (pre-live).
    UpdateViews,
    /// Get App permissions.
    GetAppAcl,
    /// Get App permissions (pre-live settings).
    GetAppAclPreview,
    /// Update App permissions (pre-live).
    UpdateAppAcl,
    /// Get Record permissions.
    GetRecordAcl,
    /// Get Record permissions (pre-live settings).
    GetRecordAclPreview,
    /// Update Record permissions (pre-live).
    UpdateRecordAcl,
    /// Get Field permissions.
    GetFieldAcl,
    /// Get Field permissions (pre-live settings).
    GetFieldAclPreview,
    /// Update Field permissions (pre-live).
    UpdateFieldAcl,
    /// Evaluate the API user's record-level permissions.
    EvaluateRecordAcl,
    /// Get JavaScript/CSS customization settings.
    GetAppCustomize,
    /// Get JavaScript/CSS customization settings (pre-live).
    GetAppCustomizePreview,
    /// Update JavaScript/CSS customization settings (pre-live).
    UpdateAppCustomize,
    /// Deploy App Settings (also used to revert pre-live changes).
    DeployApp,
    /// Get App Deploy Status.
    GetDeployStatus,
}

/// One immutable endpoint descriptor.
///
/// Descriptors live in the process-wide registry for the lifetime of the
/// program; paths are relative to the API prefix (`k/v1/` or the guest-space
/// variant).
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// The operation key.
    pub api: Api,
    /// The HTTP method. `GET` endpoints carry parameters in the query
    /// string; all others take a JSON body.
    pub method: Method,
    /// The path, relative to the API prefix.
    pub path: &'static str,
    /// Whether the operation addresses several targets in one call.
    pub accepts_bulk: bool,
}

static REGISTRY: LazyLock<IndexMap<Api, Endpoint>> = LazyLock::new(|| {
    let table = [
        (Api::AddApp, Method::POST, "preview/app.json", false),
        (Api::GetApp, Method::GET, "app.json", false),
        (Api::GetApps, Method::GET, "apps.json", true),
        (
            Api::AddFormFields,
            Method::POST,
            "preview/app/form/fields.json",
            false,
        ),
        (
            Api::UpdateFormFields,
            Method::PUT,
            "preview/app/form/fields.json",
            false,
        ),
        (
            Api::DeleteFormFields,
            Method::DELETE,
            "preview/app/form/fields.json",
            false,
        ),
        (Api::GetFormFields, Method::GET, "app/form/fields.json", false),
        (
            Api::GetFormFieldsPreview,
            Method::GET,
            "preview/app/form/fields.json",
            false,
        ),
        (Api::GetFormLayout, Method::GET, "app/form/layout.json", false),
        (
            Api::GetFormLayoutPreview,
            Method::GET,
            "preview/app/form/layout.json",
            false,
        ),
        (
            Api::UpdateFormLayout,
            Method::PUT,
            "preview/app/form/layout.json",
            false,
        ),
        (Api::GetAppSettings, Method::GET, "app/settings.json", false),
        (
            Api::GetAppSettingsPreview,
            Method::GET,
            "preview/app/settings.json",
            false,
        ),
        (
            Api::UpdateAppSettings,
            Method::PUT,
            "preview/app/settings.json",
            false,
        ),
        (Api::GetProcessManagement, Method::GET, "app/status.json", false),
        (
            Api::GetProcessManagementPreview,
            Method::GET,
            "preview/app/status.json",
            false,
        ),
        (
            Api::UpdateProcessManagement,
            Method::PUT,
            "preview/app/status.json",
            false,
        ),
        (Api::GetViews, Method::GET, "app/views.json", false),
        (
            Api::GetViewsPreview,
            Method::GET,
            "preview/app/views.json",
            false,
        ),
        (Api::UpdateViews, Method::PUT, "preview/app/views.json", false),
        (Api::GetAppAcl, Method::GET, "app/acl.json", false),
        (
            Api::GetAppAclPreview,
            Method::GET,
            "preview/app/acl.json",
            false,
        ),
        (Api::UpdateAppAcl, Method::PUT, "preview/app/acl.json", false),
        (Api::GetRecordAcl, Method::GET, "record/acl.json", false),
        (
            Api::GetRecordAclPreview,
            Method::GET,
            "preview/record/acl.json",
            false,
        ),
        (
            Api::UpdateRecordAcl,
            Method::PUT,
            "preview/record/acl.json",
            false,
        ),
        (Api::GetFieldAcl, Method::GET, "field/acl.json", false),
        (
            Api::GetFieldAclPreview,
            Method::GET,
            "preview/field/acl.json",
            false,
        ),
        (
            Api::UpdateFieldAcl,
            Method::PUT,
            "preview/field/acl.json",
            false,
        ),
        (
            Api::EvaluateRecordAcl,
            Method::GET,
            "records/acl/evaluate.json",
            true,
        ),
        (Api::GetAppCustomize, Method::GET, "app/customize.json", false),
        (
            Api::GetAppCustomizePreview,
            Method::GET,
            "preview/app/customize.json",
            false,
        ),
        (
            Api::UpdateAppCustomize,
            Method::PUT,
            "preview/app/customize.json",
            false,
        ),
        (Api::DeployApp, Method::POST, "preview/app/deploy.json", true),
        (
            Api::GetDeployStatus,
            Method::GET,
            "preview/app/deploy.json",
            true,
        ),
    ];

    table
        .into_iter()
        .map(|(api, method, path, accepts_bulk)| {
            (
                api,
                Endpoint {
                    api,
                    method,
                    path,
                    accepts_bulk,
                },
            )
        })
        .collect()
});

/// Looks up the descriptor for an operation key.
///
/// Keys are compile-time constants, so a miss should never happen at
/// runtime; the lookup stays checked regardless so the dispatcher is total.
pub fn endpoint(api: Api) -> Result<&'static Endpoint, ApiClientError> {
    REGISTRY
        .get(&api)
        .ok_or(ApiClientError::UnknownEndpoint { api })
}

/// The dispatch contract implemented by every request type.
///
/// Binds a request shape to its operation key and its typed response, which
/// is what lets [`KintoneClient::call`](crate::KintoneClient::call) stay a
/// single generic choke point.
pub trait ApiRequest: Serialize {
    /// The operation key this request dispatches to.
    const API: Api;

    /// The typed response produced by a successful dispatch.
    type Response: DeserializeOwned;
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    const ALL: [Api; 35] = [
        Api::AddApp,
        Api::GetApp,
        Api::GetApps,
        Api::AddFormFields,
        Api::UpdateFormFields,
        Api::DeleteFormFields,
        Api::GetFormFields,
        Api::GetFormFieldsPreview,
        Api::GetFormLayout,
        Api::GetFormLayoutPreview,
        Api::UpdateFormLayout,
        Api::GetAppSettings,
        Api::GetAppSettingsPreview,
        Api::UpdateAppSettings,
        Api::GetProcessManagement,
        Api::GetProcessManagementPreview,
        Api::UpdateProcessManagement,
        Api::GetViews,
        Api::GetViewsPreview,
        Api::UpdateViews,
        Api::GetAppAcl,
        Api::GetAppAclPreview,
        Api::UpdateAppAcl,
        Api::GetRecordAcl,
        Api::GetRecordAclPreview,
        Api::UpdateRecordAcl,
        Api::GetFieldAcl,
        Api::GetFieldAclPreview,
        Api::UpdateFieldAcl,
        Api::EvaluateRecordAcl,
        Api::GetAppCustomize,
        Api::GetAppCustomizePreview,
        Api::UpdateAppCustomize,
        Api::DeployApp,
        Api::GetDeployStatus,
    ];

    #[test]
    fn every_operation_key_has_a_descriptor() {
        for api in ALL {
            let descriptor = endpoint(api).expect("registered endpoint");
            check!(descriptor.api == api);
            check!(descriptor.path.ends_with(".json"));
        }
    }

    #[test]
    fn registry_has_no_extra_entries() {
        check!(super::REGISTRY.len() == ALL.len());
    }

    #[test]
    fn read_endpoints_use_get() {
        let descriptor = endpoint(Api::GetFormFields).expect("registered endpoint");
        check!(descriptor.method == Method::GET);
        check!(descriptor.path == "app/form/fields.json");
    }

    #[test]
    fn preview_and_live_settings_are_distinct_endpoints() {
        let live = endpoint(Api::GetAppSettings).expect("registered endpoint");
        let preview = endpoint(Api::GetAppSettingsPreview).expect("registered endpoint");
        check!(live.path != preview.path);
        check!(preview.path.starts_with("preview/"));
    }

    #[test]
    fn deploy_endpoints_accept_bulk_inputs() {
        check!(endpoint(Api::DeployApp).expect("registered").accepts_bulk);
        check!(
            endpoint(Api::GetDeployStatus)
                .expect("registered")
                .accepts_bulk
        );
        check!(!endpoint(Api::GetApp).expect("registered").accepts_bulk);
    }

    #[test]
    fn mutating_endpoints_target_pre_live_paths() {
        for api in [
            Api::AddFormFields,
            Api::UpdateFormFields,
            Api::DeleteFormFields,
            Api::UpdateFormLayout,
            Api::UpdateAppSettings,
            Api::UpdateViews,
            Api::UpdateAppCustomize,
        ] {
            let descriptor = endpoint(api).expect("registered endpoint");
            check!(descriptor.path.starts_with("preview/"), "{api:?}");
            check!(descriptor.method != Method::GET, "{api:?}");
        }
    }
}

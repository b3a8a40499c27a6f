//! Asynchronous virtual machine operations.

use crate::models::{
    CloneVmRequest, CloneVmResponse, DeleteVmResponse, ImportTemplateRequest,
    ImportTemplateResponse, ListVmResponse, MigrateVmRequest, MigrateVmResponse, RebootMode,
    RebootVmRequest, RebootVmResponse, StartVmResponse, Vm, VmListParams,
};
use crate::netmask::normalize_netmask;
use crate::Result;
use fusioncompute_core::config::FusionComputeConfig;
use fusioncompute_core::response::decode_response;
use fusioncompute_core::transport::{ApiClient, ApiRequest, HttpTransport};
use fusioncompute_core::Error;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

const SITE_MASK: &str = "<site_uri>";
const VM_COLLECTION: &str = "<site_uri>/vms";

/// What to do when a clone asks for a smaller boot disk than its template has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiskSizePolicy {
    /// Raise the requested size to the template's and log a warning.
    #[default]
    Promote,
    /// Fail the clone with [`Error::InvalidInput`].
    Reject,
}

/// Virtual machine operations scoped to one site.
///
/// The manager holds no per-call state and can be cloned and shared freely.
#[derive(Clone)]
pub struct VmManager {
    transport: Arc<dyn HttpTransport>,
    site_uri: String,
    disk_size_policy: DiskSizePolicy,
}

impl VmManager {
    /// Create a manager that issues requests through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, site_uri: impl Into<String>) -> Self {
        Self {
            transport,
            site_uri: site_uri.into(),
            disk_size_policy: DiskSizePolicy::default(),
        }
    }

    /// Build an [`ApiClient`] from `config` and a manager for its site.
    pub fn from_config(config: &FusionComputeConfig) -> Result<Self> {
        let client = ApiClient::from_config(config)?;
        Ok(Self::new(Arc::new(client), config.site_uri.clone()))
    }

    /// Override how undersized clone disks are handled.
    #[must_use]
    pub fn with_disk_size_policy(mut self, policy: DiskSizePolicy) -> Self {
        self.disk_size_policy = policy;
        self
    }

    /// The site URI collection requests are rooted at.
    #[must_use]
    pub fn site_uri(&self) -> &str {
        &self.site_uri
    }

    /// List VMs, or only templates when `is_template` is set.
    pub async fn list_vms(&self, is_template: bool) -> Result<Vec<Vm>> {
        let params = VmListParams {
            is_template,
            ..VmListParams::default()
        };
        self.list_vms_with(&params).await
    }

    /// List VMs with additional filters and pagination.
    pub async fn list_vms_with(&self, params: &VmListParams) -> Result<Vec<Vm>> {
        let path = VM_COLLECTION.replace(SITE_MASK, &self.site_uri);
        let request = ApiRequest::get(path).with_query(params.to_pairs());
        let response: ListVmResponse = self.send(request).await?;
        Ok(response.vms)
    }

    /// Fetch a single VM or template.
    pub async fn get_vm(&self, vm_uri: &str) -> Result<Vm> {
        self.send(ApiRequest::get(vm_uri)).await
    }

    /// Clone a template into a new VM.
    ///
    /// Prefix-length netmasks are converted to dotted decimal before anything is
    /// sent. The template is then fetched so the boot disk is never smaller than
    /// the template's; see [`DiskSizePolicy`].
    pub async fn clone_vm(
        &self,
        template_uri: &str,
        mut request: CloneVmRequest,
    ) -> Result<CloneVmResponse> {
        normalize_nic_netmasks(&mut request)?;

        let template = self.get_vm(template_uri).await?;
        self.apply_disk_size_policy(template_uri, &template, &mut request)?;

        let path = action_path(template_uri, "clone");
        self.send(ApiRequest::post(path).with_json(&request)?).await
    }

    /// Power on a VM.
    pub async fn start_vm(&self, vm_uri: &str) -> Result<StartVmResponse> {
        self.send(ApiRequest::post(action_path(vm_uri, "start"))).await
    }

    /// Delete a VM.
    pub async fn delete_vm(&self, vm_uri: &str) -> Result<DeleteVmResponse> {
        self.send(ApiRequest::delete(vm_uri)).await
    }

    /// Reboot a VM, gracefully when `safe` is set and by hard reset otherwise.
    pub async fn reboot_vm(&self, vm_uri: &str, safe: bool) -> Result<RebootVmResponse> {
        let body = RebootVmRequest {
            mode: RebootMode::from_safe(safe),
        };
        let request = ApiRequest::post(action_path(vm_uri, "reboot")).with_json(&body)?;
        self.send(request).await
    }

    /// Live-migrate a VM to `host_urn`, optionally pinning it there.
    pub async fn migrate_vm(
        &self,
        vm_uri: &str,
        host_urn: &str,
        is_binding_host: bool,
    ) -> Result<MigrateVmResponse> {
        let body = MigrateVmRequest {
            location: host_urn.to_string(),
            is_binding_host,
        };
        let request = ApiRequest::post(action_path(vm_uri, "migrate")).with_json(&body)?;
        self.send(request).await
    }

    /// Name of the host a VM runs on; empty when the platform reports none.
    pub async fn get_host_name_of(&self, vm_uri: &str) -> Result<String> {
        let vm = self.get_vm(vm_uri).await?;
        Ok(vm.host_name.unwrap_or_default())
    }

    /// Import a VM or template from an image share.
    pub async fn upload_image(
        &self,
        vm_uri: &str,
        request: &ImportTemplateRequest,
    ) -> Result<ImportTemplateResponse> {
        let request = ApiRequest::post(action_path(vm_uri, "import")).with_json(request)?;
        self.send(request).await
    }

    fn apply_disk_size_policy(
        &self,
        template_uri: &str,
        template: &Vm,
        request: &mut CloneVmRequest,
    ) -> Result<()> {
        let (Some(template_disk), Some(requested)) = (
            template.vm_config.disks.first(),
            request.config.disks.first_mut(),
        ) else {
            return Ok(());
        };

        if requested.quantity_gb >= template_disk.quantity_gb {
            return Ok(());
        }

        match self.disk_size_policy {
            DiskSizePolicy::Promote => {
                warn!(
                    template = template_uri,
                    requested_gb = requested.quantity_gb,
                    template_gb = template_disk.quantity_gb,
                    "Raising clone boot disk to template size"
                );
                requested.quantity_gb = template_disk.quantity_gb;
                Ok(())
            }
            DiskSizePolicy::Reject => Err(Error::InvalidInput(format!(
                "requested boot disk of {} GB is smaller than the {} GB of template `{template_uri}`",
                requested.quantity_gb, template_disk.quantity_gb
            ))),
        }
    }

    async fn send<R>(&self, request: ApiRequest) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let context = format!("{} {}", request.method, request.path);
        let response = self.transport.execute(request).await?;
        decode_response(response, &context)
    }
}

fn action_path(uri: &str, action: &str) -> String {
    format!("{}/action/{action}", uri.trim_end_matches('/'))
}

fn normalize_nic_netmasks(request: &mut CloneVmRequest) -> Result<()> {
    for nic in &mut request.vm_customization.nic_specification {
        nic.netmask = normalize_netmask(&nic.netmask)?;
    }
    Ok(())
}

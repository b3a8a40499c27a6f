//! Virtual machine models for the FusionCompute REST API.
//!
//! Field names follow the platform's camelCase JSON schema. Everything the platform
//! may omit is optional so that responses from older VRM releases still decode.

use fusioncompute_core::query::QueryParams;
use serde::{Deserialize, Serialize, Serializer};

/// Parameters supported by the `<site>/vms` list endpoint.
#[derive(Debug, Default, Clone)]
pub struct VmListParams {
    /// Only return templates.
    pub is_template: bool,
    /// Filter by VM name.
    pub name: Option<String>,
    /// Filter by VM status (running, stopped, etc.).
    pub status: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

impl VmListParams {
    /// Convert the parameters into URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_flag("isTemplate", self.is_template);
        params.push_opt("name", self.name.as_deref());
        params.push_opt("status", self.status.as_deref());
        params.push_opt("limit", self.limit);
        params.push_opt("offset", self.offset);

        params.into_pairs()
    }
}

/// Body of the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListVmResponse {
    /// Total number of matching VMs.
    #[serde(default)]
    pub total: u64,
    /// The VMs on this page.
    #[serde(default)]
    pub vms: Vec<Vm>,
}

/// Representation of a VM or template as returned by the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vm {
    /// Platform-wide resource name (`urn:sites:...:vms:i-...`).
    pub urn: String,
    /// Resource URI, used as the address of every VM operation.
    pub uri: String,
    /// VM UUID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// CPU architecture (`x86`, `arm`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    /// VM group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// URN of the cluster or host the VM is placed on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Name of the placement location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// URN of the hosting server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_urn: Option<String>,
    /// Name of the hosting server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    /// URN of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_urn: Option<String>,
    /// Name of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    /// Power state (`running`, `stopped`, `hibernated`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// PV driver status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pv_driver_status: Option<String>,
    /// Tools installation status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_install_status: Option<String>,
    /// CD-ROM attach status.
    #[serde(default, rename = "cdRomStatus", skip_serializing_if = "Option::is_none")]
    pub cdrom_status: Option<String>,
    /// Whether the resource is a template.
    #[serde(default)]
    pub is_template: bool,
    /// Whether the VM is a linked clone.
    #[serde(default)]
    pub is_link_clone: bool,
    /// Whether the VM is pinned to its host.
    #[serde(default)]
    pub is_binding_host: bool,
    /// Creation time as reported by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Installed tools version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools_version: Option<String>,
    /// VM type (0 normal, 1 disaster recovery, 2 placeholder).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_type: Option<i32>,
    /// Hardware configuration.
    #[serde(default)]
    pub vm_config: VmConfig,
    /// Guest operating system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_options: Option<OsOptions>,
    /// Extra platform parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

/// Hardware configuration of a VM, also used when cloning and importing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VmConfig {
    /// CPU allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Cpu>,
    /// Memory allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Memory>,
    /// Disks ordered by sequence number; the first one is the boot disk.
    #[serde(default)]
    pub disks: Vec<Disk>,
    /// Network interfaces.
    #[serde(default)]
    pub nics: Vec<Nic>,
}

/// CPU allocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cpu {
    /// Number of vCPUs.
    pub quantity: u32,
    /// Reserved MHz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation: Option<u32>,
    /// Scheduling weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Upper limit in MHz (0 is unlimited).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Cores per virtual socket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores_per_socket: Option<u32>,
}

/// Memory allocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    /// Memory size in MB.
    #[serde(rename = "quantityMB")]
    pub quantity_mb: u64,
    /// Reserved MB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation: Option<u64>,
    /// Scheduling weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Upper limit in MB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Virtual disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Disk {
    /// Slot number; `1` is the boot disk.
    pub sequence_num: u32,
    /// Disk size in GB.
    #[serde(rename = "quantityGB")]
    pub quantity_gb: u64,
    /// Whether the template disk content is copied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_data_copy: Option<bool>,
    /// Datastore hosting the volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datastore_urn: Option<String>,
    /// Thin provisioning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_thin: Option<bool>,
    /// Bus type (`IDE`, `SCSI`, `VIRTIO`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pci_type: Option<String>,
    /// Backing volume URN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_urn: Option<String>,
    /// Independent disk (excluded from snapshots).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indep_disk: Option<bool>,
    /// Persistent disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_disk: Option<bool>,
}

/// Network interface of a VM.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Nic {
    /// Interface name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// NIC URN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
    /// NIC URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// MAC address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    /// Primary IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Port group the NIC is attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_group_urn: Option<String>,
    /// Slot number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_num: Option<u32>,
    /// Whether the NIC uses virtio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virt_io: Option<u32>,
}

/// Guest operating system.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OsOptions {
    /// OS family (`Windows`, `Linux`, `Other`).
    pub os_type: String,
    /// Platform OS version identifier.
    pub os_version: u32,
    /// Guest host name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
}

/// Body of the clone action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloneVmRequest {
    /// Name of the new VM.
    pub name: String,
    /// Description of the new VM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URN of the target cluster or host.
    pub location: String,
    /// Pin the new VM to `location`.
    #[serde(default)]
    pub is_binding_host: bool,
    /// Create the clone as a template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    /// Start the VM after cloning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_boot: Option<bool>,
    /// Hardware configuration of the clone.
    #[serde(rename = "vmConfig")]
    pub config: VmConfig,
    /// Guest customization.
    pub vm_customization: Customization,
}

/// Guest customization applied while cloning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    /// OS family (`Windows`, `Linux`).
    pub os_type: String,
    /// Guest host name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Whether to reset the administrator password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_update_vm_password: Option<bool>,
    /// New administrator password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Windows workgroup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workgroup: Option<String>,
    /// Per-NIC IP settings, in NIC order.
    #[serde(default)]
    pub nic_specification: Vec<NicSpecification>,
}

/// IP settings for one NIC of a clone.
///
/// `netmask` may be dotted decimal (`255.255.255.0`) or a prefix length (`24`);
/// prefix lengths are converted before the clone is submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NicSpecification {
    /// NIC slot this entry applies to.
    pub sequence_num: u32,
    /// Static IP address.
    pub ip: String,
    /// Subnet mask or prefix length.
    pub netmask: String,
    /// Default gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    /// Primary DNS server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setdns: Option<String>,
    /// Secondary DNS server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adddns: Option<String>,
}

/// Response of the clone action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloneVmResponse {
    /// URN of the new VM.
    pub urn: String,
    /// URI of the new VM.
    pub uri: String,
    /// URN of the clone task.
    pub task_urn: String,
    /// URI of the clone task.
    pub task_uri: String,
}

/// Task handle returned by asynchronous VM actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task URN.
    pub task_urn: String,
    /// Task URI.
    pub task_uri: String,
}

/// Response of the start action.
pub type StartVmResponse = TaskResponse;
/// Response of a VM deletion.
pub type DeleteVmResponse = TaskResponse;
/// Response of the reboot action.
pub type RebootVmResponse = TaskResponse;
/// Response of the migrate action.
pub type MigrateVmResponse = TaskResponse;

/// Reboot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebootMode {
    /// Graceful reboot through the guest tools.
    Safe,
    /// Hard reset.
    Force,
}

impl RebootMode {
    /// Map the `safe` flag of a reboot call to a mode.
    #[must_use]
    pub const fn from_safe(safe: bool) -> Self {
        if safe {
            Self::Safe
        } else {
            Self::Force
        }
    }
}

/// Body of the reboot action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RebootVmRequest {
    /// Reboot mode.
    pub mode: RebootMode,
}

/// Body of the migrate action.
///
/// The platform expects `isBindingHost` as the string `"true"` or `"false"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateVmRequest {
    /// URN of the destination host.
    pub location: String,
    /// Pin the VM to the destination host.
    #[serde(serialize_with = "serialize_bool_string")]
    pub is_binding_host: bool,
}

fn serialize_bool_string<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "true" } else { "false" })
}

/// Body of the import action, creating a VM or template from an image share.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportTemplateRequest {
    /// Name of the imported VM or template.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URN of the target cluster or host.
    pub location: String,
    /// Share protocol (`nfs`, `cifs`).
    pub protocol: String,
    /// Location of the image on the share.
    pub url: String,
    /// Import as a template.
    #[serde(default)]
    pub is_template: bool,
    /// Share user name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Share password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Hardware configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_config: Option<VmConfig>,
    /// Guest operating system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_options: Option<OsOptions>,
}

/// Response of the import action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportTemplateResponse {
    /// URN of the imported VM.
    #[serde(default)]
    pub urn: String,
    /// URI of the imported VM.
    #[serde(default)]
    pub uri: String,
    /// URN of the import task.
    pub task_urn: String,
    /// URI of the import task.
    pub task_uri: String,
}

//! Virtual machine client and data models for FusionCompute.
//!
//! Provides typed structures and an asynchronous [`VmManager`] for listing, cloning,
//! starting, deleting, rebooting, migrating and importing virtual machines.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod netmask;

pub use client::{DiskSizePolicy, VmManager};
pub use models::{
    CloneVmRequest, CloneVmResponse, Cpu, Customization, DeleteVmResponse, Disk,
    ImportTemplateRequest, ImportTemplateResponse, ListVmResponse, Memory, MigrateVmRequest,
    MigrateVmResponse, Nic, NicSpecification, OsOptions, RebootMode, RebootVmRequest,
    RebootVmResponse, StartVmResponse, TaskResponse, Vm, VmConfig, VmListParams,
};
pub use netmask::{normalize_netmask, prefix_to_netmask};

/// Convenient result alias that reuses the shared FusionCompute error type.
pub type Result<T> = fusioncompute_core::Result<T>;

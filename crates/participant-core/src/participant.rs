//! Conference participants and the devices they own

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::device::ParticipantDevice;
use crate::errors::{ParticipantError, Result};
use crate::types::DeviceAddress;

/// A conference or chat-room participant: one identity, several devices
#[derive(Debug)]
pub struct Participant {
    address: DeviceAddress,
    created_at: DateTime<Utc>,
    is_admin: RwLock<bool>,
    is_focus: bool,
    devices: RwLock<Vec<ParticipantDevice>>,
}

impl Participant {
    pub fn new(address: DeviceAddress) -> Self {
        Self {
            address,
            created_at: Utc::now(),
            is_admin: RwLock::new(false),
            is_focus: false,
            devices: RwLock::new(Vec::new()),
        }
    }

    /// Participant that hosts the conference focus
    pub fn focus(address: DeviceAddress) -> Self {
        Self {
            is_focus: true,
            ..Self::new(address)
        }
    }

    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_admin(&self) -> bool {
        *self.is_admin.read()
    }

    pub fn set_admin(&self, is_admin: bool) {
        *self.is_admin.write() = is_admin;
    }

    pub fn is_focus(&self) -> bool {
        self.is_focus
    }

    /// Attach a device. Fails when a device with a weakly-equal address and
    /// the same GRUU is already attached.
    pub fn add_device(&self, device: ParticipantDevice) -> Result<()> {
        let mut devices = self.devices.write();
        if devices.iter().any(|d| same_device(d.address(), device.address())) {
            return Err(ParticipantError::device_already_exists(device.address().to_string()));
        }
        info!("Participant {} gained device {}", self.address, device.address());
        devices.push(device);
        Ok(())
    }

    pub fn find_device(&self, address: &DeviceAddress) -> Option<ParticipantDevice> {
        self.devices
            .read()
            .iter()
            .find(|d| same_device(d.address(), address))
            .cloned()
    }

    /// Find the device currently sending media with `ssrc`
    pub fn find_device_by_ssrc(&self, ssrc: u32) -> Option<ParticipantDevice> {
        self.devices.read().iter().find(|d| d.ssrc() == ssrc).cloned()
    }

    pub fn remove_device(&self, address: &DeviceAddress) -> Result<ParticipantDevice> {
        let mut devices = self.devices.write();
        let pos = devices
            .iter()
            .position(|d| same_device(d.address(), address))
            .ok_or_else(|| ParticipantError::device_not_found(address.to_string()))?;
        let device = devices.remove(pos);
        debug!("Participant {} lost device {}", self.address, address);
        Ok(device)
    }

    /// Devices in the order they were attached
    pub fn devices(&self) -> Vec<ParticipantDevice> {
        self.devices.read().clone()
    }

    pub fn device_count(&self) -> usize {
        self.devices.read().len()
    }

    /// True when any device is in the conference
    pub fn is_in_conference(&self) -> bool {
        self.devices.read().iter().any(|d| d.is_in_conference())
    }
}

// Devices of one participant share user@host and differ by GRUU.
fn same_device(a: &DeviceAddress, b: &DeviceAddress) -> bool {
    a.weak_equal(b) && a.gruu() == b.gruu()
}

//! Bridge backend registration and dispatch
//!
//! This module provides a centralized registry for the compiled-in bridge
//! backends and the dispatch that opens one by name. The commands only
//! ever see the core bus-master traits.

use std::error::Error;

use cybridge_core::bridge::{I2cBridge, SpiBridge};

/// Information about a bridge backend
pub struct BridgeInfo {
    /// Name used for matching on the command line
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
}

/// Get information about all backends enabled at compile time
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_bridges() -> Vec<BridgeInfo> {
    let mut bridges = Vec::new();

    #[cfg(feature = "cyusb")]
    bridges.push(BridgeInfo {
        name: "cyusb",
        description: "Cypress CY7C65211 USB-serial bridge (VID:04b4 PID:0004)",
    });

    #[cfg(feature = "dummy")]
    bridges.push(BridgeInfo {
        name: "dummy",
        description: "In-memory loopback bridge for testing",
    });

    bridges
}

/// Generate a short list of backend names for CLI help
pub fn bridge_names_short() -> String {
    let names: Vec<&str> = available_bridges().iter().map(|b| b.name).collect();
    names.join(", ")
}

/// An open bridge of whichever backend was selected
pub enum BridgeHandle {
    #[cfg(feature = "cyusb")]
    Cyusb(cybridge_cyusb::CyBridge),
    #[cfg(feature = "dummy")]
    Dummy(cybridge_dummy::DummyBridge),
}

impl BridgeHandle {
    /// The bridge as an I2C master
    pub fn as_i2c(&mut self) -> &mut dyn I2cBridge {
        match self {
            #[cfg(feature = "cyusb")]
            BridgeHandle::Cyusb(bridge) => bridge,
            #[cfg(feature = "dummy")]
            BridgeHandle::Dummy(bridge) => bridge,
        }
    }

    /// The bridge as an SPI master
    pub fn as_spi(&mut self) -> &mut dyn SpiBridge {
        match self {
            #[cfg(feature = "cyusb")]
            BridgeHandle::Cyusb(bridge) => bridge,
            #[cfg(feature = "dummy")]
            BridgeHandle::Dummy(bridge) => bridge,
        }
    }
}

/// Open a bridge backend by name
#[allow(unused_variables)]
pub fn open_bridge(
    name: &str,
    device: Option<(u16, u16)>,
    index: usize,
) -> Result<BridgeHandle, Box<dyn Error>> {
    match name {
        #[cfg(feature = "cyusb")]
        "cyusb" => {
            let mut selector = cybridge_cyusb::DeviceSelector::default();
            if let Some((vid, pid)) = device {
                selector.vid = vid;
                selector.pid = pid;
            }
            selector.index = index;
            Ok(BridgeHandle::Cyusb(cybridge_cyusb::CyBridge::open(
                &selector,
            )?))
        }

        #[cfg(feature = "dummy")]
        "dummy" => Ok(BridgeHandle::Dummy(cybridge_dummy::DummyBridge::new())),

        other => Err(format!(
            "unknown bridge backend {:?} (available: {})",
            other,
            bridge_names_short()
        )
        .into()),
    }
}

//! List commands implementation

use std::error::Error;

use crate::bridges;

/// List attached USB devices, optionally filtered by `<vid>:<pid>`.
#[allow(unused_variables)]
pub fn list_devices(filter: Option<(u16, u16)>) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "cyusb")]
    {
        let mut count = 0usize;
        for dev in cybridge_cyusb::devices()? {
            if let Some((vid, pid)) = filter {
                if dev.vid != vid || dev.pid != pid {
                    continue;
                }
            }
            count += 1;
            println!("=====");
            println!("vid=0x{:04X}", dev.vid);
            println!("pid=0x{:04X}", dev.pid);
            println!("manufacturerName={}", dev.manufacturer.as_deref().unwrap_or(""));
            println!("productName={}", dev.product.as_deref().unwrap_or(""));
            println!("serialNum={}", dev.serial.as_deref().unwrap_or(""));
        }
        println!("=====");
        println!("{count} device(s)");
    }

    #[cfg(not(feature = "cyusb"))]
    println!("USB enumeration requires the cyusb backend feature");

    Ok(())
}

/// List the backends compiled into this binary.
pub fn list_bridges() {
    println!("Available bridge backends:");
    for bridge in bridges::available_bridges() {
        println!("  {:8} - {}", bridge.name, bridge.description);
    }
}

//! Example listing attached IgorPlug-USB receivers.
//!
//! Run with: cargo run --example enumerate_hardware

use igorplug_usb::{find_all, IgorPlug};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("IgorPlug-USB Device Enumeration Example");
    println!("=======================================\n");

    println!("1. Device Enumeration:");
    println!("----------------------");
    let devices = find_all()?;
    if devices.is_empty() {
        println!("  No IgorPlug-USB receivers found.");
        return Ok(());
    }
    for (i, info) in devices.iter().enumerate() {
        println!("  Receiver [{}]:", i);
        println!("    VID:PID: {:04X}:{:04X}", info.vendor_id, info.product_id);
        println!(
            "    Serial Number: {}",
            info.serial_number.as_deref().unwrap_or("N/A")
        );
        println!(
            "    Product: {}",
            info.product_string.as_deref().unwrap_or("Unknown")
        );
        println!(
            "    Manufacturer: {}",
            info.manufacturer_string.as_deref().unwrap_or("Unknown")
        );
        println!();
    }

    println!("2. Opening Device:");
    println!("------------------");
    let mut receiver = IgorPlug::new();
    match receiver.connect() {
        Ok(()) => println!("  Opened first receiver."),
        Err(e) => println!("  Failed to open receiver: {}", e),
    }

    Ok(())
}

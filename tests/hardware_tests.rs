// tests/hardware_tests.rs
use igorplug_usb::{self, IgorPlug, Result, Status, MAX_DIAGRAM_LEN};
use std::{thread, time::Duration};

#[test]
#[ignore] // Ignore by default, requires hardware
fn test_receiver_is_listed() -> Result<()> {
    let devices = igorplug_usb::find_all()?;
    assert!(
        !devices.is_empty(),
        "No IgorPlug-USB receiver found. Is it connected and permissions set?"
    );
    for device in &devices {
        assert_eq!(device.vendor_id, igorplug_usb::ATMEL_VID);
        assert_eq!(device.product_id, igorplug_usb::IGORPLUG_PID);
    }
    Ok(())
}

#[test]
#[ignore] // Ignore by default, requires hardware
fn test_clear_buffer() -> Result<()> {
    let mut receiver = IgorPlug::new();
    receiver.clear_buffer()?;
    assert!(receiver.is_connected());
    assert_eq!(receiver.set_buffer_empty(), Status::Ok);
    Ok(())
}

#[test]
#[ignore] // Ignore by default, requires hardware and a remote control
fn test_receive_diagram() {
    let mut receiver = IgorPlug::new();
    let mut out = [0u8; MAX_DIAGRAM_LEN];

    println!("Press a button on a remote control within 10 seconds...");
    for _ in 0..100 {
        let (status, len) = receiver.get_next_diagram(&mut out);
        assert_eq!(status, Status::Ok, "receiver stopped responding");
        if len > 0 {
            println!("Received {} bytes: {:02X?}", len, &out[..len]);
            return;
        }
        thread::sleep(Duration::from_millis(100));
    }
    panic!("No diagram received");
}

//! Example printing every new infrared diagram the receiver latches.
//!
//! Run with: RUST_LOG=debug cargo run --example poll_diagrams

use igorplug_usb::{IgorPlug, Outcome};
use std::{thread, time::Duration};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() {
    env_logger::init();
    let mut receiver = IgorPlug::new();
    println!("Waiting for infrared messages (Press Ctrl+C to stop)");

    let mut was_present = true;
    loop {
        match receiver.poll().outcome {
            Outcome::NewDiagram(diagram) => {
                was_present = true;
                println!("{:3} bytes: {:02X?}", diagram.len(), diagram.as_slice());
            }
            Outcome::NoNewData => was_present = true,
            Outcome::DeviceNotPresent(e) => {
                // Report once per disconnect; the next poll reopens the device.
                if was_present {
                    eprintln!("Receiver not present: {}", e);
                    was_present = false;
                }
            }
        }
        thread::sleep(POLL_INTERVAL);
    }
}

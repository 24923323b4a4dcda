//! Data-port, EEPROM and RS-232 functions.
//!
//! The IgorPlug-USB firmware does not implement any of these. They exist so
//! that software written against the full IgorPlug API keeps working: every
//! call does nothing and reports [`Status::NotImplemented`], and getters
//! return zero alongside it.

use crate::device::{IgorPlug, Status};
use crate::transport::UsbBackend;

impl<B: UsbBackend> IgorPlug<B> {
    // --- Data Port ---
    pub fn set_data_port_direction(&self, _direction: u8) -> Status {
        Status::NotImplemented
    }

    pub fn get_data_port_direction(&self) -> (Status, u8) {
        (Status::NotImplemented, 0)
    }

    pub fn set_out_data_port(&self, _data: u8) -> Status {
        Status::NotImplemented
    }

    pub fn get_out_data_port(&self) -> (Status, u8) {
        (Status::NotImplemented, 0)
    }

    pub fn get_in_data_port(&self) -> (Status, u8) {
        (Status::NotImplemented, 0)
    }

    // --- EEPROM ---
    pub fn eeprom_read(&self, _address: u8) -> (Status, u8) {
        (Status::NotImplemented, 0)
    }

    pub fn eeprom_write(&self, _address: u8, _data: u8) -> Status {
        Status::NotImplemented
    }

    // --- RS-232 ---
    pub fn rs232_send(&self, _data: u8) -> Status {
        Status::NotImplemented
    }

    pub fn rs232_read(&self) -> (Status, u8) {
        (Status::NotImplemented, 0)
    }

    pub fn set_rs232_baud(&self, _baud_rate: i32) -> Status {
        Status::NotImplemented
    }

    pub fn get_rs232_baud(&self) -> (Status, i32) {
        (Status::NotImplemented, 0)
    }
}

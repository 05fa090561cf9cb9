#![no_std]

pub mod serial_link;
pub mod signal_head;

//! Simulated bus peer for transport tests
//!
//! Models the two wires plus a bit-level slave that reacts to the edges the
//! master produces: it decodes start/stop conditions, shifts bytes in,
//! answers the acknowledge slot, and can transmit scripted bytes back when
//! addressed for a read. Fault injection knobs cover the failure paths
//! (NACK, arbitration contention, clock stretching, stuck lines).

use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use twibus_hal::line::OpenDrainLine;

/// Decoded wire-level event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEvent {
    Start,
    Stop,
    /// A complete byte clocked across the bus, in either direction
    Byte { value: u8, acked: bool },
}

/// Slave shift-register phase
#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    /// Shifting a byte in from the master
    Rx { bits: u8, shift: u8 },
    /// Acknowledge slot for a received byte; `stage` counts the edges of
    /// the ninth clock (0: drive pending, 1: driven, 2: sampled)
    RxAck { value: u8, stage: u8 },
    /// Shifting a byte out to the master
    Tx { bits: u8, shift: u8 },
    /// Ninth clock of a transmitted byte, master answers
    TxAck { sampled: bool, acked: bool },
}

/// The two wires and the attached slave model
pub struct SimBus {
    master_scl_low: bool,
    master_sda_low: bool,
    slave_sda_low: bool,
    phase: Phase,
    first_byte: bool,
    addressed_read: bool,
    tx_current: u8,
    tx_index: usize,

    /// Hold SCL low regardless of the master (stuck bus / endless stretch)
    pub hold_scl: bool,
    /// Hold SDA low regardless of the master (contending master)
    pub jam_sda: bool,
    /// Answer every received byte with NACK
    pub nack_all: bool,
    /// Bytes to transmit when addressed for a read; exhausted reads as 0xFF
    pub tx_data: Vec<u8, 8>,

    /// Everything decoded from the wires, in order
    pub events: Vec<WireEvent, 32>,
    /// Total rising clock edges seen
    pub clock_rises: u32,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            master_scl_low: false,
            master_sda_low: false,
            slave_sda_low: false,
            phase: Phase::Idle,
            first_byte: false,
            addressed_read: false,
            tx_current: 0xFF,
            tx_index: 0,
            hold_scl: false,
            jam_sda: false,
            nack_all: false,
            tx_data: Vec::new(),
            events: Vec::new(),
            clock_rises: 0,
        }
    }

    pub fn scl_high(&self) -> bool {
        !(self.master_scl_low || self.hold_scl)
    }

    pub fn sda_high(&self) -> bool {
        !(self.master_sda_low || self.slave_sda_low || self.jam_sda)
    }

    fn set_scl(&mut self, driven_low: bool) {
        let was_high = self.scl_high();
        self.master_scl_low = driven_low;
        let is_high = self.scl_high();
        if !was_high && is_high {
            self.clock_rises += 1;
            self.on_scl_rising();
        } else if was_high && !is_high {
            self.on_scl_falling();
        }
    }

    fn set_sda(&mut self, driven_low: bool) {
        let was_high = self.sda_high();
        self.master_sda_low = driven_low;
        let is_high = self.sda_high();
        // Data transitions while the clock is high are framing conditions
        if self.scl_high() {
            if was_high && !is_high {
                self.on_start();
            } else if !was_high && is_high {
                self.on_stop();
            }
        }
    }

    fn on_start(&mut self) {
        self.slave_sda_low = false;
        self.phase = Phase::Rx { bits: 0, shift: 0 };
        self.first_byte = true;
        let _ = self.events.push(WireEvent::Start);
    }

    fn on_stop(&mut self) {
        self.slave_sda_low = false;
        self.phase = Phase::Idle;
        let _ = self.events.push(WireEvent::Stop);
    }

    fn on_scl_rising(&mut self) {
        match self.phase {
            Phase::Rx { bits, shift } => {
                let shift = (shift << 1) | self.sda_high() as u8;
                if bits + 1 == 8 {
                    self.phase = Phase::RxAck {
                        value: shift,
                        stage: 0,
                    };
                } else {
                    self.phase = Phase::Rx {
                        bits: bits + 1,
                        shift,
                    };
                }
            }
            Phase::RxAck { value, stage: 1 } => {
                // Master samples the acknowledge on this edge
                let acked = !self.nack_all;
                let _ = self.events.push(WireEvent::Byte { value, acked });
                if self.first_byte {
                    self.addressed_read = acked && (value & 0x01) != 0;
                }
                self.phase = Phase::RxAck { value, stage: 2 };
            }
            Phase::TxAck { sampled: false, .. } => {
                let acked = !self.sda_high();
                let _ = self.events.push(WireEvent::Byte {
                    value: self.tx_current,
                    acked,
                });
                self.phase = Phase::TxAck {
                    sampled: true,
                    acked,
                };
            }
            _ => {}
        }
    }

    fn on_scl_falling(&mut self) {
        match self.phase {
            Phase::RxAck { value, stage: 0 } => {
                self.slave_sda_low = !self.nack_all;
                self.phase = Phase::RxAck { value, stage: 1 };
            }
            Phase::RxAck { stage: 2, .. } => {
                self.slave_sda_low = false;
                if self.first_byte && self.addressed_read {
                    self.first_byte = false;
                    self.enter_tx();
                } else {
                    self.first_byte = false;
                    self.phase = Phase::Rx { bits: 0, shift: 0 };
                }
            }
            Phase::Tx { bits, shift } => {
                if bits < 8 {
                    self.slave_sda_low = shift & 0x80 == 0;
                    self.phase = Phase::Tx {
                        bits: bits + 1,
                        shift: shift << 1,
                    };
                } else {
                    // Release the line for the master's acknowledge
                    self.slave_sda_low = false;
                    self.phase = Phase::TxAck {
                        sampled: false,
                        acked: false,
                    };
                }
            }
            Phase::TxAck {
                sampled: true,
                acked,
            } => {
                if acked {
                    self.enter_tx();
                } else {
                    self.slave_sda_low = false;
                    self.phase = Phase::Rx { bits: 0, shift: 0 };
                }
            }
            _ => {}
        }
    }

    /// Load the next scripted byte and place its first bit on the wire
    fn enter_tx(&mut self) {
        let byte = self.tx_data.get(self.tx_index).copied().unwrap_or(0xFF);
        self.tx_index += 1;
        self.tx_current = byte;
        self.slave_sda_low = byte & 0x80 == 0;
        self.phase = Phase::Tx {
            bits: 1,
            shift: byte << 1,
        };
    }
}

/// Master-side view of the clock line
pub struct SimScl<'a>(pub &'a RefCell<SimBus>);

/// Master-side view of the data line
pub struct SimSda<'a>(pub &'a RefCell<SimBus>);

impl OpenDrainLine for SimScl<'_> {
    fn drive_low(&mut self) {
        self.0.borrow_mut().set_scl(true);
    }

    fn release(&mut self) {
        self.0.borrow_mut().set_scl(false);
    }

    fn is_high(&self) -> bool {
        self.0.borrow().scl_high()
    }
}

impl OpenDrainLine for SimSda<'_> {
    fn drive_low(&mut self) {
        self.0.borrow_mut().set_sda(true);
    }

    fn release(&mut self) {
        self.0.borrow_mut().set_sda(false);
    }

    fn is_high(&self) -> bool {
        self.0.borrow().sda_high()
    }
}

/// Delay provider that completes instantly; the simulation is edge-driven
/// and needs no wall-clock time
pub struct SimDelay;

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

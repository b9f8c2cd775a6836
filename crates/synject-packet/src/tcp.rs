use crate::buffer::Buffer;
use crate::error::{Error, PacketKind, Result};
use crate::fmt_payload;
use std::fmt::{Debug, Formatter};

const SOURCE_OFFSET: usize = 0;
const DESTINATION_OFFSET: usize = 2;
const SEQUENCE_OFFSET: usize = 4;
const ACKNOWLEDGEMENT_OFFSET: usize = 8;
const DATA_OFFSET_RESERVED_FLAGS_OFFSET: usize = 12;
const WINDOW_SIZE_OFFSET: usize = 14;
const CHECKSUM_OFFSET: usize = 16;
const URGENT_POINTER_OFFSET: usize = 18;

/// The `SYN` flag.
pub const FLAG_SYN: u16 = 0x0002;

/// Represents a TCP Packet.
///
/// The internal representation is held in network byte order (big-endian) and all accessor methods
/// take and return data in host byte order, converting as necessary for the given architecture.
pub struct TcpPacket<'a> {
    buf: Buffer<'a>,
}

impl<'a> TcpPacket<'a> {
    pub fn new(packet: &'a mut [u8]) -> Result<Self> {
        if packet.len() >= Self::minimum_packet_size() {
            Ok(Self {
                buf: Buffer::Mutable(packet),
            })
        } else {
            Err(Error::InsufficientPacketBuffer(
                PacketKind::Tcp,
                Self::minimum_packet_size(),
                packet.len(),
            ))
        }
    }

    pub fn new_view(packet: &'a [u8]) -> Result<Self> {
        if packet.len() >= Self::minimum_packet_size() {
            Ok(Self {
                buf: Buffer::Immutable(packet),
            })
        } else {
            Err(Error::InsufficientPacketBuffer(
                PacketKind::Tcp,
                Self::minimum_packet_size(),
                packet.len(),
            ))
        }
    }

    #[must_use]
    pub const fn minimum_packet_size() -> usize {
        20
    }

    #[must_use]
    pub fn get_source(&self) -> u16 {
        u16::from_be_bytes(self.buf.get_bytes(SOURCE_OFFSET))
    }

    #[must_use]
    pub fn get_destination(&self) -> u16 {
        u16::from_be_bytes(self.buf.get_bytes(DESTINATION_OFFSET))
    }

    #[must_use]
    pub fn get_sequence(&self) -> u32 {
        u32::from_be_bytes(self.buf.get_bytes(SEQUENCE_OFFSET))
    }

    #[must_use]
    pub fn get_acknowledgement(&self) -> u32 {
        u32::from_be_bytes(self.buf.get_bytes(ACKNOWLEDGEMENT_OFFSET))
    }

    #[must_use]
    pub fn get_data_offset(&self) -> u8 {
        (self.buf.read(DATA_OFFSET_RESERVED_FLAGS_OFFSET) & 0xf0) >> 4
    }

    #[must_use]
    pub fn get_reserved(&self) -> u8 {
        (self.buf.read(DATA_OFFSET_RESERVED_FLAGS_OFFSET) & 0x0e) >> 1
    }

    #[must_use]
    pub fn get_flags(&self) -> u16 {
        u16::from_be_bytes(self.buf.get_bytes(DATA_OFFSET_RESERVED_FLAGS_OFFSET)) & 0x01ff
    }

    #[must_use]
    pub fn get_window_size(&self) -> u16 {
        u16::from_be_bytes(self.buf.get_bytes(WINDOW_SIZE_OFFSET))
    }

    #[must_use]
    pub fn get_checksum(&self) -> u16 {
        u16::from_be_bytes(self.buf.get_bytes(CHECKSUM_OFFSET))
    }

    #[must_use]
    pub fn get_urgent_pointer(&self) -> u16 {
        u16::from_be_bytes(self.buf.get_bytes(URGENT_POINTER_OFFSET))
    }

    pub fn set_source(&mut self, val: u16) {
        self.buf.set_bytes(SOURCE_OFFSET, val.to_be_bytes());
    }

    pub fn set_destination(&mut self, val: u16) {
        self.buf.set_bytes(DESTINATION_OFFSET, val.to_be_bytes());
    }

    pub fn set_sequence(&mut self, val: u32) {
        self.buf.set_bytes(SEQUENCE_OFFSET, val.to_be_bytes());
    }

    pub fn set_acknowledgement(&mut self, val: u32) {
        self.buf.set_bytes(ACKNOWLEDGEMENT_OFFSET, val.to_be_bytes());
    }

    pub fn set_data_offset(&mut self, val: u8) {
        *self.buf.write(DATA_OFFSET_RESERVED_FLAGS_OFFSET) =
            (self.buf.read(DATA_OFFSET_RESERVED_FLAGS_OFFSET) & 0x0f) | ((val & 0xf) << 4);
    }

    pub fn set_reserved(&mut self, val: u8) {
        *self.buf.write(DATA_OFFSET_RESERVED_FLAGS_OFFSET) =
            (self.buf.read(DATA_OFFSET_RESERVED_FLAGS_OFFSET) & 0xf1) | ((val & 0x7) << 1);
    }

    pub fn set_flags(&mut self, val: u16) {
        let current = u16::from_be_bytes(self.buf.get_bytes(DATA_OFFSET_RESERVED_FLAGS_OFFSET));
        self.buf.set_bytes(
            DATA_OFFSET_RESERVED_FLAGS_OFFSET,
            ((current & 0xfe00) | (val & 0x01ff)).to_be_bytes(),
        );
    }

    pub fn set_window_size(&mut self, val: u16) {
        self.buf.set_bytes(WINDOW_SIZE_OFFSET, val.to_be_bytes());
    }

    pub fn set_checksum(&mut self, val: u16) {
        self.buf.set_bytes(CHECKSUM_OFFSET, val.to_be_bytes());
    }

    pub fn set_urgent_pointer(&mut self, val: u16) {
        self.buf.set_bytes(URGENT_POINTER_OFFSET, val.to_be_bytes());
    }

    #[must_use]
    pub fn packet(&self) -> &[u8] {
        self.buf.as_slice()
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        let start = Self::minimum_packet_size() + self.tcp_options_length();
        &self.buf.as_slice()[start.min(self.buf.as_slice().len())..]
    }

    fn tcp_options_length(&self) -> usize {
        let data_offset = self.get_data_offset();
        if data_offset > 5 {
            data_offset as usize * 4 - 20
        } else {
            0
        }
    }
}

impl Debug for TcpPacket<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpPacket")
            .field("source", &self.get_source())
            .field("destination", &self.get_destination())
            .field("sequence", &self.get_sequence())
            .field("acknowledgement", &self.get_acknowledgement())
            .field("data_offset", &self.get_data_offset())
            .field("reserved", &self.get_reserved())
            .field("flags", &self.get_flags())
            .field("window_size", &self.get_window_size())
            .field("checksum", &self.get_checksum())
            .field("urgent_pointer", &self.get_urgent_pointer())
            .field("payload", &fmt_payload(self.payload()))
            .finish()
    }
}

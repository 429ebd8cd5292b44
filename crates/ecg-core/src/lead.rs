//! Channel slots and clinical lead layout
//!
//! A decoded sample always has the same 12 slots: the eight digitized
//! channels followed by four leads derived from C2 and C3. Display leads
//! are a fixed relabeling of those slots.

use serde::{Deserialize, Serialize};

/// Number of digitized channels in a record
pub const RAW_CHANNELS: usize = 8;

/// Number of slots in a decoded sample (8 raw + 4 derived)
pub const DECODED_CHANNELS: usize = 12;

/// One slot of a decoded sample, in decode order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
    C7,
    C8,
    LeadIII,
    AVR,
    AVL,
    AVF,
}

impl Channel {
    /// All slots in decode order
    pub const ALL: [Channel; DECODED_CHANNELS] = [
        Channel::C1,
        Channel::C2,
        Channel::C3,
        Channel::C4,
        Channel::C5,
        Channel::C6,
        Channel::C7,
        Channel::C8,
        Channel::LeadIII,
        Channel::AVR,
        Channel::AVL,
        Channel::AVF,
    ];

    /// Zero-based slot index
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Raw channel for a zero-based digitizer position (0..8)
    pub fn raw(position: usize) -> Option<Self> {
        if position < RAW_CHANNELS {
            Some(Self::ALL[position])
        } else {
            None
        }
    }

    /// Whether the slot is computed rather than digitized
    pub const fn is_derived(self) -> bool {
        self.index() >= RAW_CHANNELS
    }

    pub const fn label(self) -> &'static str {
        match self {
            Channel::C1 => "C1",
            Channel::C2 => "C2",
            Channel::C3 => "C3",
            Channel::C4 => "C4",
            Channel::C5 => "C5",
            Channel::C6 => "C6",
            Channel::C7 => "C7",
            Channel::C8 => "C8",
            Channel::LeadIII => "LeadIII",
            Channel::AVR => "aVR",
            Channel::AVL => "aVL",
            Channel::AVF => "aVF",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Where a lead is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadGroup {
    /// Einthoven and augmented leads
    Limb,
    /// Precordial leads
    Chest,
}

/// Clinical 12-lead names (I, II, III, aVR, aVL, aVF, V1-V6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcgLead {
    I,
    II,
    III,
    AVR,
    AVL,
    AVF,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
}

impl EcgLead {
    /// Limb leads first, then chest leads
    pub const DISPLAY_ORDER: [EcgLead; DECODED_CHANNELS] = [
        EcgLead::I,
        EcgLead::II,
        EcgLead::III,
        EcgLead::AVR,
        EcgLead::AVL,
        EcgLead::AVF,
        EcgLead::V1,
        EcgLead::V2,
        EcgLead::V3,
        EcgLead::V4,
        EcgLead::V5,
        EcgLead::V6,
    ];

    /// Decoded slot this lead is drawn from.
    ///
    /// The electrode wiring puts V1 on C8 and V6 on C1.
    pub const fn source(self) -> Channel {
        match self {
            EcgLead::I => Channel::C2,
            EcgLead::II => Channel::C3,
            EcgLead::III => Channel::LeadIII,
            EcgLead::AVR => Channel::AVR,
            EcgLead::AVL => Channel::AVL,
            EcgLead::AVF => Channel::AVF,
            EcgLead::V1 => Channel::C8,
            EcgLead::V2 => Channel::C4,
            EcgLead::V3 => Channel::C5,
            EcgLead::V4 => Channel::C6,
            EcgLead::V5 => Channel::C7,
            EcgLead::V6 => Channel::C1,
        }
    }

    pub const fn group(self) -> LeadGroup {
        match self {
            EcgLead::I | EcgLead::II | EcgLead::III
            | EcgLead::AVR | EcgLead::AVL | EcgLead::AVF => LeadGroup::Limb,
            _ => LeadGroup::Chest,
        }
    }

    /// Label used on plots and in exports
    pub const fn label(self) -> &'static str {
        match self {
            EcgLead::I => "LEAD_I",
            EcgLead::II => "LEAD_II",
            EcgLead::III => "LEAD_III",
            EcgLead::AVR => "aVR",
            EcgLead::AVL => "aVL",
            EcgLead::AVF => "aVF",
            EcgLead::V1 => "V1",
            EcgLead::V2 => "V2",
            EcgLead::V3 => "V3",
            EcgLead::V4 => "V4",
            EcgLead::V5 => "V5",
            EcgLead::V6 => "V6",
        }
    }
}

impl std::fmt::Display for EcgLead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_channel_indices_follow_decode_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn test_derived_slots() {
        assert!(!Channel::C8.is_derived());
        assert!(Channel::LeadIII.is_derived());
        assert!(Channel::AVF.is_derived());
        assert_eq!(Channel::raw(7), Some(Channel::C8));
        assert_eq!(Channel::raw(8), None);
    }

    #[test]
    fn test_display_layout_uses_every_slot_once() {
        let sources: HashSet<Channel> = EcgLead::DISPLAY_ORDER
            .iter()
            .map(|lead| lead.source())
            .collect();
        assert_eq!(sources.len(), DECODED_CHANNELS);

        assert_eq!(EcgLead::I.source(), Channel::C2);
        assert_eq!(EcgLead::V1.source(), Channel::C8);
        assert_eq!(EcgLead::V6.source(), Channel::C1);
    }

    #[test]
    fn test_lead_groups() {
        let limb = EcgLead::DISPLAY_ORDER
            .iter()
            .filter(|lead| lead.group() == LeadGroup::Limb)
            .count();
        assert_eq!(limb, 6);
        assert_eq!(EcgLead::AVF.group(), LeadGroup::Limb);
        assert_eq!(EcgLead::V1.group(), LeadGroup::Chest);
        assert_eq!(EcgLead::II.label(), "LEAD_II");
    }
}

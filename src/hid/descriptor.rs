//! HID report descriptor walker.
//!
//! Walks the short items of a report descriptor and sums what the input
//! reports declare. Used to check at start-up (and in tests) that the
//! compiled-in descriptor still matches the 3-byte [`Report`] bit for bit.
//!
//! ## Limitations
//!
//! - Long items are not supported (none of our descriptors use them)
//! - Push/Pop state is not supported
//! - Output and Feature items are skipped
//!
//! [`Report`]: super::report::Report

/// Generic Desktop usage: Game Pad.
pub const USAGE_GAME_PAD: u16 = 0x05;
/// Generic Desktop usage: Hat Switch.
pub const USAGE_HAT_SWITCH: u16 = 0x39;
/// Generic Desktop usages: D-pad Up / Down / Right / Left.
pub const USAGE_DPAD_FIRST: u16 = 0x90;
pub const USAGE_DPAD_LAST: u16 = 0x93;

const USAGE_PAGE_GENERIC_DESKTOP: u16 = 0x01;
const USAGE_PAGE_BUTTON: u16 = 0x09;

/// What a descriptor's input items add up to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DescriptorSummary {
    /// Generic Desktop usage of the application collection.
    pub application_usage: Option<u16>,
    /// Total bits across all Input items, padding included.
    pub input_bits: u16,
    /// Bits declared as Constant (padding / reserved).
    pub constant_bits: u16,
    /// A Report ID item was seen.
    pub has_report_id: bool,
    /// A hat switch field was declared.
    pub has_hat_switch: bool,
    /// Number of D-pad usages declared as data.
    pub dpad_usages: u8,
    /// Number of button fields declared.
    pub buttons: u16,
}

impl DescriptorSummary {
    /// Input report length in whole bytes.
    pub const fn input_bytes(&self) -> usize {
        (self.input_bits as usize).div_ceil(8)
    }
}

impl DescriptorSummary {
    /// Walk a HID report descriptor.
    pub fn parse(data: &[u8]) -> Self {
        let mut summary = DescriptorSummary::default();

        // Parser state.
        let mut usage_page: u16 = 0;
        let mut report_size: u16 = 0;
        let mut report_count: u16 = 0;
        // Local usages since the last main item.
        let mut usages = [0u16; 8];
        let mut usage_len = 0usize;
        let mut usage_min: Option<u16> = None;
        let mut usage_max: Option<u16> = None;

        let mut i = 0;
        while i < data.len() {
            let prefix = data[i];
            let tag = (prefix >> 4) & 0x0F;
            let item_type = (prefix >> 2) & 0x03;
            let size = match prefix & 0x03 {
                0 => 0,
                1 => 1,
                2 => 2,
                _ => 4,
            };

            if i + 1 + size > data.len() {
                break;
            }

            let value: u32 = match size {
                0 => 0,
                1 => data[i + 1] as u32,
                2 => u16::from_le_bytes([data[i + 1], data[i + 2]]) as u32,
                _ => u32::from_le_bytes([data[i + 1], data[i + 2], data[i + 3], data[i + 4]]),
            };

            match item_type {
                // Main items
                0 => {
                    match tag {
                        // Input
                        0x08 => {
                            let bits = report_size.saturating_mul(report_count);
                            summary.input_bits = summary.input_bits.saturating_add(bits);

                            if value & 0x01 != 0 {
                                summary.constant_bits = summary.constant_bits.saturating_add(bits);
                            } else {
                                match usage_page {
                                    USAGE_PAGE_GENERIC_DESKTOP => {
                                        for &usage in &usages[..usage_len] {
                                            if usage == USAGE_HAT_SWITCH {
                                                summary.has_hat_switch = true;
                                            } else if (USAGE_DPAD_FIRST..=USAGE_DPAD_LAST)
                                                .contains(&usage)
                                            {
                                                summary.dpad_usages = summary.dpad_usages.saturating_add(1);
                                            }
                                        }
                                    }
                                    USAGE_PAGE_BUTTON => {
                                        let declared = match (usage_min, usage_max) {
                                            (Some(min), Some(max)) if max >= min => {
                                                (max - min).saturating_add(1)
                                            }
                                            _ => report_count,
                                        };
                                        summary.buttons = summary.buttons.saturating_add(declared);
                                    }
                                    _ => {}
                                }
                            }
                        }
                        // Collection
                        0x0A => {
                            if value == 0x01
                                && usage_page == USAGE_PAGE_GENERIC_DESKTOP
                                && summary.application_usage.is_none()
                                && usage_len > 0
                            {
                                summary.application_usage = Some(usages[0]);
                            }
                        }
                        _ => {}
                    }
                    // Local state does not survive a main item.
                    usage_len = 0;
                    usage_min = None;
                    usage_max = None;
                }
                // Global items
                1 => match tag {
                    // Usage Page
                    0x00 => usage_page = value as u16,
                    // Report Size
                    0x07 => report_size = value as u16,
                    // Report ID
                    0x08 => summary.has_report_id = true,
                    // Report Count
                    0x09 => report_count = value as u16,
                    _ => {}
                },
                // Local items
                2 => match tag {
                    // Usage
                    0x00 => {
                        if usage_len < usages.len() {
                            usages[usage_len] = value as u16;
                            usage_len += 1;
                        }
                    }
                    // Usage Minimum
                    0x01 => usage_min = Some(value as u16),
                    // Usage Maximum
                    0x02 => usage_max = Some(value as u16),
                    _ => {}
                },
                _ => {}
            }

            i += 1 + size;
        }

        summary
    }
}

//! Photoshop image resource blocks in APP13 segments

pub const PHOTOSHOP_IDENTIFIER_STRING: &[u8] = b"Photoshop 3.0\0";
pub const RESOURCE_SIGNATURE: &[u8] = b"8BIM";

/// Resource ID of the IPTC-NAA record
pub const IPTC_NAA: u16 = 0x0404;

/// Bytes of an APP13 payload attributed to IPTC and other Photoshop resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IrbSplit {
    pub iptc: u64,
    pub photoshop_irb: u64,
}

/// Splits the payload of an APP13 segment
///
/// Complete resource blocks with ID [`IPTC_NAA`] count as IPTC, including
/// their header and padding. Everything else counts as Photoshop resources.
/// The walk stops at the first block that does not fit into the data.
pub fn split(data: &[u8]) -> IrbSplit {
    let iptc = iptc_len(data);
    let photoshop_irb = data.len().saturating_sub(iptc);

    tracing::debug!("APP13 with {iptc} bytes IPTC and {photoshop_irb} bytes other resources");

    IrbSplit {
        iptc: crate::summary::saturating_u64(iptc),
        photoshop_irb: crate::summary::saturating_u64(photoshop_irb),
    }
}

fn iptc_len(data: &[u8]) -> usize {
    let Some(mut rest) = data.strip_prefix(PHOTOSHOP_IDENTIFIER_STRING) else {
        tracing::debug!("APP13 without Photoshop identifier");
        return 0;
    };

    let mut iptc = 0_usize;
    while let Some(block) = Block::read(rest) {
        if block.id == IPTC_NAA {
            iptc = iptc.saturating_add(block.len);
        }

        let Some(next) = rest.get(block.len..) else {
            break;
        };
        rest = next;
    }

    if !rest.is_empty() {
        tracing::debug!("Stopped reading resource blocks with {} bytes left", rest.len());
    }

    iptc
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    id: u16,
    /// Length of the complete block including padding
    len: usize,
}

impl Block {
    fn read(data: &[u8]) -> Option<Self> {
        if !data.starts_with(RESOURCE_SIGNATURE) {
            return None;
        }

        let id = u16::from_be_bytes(data.get(4..6)?.try_into().ok()?);

        // Pascal string with length byte, padded to even length
        let name_len = usize::from(*data.get(6)?);
        let name_field = name_len.checked_add(1)?.checked_next_multiple_of(2)?;

        let size_pos = name_field.checked_add(6)?;
        let size_end = size_pos.checked_add(4)?;
        let size = u32::from_be_bytes(data.get(size_pos..size_end)?.try_into().ok()?);
        let size = usize::try_from(size).ok()?;

        let data_end = size_end.checked_add(size)?;
        if data_end > data.len() {
            return None;
        }

        // Padding byte of the last block might be missing
        let len = size_end
            .checked_add(size.checked_next_multiple_of(2)?)?
            .min(data.len());

        Some(Self { id, len })
    }
}

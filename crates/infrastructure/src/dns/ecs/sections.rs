use super::{WireError, HEADER_LEN};

/// Where the additional section starts and how many records it declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditionalSection {
    pub arcount: u16,
    pub offset: usize,
}

/// Walks the header, question, answer and authority sections of `msg`.
///
/// Names are skipped, never decompressed: a compression pointer always ends
/// the local encoding after two bytes, wherever it points.
pub fn locate_additional_section(msg: &[u8]) -> Result<AdditionalSection, WireError> {
    ensure(msg, HEADER_LEN)?;

    let qdcount = read_u16(msg, 4)?;
    let ancount = read_u16(msg, 6)?;
    let nscount = read_u16(msg, 8)?;
    let arcount = read_u16(msg, 10)?;

    let mut pos = HEADER_LEN;
    for _ in 0..qdcount {
        pos = skip_name(msg, pos)?;
        // QTYPE + QCLASS
        pos = advance(msg, pos, 4)?;
    }

    for _ in 0..u32::from(ancount) + u32::from(nscount) {
        pos = skip_record(msg, pos)?;
    }

    Ok(AdditionalSection {
        arcount,
        offset: pos,
    })
}

/// Returns the offset just past the encoded name starting at `pos`.
pub fn skip_name(msg: &[u8], mut pos: usize) -> Result<usize, WireError> {
    loop {
        let label = *msg.get(pos).ok_or(WireError::Truncated {
            needed: pos + 1,
            len: msg.len(),
        })?;

        match label & 0xC0 {
            0x00 if label == 0 => return Ok(pos + 1),
            0x00 => pos = advance(msg, pos + 1, usize::from(label))?,
            0xC0 => return advance(msg, pos, 2),
            _ => return Err(WireError::UnsupportedLabel { offset: pos, label }),
        }
    }
}

/// Skips one resource record: name, 10 fixed bytes, RDATA.
fn skip_record(msg: &[u8], pos: usize) -> Result<usize, WireError> {
    let pos = skip_name(msg, pos)?;
    let rdlength = read_u16(msg, pos + 8)?;
    advance(msg, pos + 10, usize::from(rdlength))
}

pub(super) fn ensure(msg: &[u8], needed: usize) -> Result<(), WireError> {
    if needed > msg.len() {
        return Err(WireError::Truncated {
            needed,
            len: msg.len(),
        });
    }
    Ok(())
}

pub(super) fn advance(msg: &[u8], pos: usize, n: usize) -> Result<usize, WireError> {
    let end = pos.saturating_add(n);
    ensure(msg, end)?;
    Ok(end)
}

pub(super) fn read_u16(msg: &[u8], pos: usize) -> Result<u16, WireError> {
    ensure(msg, pos.saturating_add(2))?;
    Ok(u16::from_be_bytes([msg[pos], msg[pos + 1]]))
}

pub(super) fn read_u32(msg: &[u8], pos: usize) -> Result<u32, WireError> {
    ensure(msg, pos.saturating_add(4))?;
    Ok(u32::from_be_bytes([
        msg[pos],
        msg[pos + 1],
        msg[pos + 2],
        msg[pos + 3],
    ]))
}

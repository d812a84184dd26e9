use super::sections::{advance, read_u16, read_u32, skip_name};
use super::{WireError, OPT_TYPE};

/// Root name (1) + TYPE, CLASS, TTL, RDLENGTH (10).
const MIN_RR_LEN: usize = 11;

/// Byte layout of one additional-section record.
///
/// `start..name_end` is the owner name, `rdata_start..rdata_end` the RDATA;
/// the RDLENGTH field sits in the two bytes just before `rdata_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RrSpan {
    pub start: usize,
    pub name_end: usize,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdlength: u16,
    pub rdata_start: usize,
    pub rdata_end: usize,
}

impl RrSpan {
    pub fn is_opt(&self) -> bool {
        self.rtype == OPT_TYPE
    }

    pub fn rdlength_offset(&self) -> usize {
        self.rdata_start - 2
    }

    pub fn rdata<'a>(&self, msg: &'a [u8]) -> &'a [u8] {
        &msg[self.rdata_start..self.rdata_end]
    }
}

/// Enumerates `arcount` records starting at `offset`.
///
/// Bytes after the last declared record are left alone.
pub fn scan_additional(msg: &[u8], offset: usize, arcount: u16) -> Result<Vec<RrSpan>, WireError> {
    let remaining = msg.len().saturating_sub(offset);
    let mut spans = Vec::with_capacity(usize::from(arcount).min(remaining / MIN_RR_LEN));

    let mut pos = offset;
    for _ in 0..arcount {
        let span = read_record(msg, pos)?;
        pos = span.rdata_end;
        spans.push(span);
    }

    Ok(spans)
}

fn read_record(msg: &[u8], start: usize) -> Result<RrSpan, WireError> {
    let name_end = skip_name(msg, start)?;
    let rtype = read_u16(msg, name_end)?;
    let class = read_u16(msg, name_end + 2)?;
    let ttl = read_u32(msg, name_end + 4)?;
    let rdlength = read_u16(msg, name_end + 8)?;
    let rdata_start = name_end + 10;
    let rdata_end = advance(msg, rdata_start, usize::from(rdlength))?;

    Ok(RrSpan {
        start,
        name_end,
        rtype,
        class,
        ttl,
        rdlength,
        rdata_start,
        rdata_end,
    })
}

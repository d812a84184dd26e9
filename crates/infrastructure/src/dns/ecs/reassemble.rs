use super::additional::{scan_additional, RrSpan};
use super::sections::locate_additional_section;
use super::{WireError, ARCOUNT_OFFSET, CLIENT_SUBNET_CODE, OPT_TYPE, OPT_UDP_PAYLOAD_SIZE};

/// Splices `ecs_option` into the message's OPT record, creating one if needed.
///
/// With an existing OPT record every option except CLIENT-SUBNET is kept in
/// order and the new option goes last; ARCOUNT is untouched. Without one, a
/// root-owned OPT record is inserted at the end of the additional section
/// and ARCOUNT is incremented. Bytes outside the rewritten record are copied
/// verbatim.
pub fn inject_option(msg: &[u8], ecs_option: &[u8]) -> Result<Vec<u8>, WireError> {
    let section = locate_additional_section(msg)?;
    let records = scan_additional(msg, section.offset, section.arcount)?;

    let mut opts = records.iter().filter(|rr| rr.is_opt());
    match (opts.next(), opts.next()) {
        (Some(_), Some(_)) => Err(WireError::DuplicateOpt),
        (Some(opt), None) => rewrite_opt(msg, opt, ecs_option),
        (None, _) => {
            let section_end = records.last().map_or(section.offset, |rr| rr.rdata_end);
            append_opt(msg, section.arcount, section_end, ecs_option)
        }
    }
}

fn rewrite_opt(msg: &[u8], opt: &RrSpan, ecs_option: &[u8]) -> Result<Vec<u8>, WireError> {
    let kept = retained_options(msg, opt)?;
    let rdata_len = kept.iter().map(|o| o.len()).sum::<usize>() + ecs_option.len();
    let rdlength = u16::try_from(rdata_len).map_err(|_| WireError::RdataTooLong(rdata_len))?;

    let mut out = Vec::with_capacity(msg.len() - usize::from(opt.rdlength) + rdata_len);
    out.extend_from_slice(&msg[..opt.rdlength_offset()]);
    out.extend_from_slice(&rdlength.to_be_bytes());
    for option in kept {
        out.extend_from_slice(option);
    }
    out.extend_from_slice(ecs_option);
    out.extend_from_slice(&msg[opt.rdata_end..]);
    Ok(out)
}

/// Splits the OPT RDATA into whole options, dropping CLIENT-SUBNET.
fn retained_options<'a>(msg: &'a [u8], opt: &RrSpan) -> Result<Vec<&'a [u8]>, WireError> {
    let rdata = opt.rdata(msg);
    let mut kept = Vec::new();
    let mut pos = 0;

    while pos < rdata.len() {
        let overrun = WireError::OptionOverrun {
            offset: opt.rdata_start + pos,
        };
        if pos + 4 > rdata.len() {
            return Err(overrun);
        }
        let code = u16::from_be_bytes([rdata[pos], rdata[pos + 1]]);
        let len = usize::from(u16::from_be_bytes([rdata[pos + 2], rdata[pos + 3]]));
        let end = pos + 4 + len;
        if end > rdata.len() {
            return Err(overrun);
        }
        if code != CLIENT_SUBNET_CODE {
            kept.push(&rdata[pos..end]);
        }
        pos = end;
    }

    Ok(kept)
}

fn append_opt(
    msg: &[u8],
    arcount: u16,
    at: usize,
    ecs_option: &[u8],
) -> Result<Vec<u8>, WireError> {
    let arcount = arcount
        .checked_add(1)
        .ok_or(WireError::AdditionalCountOverflow)?;
    let rdlength =
        u16::try_from(ecs_option.len()).map_err(|_| WireError::RdataTooLong(ecs_option.len()))?;

    let mut out = Vec::with_capacity(msg.len() + 11 + ecs_option.len());
    out.extend_from_slice(&msg[..at]);
    out[ARCOUNT_OFFSET..ARCOUNT_OFFSET + 2].copy_from_slice(&arcount.to_be_bytes());

    out.push(0x00); // root owner name
    out.extend_from_slice(&OPT_TYPE.to_be_bytes());
    out.extend_from_slice(&OPT_UDP_PAYLOAD_SIZE.to_be_bytes());
    out.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // extended RCODE, version, flags
    out.extend_from_slice(&rdlength.to_be_bytes());
    out.extend_from_slice(ecs_option);

    out.extend_from_slice(&msg[at..]);
    Ok(out)
}

#![allow(dead_code)]
use doh_relay_infrastructure::dns::ecs::{locate_additional_section, scan_additional};

pub const TYPE_A: u16 = 1;
pub const TYPE_AAAA: u16 = 28;
pub const OPTION_COOKIE: u16 = 10;
pub const OPTION_PADDING: u16 = 12;
pub const OPTION_CLIENT_SUBNET: u16 = 8;

pub fn encode_name(domain: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    for label in domain.split('.').filter(|l| !l.is_empty()) {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0x00);
    buf
}

/// Plain recursive query with one question and empty record sections.
pub fn build_query(domain: &str, qtype: u16) -> Vec<u8> {
    let mut buf = vec![
        0x12, 0x34, // ID
        0x01, 0x00, // flags: RD set
        0x00, 0x01, // QDCOUNT = 1
        0x00, 0x00, // ANCOUNT = 0
        0x00, 0x00, // NSCOUNT = 0
        0x00, 0x00, // ARCOUNT = 0
    ];
    buf.extend_from_slice(&encode_name(domain));
    buf.extend_from_slice(&qtype.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x01]); // QCLASS = IN
    buf
}

/// Message carrying answer and authority records that use compression
/// pointers back to the question name at offset 12.
pub fn build_response_with_records(domain: &str) -> Vec<u8> {
    let mut buf = build_query(domain, TYPE_A);
    buf[2] = 0x81;
    buf[3] = 0x80;
    buf[7] = 0x02; // ANCOUNT = 2
    buf[9] = 0x01; // NSCOUNT = 1

    // CNAME www.<domain> -> <domain>, owner written as label + pointer
    buf.extend_from_slice(&[0x03, b'w', b'w', b'w', 0xC0, 0x0C]);
    buf.extend_from_slice(&[0x00, 0x05, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2C, 0x00, 0x02, 0xC0, 0x0C]);
    // A 93.184.216.34
    buf.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x0E, 0x10, 0x00, 0x04]);
    buf.extend_from_slice(&[93, 184, 216, 34]);
    // NS with uncompressed rdata name
    let ns = encode_name("ns1.example.net");
    buf.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x02, 0x00, 0x01, 0x00, 0x01, 0x51, 0x80]);
    buf.extend_from_slice(&(ns.len() as u16).to_be_bytes());
    buf.extend_from_slice(&ns);
    buf
}

pub fn edns_option(code: u16, data: &[u8]) -> Vec<u8> {
    let mut buf = code.to_be_bytes().to_vec();
    buf.extend_from_slice(&(data.len() as u16).to_be_bytes());
    buf.extend_from_slice(data);
    buf
}

/// Appends an OPT record (UDP size 1232, DO bit set) and bumps ARCOUNT.
pub fn append_opt(msg: &mut Vec<u8>, options: &[u8]) {
    msg.push(0x00); // NAME = root
    msg.extend_from_slice(&[0x00, 41]); // TYPE = OPT
    msg.extend_from_slice(&[0x04, 0xD0]); // CLASS = 1232
    msg.extend_from_slice(&[0x00, 0x00, 0x80, 0x00]); // extended RCODE, version, DO
    msg.extend_from_slice(&(options.len() as u16).to_be_bytes());
    msg.extend_from_slice(options);
    let arcount = arcount(msg) + 1;
    msg[10..12].copy_from_slice(&arcount.to_be_bytes());
}

pub fn arcount(msg: &[u8]) -> u16 {
    u16::from_be_bytes([msg[10], msg[11]])
}

/// Options of the single OPT record, as `(code, data)` pairs.
pub fn opt_options(msg: &[u8]) -> Vec<(u16, Vec<u8>)> {
    let section = locate_additional_section(msg).expect("walkable message");
    let records = scan_additional(msg, section.offset, section.arcount).expect("additional");
    let opt = records.iter().find(|rr| rr.is_opt()).expect("OPT record");
    let rdata = opt.rdata(msg);

    let mut options = Vec::new();
    let mut pos = 0;
    while pos < rdata.len() {
        let code = u16::from_be_bytes([rdata[pos], rdata[pos + 1]]);
        let len = u16::from_be_bytes([rdata[pos + 2], rdata[pos + 3]]) as usize;
        options.push((code, rdata[pos + 4..pos + 4 + len].to_vec()));
        pos += 4 + len;
    }
    options
}

pub fn opt_rdata(msg: &[u8]) -> Vec<u8> {
    let section = locate_additional_section(msg).expect("walkable message");
    let records = scan_additional(msg, section.offset, section.arcount).expect("additional");
    let opt = records.iter().find(|rr| rr.is_opt()).expect("OPT record");
    opt.rdata(msg).to_vec()
}

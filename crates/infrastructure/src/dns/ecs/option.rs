use super::CLIENT_SUBNET_CODE;
use std::net::IpAddr;

/// ADDRESS-FAMILY values from the IANA address family registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn code(self) -> u16 {
        match self {
            Self::Ipv4 => 1,
            Self::Ipv6 => 2,
        }
    }
}

/// Builds a complete CLIENT-SUBNET option: 4-byte option header plus payload.
///
/// Only `ceil(source_prefix_len / 8)` address bytes are emitted and bits past
/// the prefix in the last byte are zeroed. SCOPE PREFIX-LENGTH is always 0.
/// Prefix validation belongs to the caller.
pub fn build_ecs_option(address: &[u8], family: AddressFamily, source_prefix_len: u8) -> Vec<u8> {
    let prefix = usize::from(source_prefix_len);
    let addr_len = prefix.div_ceil(8).min(address.len());
    let payload_len = 4 + addr_len;

    let mut option = Vec::with_capacity(4 + payload_len);
    option.extend_from_slice(&CLIENT_SUBNET_CODE.to_be_bytes());
    option.extend_from_slice(&(payload_len as u16).to_be_bytes());
    option.extend_from_slice(&family.code().to_be_bytes());
    option.push(source_prefix_len);
    option.push(0);
    option.extend_from_slice(&address[..addr_len]);

    let partial_bits = source_prefix_len % 8;
    if partial_bits != 0 && addr_len * 8 >= prefix {
        if let Some(last) = option.last_mut() {
            *last &= 0xFF << (8 - partial_bits);
        }
    }

    option
}

pub fn ecs_option_for(ip: IpAddr, source_prefix_len: u8) -> Vec<u8> {
    match ip {
        IpAddr::V4(v4) => build_ecs_option(&v4.octets(), AddressFamily::Ipv4, source_prefix_len),
        IpAddr::V6(v6) => build_ecs_option(&v6.octets(), AddressFamily::Ipv6, source_prefix_len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_prefix_24() {
        let option = build_ecs_option(&[1, 2, 3, 4], AddressFamily::Ipv4, 24);
        assert_eq!(
            option,
            vec![0x00, 0x08, 0x00, 0x07, 0x00, 0x01, 24, 0x00, 1, 2, 3]
        );
    }

    #[test]
    fn test_ipv4_prefix_20_masks_last_byte() {
        let option = build_ecs_option(&[1, 2, 0xFF, 4], AddressFamily::Ipv4, 20);
        assert_eq!(&option[8..], &[1, 2, 0xF0]);

        let option = build_ecs_option(&[1, 2, 3, 4], AddressFamily::Ipv4, 20);
        assert_eq!(&option[8..], &[1, 2, 0]);
        assert_eq!(&option[2..4], &[0x00, 0x07]);
    }

    #[test]
    fn test_ipv4_prefix_32_keeps_full_address() {
        let option = build_ecs_option(&[192, 0, 2, 129], AddressFamily::Ipv4, 32);
        assert_eq!(&option[8..], &[192, 0, 2, 129]);
        assert_eq!(&option[2..4], &[0x00, 0x08]);
    }

    #[test]
    fn test_ipv4_prefix_1() {
        let option = build_ecs_option(&[0xFF, 0xFF, 0xFF, 0xFF], AddressFamily::Ipv4, 1);
        assert_eq!(&option[8..], &[0x80]);
    }

    #[test]
    fn test_zero_prefix_has_no_address_bytes() {
        let option = build_ecs_option(&[10, 0, 0, 1], AddressFamily::Ipv4, 0);
        assert_eq!(option, vec![0x00, 0x08, 0x00, 0x04, 0x00, 0x01, 0, 0]);
    }

    #[test]
    fn test_ipv6_prefix_56() {
        let ip: IpAddr = "2001:db8:abcd:12ff::1".parse().unwrap();
        let option = ecs_option_for(ip, 56);
        assert_eq!(&option[0..4], &[0x00, 0x08, 0x00, 0x0B]);
        assert_eq!(&option[4..8], &[0x00, 0x02, 56, 0x00]);
        assert_eq!(&option[8..], &[0x20, 0x01, 0x0d, 0xb8, 0xab, 0xcd, 0x12]);
    }

    #[test]
    fn test_ipv6_prefix_60_masks_nibble() {
        let ip: IpAddr = "2001:db8:abcd:12ff::1".parse().unwrap();
        let option = ecs_option_for(ip, 60);
        assert_eq!(
            &option[8..],
            &[0x20, 0x01, 0x0d, 0xb8, 0xab, 0xcd, 0x12, 0xf0]
        );
    }

    #[test]
    fn test_ipv6_documentation_prefix_56() {
        let ip: IpAddr = "2001:db8::1".parse().unwrap();
        let option = ecs_option_for(ip, 56);
        assert_eq!(option.len(), 4 + 4 + 7);
        assert_eq!(&option[8..], &[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0]);
    }

    #[test]
    fn test_oversized_prefix_does_not_panic() {
        let option = build_ecs_option(&[1, 2, 3, 4], AddressFamily::Ipv4, 40);
        assert_eq!(&option[8..], &[1, 2, 3, 4]);
    }
}

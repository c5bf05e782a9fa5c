//! V-Field Codec
//!
//! `v` packs four sub-fields into 32 bits:
//!
//! ```text
//! |  type  | version | recovery | chain id |
//! |---8----|----7----|----1-----|----16----|
//! ```
//!
//! Inputs wider than their sub-field are reduced modulo its width rather
//! than rejected. A warning is logged whenever that truncation happens.

use crate::log_warn;

const TYPE_BITS: u32 = 8;
const VERSION_BITS: u32 = 7;
const RECOVERY_BITS: u32 = 1;
const CHAIN_ID_BITS: u32 = 16;

const TYPE_SHIFT: u32 = 24;
const VERSION_SHIFT: u32 = 17;
const RECOVERY_SHIFT: u32 = 16;

/// The decomposed sub-fields of a packed `v`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VField {
    pub tx_type: u8,
    pub version: u8,
    pub recovery: u8,
    pub chain_id: u16,
}

impl VField {
    pub fn pack(&self) -> u32 {
        combine_v(
            self.tx_type as u32,
            self.version as u32,
            self.recovery as u32,
            self.chain_id as u32,
        )
    }
}

fn reduce(name: &'static str, value: u32, bits: u32) -> u32 {
    let reduced = value % (1 << bits);
    if reduced != value {
        log_warn!(
            "vfield",
            "value does not fit its v sub-field and was truncated",
            field = name,
            input = value,
            stored = reduced,
        );
    }
    reduced
}

/// Pack type, version, recovery id and chain id into one `v`
pub fn combine_v(tx_type: u32, version: u32, recovery: u32, chain_id: u32) -> u32 {
    let tx_type = reduce("type", tx_type, TYPE_BITS) << TYPE_SHIFT;
    let version = reduce("version", version, VERSION_BITS) << VERSION_SHIFT;
    let recovery = reduce("recovery", recovery, RECOVERY_BITS) << RECOVERY_SHIFT;
    let chain_id = reduce("chainId", chain_id, CHAIN_ID_BITS);
    tx_type | version | recovery | chain_id
}

pub fn parse_v(v: u32) -> VField {
    VField {
        tx_type: ((v >> TYPE_SHIFT) % (1 << TYPE_BITS)) as u8,
        version: ((v >> VERSION_SHIFT) % (1 << VERSION_BITS)) as u8,
        recovery: ((v >> RECOVERY_SHIFT) % (1 << RECOVERY_BITS)) as u8,
        chain_id: (v % (1 << CHAIN_ID_BITS)) as u16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        assert_eq!(combine_v(1, 2, 1, 100), 17104996);
        assert_eq!(
            parse_v(17104996),
            VField {
                tx_type: 1,
                version: 2,
                recovery: 1,
                chain_id: 100,
            }
        );
    }

    #[test]
    fn test_out_of_range_wraps() {
        assert_eq!(combine_v(256, 128, 2, 65536), 0);
        assert_eq!(combine_v(257, 129, 3, 65537), combine_v(1, 1, 1, 1));
    }

    #[test]
    fn test_max_values() {
        let v = combine_v(255, 127, 1, 65535);
        assert_eq!(v, u32::MAX);
        assert_eq!(parse_v(v).pack(), v);
    }

    #[test]
    fn test_recovery_bit_is_independent() {
        let unsigned = combine_v(0, 1, 0, 1);
        let signed = combine_v(0, 1, 1, 1);
        assert_eq!(signed - unsigned, 1 << 16);
        assert_eq!(parse_v(unsigned).recovery, 0);
        assert_eq!(parse_v(signed).recovery, 1);
    }
}

//! Share difficulty targets and stratum byte-order helpers.

/// Base proof-of-work target (difficulty 1):
/// `0x00000000ffff0000000000000000000000000000000000000000000000000000`.
pub const BASE_TARGET: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

/// The effective paywall share target: the base target scaled by the
/// configured multiplier. Threshold reporting is inverted for paywall
/// shares, so a larger multiplier means a larger target and easier
/// shares. Saturates at the all-ones target on overflow.
pub fn paywall_target(multiplier: u64) -> [u8; 32] {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        for byte in &BASE_TARGET[i * 8..(i + 1) * 8] {
            *limb = (*limb << 8) | u64::from(*byte);
        }
    }

    let mut carry = 0u128;
    for limb in limbs.iter_mut().rev() {
        let product = u128::from(*limb) * u128::from(multiplier) + carry;
        *limb = product as u64;
        carry = product >> 64;
    }
    if carry != 0 {
        return [0xff; 32];
    }

    let mut target = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        target[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_be_bytes());
    }
    target
}

/// Reverse the byte order within each 4-byte word.
///
/// Stratum emits the previous block hash with its 32-bit words in
/// internal endianness; clients expect the un-swabbed form. A trailing
/// partial word is reversed as-is.
pub fn swab(bytes: &[u8]) -> Vec<u8> {
    let mut swabbed = Vec::with_capacity(bytes.len());
    for chunk in bytes.chunks(4) {
        swabbed.extend(chunk.iter().rev());
    }
    swabbed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_of_one_is_the_base_target() {
        assert_eq!(paywall_target(1), BASE_TARGET);
    }

    #[test]
    fn default_multiplier_shifts_the_target() {
        // 0x00000000ffff0000 * 2^18 = 0x0003fffc00000000
        let target = paywall_target(1 << 18);
        assert_eq!(&target[..8], &[0x00, 0x03, 0xff, 0xfc, 0x00, 0x00, 0x00, 0x00]);
        assert!(target[8..].iter().all(|b| *b == 0));
    }

    #[test]
    fn overflow_saturates() {
        assert_eq!(paywall_target(u64::MAX), [0xff; 32]);
    }

    #[test]
    fn swab_reverses_each_word() {
        let bytes = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
        assert_eq!(swab(&bytes), vec![0x33, 0x22, 0x11, 0x00, 0x77, 0x66, 0x55, 0x44]);
    }

    #[test]
    fn swab_is_its_own_inverse() {
        let bytes: Vec<u8> = (0u8..32).collect();
        assert_eq!(swab(&swab(&bytes)), bytes);
    }
}

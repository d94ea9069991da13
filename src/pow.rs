//! Proof of work: scrypt header hash and compact target comparison
//!
//! Retargeting is not computed here; only the comparison of a header's
//! scrypt hash against the target its `bits` field encodes.

use crate::constants::*;
use crate::error::{ConsensusError, Result};
use crate::network::Consensus;
use crate::serialization::serialize_block_header;
use crate::types::*;

/// PoWHash: ℋ → ℍ
///
/// scrypt(N=1024, r=1, p=1) over the 80 base header bytes, with the same
/// bytes used as the salt. An attached AuxPow never enters the hash.
pub fn pow_hash(header: &BlockHeader) -> Result<Hash> {
    let header_bytes = serialize_block_header(header);

    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, SCRYPT_OUTPUT_LEN)
        .map_err(|e| ConsensusError::InvalidProofOfWork(format!("scrypt parameters: {e}")))?;

    let mut hash = [0u8; 32];
    scrypt::scrypt(&header_bytes, &header_bytes, &params, &mut hash)
        .map_err(|e| ConsensusError::InvalidProofOfWork(format!("scrypt output: {e}")))?;
    Ok(hash)
}

/// CheckProofOfWork: ℋ × Consensus → {true, false}
///
/// Formula: scrypt(header) ≤ ExpandTarget(header.bits) ≤ powLimit.
/// For a merged-mined block the caller passes the parent header's hash to
/// [`check_target`] instead.
pub fn check_proof_of_work(header: &BlockHeader, consensus: &Consensus) -> Result<bool> {
    let hash = pow_hash(header)?;
    check_target(&hash, header.bits, consensus)
}

/// Compare a proof-of-work hash against compact `bits`
pub fn check_target(hash: &Hash, bits: u32, consensus: &Consensus) -> Result<bool> {
    let target = expand_target(bits)?;
    if target.is_zero() {
        return Err(ConsensusError::InvalidProofOfWork(
            "Target is zero".to_string(),
        ));
    }
    if target > U256::from_bytes(&consensus.pow_limit) {
        return Err(ConsensusError::InvalidProofOfWork(format!(
            "Target {bits:#010x} is easier than the network limit"
        )));
    }

    Ok(U256::from_bytes(hash) <= target)
}

/// 256-bit unsigned integer, little-endian words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct U256([u64; 4]);

impl U256 {
    pub fn zero() -> Self {
        U256([0; 4])
    }

    fn from_u32(value: u32) -> Self {
        U256([value as u64, 0, 0, 0])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0)
    }

    fn shl(&self, shift: u32) -> Self {
        if shift >= 256 {
            return U256::zero();
        }

        let mut result = U256::zero();
        let word_shift = (shift / 64) as usize;
        let bit_shift = shift % 64;

        for i in 0..4 {
            if i + word_shift < 4 {
                result.0[i + word_shift] |= self.0[i] << bit_shift;
                if bit_shift > 0 && i + word_shift + 1 < 4 {
                    result.0[i + word_shift + 1] |= self.0[i] >> (64 - bit_shift);
                }
            }
        }

        result
    }

    /// Interpret 32 bytes as a little-endian integer (wire hash order)
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            *word = u64::from_le_bytes(raw);
        }
        U256(words)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, &word) in self.0.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

/// Expand target from compact representation
///
/// The format is 0xEEMMMMMM: an exponent byte and a 23-bit mantissa with a
/// sign bit at 0x00800000. The target is mantissa * 256^(exponent - 3).
/// Negative and overflowing encodings are rejected.
pub fn expand_target(bits: u32) -> Result<U256> {
    let exponent = bits >> 24;
    let mantissa = bits & 0x007fffff;

    if mantissa == 0 {
        return Ok(U256::zero());
    }
    if bits & 0x00800000 != 0 {
        return Err(ConsensusError::InvalidProofOfWork(
            "Negative target".to_string(),
        ));
    }
    if exponent > 34 || (mantissa > 0xff && exponent > 33) || (mantissa > 0xffff && exponent > 32)
    {
        return Err(ConsensusError::InvalidProofOfWork(
            "Target overflows 256 bits".to_string(),
        ));
    }

    if exponent <= 3 {
        Ok(U256::from_u32(mantissa >> (8 * (3 - exponent))))
    } else {
        Ok(U256::from_u32(mantissa).shl(8 * (exponent - 3)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Network;

    fn create_header(nonce: u32) -> BlockHeader {
        BlockHeader {
            version: 1,
            prev_block_hash: [0; 32],
            merkle_root: [0; 32],
            timestamp: 1391503289,
            bits: 0x1e0ffff0,
            nonce,
        }
    }

    #[test]
    fn test_pow_hash_is_deterministic() {
        let header = create_header(1);
        assert_eq!(pow_hash(&header).unwrap(), pow_hash(&header).unwrap());
        assert_ne!(pow_hash(&header).unwrap(), pow_hash(&create_header(2)).unwrap());
    }

    #[test]
    fn test_pow_hash_differs_from_identity_hash() {
        let header = create_header(1);
        let identity = crate::block::block_hash(&NycBlockHeader::new(header.clone()));
        assert_ne!(pow_hash(&header).unwrap(), identity);
    }

    #[test]
    fn test_expand_target_pow_limit() {
        // 0x1e0fffff expands to 00000fffff000000...
        let target = expand_target(0x1e0fffff).unwrap();
        let bytes = target.to_bytes();
        assert_eq!(&bytes[27..32], &[0xff, 0xff, 0x0f, 0x00, 0x00]);
        assert!(bytes[..27].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_expand_target_small_exponent() {
        let target = expand_target(0x03123456).unwrap();
        assert_eq!(target, U256::from_u32(0x123456));
        let target = expand_target(0x02123456).unwrap();
        assert_eq!(target, U256::from_u32(0x1234));
    }

    #[test]
    fn test_expand_target_zero_mantissa() {
        assert!(expand_target(0x1d000000).unwrap().is_zero());
    }

    #[test]
    fn test_expand_target_negative() {
        assert!(expand_target(0x1d800001).is_err());
    }

    #[test]
    fn test_expand_target_overflow() {
        assert!(expand_target(0x2300ffff).is_err());
        assert!(expand_target(0xff000001).is_err());
    }

    #[test]
    fn test_check_target_rejects_easier_than_limit() {
        let consensus = &Network::Mainnet.params().consensus;
        assert!(check_target(&[0u8; 32], 0x1f00ffff, consensus).is_err());
    }

    #[test]
    fn test_check_target_compares_little_endian() {
        let consensus = &Network::Mainnet.params().consensus;
        let mut low = [0u8; 32];
        low[0] = 0xff;
        assert!(check_target(&low, 0x1e0ffff0, consensus).unwrap());

        let mut high = [0u8; 32];
        high[31] = 0x01;
        assert!(!check_target(&high, 0x1e0ffff0, consensus).unwrap());
    }

    #[test]
    fn test_u256_ordering() {
        let small = U256::from_u32(0x12345678);
        let large = U256::from_u32(0x12345678).shl(64);
        assert!(small < large);
        assert_eq!(small.cmp(&small), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_u256_bytes() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x78;
        bytes[9] = 0x01;
        assert_eq!(U256::from_bytes(&bytes).to_bytes(), bytes);
    }
}

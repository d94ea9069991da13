//! Transaction wire format (legacy, non-witness)
//!
//! - Version (4 bytes, little-endian)
//! - Input count (VarInt), then per input:
//!   previous hash (32), previous index (4), script (VarInt + bytes), sequence (4)
//! - Output count (VarInt), then per output:
//!   value (8), script (VarInt + bytes)
//! - Lock time (4 bytes, little-endian)

use super::reader::ByteReader;
use super::varint::write_varint;
use crate::error::Result;
use crate::types::*;

/// Smallest possible serialized input: hash + index + empty script + sequence
const MIN_INPUT_SIZE: usize = 32 + 4 + 1 + 4;

/// Smallest possible serialized output: value + empty script
const MIN_OUTPUT_SIZE: usize = 8 + 1;

pub fn serialize_transaction(tx: &Transaction) -> Vec<u8> {
    let mut result = Vec::new();
    write_transaction(tx, &mut result);
    result
}

/// Append a transaction to `out`
pub fn write_transaction(tx: &Transaction, out: &mut Vec<u8>) {
    out.extend_from_slice(&tx.version.to_le_bytes());

    write_varint(tx.inputs.len() as u64, out);
    for input in &tx.inputs {
        out.extend_from_slice(&input.prevout.hash);
        out.extend_from_slice(&input.prevout.index.to_le_bytes());
        write_varint(input.script_sig.len() as u64, out);
        out.extend_from_slice(&input.script_sig);
        out.extend_from_slice(&input.sequence.to_le_bytes());
    }

    write_varint(tx.outputs.len() as u64, out);
    for output in &tx.outputs {
        out.extend_from_slice(&output.value.to_le_bytes());
        write_varint(output.script_pubkey.len() as u64, out);
        out.extend_from_slice(&output.script_pubkey);
    }

    out.extend_from_slice(&tx.lock_time.to_le_bytes());
}

pub fn deserialize_transaction(reader: &mut ByteReader<'_>) -> Result<Transaction> {
    let version = reader.read_u32_le("transaction version")?;

    let input_count = reader.read_length(MIN_INPUT_SIZE, "transaction input count")?;
    let mut inputs = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        let hash = reader.read_hash("input prevout hash")?;
        let index = reader.read_u32_le("input prevout index")?;
        let script_sig = reader.read_byte_string("input script")?;
        let sequence = reader.read_u32_le("input sequence")?;
        inputs.push(TransactionInput {
            prevout: OutPoint { hash, index },
            script_sig,
            sequence,
        });
    }

    let output_count = reader.read_length(MIN_OUTPUT_SIZE, "transaction output count")?;
    let mut outputs = Vec::with_capacity(output_count);
    for _ in 0..output_count {
        let value = reader.read_i64_le("output value")?;
        let script_pubkey = reader.read_byte_string("output script")?;
        outputs.push(TransactionOutput {
            value,
            script_pubkey,
        });
    }

    let lock_time = reader.read_u32_le("transaction lock time")?;

    Ok(Transaction {
        version,
        inputs,
        outputs,
        lock_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_coinbase_transaction() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![TransactionInput {
                prevout: OutPoint {
                    hash: [0; 32],
                    index: 0xffffffff,
                },
                script_sig: b"Nintondo".to_vec(),
                sequence: 0xffffffff,
            }],
            outputs: vec![TransactionOutput {
                value: 88 * 100_000_000,
                script_pubkey: vec![0x51],
            }],
            lock_time: 0,
        }
    }

    #[test]
    fn test_transaction_layout() {
        let tx = create_coinbase_transaction();
        let bytes = serialize_transaction(&tx);
        // 4 + 1 + (32 + 4 + 1 + 8 + 4) + 1 + (8 + 1 + 1) + 4
        assert_eq!(bytes.len(), 69);
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(bytes[4], 1);
    }

    #[test]
    fn test_transaction_decode_matches_encode() {
        let tx = create_coinbase_transaction();
        let bytes = serialize_transaction(&tx);
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(deserialize_transaction(&mut reader).unwrap(), tx);
        assert!(reader.is_empty());
        assert!(tx.is_coinbase());
    }

    #[test]
    fn test_transaction_max_width_fields_survive() {
        let mut tx = create_coinbase_transaction();
        tx.version = u32::MAX;
        tx.lock_time = u32::MAX;
        tx.inputs[0].prevout.index = u32::MAX - 1;
        tx.inputs[0].sequence = u32::MAX - 2;

        let bytes = serialize_transaction(&tx);
        assert_eq!(bytes.len(), 69);
        assert_eq!(&bytes[0..4], &[0xff; 4]);
        assert_eq!(&bytes[65..69], &[0xff; 4]);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(deserialize_transaction(&mut reader).unwrap(), tx);
    }

    #[test]
    fn test_transaction_truncated_at_every_length() {
        let bytes = serialize_transaction(&create_coinbase_transaction());
        for len in 0..bytes.len() {
            let mut reader = ByteReader::new(&bytes[..len]);
            assert!(deserialize_transaction(&mut reader).is_err(), "len {len}");
        }
    }

    #[test]
    fn test_transaction_absurd_input_count() {
        let mut bytes = vec![1, 0, 0, 0];
        bytes.extend_from_slice(&[0xfe, 0xff, 0xff, 0xff, 0x0f]);
        let mut reader = ByteReader::new(&bytes);
        assert!(deserialize_transaction(&mut reader).is_err());
    }
}

use crate::encoder::TransactionDescriptor;
use crate::error::{BatchError, SubmitAllError};
use crate::submit::{Submitter, submit_all};
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs;

/// Bumped whenever the stored layout changes.
const BATCH_FORMAT_VERSION: u16 = 1;

/// A built transaction together with the node it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub node_id: String,
    pub transaction: TransactionDescriptor,
}

/// The ordered output of a pipeline build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionBatch {
    pub entries: Vec<BatchEntry>,
}

#[derive(Serialize, Deserialize)]
struct StoredBatch {
    version: u16,
    entries: Vec<StoredEntry>,
}

#[derive(Serialize, Deserialize)]
struct StoredEntry {
    node_id: String,
    to: [u8; 20],
    data: Vec<u8>,
    value: [u8; 32],
}

impl TransactionBatch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn transactions(&self) -> impl Iterator<Item = &TransactionDescriptor> {
        self.entries.iter().map(|entry| &entry.transaction)
    }

    pub fn into_transactions(self) -> Vec<TransactionDescriptor> {
        self.entries.into_iter().map(|entry| entry.transaction).collect()
    }

    /// Submits every transaction in order, stopping at the first failure.
    pub fn submit<S: Submitter + ?Sized>(&self, submitter: &mut S) -> Result<Vec<String>, SubmitAllError> {
        let transactions: Vec<TransactionDescriptor> = self.transactions().cloned().collect();
        submit_all(submitter, &transactions)
    }

    /// A JSON rendering with hex addresses and calldata and decimal values.
    pub fn to_json_view(&self) -> Value {
        Value::Array(
            self.entries
                .iter()
                .map(|entry| {
                    json!({
                        "nodeId": entry.node_id,
                        "to": format!("{:?}", entry.transaction.to),
                        "data": format!("0x{}", hex::encode(&entry.transaction.data)),
                        "value": entry.transaction.value.to_string(),
                    })
                })
                .collect(),
        )
    }

    /// Serializes the batch with bincode's standard configuration.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BatchError> {
        let stored = StoredBatch {
            version: BATCH_FORMAT_VERSION,
            entries: self
                .entries
                .iter()
                .map(|entry| {
                    let mut value = [0u8; 32];
                    entry.transaction.value.to_big_endian(&mut value);
                    StoredEntry {
                        node_id: entry.node_id.clone(),
                        to: entry.transaction.to.0,
                        data: entry.transaction.data.clone(),
                        value,
                    }
                })
                .collect(),
        };
        encode_to_vec(&stored, standard())
            .map_err(|e| BatchError::Generic(format!("Serialization failed: {}", e)))
    }

    /// Writes the bincode form of the batch to `path`.
    pub fn save(&self, path: &str) -> Result<(), BatchError> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)
            .map_err(|e| BatchError::Generic(format!("Could not write batch '{}': {}", path, e)))
    }

    /// Loads a batch written by [`TransactionBatch::save`].
    pub fn from_file(path: &str) -> Result<Self, BatchError> {
        let bytes = fs::read(path)
            .map_err(|e| BatchError::Generic(format!("Could not read batch '{}': {}", path, e)))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BatchError> {
        let (stored, _): (StoredBatch, usize) = decode_from_slice(bytes, standard())
            .map_err(|e| BatchError::Generic(format!("Deserialization failed: {}", e)))?;

        if stored.version != BATCH_FORMAT_VERSION {
            return Err(BatchError::Generic(format!(
                "Unsupported batch format version {} (expected {})",
                stored.version, BATCH_FORMAT_VERSION
            )));
        }

        let entries = stored
            .entries
            .into_iter()
            .map(|entry| BatchEntry {
                node_id: entry.node_id,
                transaction: TransactionDescriptor {
                    to: Address::from(entry.to),
                    data: entry.data,
                    value: U256::from_big_endian(&entry.value),
                },
            })
            .collect();
        Ok(Self { entries })
    }
}

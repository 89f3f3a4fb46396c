//! The boundary to whatever signs and broadcasts transactions.
//!
//! Submission itself (wallets, RPC, confirmations) lives outside this crate.
//! What lives here is the contract: transactions go out one at a time, in
//! order, and nothing after the first failure is sent.

use crate::encoder::TransactionDescriptor;
use crate::error::{SubmissionError, SubmitAllError};
use ethers::utils::keccak256;

/// A facility that signs, broadcasts and confirms a single transaction.
pub trait Submitter {
    /// Submits `tx` and waits for it to be accepted, returning a reference such as its hash.
    fn submit(&mut self, tx: &TransactionDescriptor) -> Result<String, SubmissionError>;
}

/// Submits transactions in order, stopping at the first rejection.
pub fn submit_all<S: Submitter + ?Sized>(
    submitter: &mut S,
    transactions: &[TransactionDescriptor],
) -> Result<Vec<String>, SubmitAllError> {
    let mut completed = Vec::with_capacity(transactions.len());
    for (index, tx) in transactions.iter().enumerate() {
        match submitter.submit(tx) {
            Ok(reference) => {
                log::info!("Submitted transaction {} to {:?}: {}", index, tx.to, reference);
                completed.push(reference);
            }
            Err(cause) => {
                log::warn!(
                    "Transaction {} failed, {} remaining not submitted",
                    index,
                    transactions.len() - index - 1
                );
                return Err(SubmitAllError {
                    index,
                    completed,
                    cause,
                });
            }
        }
    }
    Ok(completed)
}

/// Records transactions instead of sending them.
///
/// References are the keccak-256 hash of `to ++ data ++ value`, so identical
/// transactions always get identical references.
#[derive(Debug, Default)]
pub struct DryRunSubmitter {
    submitted: Vec<TransactionDescriptor>,
    fail_at: Option<usize>,
}

impl DryRunSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the submission with the given zero-based index.
    pub fn failing_at(index: usize) -> Self {
        Self {
            submitted: Vec::new(),
            fail_at: Some(index),
        }
    }

    pub fn submitted(&self) -> &[TransactionDescriptor] {
        &self.submitted
    }
}

impl Submitter for DryRunSubmitter {
    fn submit(&mut self, tx: &TransactionDescriptor) -> Result<String, SubmissionError> {
        if self.fail_at == Some(self.submitted.len()) {
            return Err(SubmissionError(format!(
                "dry run configured to reject transaction {}",
                self.submitted.len()
            )));
        }

        let mut preimage = tx.to.as_bytes().to_vec();
        preimage.extend_from_slice(&tx.data);
        let mut value = [0u8; 32];
        tx.value.to_big_endian(&mut value);
        preimage.extend_from_slice(&value);

        self.submitted.push(tx.clone());
        Ok(format!("0x{}", hex::encode(keccak256(preimage))))
    }
}

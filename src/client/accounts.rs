//! Locally-held signing identities.
//!
//! The registry is populated once at startup from operator-provided key
//! material and is read-only afterwards. Key material never leaves this
//! module: identities expose their address and sign on request.

use ethers::signers::{LocalWallet, Signer, WalletError};
use ethers::types::Address;
use ethers::utils::to_checksum;
use std::fmt;
use tracing::warn;

/// A local address/secret pair able to authorize transactions.
pub struct SigningIdentity {
    wallet: LocalWallet,
    address: Address,
}

impl SigningIdentity {
    /// Derive an identity from a hex-encoded private key, with or without a
    /// `0x` prefix.
    fn from_secret(secret: &str) -> Result<Self, WalletError> {
        let trimmed = secret.trim();
        let hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let wallet: LocalWallet = hex.parse()?;
        let address = wallet.address();
        Ok(Self { wallet, address })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Checksummed address string for display.
    pub fn checksummed(&self) -> String {
        to_checksum(&self.address, None)
    }

    pub(crate) fn wallet(&self) -> &LocalWallet {
        &self.wallet
    }
}

// Key material must never appear in logs.
impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Ordered set of imported signing identities. The first successfully
/// imported entry is the default selection.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    identities: Vec<SigningIdentity>,
}

impl AccountRegistry {
    /// Import a batch of private keys. A secret that fails key derivation is
    /// skipped with a warning; the batch continues.
    pub fn import_all<S: AsRef<str>>(secrets: &[S]) -> Self {
        let mut identities = Vec::with_capacity(secrets.len());
        let mut skipped = 0;
        for (index, secret) in secrets.iter().enumerate() {
            match SigningIdentity::from_secret(secret.as_ref()) {
                Ok(identity) => identities.push(identity),
                Err(err) => {
                    skipped += 1;
                    warn!("Skipping private key at position {}: {}", index, err);
                }
            }
        }
        if skipped > 0 {
            warn!("{} of {} private keys could not be imported", skipped, secrets.len());
        }
        Self { identities }
    }

    /// Find an identity by address string. Matching is case-insensitive:
    /// the input is parsed into an address before comparison, so any hex
    /// casing selects the same identity.
    pub fn select_by_address(&self, address: &str) -> Option<&SigningIdentity> {
        let wanted: Address = address.trim().parse().ok()?;
        self.identities
            .iter()
            .find(|identity| identity.address() == wanted)
    }

    /// First imported identity, used as the initial selection.
    pub fn default_identity(&self) -> Option<&SigningIdentity> {
        self.identities.first()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn identities(&self) -> &[SigningIdentity] {
        &self.identities
    }
}

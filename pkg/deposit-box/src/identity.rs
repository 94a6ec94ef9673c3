use std::{fmt::Display, str::FromStr};

use authtree::Element;
use borsh::{BorshDeserialize, BorshSerialize};
use commitment::hash_bytes;
use secp256k1::{PublicKey, SecretKey, SECP256K1};
use serde::{Deserialize, Deserializer, Serialize};

/// An externally issued public credential
///
/// Identities are compared by their public key. The allow-list never stores an identity
/// directly, only its [address key](Identity::address_key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(PublicKey);

impl Identity {
    /// Wrap a public key
    #[must_use]
    pub fn new(public_key: PublicKey) -> Self {
        Self(public_key)
    }

    /// The identity that owns `secret_key`
    #[must_use]
    pub fn from_secret_key(secret_key: &SecretKey) -> Self {
        Self(PublicKey::from_secret_key(SECP256K1, secret_key))
    }

    /// The underlying public key
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        self.0
    }

    /// The compressed SEC1 encoding of the public key
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 33] {
        self.0.serialize()
    }

    /// Hex encoding of [`Identity::to_bytes`]
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The allow-list key of this identity
    ///
    /// Always a canonical element, so it fits in the allow-list's key space
    #[must_use]
    pub fn address_key(&self) -> Element {
        hash_bytes(&self.to_bytes())
    }
}

impl From<PublicKey> for Identity {
    fn from(public_key: PublicKey) -> Self {
        Self(public_key)
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Identity {
    type Err = secp256k1::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        PublicKey::from_str(s).map(Self)
    }
}

impl Serialize for Identity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.to_string(), serializer)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl BorshSerialize for Identity {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

impl BorshDeserialize for Identity {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let bytes = <[u8; 33]>::deserialize_reader(reader)?;

        PublicKey::from_slice(&bytes)
            .map(Self)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }
}

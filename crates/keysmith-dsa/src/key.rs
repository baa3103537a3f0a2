//! DSA key types and their hex transport encoding.
//!
//! Private keys travel as the uppercase hex of
//! `SEQUENCE { version 0, p, q, g, y, x }`. Public keys use the
//! SubjectPublicKeyInfo layout: an algorithm identifier carrying the DSA
//! object identifier and `(p, q, g)`, followed by `y` (itself a DER INTEGER)
//! wrapped in a BIT STRING.

use crate::der::{self, DerReader};
use keysmith_core::{Error, Result};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;

/// Object identifier for `id-dsa` (1.2.840.10040.4.1).
pub const DSA_OID: [u64; 6] = [1, 2, 840, 10040, 4, 1];

/// Domain parameters shared by a key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaParameters {
    p: BigUint,
    q: BigUint,
    g: BigUint,
}

impl DsaParameters {
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Self {
        Self { p, q, g }
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// True when `q` divides `p - 1`.
    pub fn is_consistent(&self) -> bool {
        !self.q.is_zero() && !self.p.is_zero() && ((&self.p - 1u32) % &self.q).is_zero()
    }
}

/// Public half of a DSA key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaPublicKey {
    params: DsaParameters,
    y: BigUint,
}

impl DsaPublicKey {
    pub fn new(params: DsaParameters, y: BigUint) -> Self {
        Self { params, y }
    }

    pub fn params(&self) -> &DsaParameters {
        &self.params
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// SubjectPublicKeyInfo DER bytes.
    pub fn to_der(&self) -> Vec<u8> {
        let algorithm = der::sequence(&[
            der::object_identifier(&DSA_OID),
            der::sequence(&[
                der::integer(&self.params.p),
                der::integer(&self.params.q),
                der::integer(&self.params.g),
            ]),
        ]);
        let subject_public_key = der::bit_string(&der::integer(&self.y));
        der::sequence(&[algorithm, subject_public_key])
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.to_der())
    }

    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let mut outer = DerReader::new(bytes);
        let mut info = outer.read_sequence()?;
        outer.finish()?;

        let mut algorithm = info.read_sequence()?;
        let oid = algorithm.read_object_identifier()?;
        if oid != DSA_OID {
            return Err(Error::Decode(format!(
                "unexpected algorithm identifier {}",
                oid.iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(".")
            )));
        }
        let mut parameters = algorithm.read_sequence()?;
        algorithm.finish()?;
        let p = parameters.read_integer()?;
        let q = parameters.read_integer()?;
        let g = parameters.read_integer()?;
        parameters.finish()?;

        let key_bytes = info.read_bit_string()?;
        info.finish()?;
        let mut key = DerReader::new(key_bytes);
        let y = key.read_integer()?;
        key.finish()?;

        Ok(Self::new(DsaParameters::new(p, q, g), y))
    }

    pub fn from_hex(hex_string: &str) -> Result<Self> {
        Self::from_der(&decode_hex(hex_string)?)
    }
}

/// A full DSA key pair. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct DsaPrivateKey {
    public: DsaPublicKey,
    x: BigUint,
}

impl DsaPrivateKey {
    pub fn new(public: DsaPublicKey, x: BigUint) -> Self {
        Self { public, x }
    }

    pub fn from_components(p: BigUint, q: BigUint, g: BigUint, y: BigUint, x: BigUint) -> Self {
        Self::new(DsaPublicKey::new(DsaParameters::new(p, q, g), y), x)
    }

    pub fn public_key(&self) -> &DsaPublicKey {
        &self.public
    }

    pub fn params(&self) -> &DsaParameters {
        &self.public.params
    }

    pub fn y(&self) -> &BigUint {
        &self.public.y
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// True when `y = g^x mod p` and `q | p - 1`.
    pub fn is_consistent(&self) -> bool {
        let params = self.params();
        params.is_consistent() && params.g.modpow(&self.x, &params.p) == self.public.y
    }

    pub fn to_der(&self) -> Vec<u8> {
        let params = self.params();
        der::sequence(&[
            der::integer(&BigUint::zero()),
            der::integer(&params.p),
            der::integer(&params.q),
            der::integer(&params.g),
            der::integer(&self.public.y),
            der::integer(&self.x),
        ])
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.to_der())
    }

    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let mut outer = DerReader::new(bytes);
        let mut fields = outer.read_sequence()?;
        outer.finish()?;

        let version = fields.read_integer()?;
        if !version.is_zero() {
            return Err(Error::Decode(format!("unsupported key version {version}")));
        }
        let p = fields.read_integer()?;
        let q = fields.read_integer()?;
        let g = fields.read_integer()?;
        let y = fields.read_integer()?;
        let x = fields.read_integer()?;
        fields.finish()?;

        Ok(Self::from_components(p, q, g, y, x))
    }

    pub fn from_hex(hex_string: &str) -> Result<Self> {
        Self::from_der(&decode_hex(hex_string)?)
    }
}

impl fmt::Debug for DsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DsaPrivateKey")
            .field("public", &self.public)
            .field("x", &"[REDACTED]")
            .finish()
    }
}

fn decode_hex(hex_string: &str) -> Result<Vec<u8>> {
    hex::decode(hex_string).map_err(|e| Error::Decode(format!("invalid hex: {e}")))
}

/// Encode a private key as uppercase hex.
pub fn encode_private(key: &DsaPrivateKey) -> String {
    key.to_hex()
}

/// Encode a public key as uppercase hex.
pub fn encode_public(key: &DsaPublicKey) -> String {
    key.to_hex()
}

/// Decode a private key from its hex transport form.
pub fn decode_private(hex_string: &str) -> Result<DsaPrivateKey> {
    DsaPrivateKey::from_hex(hex_string)
}

//! Legacy DSA-over-SHA-1 signatures.
//!
//! The verifier that consumes these signatures only understands DSA with a
//! SHA-1 digest and a fixed-width hexadecimal rendering of `(r, s)`. Neither
//! the hash nor the scheme can be changed without every issued license being
//! rejected, so both are kept exactly as the verifier expects.

use crate::key::{DsaPrivateKey, DsaPublicKey};
use keysmith_core::{Error, Result};
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use sha1::{Digest, Sha1};
use tracing::debug;

/// Largest private exponent the verifier accepts, in bits.
pub const MAX_PRIVATE_KEY_BITS: u64 = 1024;

/// Hex digits per signature component.
pub const COMPONENT_HEX_WIDTH: usize = 40;

/// Hex digits in a rendered signature.
pub const SIGNATURE_HEX_LEN: usize = COMPONENT_HEX_WIDTH * 2;

/// A raw `(r, s)` signature pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
}

impl Signature {
    /// Render as `r` then `s`, each zero-padded to 40 uppercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("{:040X}{:040X}", self.r, self.s)
    }

    pub fn from_hex(hex_string: &str) -> Result<Self> {
        if hex_string.len() != SIGNATURE_HEX_LEN {
            return Err(Error::Decode(format!(
                "signature must be {SIGNATURE_HEX_LEN} hex digits, got {}",
                hex_string.len()
            )));
        }
        if !hex_string.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Decode("signature contains non-hex characters".into()));
        }
        let (r, s) = hex_string.split_at(COMPONENT_HEX_WIDTH);
        let parse = |part: &str| {
            BigUint::parse_bytes(part.as_bytes(), 16)
                .ok_or_else(|| Error::Decode(format!("invalid signature component {part}")))
        };
        Ok(Self {
            r: parse(r)?,
            s: parse(s)?,
        })
    }
}

/// SHA-1 digest of a message's UTF-8 bytes.
pub fn message_digest(message: &str) -> [u8; 20] {
    Sha1::digest(message.as_bytes()).into()
}

/// Sign a message and return the 80-digit hex signature.
pub fn sign<R>(key: &DsaPrivateKey, message: &str, rng: &mut R) -> Result<String>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let signature = sign_digest(key, &message_digest(message), rng)?;
    Ok(signature.to_hex())
}

/// Sign a precomputed digest.
///
/// A fresh nonce is drawn from `rng` for every call. A nonce that yields a
/// zero `r` or `s` is reported as [`Error::Sign`]; retrying is up to the
/// caller.
pub fn sign_digest<R>(key: &DsaPrivateKey, digest: &[u8], rng: &mut R) -> Result<Signature>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let bits = key.x().bits();
    if bits > MAX_PRIVATE_KEY_BITS {
        return Err(Error::KeySize {
            bits,
            max: MAX_PRIVATE_KEY_BITS,
        });
    }

    let params = key.params();
    let (p, q, g) = (params.p(), params.q(), params.g());
    if p.is_zero() || q.bits() < 2 || g.is_zero() || key.x().is_zero() || q.bits() % 8 != 0 {
        return Err(Error::Sign("invalid domain parameters".into()));
    }

    let k = rng.gen_biguint_range(&BigUint::one(), q);
    let k_inv = fermat_inverse(&k, q);

    let r = g.modpow(&k, p) % q;
    if r.is_zero() {
        return Err(Error::Sign("nonce produced r = 0".into()));
    }

    let z = digest_to_integer(digest, q);
    let s = ((key.x() * &r + z) % q) * k_inv % q;
    if s.is_zero() {
        return Err(Error::Sign("nonce produced s = 0".into()));
    }

    debug!(r_bits = r.bits(), s_bits = s.bits(), "Produced DSA signature");
    Ok(Signature { r, s })
}

/// Check a hex signature over a message.
pub fn verify(key: &DsaPublicKey, message: &str, signature_hex: &str) -> bool {
    match Signature::from_hex(signature_hex) {
        Ok(signature) => verify_digest(key, &message_digest(message), &signature),
        Err(_) => false,
    }
}

pub fn verify_digest(key: &DsaPublicKey, digest: &[u8], signature: &Signature) -> bool {
    let params = key.params();
    let (p, q, g) = (params.p(), params.q(), params.g());
    if p.is_zero() || q.bits() < 2 || q.bits() % 8 != 0 {
        return false;
    }
    let Signature { r, s } = signature;
    if r.is_zero() || r >= q || s.is_zero() || s >= q {
        return false;
    }

    let w = fermat_inverse(s, q);
    let z = digest_to_integer(digest, q);
    let u1 = z * &w % q;
    let u2 = r * &w % q;
    let v = (g.modpow(&u1, p) * key.y().modpow(&u2, p)) % p % q;
    &v == r
}

/// Leftmost bytes of the digest, as many as `q` is long.
fn digest_to_integer(digest: &[u8], q: &BigUint) -> BigUint {
    let len = (q.bits() / 8) as usize;
    BigUint::from_bytes_be(&digest[..len.min(digest.len())])
}

/// Inverse modulo a prime.
fn fermat_inverse(k: &BigUint, q: &BigUint) -> BigUint {
    k.modpow(&(q - 2u32), q)
}

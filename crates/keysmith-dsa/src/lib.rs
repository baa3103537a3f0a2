//! DSA key handling for Keysmith.
//!
//! Provides the hex/DER transport encoding of key pairs, the legacy
//! DSA-with-SHA-1 signer and verifier, and parameter/key generation.
//!
//! # Compatibility
//!
//! DSA-1024 with SHA-1 is obsolete. It is used here only because the
//! license verifier this crate produces signatures for accepts nothing else.
//! Do not reuse these primitives for anything that does not have that
//! constraint.

pub mod der;
pub mod key;
pub mod keygen;
pub mod sign;

pub use key::{
    DSA_OID, DsaParameters, DsaPrivateKey, DsaPublicKey, decode_private, encode_private,
    encode_public,
};
pub use keygen::{
    DEFAULT_MAX_ATTEMPTS, MAX_SUBGROUP_CANDIDATES, MILLER_RABIN_ROUNDS, ParameterSizes,
    generate_key_pair, generate_parameters, generate_private_key, is_probable_prime,
};
pub use sign::{
    COMPONENT_HEX_WIDTH, MAX_PRIVATE_KEY_BITS, SIGNATURE_HEX_LEN, Signature, message_digest, sign,
    sign_digest, verify, verify_digest,
};

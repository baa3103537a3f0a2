//! DSA domain parameter and key pair generation.
//!
//! Parameters follow the FIPS 186 random-search construction: a random
//! N-bit prime `q`, then up to `4 * L` random L-bit candidates adjusted so
//! that `p = 1 mod q`, then the smallest generator `g = h^((p-1)/q) mod p`
//! with `g != 1`.

use crate::key::{DsaParameters, DsaPrivateKey, DsaPublicKey};
use keysmith_core::{Error, Result};
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng, RngCore};
use tracing::{debug, info, warn};

/// Miller-Rabin rounds for every primality decision.
pub const MILLER_RABIN_ROUNDS: usize = 64;

/// Attempts allowed before [`generate_key_pair`] gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Candidate `q` values drawn before [`generate_parameters`] gives up.
pub const MAX_SUBGROUP_CANDIDATES: u32 = 1 << 14;

const SMALL_PRIMES: [u32; 53] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Bit lengths of `p` (L) and `q` (N).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSizes {
    pub l: u64,
    pub n: u64,
}

impl ParameterSizes {
    /// The only size the license verifier accepts.
    pub const L1024_N160: Self = Self { l: 1024, n: 160 };

    fn validate(&self) -> Result<()> {
        if self.n < 16 || self.n % 8 != 0 || self.l % 8 != 0 || self.l <= self.n {
            return Err(Error::KeyGeneration(format!(
                "unsupported parameter sizes L={} N={}",
                self.l, self.n
            )));
        }
        Ok(())
    }
}

impl Default for ParameterSizes {
    fn default() -> Self {
        Self::L1024_N160
    }
}

/// Probabilistic primality test: trial division, then Miller-Rabin.
pub fn is_probable_prime<R: Rng + ?Sized>(n: &BigUint, rounds: usize, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }
    if n == &two {
        return true;
    }
    if !n.bit(0) {
        return false;
    }
    for &small in &SMALL_PRIMES {
        if n == &BigUint::from(small) {
            return true;
        }
        if (n % small).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = &x * &x % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn random_candidate<R: RngCore + ?Sized>(bits: u64, rng: &mut R) -> BigUint {
    let mut bytes = vec![0u8; (bits / 8) as usize];
    rng.fill_bytes(&mut bytes);
    bytes[0] |= 0x80;
    if let Some(last) = bytes.last_mut() {
        *last |= 1;
    }
    BigUint::from_bytes_be(&bytes)
}

/// Generate fresh domain parameters.
pub fn generate_parameters<R>(rng: &mut R, sizes: ParameterSizes) -> Result<DsaParameters>
where
    R: RngCore + CryptoRng + ?Sized,
{
    sizes.validate()?;

    let mut found = None;
    'primes: for _ in 0..MAX_SUBGROUP_CANDIDATES {
        let q = random_candidate(sizes.n, rng);
        if !is_probable_prime(&q, MILLER_RABIN_ROUNDS, rng) {
            continue;
        }

        for _ in 0..4 * sizes.l {
            let candidate = random_candidate(sizes.l, rng);
            let rem = &candidate % &q;
            let p = if rem.is_zero() {
                candidate + 1u32
            } else {
                candidate - (rem - 1u32)
            };
            if p.bits() < sizes.l {
                continue;
            }
            if !is_probable_prime(&p, MILLER_RABIN_ROUNDS, rng) {
                continue;
            }
            found = Some((p, q));
            break 'primes;
        }
        debug!(n = sizes.n, "No prime p found for q, drawing a new q");
    }

    let Some((p, q)) = found else {
        warn!(
            candidates = MAX_SUBGROUP_CANDIDATES,
            "Parameter search exhausted its q candidates"
        );
        return Err(Error::KeyGeneration(format!(
            "no prime pair found after {MAX_SUBGROUP_CANDIDATES} q candidates"
        )));
    };

    let exponent = (&p - 1u32) / &q;
    let mut h = BigUint::from(2u32);
    let g = loop {
        let g = h.modpow(&exponent, &p);
        if !g.is_one() {
            break g;
        }
        h += 1u32;
    };

    Ok(DsaParameters::new(p, q, g))
}

/// Draw a private exponent for the given parameters.
pub fn generate_private_key<R>(rng: &mut R, params: DsaParameters) -> Result<DsaPrivateKey>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if params.q() <= &BigUint::one() || params.p().is_zero() {
        return Err(Error::KeyGeneration("invalid domain parameters".into()));
    }
    let x = rng.gen_biguint_range(&BigUint::one(), params.q());
    let y = params.g().modpow(&x, params.p());
    Ok(DsaPrivateKey::new(DsaPublicKey::new(params, y), x))
}

/// Generate a key pair whose public value is exactly L bits long and whose
/// generator is shorter than L bits.
///
/// Each attempt draws new parameters and a new key. After `max_attempts`
/// rejected attempts this fails with [`Error::KeyGeneration`].
pub fn generate_key_pair<R>(
    rng: &mut R,
    sizes: ParameterSizes,
    max_attempts: u32,
) -> Result<DsaPrivateKey>
where
    R: RngCore + CryptoRng + ?Sized,
{
    for attempt in 1..=max_attempts {
        let params = generate_parameters(rng, sizes)?;
        let key = generate_private_key(rng, params)?;

        if key.y().bits() == sizes.l && key.params().g().bits() < sizes.l {
            info!(attempt, l = sizes.l, n = sizes.n, "Generated DSA key pair");
            return Ok(key);
        }
        debug!(
            attempt,
            y_bits = key.y().bits(),
            g_bits = key.params().g().bits(),
            "Key pair rejected by bit-length check"
        );
    }

    warn!(max_attempts, "Key generation exhausted its attempts");
    Err(Error::KeyGeneration(format!(
        "no key pair met the bit-length requirements after {max_attempts} attempts"
    )))
}

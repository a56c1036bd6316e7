use crypto_bigint::modular::{MontyForm, MontyParams};
use crypto_bigint::{NonZero, Odd, Uint, Zero, U256};

use crate::{Error, Result};

/// Performs modular exponentiation using Montgomery form.
///
/// Computes `base^exp mod modulus` in constant time.
///
/// # Security Note
///
/// Uses `new_vartime` for parameter setup, which is acceptable because the
/// moduli in this crate are public group parameters; the exponentiation
/// itself is constant-time.
pub fn mod_pow<const LIMBS: usize>(
    base: &Uint<LIMBS>,
    exp: &Uint<LIMBS>,
    modulus: &Uint<LIMBS>,
) -> Result<Uint<LIMBS>> {
    if modulus.is_zero().into() {
        return Err(Error::InvalidGroup("modulus cannot be zero".to_string()));
    }

    let odd_modulus: Option<Odd<Uint<LIMBS>>> = Odd::new(*modulus).into();
    let odd_modulus = odd_modulus.ok_or_else(|| {
        Error::InvalidGroup("modulus must be odd for Montgomery form".to_string())
    })?;

    let params = MontyParams::new_vartime(odd_modulus);
    let base_monty = MontyForm::new(base, params);
    let result = base_monty.pow(exp);
    Ok(result.retrieve())
}

/// Computes `(a + b) mod q`.
pub fn add_mod_q(a: &U256, b: &U256, q: &NonZero<U256>) -> U256 {
    a.add_mod(b, q)
}

/// Computes `(a - b) mod q`.
pub fn sub_mod_q(a: &U256, b: &U256, q: &NonZero<U256>) -> U256 {
    a.sub_mod(b, q)
}

/// Computes `(a * b) mod q`.
pub fn mul_mod_q(a: &U256, b: &U256, q: &NonZero<U256>) -> U256 {
    a.mul_mod(b, q)
}

/// Computes `a^-1 mod q` by Fermat inversion (`q` must be an odd prime).
///
/// Returns `None` for `a = 0`.
pub fn inv_mod_q(a: &U256, q: &NonZero<U256>) -> Option<U256> {
    if bool::from(a.is_zero()) {
        return None;
    }
    let exp = q.wrapping_sub(&U256::from_u8(2));
    mod_pow(a, &exp, q).ok()
}

/// Decodes a big-endian byte string of at most 32 bytes into a [`U256`].
///
/// This is how protocol challenges become exponents: the `t`-bit challenge is
/// read as an unsigned big-endian integer.
pub fn decode_be(bytes: &[u8]) -> Result<U256> {
    if bytes.len() > 32 {
        return Err(Error::InvalidInput(format!(
            "integer field of {} bytes exceeds 32",
            bytes.len()
        )));
    }
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(U256::from_be_slice(&padded))
}

/// Encodes a [`U256`] as exactly 32 big-endian bytes.
pub fn encode_be(value: &U256) -> [u8; 32] {
    value.to_be_bytes()
}

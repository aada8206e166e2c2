//! AES-256-CBC envelope.
//!
//! Sealed blob layout: `iv (16 bytes) || ciphertext`, PKCS#7 padded.
//! There is no authentication tag; integrity comes from the container hash,
//! which covers the sealed blob. A wrong password is caught by the padding
//! check about 255 times out of 256; otherwise it yields garbage plaintext.

use crate::codec::RandomSource;
use crate::config::{IV_SIZE, KEY_SIZE};
use crate::crypto::kdf::derive_key;
use crate::error::{Error, Result};
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size.
const BLOCK_SIZE: usize = 16;

/// AES-256-CBC cipher wrapper.
pub struct Cipher {
    key: [u8; KEY_SIZE],
}

impl Cipher {
    /// Create a new cipher from a raw key.
    pub fn new(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Create a cipher keyed by `derive_key(password)`.
    pub fn from_password(password: &str) -> Self {
        Self::new(derive_key(password))
    }

    /// Encrypt with a fresh IV drawn from `rng`.
    ///
    /// Returns: iv (16 bytes) || ciphertext
    pub fn encrypt<R: RandomSource + ?Sized>(
        &self,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let mut iv = [0u8; IV_SIZE];
        rng.fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new_from_slices(&self.key, &iv)
            .map_err(|e| Error::Encryption(e.to_string()))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut result = Vec::with_capacity(IV_SIZE + ciphertext.len());
        result.extend_from_slice(&iv);
        result.extend_from_slice(&ciphertext);

        Ok(result)
    }

    /// Decrypt a blob produced by [`Cipher::encrypt`].
    pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>> {
        if sealed.len() < IV_SIZE + BLOCK_SIZE {
            return Err(Error::Decryption);
        }

        let (iv, ciphertext) = sealed.split_at(IV_SIZE);

        Aes256CbcDec::new_from_slices(&self.key, iv)
            .map_err(|_| Error::Decryption)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| Error::Decryption)
    }
}

/// Encrypt `payload` under `password`.
pub fn seal<R: RandomSource + ?Sized>(
    password: &str,
    payload: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    Cipher::from_password(password).encrypt(payload, rng)
}

/// Decrypt a sealed blob with `password`.
pub fn open(password: &str, sealed: &[u8]) -> Result<Vec<u8>> {
    Cipher::from_password(password).decrypt(sealed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::{OsRng, StdRng};
    use rand::SeedableRng;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = b"Hello, World! This is a secret message.";
        let sealed = seal("secure_password_123", plaintext, &mut OsRng).unwrap();
        assert_eq!(open("secure_password_123", &sealed).unwrap(), plaintext);
    }

    #[test]
    fn test_sealed_layout() {
        // 5 bytes pad to one block
        let sealed = seal("pw", b"hello", &mut OsRng).unwrap();
        assert_eq!(sealed.len(), IV_SIZE + 16);

        // a full block gains a whole padding block
        let sealed = seal("pw", &[0u8; 16], &mut OsRng).unwrap();
        assert_eq!(sealed.len(), IV_SIZE + 32);
    }

    #[test]
    fn test_wrong_password_fails() {
        let mut failures = 0;
        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..64 {
            let sealed = seal("correct", format!("message {}", i).as_bytes(), &mut rng).unwrap();
            if matches!(open("wrong", &sealed), Err(Error::Decryption)) {
                failures += 1;
            }
        }
        // padding false-accepts happen roughly once in 256 attempts
        assert!(failures >= 60, "only {} of 64 rejected", failures);
    }

    #[test]
    fn test_fresh_iv_each_time() {
        let a = seal("pw", b"same message", &mut OsRng).unwrap();
        let b = seal("pw", b"same message", &mut OsRng).unwrap();
        assert_ne!(&a[..IV_SIZE], &b[..IV_SIZE]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_plaintext() {
        let sealed = seal("password", b"", &mut OsRng).unwrap();
        assert_eq!(sealed.len(), IV_SIZE + 16);
        assert!(open("password", &sealed).unwrap().is_empty());
    }

    #[test]
    fn test_large_plaintext() {
        let plaintext: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();
        let sealed = seal("password", &plaintext, &mut OsRng).unwrap();
        assert_eq!(open("password", &sealed).unwrap(), plaintext);
    }

    #[test]
    fn test_short_blob_fails() {
        assert!(matches!(open("pw", &[0u8; 10]), Err(Error::Decryption)));
        assert!(matches!(open("pw", &[0u8; IV_SIZE]), Err(Error::Decryption)));
    }

    #[test]
    fn test_unaligned_ciphertext_fails() {
        let mut sealed = seal("pw", b"hello", &mut OsRng).unwrap();
        sealed.push(0);
        assert!(matches!(open("pw", &sealed), Err(Error::Decryption)));
    }
}

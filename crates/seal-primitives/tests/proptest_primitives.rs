use proptest::prelude::*;

use seal_primitives::aead::{decrypt, encrypt, SymmetricKey, NONCE_LEN};
use seal_primitives::ec::{derive_shared, verify, verify_der, PrivateKey, PublicKey, Signature, CURVE_ORDER};
use seal_primitives::hash::{hash, sha256};
use seal_primitives::PrimitivesError;

/// n - s over 32-byte big-endian integers.
fn order_minus(s: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut borrow = 0i16;
    for i in (0..32).rev() {
        let diff = CURVE_ORDER[i] as i16 - s[i] as i16 - borrow;
        borrow = if diff < 0 { 1 } else { 0 };
        out[i] = (diff + 256 * borrow) as u8;
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn hash_is_64_lowercase_hex_and_deterministic(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let h = hash(&data);
        prop_assert_eq!(h.len(), 64);
        prop_assert!(h.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        prop_assert_eq!(h, hash(&data));
    }

    #[test]
    fn private_key_hex_roundtrip(seed in prop::array::uniform32(any::<u8>())) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let back = PrivateKey::from_hex(&pk.to_hex()).unwrap();
            prop_assert_eq!(back.to_bytes(), seed);
            let pub_key = PublicKey::from_hex(&pk.pub_key().to_hex()).unwrap();
            prop_assert_eq!(pub_key, pk.pub_key());
        }
    }

    #[test]
    fn ecdh_is_symmetric(
        a in prop::array::uniform32(any::<u8>()),
        b in prop::array::uniform32(any::<u8>()),
    ) {
        if let (Ok(a), Ok(b)) = (PrivateKey::from_bytes(&a), PrivateKey::from_bytes(&b)) {
            let ab = derive_shared(&a, &b.pub_key()).unwrap();
            let ba = derive_shared(&b, &a.pub_key()).unwrap();
            prop_assert_eq!(ab, ba);
        }
    }

    #[test]
    fn ecdsa_sign_verify_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let digest = sha256(&msg);
            let sig = pk.sign(&digest);
            prop_assert_eq!(&sig, &pk.sign(&digest));
            prop_assert!(pk.pub_key().verify(&digest, &sig));
            prop_assert!(verify_der(&digest, &sig.to_der(), &pk.pub_key()).unwrap());
        }
    }

    #[test]
    fn ecdsa_high_s_form_verifies(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let digest = sha256(&msg);
            let sig = pk.sign(&digest);
            let flipped = Signature::new(*sig.r(), order_minus(sig.s()));
            prop_assert!(verify(&digest, &flipped, &pk.pub_key()));
        }
    }

    #[test]
    fn aead_roundtrip(
        key in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..512),
        ad in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let key = SymmetricKey::from_bytes(&key).unwrap();
        let ct = encrypt(&msg, &key, &ad).unwrap();
        prop_assert_eq!(decrypt(&ct, &key, &ad).unwrap(), msg);
    }

    #[test]
    fn aead_rejects_any_single_bit_flip(
        msg in prop::collection::vec(any::<u8>(), 0..128),
        bit in any::<prop::sample::Index>(),
    ) {
        let key = SymmetricKey::from_bytes(&[0x5a; 32]).unwrap();
        let mut ct = encrypt(&msg, &key, b"").unwrap();
        let i = bit.index(ct.len() * 8);
        ct[i / 8] ^= 1 << (i % 8);
        prop_assert!(matches!(
            decrypt(&ct, &key, b""),
            Err(PrimitivesError::AuthenticationFailed)
        ));
    }

    #[test]
    fn signature_rejects_any_single_bit_flip_in_digest(
        msg in prop::collection::vec(any::<u8>(), 0..128),
        bit in 0usize..256,
    ) {
        let pk = PrivateKey::from_hex("c0ffee").unwrap();
        let digest = sha256(&msg);
        let sig = pk.sign(&digest);
        let mut other = digest;
        other[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!pk.pub_key().verify(&other, &sig));
    }

    #[test]
    fn short_ciphertext_is_rejected(len in 0usize..(NONCE_LEN + 16)) {
        let key = SymmetricKey::from_bytes(&[1; 32]).unwrap();
        let is_too_short = matches!(
            decrypt(&vec![0u8; len], &key, b""),
            Err(PrimitivesError::CiphertextTooShort { .. })
        );
        prop_assert!(is_too_short);
    }
}

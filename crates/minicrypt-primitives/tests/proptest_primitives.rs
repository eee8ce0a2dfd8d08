use num_bigint::BigUint;
use num_traits::{One, Zero};
use proptest::prelude::*;

use minicrypt_primitives::chainhash::Hash;
use minicrypt_primitives::ec::{CurveField, PrivateKey, Signature, SignatureEngine};
use minicrypt_primitives::hash::sha256;

/// A scalar in [1, n-1] derived from 32 random bytes.
fn scalar_in_range(seed: [u8; 32], n: &BigUint) -> BigUint {
    let v = BigUint::from_bytes_be(&seed) % (n - BigUint::one());
    v + BigUint::one()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn ecdsa_sign_verify_roundtrip(
        key_seed in prop::array::uniform32(any::<u8>()),
        nonce_seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        let engine = SignatureEngine::new(CurveField::secp256k1()).unwrap();
        let n = engine.curve().n().clone();
        let d = PrivateKey::new(scalar_in_range(key_seed, &n), engine.curve()).unwrap();
        let k = scalar_in_range(nonce_seed, &n);
        let e = engine.message_hash_from_digest(&sha256(&msg));

        let sig = engine.sign(&d, &k, &e);
        prop_assume!(sig.is_ok());
        let sig = sig.unwrap();
        let q = engine.derive_public_key(&d).unwrap();
        prop_assert!(engine.verify(&sig, &e, &q).unwrap());

        // Same inputs, same signature.
        prop_assert_eq!(engine.sign(&d, &k, &e).unwrap(), sig);
    }

    #[test]
    fn ecdsa_single_bit_flip_is_rejected(
        key_seed in prop::array::uniform32(any::<u8>()),
        nonce_seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 1..64),
        bit in 0u64..256,
    ) {
        let engine = SignatureEngine::new(CurveField::secp256k1()).unwrap();
        let n = engine.curve().n().clone();
        let d = PrivateKey::new(scalar_in_range(key_seed, &n), engine.curve()).unwrap();
        let k = scalar_in_range(nonce_seed, &n);
        let e = engine.message_hash_from_digest(&sha256(&msg));
        let q = engine.derive_public_key(&d).unwrap();

        let sig = engine.sign(&d, &k, &e);
        prop_assume!(sig.is_ok());
        let sig = sig.unwrap();

        let flip = BigUint::one() << bit;
        let flipped_e = &e ^ &flip;
        prop_assert!(!engine.verify(&sig, &flipped_e, &q).unwrap());

        let flipped_r = Signature::new(sig.r() ^ &flip, sig.s().clone());
        prop_assert!(!engine.verify(&flipped_r, &e, &q).unwrap());

        let flipped_s = Signature::new(sig.r().clone(), sig.s() ^ &flip);
        prop_assert!(!engine.verify(&flipped_s, &e, &q).unwrap());
    }

    #[test]
    fn verify_rejects_out_of_range_components(
        key_seed in prop::array::uniform32(any::<u8>()),
        other in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let engine = SignatureEngine::new(CurveField::p256()).unwrap();
        let n = engine.curve().n().clone();
        let d = PrivateKey::new(scalar_in_range(key_seed, &n), engine.curve()).unwrap();
        let q = engine.derive_public_key(&d).unwrap();
        let e = engine.message_hash_from_digest(&sha256(&msg));
        let v = scalar_in_range(other, &n);

        for sig in [
            Signature::new(BigUint::zero(), v.clone()),
            Signature::new(n.clone(), v.clone()),
            Signature::new(v.clone(), BigUint::zero()),
            Signature::new(v.clone(), n.clone()),
        ] {
            prop_assert!(!engine.verify(&sig, &e, &q).unwrap());
        }
    }

    #[test]
    fn hash_hex_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = Hash::new(bytes);
        let hex_str = hash.to_string();
        let hash2 = Hash::from_hex(&hex_str).unwrap();
        prop_assert_eq!(hash.as_bytes(), hash2.as_bytes());
    }
}

use proptest::prelude::*;

use seal_message::{open, seal, sign, verify, MessageError};
use seal_primitives::ec::PrivateKey;

fn key(seed: u8) -> PrivateKey {
    let mut bytes = [0u8; 32];
    bytes[31] = seed;
    PrivateKey::from_bytes(&bytes).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn seal_open_roundtrip(
        msg in prop::collection::vec(any::<u8>(), 0..512),
        sender in 1u8..=255,
        recipient in 1u8..=255,
    ) {
        let sealed = seal(&msg, &key(sender), &key(recipient).pub_key()).unwrap();
        prop_assert_eq!(open(&sealed, &key(recipient)).unwrap(), msg);
    }

    #[test]
    fn sealed_bit_flip_never_opens(
        msg in prop::collection::vec(any::<u8>(), 1..64),
        bit in any::<prop::sample::Index>(),
    ) {
        let recipient = key(21);
        let mut sealed = seal(&msg, &key(15), &recipient.pub_key()).unwrap();
        let i = bit.index(sealed.len() * 8);
        sealed[i / 8] ^= 1 << (i % 8);
        prop_assert!(open(&sealed, &recipient).is_err());
    }

    #[test]
    fn signed_roundtrip(msg in prop::collection::vec(any::<u8>(), 0..512), signer in 1u8..=255) {
        let envelope = sign(&msg, &key(signer));
        prop_assert!(verify(&msg, &envelope).unwrap());
    }

    #[test]
    fn signed_rejects_other_messages(
        msg in prop::collection::vec(any::<u8>(), 0..64),
        other in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(msg != other);
        let envelope = sign(&msg, &key(7));
        prop_assert!(!verify(&other, &envelope).unwrap());
    }
}

#[test]
fn open_reports_short_input() {
    assert!(matches!(
        open(&[], &key(1)),
        Err(MessageError::MessageTooShort { actual: 0, .. })
    ));
}

// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

/// SHA-256 `DigestInfo` prefix from RFC 8017 section 9.2, note 1.
const SHA256_PREFIX: &str = "3031300d060960864801650304020105000420";

/// SHA-1 `DigestInfo` prefix from RFC 8017 section 9.2, note 1.
const SHA1_PREFIX: &str = "3021300906052b0e03021a05000414";

/// MD5 `DigestInfo` prefix from RFC 8017 section 9.2, note 1.
const MD5_PREFIX: &str = "3020300c06082a864886f70d020505000410";

#[test]
fn test_digest_info_matches_rfc8017_prefixes() {
    for (kind, prefix) in [
        (DigestKind::Sha256, SHA256_PREFIX),
        (DigestKind::Sha1, SHA1_PREFIX),
        (DigestKind::Md5, MD5_PREFIX),
    ] {
        let digest: Vec<u8> = (1..=kind.output_size() as u8).collect();
        let info = DerDigestInfo::new(kind, &digest).expect("digest info");
        let der = info.to_der_vec().expect("encode");
        assert_eq!(hex::encode(&der), format!("{prefix}{}", hex::encode(&digest)));

        let parsed = DerDigestInfo::from_der(&der).expect("decode");
        assert_eq!(parsed, info);
    }
}

#[test]
fn test_digest_info_prefix_lengths() {
    // Prefix lengths from RFC 8017: MD5 18, SHA-1 15, SHA-224/256/384/512 19.
    let expected = [
        (DigestKind::Md4, 18),
        (DigestKind::Md5, 18),
        (DigestKind::Sha1, 15),
        (DigestKind::Sha224, 19),
        (DigestKind::Sha256, 19),
        (DigestKind::Sha384, 19),
        (DigestKind::Sha512, 19),
    ];
    for (kind, prefix_len) in expected {
        let info = DerDigestInfo::new(kind, &vec![0xa5; kind.output_size()]).expect("digest info");
        assert_eq!(
            info.to_der(None).expect("size"),
            prefix_len + kind.output_size(),
            "{kind:?}"
        );
    }
}

#[test]
fn test_digest_info_rejects_wrong_digest_size() {
    assert_eq!(
        DerDigestInfo::new(DigestKind::Sha256, &[0u8; 31]),
        Err(CryptoError::InvalidLength)
    );

    // A SHA-256 identifier around a 20-byte digest.
    let der = hex::decode(format!("3025300d060960864801650304020105000414{}", "11".repeat(20)))
        .expect("hex");
    assert_eq!(DerDigestInfo::from_der(&der), Err(CryptoError::InvalidLength));
}

#[test]
fn test_digest_info_accepts_absent_parameters() {
    let der = hex::decode(format!("302f300b06096086480165030402010420{}", "22".repeat(32)))
        .expect("hex");
    let parsed = DerDigestInfo::from_der(&der).expect("decode");
    assert_eq!(parsed.kind(), DigestKind::Sha256);
    assert_eq!(parsed.digest(), &[0x22; 32]);
}

#[test]
fn test_digest_info_decode_errors() {
    assert_eq!(DerDigestInfo::from_der(&[]), Err(CryptoError::DerDecodeError));
    assert_eq!(DerDigestInfo::from_der(&[0x30, 0x05, 0x00]), Err(CryptoError::DerDecodeError));

    // Trailing bytes after the SEQUENCE.
    let mut der = DerDigestInfo::new(DigestKind::Sha1, &[0u8; 20])
        .expect("digest info")
        .to_der_vec()
        .expect("encode");
    der.push(0);
    assert_eq!(DerDigestInfo::from_der(&der), Err(CryptoError::DerDecodeError));

    // id-sha3-256 is not registered.
    let der = hex::decode(format!("3031300d060960864801650304020805000420{}", "00".repeat(32)))
        .expect("hex");
    assert_eq!(DerDigestInfo::from_der(&der), Err(CryptoError::UnsupportedAlgorithm));
}

#[test]
fn test_digest_info_buffer_too_small() {
    let info = DerDigestInfo::new(DigestKind::Md5, &[0u8; 16]).expect("digest info");
    let mut out = [0u8; 33];
    assert_eq!(info.to_der(Some(&mut out)), Err(CryptoError::BufferTooSmall));
    let mut out = [0u8; 40];
    assert_eq!(info.to_der(Some(&mut out)), Ok(34));
}

#![allow(clippy::unwrap_used)]

//! Fixed derivation vectors — the cross-implementation compatibility
//! contract. Every vector here was computed independently from the
//! reference algorithm; a mismatch means the pipeline drifted.

use data_encoding::HEXLOWER;
use sitepass_core::{
    derive, encode_password, sha256_hex, site_salt, Budget, DerivationRequest, DeriveError,
};

const PASSPHRASE: &[u8] = b"correct horse battery staple";
const SITE: &str = "example.com";

fn request(budget: Budget) -> DerivationRequest<'static> {
    DerivationRequest {
        passphrase: PASSPHRASE,
        site: SITE,
        budget,
        verbose: false,
    }
}

#[test]
fn sha256_self_check_vector() {
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn site_salt_vector() {
    assert_eq!(
        HEXLOWER.encode(&site_salt(SITE)),
        "a379a6f6eeafb9a55e378c118034e2751e682fab9f2d30ab13d2125586ce1947"
    );
}

#[test]
fn passphrase_fingerprint_vector() {
    assert_eq!(
        sha256_hex(PASSPHRASE),
        "c4bbcb1fbec99d65bf59d85c8cb62ee2db963f0fe106f483d9afa73bd4e39a8a"
    );
}

/// Memory-bound fixture: budgets (1, 1) select N = 2^10, r = 8, p = 30.
#[test]
fn memory_bound_derivation_vector() {
    let key = derive(&request(Budget {
        memory_mib: 1,
        mega_ops: 1,
    }))
    .unwrap();
    assert_eq!(
        HEXLOWER.encode(key.expose()),
        "7deda9da64eeffe2f3da78ab7563b74fa1d88b91f7f0d564055f887bad25d366\
         c0115050b1c9337634fd3878ef4f4234671c7e30abecd0a1b66167ef36ffb1f6"
    );
}

/// CPU-bound fixture: budgets (1000, 1) select N = 2^14, r = 8, p = 1.
#[test]
fn cpu_bound_derivation_vector() {
    let key = derive(&request(Budget {
        memory_mib: 1000,
        mega_ops: 1,
    }))
    .unwrap();
    assert_eq!(
        HEXLOWER.encode(key.expose()),
        "a7e9ec5c614ed98c364b6c8dc79805422c77a40d7a829d5d53d7275cba735731\
         c015f6f93f6ea0dac97184198b4bd68f594a62e851177cfb7d9f6a4593bd0d87"
    );
    assert_eq!(encode_password(key.expose(), 12, false).unwrap(), "jNQ}$o>OWl/P");
}

/// The primary end-to-end fixture: default budgets (1000, 32) select
/// N = 2^19, r = 8, p = 1 and the derivation allocates 512 MiB.
#[test]
fn default_budget_end_to_end_vector() {
    let key = derive(&request(Budget::default())).unwrap();
    assert_eq!(
        HEXLOWER.encode(key.expose()),
        "a195b9d0f1c730bbbcc6fdd26f4a829e589f34a66424a7f178ed525478cb577e\
         3aacb3cc5ee0b500bd065b06a59e5cfa1a75afa36bc29ec912022a3b1836d462"
    );
    assert_eq!(
        encode_password(key.expose(), 16, false).unwrap(),
        "dX|5V,Q~!+b72kEa"
    );
    assert_eq!(
        encode_password(key.expose(), 16, true).unwrap(),
        "1958198788301408"
    );
}

/// Varying the passphrase or the budgets never moves the salt — only the
/// site feeds it.
#[test]
fn salt_depends_only_on_the_site() {
    let from_site = site_salt(SITE);
    assert_eq!(site_salt(SITE), from_site);
    assert_ne!(site_salt("example.org"), from_site);
}

/// Output length bounds, exercised through the full pipeline.
#[test]
fn password_length_boundaries() {
    let key = derive(&request(Budget {
        memory_mib: 1000,
        mega_ops: 1,
    }))
    .unwrap();

    assert!(matches!(
        encode_password(key.expose(), 2, false).unwrap_err(),
        DeriveError::InvalidOutputLength { length: 2 }
    ));
    assert!(matches!(
        encode_password(key.expose(), 65, false).unwrap_err(),
        DeriveError::InvalidOutputLength { length: 65 }
    ));
    assert_eq!(encode_password(key.expose(), 3, false).unwrap().len(), 3);
    assert_eq!(encode_password(key.expose(), 64, false).unwrap().len(), 64);
}

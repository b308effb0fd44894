//! Golden test vectors for deterministic verification.
//!
//! Key IDs name files on disk, so every value here is frozen. A mismatch
//! means existing encrypted directories would stop resolving.

use clrypt_core::{compute_key_id, encode_mpi, RsaPublicKey};

use crate::fixtures::{fixture_path, ALT_KEY_ID, TEST_KEY_ID};

macro_rules! reference_modulus {
    () => {
        concat!(
            "8bd50ef773dececa7967e573afa55c95d9bdb3ff34a99854e65e91ccb958da2a",
            "f35740ed8bd7450d42a7176c835f73843739a2927d534c0037678239fd7a1b77",
            "6606307dd1aa675846f1126e967abaa3d9b1919899f42ebf6fd113b897705e2a",
            "160b697ed51007a77f86449af35d30595a34eae917e18696ade93bcfd3542b91",
            "55234b2edbcc0690655d880e5b6873debb6d16c91940d97b464904e7f6d5cbff",
            "e726ceaa0e887bc7fae694641df90018a25bea66f1eae7c25a4799fce8b97cc7",
            "a472067f1e0941aa1ae6e0868511f0713fdca063be79055b75e57d3ef5fc85aa",
            "ff9376f7dfc6ff76ce69343703b1d076529016f51aad1e489d525728eaa4d29b",
        )
    };
}

/// 2048-bit reference RSA modulus (hex).
pub const REFERENCE_MODULUS_HEX: &str = reference_modulus!();

/// MPI encoding of the reference modulus: 257-byte length, sign pad, body.
pub const REFERENCE_MODULUS_MPI_HEX: &str = concat!("0000010100", reference_modulus!());

/// Key ID of `(REFERENCE_MODULUS, 65537)`.
pub const REFERENCE_KEY_ID: &str = "77de2589f0783adadb696b31a6ccce05";

/// An MPI encoding vector.
#[derive(Debug, Clone)]
pub struct MpiVector {
    pub name: &'static str,
    /// Big-endian magnitude (hex, may be empty).
    pub value_hex: &'static str,
    pub expected_hex: &'static str,
}

/// A key ID vector over raw RSA parameters.
#[derive(Debug, Clone)]
pub struct KeyIdVector {
    pub name: &'static str,
    pub modulus_hex: &'static str,
    pub exponent_hex: &'static str,
    pub expected_key_id: &'static str,
}

/// A key ID vector over a checked-in certificate.
#[derive(Debug, Clone)]
pub struct CertificateVector {
    pub name: &'static str,
    /// File under `fixtures/` holding the public key.
    pub fixture: &'static str,
    pub expected_key_id: &'static str,
}

pub fn mpi_vectors() -> Vec<MpiVector> {
    vec![
        MpiVector {
            name: "zero",
            value_hex: "",
            expected_hex: "00000000",
        },
        MpiVector {
            name: "zero with leading zero bytes",
            value_hex: "0000",
            expected_hex: "00000000",
        },
        MpiVector {
            name: "small exponent 3",
            value_hex: "03",
            expected_hex: "0000000103",
        },
        MpiVector {
            name: "128 needs sign byte",
            value_hex: "80",
            expected_hex: "000000020080",
        },
        MpiVector {
            name: "255 needs sign byte",
            value_hex: "ff",
            expected_hex: "0000000200ff",
        },
        MpiVector {
            name: "256 does not",
            value_hex: "0100",
            expected_hex: "000000020100",
        },
        MpiVector {
            name: "exponent 65537",
            value_hex: "010001",
            expected_hex: "00000003010001",
        },
        MpiVector {
            name: "2048-bit reference modulus",
            value_hex: REFERENCE_MODULUS_HEX,
            expected_hex: REFERENCE_MODULUS_MPI_HEX,
        },
    ]
}

pub fn key_id_vectors() -> Vec<KeyIdVector> {
    vec![
        KeyIdVector {
            name: "reference modulus, e = 65537",
            modulus_hex: REFERENCE_MODULUS_HEX,
            exponent_hex: "010001",
            expected_key_id: REFERENCE_KEY_ID,
        },
        KeyIdVector {
            name: "tiny key, e = 3",
            modulus_hex: "c5",
            exponent_hex: "03",
            expected_key_id: "d30138d7bdf42a8c8bb27b75b8f01a0a",
        },
        KeyIdVector {
            name: "tiny key with DER sign byte, e = 65537",
            modulus_hex: "00c5",
            exponent_hex: "010001",
            expected_key_id: "036efb18609f8739ddc29cba9b15dfec",
        },
        KeyIdVector {
            name: "parameters swapped",
            modulus_hex: "03",
            exponent_hex: "c5",
            expected_key_id: "cf62cdc091c2883a79e8aa121652af56",
        },
    ]
}

pub fn certificate_vectors() -> Vec<CertificateVector> {
    vec![
        CertificateVector {
            name: "test.crt public key",
            fixture: "test.pub.pem",
            expected_key_id: TEST_KEY_ID,
        },
        CertificateVector {
            name: "alt.crt public key",
            fixture: "alt.pub.pem",
            expected_key_id: ALT_KEY_ID,
        },
    ]
}

/// Run every vector. Returns `(name, matches, actual)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let mut results = Vec::new();

    for v in mpi_vectors() {
        let actual = hex::decode(v.value_hex)
            .ok()
            .and_then(|value| encode_mpi(&value).ok())
            .map(hex::encode)
            .unwrap_or_default();
        results.push((v.name.to_string(), actual == v.expected_hex, actual));
    }

    for v in key_id_vectors() {
        let actual = match (hex::decode(v.modulus_hex), hex::decode(v.exponent_hex)) {
            (Ok(n), Ok(e)) => compute_key_id(&n, &e)
                .map(|id| id.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        results.push((v.name.to_string(), actual == v.expected_key_id, actual));
    }

    for v in certificate_vectors() {
        let actual = std::fs::read_to_string(fixture_path(v.fixture))
            .ok()
            .and_then(|pem| RsaPublicKey::from_pem(&pem).ok())
            .and_then(|key| key.key_id().ok())
            .map(|id| id.to_string())
            .unwrap_or_default();
        results.push((v.name.to_string(), actual == v.expected_key_id, actual));
    }

    results
}

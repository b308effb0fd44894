//! End-to-end tests with real certificates and a temporary encrypted tree.

use std::fs;

use anyhow::Result;
use clrypt::{Clrypt, ClryptConfig, ClryptError, ConfigError, EncryptedDirectory, LogicalFile};
use clrypt_testkit::{
    alt_openssl_keypair, fixture_path, openssl_keypair, ALT_KEY_ID, CONTENT_PLAINTEXT,
    TEST_KEY_ID,
};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn config() -> ClryptConfig {
    ClryptConfig::new(fixture_path("test.crt"), fixture_path("test.key"))
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Database {
    host: String,
    port: u16,
    password: String,
}

#[test]
fn open_discovers_encrypted_directory() -> Result<()> {
    init_tracing();
    let tmp = TempDir::new()?;
    let root = tmp.path().join("encrypted");
    let cwd = tmp.path().join("service/src");
    fs::create_dir_all(&root)?;
    fs::create_dir_all(&cwd)?;

    let clrypt = Clrypt::open_from(&config(), &cwd)?;
    assert_eq!(clrypt.key_id().as_str(), TEST_KEY_ID);
    assert_eq!(clrypt.directory().root(), root);

    let path = clrypt.file_path("dev", "database", "yaml")?;
    assert_eq!(
        path,
        root.join("dev").join(format!("{}-database.yaml.smime", TEST_KEY_ID))
    );
    Ok(())
}

#[test]
fn open_fails_without_directory() -> Result<()> {
    let tmp = TempDir::new()?;
    let config = config().with_dir_name("no-such-encrypted-dir-5b2f");

    let err = Clrypt::open_from(&config, tmp.path()).unwrap_err();
    assert!(matches!(
        err,
        ClryptError::Config(ConfigError::DirectoryNotFound { .. })
    ));
    Ok(())
}

#[test]
fn open_fails_with_bad_key_material() -> Result<()> {
    let tmp = TempDir::new()?;
    let config = ClryptConfig::new(fixture_path("test.crt"), fixture_path("alt.key"))
        .with_encrypted_dir(tmp.path());

    let err = Clrypt::open_from(&config, tmp.path()).unwrap_err();
    assert!(matches!(err, ClryptError::Keypair(_)));
    Ok(())
}

#[test]
fn structured_round_trip() -> Result<()> {
    init_tracing();
    let tmp = TempDir::new()?;
    let clrypt = Clrypt::open_from(&config().with_encrypted_dir(tmp.path()), tmp.path())?;

    let db = Database {
        host: "db.internal".to_string(),
        port: 5432,
        password: "hunter2".to_string(),
    };
    let yaml = serde_yaml::to_string(&db)?;
    let path = clrypt.write_file(yaml.as_bytes(), "prod/billing", "database", "yaml")?;

    // Ciphertext on disk, never the plaintext
    let on_disk = fs::read(&path)?;
    assert!(on_disk.starts_with(b"MIME-Version:"));
    assert!(!String::from_utf8_lossy(&on_disk).contains("hunter2"));

    let read: Database = clrypt.read_structured_file("prod/billing", "database", "yaml")?;
    assert_eq!(read, db);

    let json = serde_json::to_vec(&db)?;
    clrypt.write_file(&json[..], "prod", "db", "json")?;
    let read: Database = clrypt.read_structured_file("prod", "db", "json")?;
    assert_eq!(read, db);
    Ok(())
}

#[test]
fn recipients_share_a_tree() -> Result<()> {
    let tmp = TempDir::new()?;
    let ours = EncryptedDirectory::new(tmp.path(), openssl_keypair());
    let theirs = EncryptedDirectory::new(tmp.path(), alt_openssl_keypair());
    let file = LogicalFile::yaml("dev", "token")?;

    ours.write_bytes(b"token: ours", &file)?;
    theirs.write_bytes(b"token: theirs", &file)?;

    assert_eq!(ours.read_file(&file)?, b"token: ours");
    assert_eq!(theirs.read_file(&file)?, b"token: theirs");

    let mut names: Vec<_> = fs::read_dir(tmp.path().join("dev"))?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    names.sort();
    assert_eq!(
        names,
        vec![
            format!("{}-token.yaml.smime", TEST_KEY_ID),
            format!("{}-token.yaml.smime", ALT_KEY_ID),
        ]
    );
    Ok(())
}

#[test]
fn foreign_ciphertext_is_a_decryption_error() -> Result<()> {
    let tmp = TempDir::new()?;
    let ours = EncryptedDirectory::new(tmp.path(), openssl_keypair());
    let file = LogicalFile::yaml("dev", "token")?;
    let path = ours.write_bytes(b"secret", &file)?;

    // Someone copies a file encrypted for another key into our slot
    let foreign = EncryptedDirectory::new(tmp.path(), alt_openssl_keypair());
    let foreign_path = foreign.write_bytes(b"not for us", &file)?;
    fs::copy(&foreign_path, &path)?;

    let err = ours.read_file(&file).unwrap_err();
    assert!(!err.is_not_found());
    assert!(matches!(err, clrypt::StoreError::Decryption { .. }));
    Ok(())
}

#[test]
fn reads_files_written_by_openssl_cli() -> Result<()> {
    let tmp = TempDir::new()?;
    let clrypt = Clrypt::open_from(&config().with_encrypted_dir(tmp.path()), tmp.path())?;

    let path = clrypt.file_path("legacy", "content", "txt")?;
    fs::create_dir_all(path.parent().unwrap())?;
    fs::copy(fixture_path("content.smime"), &path)?;

    assert_eq!(clrypt.read_file("legacy", "content", "txt")?, CONTENT_PLAINTEXT);
    Ok(())
}

#[test]
fn missing_secret_is_not_found() -> Result<()> {
    let tmp = TempDir::new()?;
    let clrypt = Clrypt::open_from(&config().with_encrypted_dir(tmp.path()), tmp.path())?;

    let err = clrypt.read_file("dev", "absent", "yaml").unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn handle_is_shared_across_threads() -> Result<()> {
    let tmp = TempDir::new()?;
    let clrypt = Clrypt::open_from(&config().with_encrypted_dir(tmp.path()), tmp.path())?;

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let clrypt = clrypt.clone();
            std::thread::spawn(move || {
                let name = format!("worker{}", i);
                clrypt
                    .write_file(name.as_bytes(), "threads", &name, "txt")
                    .and_then(|_| clrypt.read_file("threads", &name, "txt"))
                    .map(|plaintext| plaintext == name.as_bytes())
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("worker panicked")?);
    }
    Ok(())
}

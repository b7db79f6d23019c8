//! Configuration feeding the feature policy and the HTTP transport.

use std::io::Write;

use podbrowser::fetch::HttpProbe;
use podbrowser::{FeaturePolicy, Loader};

/// Allow-lists come from the config file, not from code.
#[test]
fn feature_allow_lists_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[features]
sharing-v2 = ["https://alice.example/profile#me"]
access-grants = ["*"]
"#
    )
    .unwrap();

    let config = Loader::new("FEATTEST")
        .load(Some(file.path()), None, None)
        .unwrap();
    let policy = FeaturePolicy::from_config(&config);

    assert!(policy.is_enabled("sharing-v2", "https://alice.example/profile#me"));
    assert!(!policy.is_enabled("sharing-v2", "https://bob.example/profile#me"));
    assert!(policy.is_enabled("access-grants", "https://bob.example/profile#me"));
    assert!(!policy.is_enabled("unlisted", "https://alice.example/profile#me"));
}

/// A missing config file is a configuration error, not a panic.
#[test]
fn missing_file_is_reported() {
    let err = Loader::new("MISSINGTEST")
        .load(Some(std::path::Path::new("/nonexistent/podbrowser.toml")), None, None)
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

/// The default config builds a usable HTTP transport.
#[test]
fn http_probe_from_defaults() {
    let config = Loader::new("PROBETEST").load(None, Some(5), None).unwrap();
    assert_eq!(config.probe.timeout(), std::time::Duration::from_secs(5));
    assert!(HttpProbe::new(&config.probe).is_ok());
}

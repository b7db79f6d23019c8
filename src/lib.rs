//! PodBrowser - access-model normalization for Solid Pod resources.
//!
//! PodBrowser turns the raw access-control information a Solid server hands
//! out into values a file manager can display:
//!
//! - **Permission**: access modes to ranked labels, own vs third-party split
//! - **Policy**: named sharing groups (editors, viewers, blocked)
//! - **Resource**: type names, container detection, dataset normalization
//! - **Access control**: ACP vs WAC detection by capability probing
//! - **Grant**: validity of consent-based access grants
//! - **Feature**: WebID allow-lists for gated features
//! - **Config**: Layered configuration (file → env → CLI)
//!
//! # Example
//!
//! ```ignore
//! use podbrowser::{Detector, Loader, fetch};
//!
//! #[tokio::main]
//! async fn main() -> podbrowser::Result<()> {
//!     let config = Loader::default().load(None, None, None)?;
//!     let detector = Detector::new(fetch::HttpProbe::new(&config.probe)?);
//!
//!     let (info, resource) = fetch::fetch_resource(detector.probe(), "https://pod.example/docs/").await?;
//!     println!("{} is a {:?}", resource.name(), resource.kind());
//!
//!     match detector.detect(Some(&info)).await {
//!         Some(model) => println!("governed by {model}"),
//!         None => println!("could not determine access model"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod access_control;
pub mod config;
pub mod dataset;
pub mod error;
pub mod feature;
pub mod fetch;
pub mod grant;
pub mod link;
pub mod permission;
pub mod policy;
pub mod resource;
pub mod vocab;

// Re-export main types at crate root
pub use access_control::{AccessControlType, Detector, ProbeStatus, detect_access_control_type};
pub use config::{Config, Loader};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use feature::FeaturePolicy;
pub use fetch::Probe;
pub use link::ResourceInfo;
pub use permission::{
    AccessMode, AgentAccess, Descriptor, Level, NormalizedPermission, classify_access, level,
    split_own_and_third_party,
};
pub use policy::Policy;
pub use resource::{
    NormalizedResource, ResourceKind, classify_resource_kind, normalize_dataset, short_type_name,
};

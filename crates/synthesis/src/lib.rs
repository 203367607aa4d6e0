//! Image synthesis gateway for Atelier.
//!
//! This crate provides a uniform interface over the underlying image
//! generator:
//! - A deterministic placeholder renderer that always produces a displayable
//!   artifact
//! - A client for a remote full-fidelity synthesis API
//! - The gateway that ties both together with degrade-never-fail semantics
//!   and provenance tagging

pub mod error;
pub mod gateway;
pub mod placeholder;
pub mod remote;
pub mod request;

pub use error::{SynthesisError, SynthesisResult};
pub use gateway::SynthesisGateway;
pub use placeholder::{PlaceholderRenderer, PlaceholderSpec, RenderLabel};
pub use remote::RemoteSynthesizer;
pub use request::{Provenance, SynthesisOutput, SynthesisRequest};

// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports and the wire protocol.
//!
//! - [`port`]: Trait definitions (interfaces) for the host's collaborators
//! - [`protocol`]: Messages exchanged with the rendering surface
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The preview coordinator uses only ports, never concrete adapters

pub mod port;
pub mod protocol;

//! Shared Kernel - vocabulary shared by every crate in the workspace
//!
//! This crate holds only the pieces whose meaning never changes across
//! domains:
//! - The common error type and result alias
//! - Typed ID wrappers

pub mod error {
    pub mod app_error;
    pub mod kind;
}
pub mod id;

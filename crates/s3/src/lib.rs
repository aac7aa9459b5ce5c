//! bkt-s3: aws-sdk-s3 adapter for bkt
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate. It is the only crate that directly
//! depends on the AWS SDK.

pub mod client;
mod convert;
pub mod error;

pub use client::S3Client;

//! # bfc-chain — Chain data access for BFC status checking
//!
//! Everything between a validated publisher address and the serialized
//! Bloom-filter cascade bytes:
//!
//! - **Provider seam** ([`ChainDataProvider`]) — a single capability trait
//!   covering the three upstream services the pipeline reads from: a
//!   transaction-indexing service, a full-node provider, and a blob-data
//!   explorer. One implementation is chosen at construction.
//! - **HTTP provider** ([`HttpChainProvider`]) — production implementation
//!   speaking indexer JSON-RPC (`alchemy_getAssetTransfers`-style), node
//!   JSON-RPC (`eth_getTransactionByHash`), and explorer REST
//!   (`/blobs/{hash}/data`).
//! - **Locator** ([`locate_blob_transaction`]) — newest-first sequential
//!   scan for the publisher's latest self-addressed blob transaction.
//! - **Assembler** ([`assemble_blob_hex`]) — ordered fetch and
//!   concatenation of raw blob payloads.
//! - **Decoder** ([`decoder`]) — pure removal of the one-byte-per-32-byte
//!   field-element padding imposed by the blob-commitment scheme.
//!
//! All remote operations are async and strictly sequential per invocation;
//! the crate holds no state between invocations.

pub mod assembler;
pub mod config;
pub mod decoder;
pub mod error;
pub mod http_provider;
pub mod locator;
pub mod provider;

// Re-export primary types.
pub use assembler::{assemble_blob_hex, AssembleError};
pub use config::{ConfigError, ProviderConfig};
pub use decoder::{
    decode_blob_hex, decode_blob_hex_strict, decode_with_options, decoded_payload_bytes,
    payload_to_string, DecodeError, DecodeOptions, BLOB_BYTES, FIELD_ELEMENT_HEX_LEN,
    NOMINAL_DECODED_HEX_LEN, USABLE_HEX_PER_ELEMENT,
};
pub use error::ChainError;
pub use http_provider::HttpChainProvider;
pub use locator::{locate_blob_transaction, BlobTransaction, CandidateScan, LocateError};
pub use provider::{
    ChainDataProvider, TransactionDetail, TransferSummary, MAX_BLOBS_PER_TX,
};

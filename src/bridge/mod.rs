// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API a containing spatial index talks to. It
// wraps the pure, stateless `kernels` in two shapes:
//
//   1. [Stateless API]  -> `encode_record`, `decode_records`, `analyze_record`
//         |
//         `-> calls `kernels::{encode_into, RecordIter, decode_header}` directly,
//             with `max_data_len` supplied per call.
//
//   2. [Stateful Facade (PointCodec)] -> bound to a shared `Arc<PointFormat>`
//         |
//         `-> a. checks every point / record against the dataset layout
//         |
//         `-> b. addresses slot `i` at byte offset `i * stride` for O(1)
//                random access and in-place slot reuse
//
// Data Flow:
//
//   Point --(kernels::record::encode)--> bytes
//   bytes --(kernels::record::decode_from_buffer)--> (Point<'buf>, remainder)
//   Read  --(kernels::stream::decode_from_stream)--> (Point<'static>, max_data_len)
//
// ====================================================================================
pub mod codec;
pub mod stateless_api;

// --- High-Level Stateful API ---
pub use codec::PointCodec;

// --- Low-Level Stateless API ---
pub use stateless_api::{analyze_record, decode_records, encode_record, RecordStats};

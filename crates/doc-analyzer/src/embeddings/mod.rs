//! Local embedding backends

mod onnx_embedder;

pub use onnx_embedder::OnnxEmbedder;

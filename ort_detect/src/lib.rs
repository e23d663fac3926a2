//! ONNX Runtime glue for the detection demo: session setup, frame
//! preprocessing and decoding of raw darknet-style output tensors.

pub mod decode;
pub mod detector;
pub mod preprocess;
pub mod session;

pub use detector::Detector;

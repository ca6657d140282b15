pub mod annotator;
pub mod contours;
pub mod fusion;
pub mod matcher;
pub mod ocr;
pub mod pipeline;
pub mod regions;
pub mod screenshot;
pub mod text;
pub mod traits;
pub mod types;

//! Value types shared across the document model

mod vector;

pub use vector::Vector2;

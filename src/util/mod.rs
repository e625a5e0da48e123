//! Small byte-level helpers shared by the container and QFS codecs.

pub mod le;

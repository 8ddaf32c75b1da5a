//! Unit tests for the selection codec and mask export.

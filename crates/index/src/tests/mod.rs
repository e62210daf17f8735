//! End-to-end retrieval scenarios.

mod retrieval;

//! Test suites for gateway bootstrap and end-to-end dispatch.

mod support;

// Test helpers shared by the integration suites
//
// BNI endpoints are stood in for by a wiremock server per test; credentials
// point at that server and time is driven through a MockClock.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//
//   let server = MockServer::start().await;
//   let clock = MockClock::starting_now();
//   let client = helpers::h2h_client(&server, &clock);

#![allow(dead_code)]


pub use bni_mock::*;
pub use test_data::*;

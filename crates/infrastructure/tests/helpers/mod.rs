#![allow(unused_imports)]

pub mod manual_clock;
pub mod mock_resolver;
pub mod ptr_server_mock;

pub use manual_clock::ManualClock;
pub use mock_resolver::MockReverseResolver;
pub use ptr_server_mock::{MockPtrServer, PtrServerMode};

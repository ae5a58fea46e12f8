//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        FrontDesk                                │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐      │   │
//! │  │  │ Hotel        │  │ Checkout     │  │ ConfigState      │      │   │
//! │  │  │ (persisted   │  │ Session      │  │                  │      │   │
//! │  │  │  via repo)   │  │ (transient)  │  │ hotel_name       │      │   │
//! │  │  │ Screen       │  │              │  │ currency format  │      │   │
//! │  │  └──────────────┘  └──────────────┘  └──────────────────┘      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  One command at a time: the loop owns FrontDesk, no locking needed.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod checkout;
mod config;
mod desk;

pub use checkout::CheckoutSession;
pub use config::ConfigState;
pub use desk::{Clock, FrontDesk};

//! # Front Desk State
//!
//! The loaded hotel, the screen being shown and the transient checkout
//! session, owned by the single command loop.
//!
//! ## Command Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  dispatch(command)                                                      │
//! │       │                                                                 │
//! │       ├── hotel.<operation>(...)   mutates, records dirty collections  │
//! │       ├── desk.apply(Action)       moves the screen                     │
//! │       ▼                                                                 │
//! │  desk.persist()                    repo.save_dirty(&mut hotel)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pousada_core::navigation::{resolve, transition};
use pousada_core::{Action, Hotel, Screen};
use pousada_store::HotelRepository;
use tracing::debug;

use super::checkout::CheckoutSession;
use super::config::ConfigState;
use crate::error::{ApiError, ErrorCode};

/// Source of the current instant.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct FrontDesk {
    repo: HotelRepository,
    config: ConfigState,
    clock: Clock,
    pub(crate) hotel: Hotel,
    pub(crate) screen: Screen,
    pub(crate) checkout: Option<CheckoutSession>,
}

impl FrontDesk {
    /// Loads the hotel state from `repo`.
    pub async fn load(repo: HotelRepository, config: ConfigState) -> Self {
        let hotel = repo.load().await;
        FrontDesk {
            repo,
            config,
            clock: Arc::new(Utc::now),
            hotel,
            screen: Screen::default(),
            checkout: None,
        }
    }

    /// Replaces the clock (tests pin the instant).
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn checkout(&self) -> Option<&CheckoutSession> {
        self.checkout.as_ref()
    }

    pub(crate) fn checkout_mut(&mut self) -> Result<&mut CheckoutSession, ApiError> {
        self.checkout
            .as_mut()
            .ok_or_else(|| ApiError::new(ErrorCode::BusinessLogic, "No checkout in progress"))
    }

    /// Moves the screen and drops a checkout session the screen left behind.
    pub(crate) fn apply(&mut self, action: Action) {
        let next = transition(&self.screen, action, &self.hotel.rooms);
        debug!(from = ?self.screen, to = ?next, "Screen changed");
        self.screen = next;
        self.sync_checkout();
    }

    /// Re-resolves the current screen after a state change.
    pub(crate) fn revalidate(&mut self) {
        self.screen = resolve(std::mem::take(&mut self.screen), &self.hotel.rooms);
        self.sync_checkout();
    }

    fn sync_checkout(&mut self) {
        let keep = matches!(
            (&self.screen, &self.checkout),
            (Screen::Checkout { room_id }, Some(session)) if *room_id == session.room_id
        );
        if !keep && self.checkout.take().is_some() {
            debug!("Checkout session dropped");
        }
    }

    /// Writes back every collection the last command changed.
    pub async fn persist(&mut self) -> Result<(), ApiError> {
        self.repo.save_dirty(&mut self.hotel).await?;
        Ok(())
    }
}
